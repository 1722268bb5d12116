use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::lint::Linter;
use crate::store::{StorageBackend, TemplateStore};
use pulldown_cmark::{html, Event, Options, Parser};

/// Synthesized markdown of the current template, optionally rendered to HTML.
pub fn show<B: StorageBackend>(store: &TemplateStore<B>, as_html: bool) -> Result<CmdResult> {
    let markdown = store.markdown();
    let mut result = CmdResult::default();
    if markdown.is_empty() {
        result.add_message(CmdMessage::info(
            "Nothing to show yet. Fill in an enabled section.",
        ));
    }
    if as_html {
        result.html = Some(render_html(&markdown));
    }
    result.markdown = Some(markdown);
    Ok(result)
}

pub fn stats<B: StorageBackend>(store: &TemplateStore<B>) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    result.stats = Some(store.stats());
    Ok(result)
}

pub fn lint<B: StorageBackend>(store: &TemplateStore<B>, linter: &Linter) -> Result<CmdResult> {
    let issues = store.issues(linter);
    let mut result = CmdResult::default();
    if issues.is_empty() {
        result.add_message(CmdMessage::success("No issues."));
    }
    result.issues = issues;
    Ok(result)
}

/// Markdown to HTML. Raw HTML in section values is emitted as escaped text,
/// never as markup.
pub fn render_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::all()).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
