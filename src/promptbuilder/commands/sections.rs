use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::SectionKey;
use crate::store::{StorageBackend, TemplateStore};

const NO_TEMPLATE: &str = "No current template.";

pub fn list<B: StorageBackend>(store: &TemplateStore<B>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_template(store.current().cloned()))
}

pub fn set_enabled<B: StorageBackend>(
    store: &mut TemplateStore<B>,
    key: SectionKey,
    enabled: bool,
) -> Result<CmdResult> {
    let message = if store.set_section_enabled(key, enabled) {
        let verb = if enabled { "enabled" } else { "disabled" };
        CmdMessage::success(format!("Section {}: {}", verb, key.title()))
    } else {
        CmdMessage::info(NO_TEMPLATE)
    };
    Ok(CmdResult::default().with_message(message))
}

pub fn set_value<B: StorageBackend>(
    store: &mut TemplateStore<B>,
    key: SectionKey,
    value: String,
) -> Result<CmdResult> {
    let message = if store.set_section_value(key, value) {
        CmdMessage::success(format!("Section updated: {}", key.title()))
    } else {
        CmdMessage::info(NO_TEMPLATE)
    };
    Ok(CmdResult::default().with_message(message))
}

pub fn clear_all<B: StorageBackend>(store: &mut TemplateStore<B>) -> Result<CmdResult> {
    let message = if store.clear_all_values() {
        CmdMessage::success("Cleared all section values.")
    } else {
        CmdMessage::info(NO_TEMPLATE)
    };
    Ok(CmdResult::default().with_message(message))
}

pub fn toggle_fences<B: StorageBackend>(store: &mut TemplateStore<B>) -> Result<CmdResult> {
    let message = match store.toggle_fences() {
        Some(true) => CmdMessage::success("Code fences on."),
        Some(false) => CmdMessage::success("Code fences off."),
        None => CmdMessage::info(NO_TEMPLATE),
    };
    Ok(CmdResult::default().with_message(message))
}

pub fn move_up<B: StorageBackend>(
    store: &mut TemplateStore<B>,
    key: Option<SectionKey>,
) -> Result<CmdResult> {
    if store.current().is_none() {
        return Ok(CmdResult::default().with_message(CmdMessage::info(NO_TEMPLATE)));
    }
    let Some(target) = key.or(store.last_edited()) else {
        return Ok(no_target());
    };
    let message = if store.move_section_up(key) {
        CmdMessage::success(format!("Moved up: {}", target.title()))
    } else {
        CmdMessage::info(format!("{} is already first.", target.title()))
    };
    Ok(CmdResult::default()
        .with_message(message)
        .with_template(store.current().cloned()))
}

pub fn move_down<B: StorageBackend>(
    store: &mut TemplateStore<B>,
    key: Option<SectionKey>,
) -> Result<CmdResult> {
    if store.current().is_none() {
        return Ok(CmdResult::default().with_message(CmdMessage::info(NO_TEMPLATE)));
    }
    let Some(target) = key.or(store.last_edited()) else {
        return Ok(no_target());
    };
    let message = if store.move_section_down(key) {
        CmdMessage::success(format!("Moved down: {}", target.title()))
    } else {
        CmdMessage::info(format!("{} is already last.", target.title()))
    };
    Ok(CmdResult::default()
        .with_message(message)
        .with_template(store.current().cloned()))
}

fn no_target() -> CmdResult {
    CmdResult::default().with_message(CmdMessage::info(
        "No section edited yet. Name the section to move.",
    ))
}
