//! # Rendering
//!
//! Turns command results into terminal text. Every `render_*` function returns a
//! `String` so layout can be tested without a terminal; `print_*` wrappers write
//! to stdout.
//!
//! Layout math (widths, truncation, padding) is Unicode-aware via `unicode-width`.
//! Colors come from `colored`, which drops them when stdout is not a terminal.

use chrono::{DateTime, Utc};
use colored::*;
use promptbuilder::commands::{CmdMessage, MessageLevel};
use promptbuilder::config::{PromptConfig, CONFIG_KEYS};
use promptbuilder::estimator::TextStats;
use promptbuilder::index::DisplayTemplate;
use promptbuilder::model::Template;
use unicode_width::UnicodeWidthStr;

pub const LINE_WIDTH: usize = 100;
pub const TIME_WIDTH: usize = 14;
const ID_WIDTH: usize = 10;
const KEY_WIDTH: usize = 14;
const CURRENT_MARKER: &str = "●";

pub fn render_messages(messages: &[CmdMessage]) -> String {
    messages
        .iter()
        .map(|m| {
            let line = match m.level {
                MessageLevel::Info => m.content.dimmed(),
                MessageLevel::Success => m.content.green(),
                MessageLevel::Error => m.content.red(),
            };
            format!("{}\n", line)
        })
        .collect()
}

pub fn print_messages(messages: &[CmdMessage]) {
    let output = render_messages(messages);
    if !output.is_empty() {
        print!("{}", output);
    }
}

/// One line per template: marker, position, name, short id, age.
pub fn render_template_list(templates: &[DisplayTemplate]) -> String {
    if templates.is_empty() {
        return "No templates.\n".to_string();
    }

    let mut out = String::new();
    for dt in templates {
        let marker = if dt.is_current { CURRENT_MARKER } else { " " };
        let position = format!("{}. ", dt.position);
        let id = format!("{:<width$}", dt.template.id.short(), width = ID_WIDTH);

        let fixed = 2 + position.width() + ID_WIDTH + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed);
        let name = truncate_to_width(&dt.template.name, available);
        let padding = " ".repeat(available.saturating_sub(name.width()));

        let name = if dt.is_current {
            name.bold()
        } else {
            name.normal()
        };
        out.push_str(&format!(
            "{} {}{}{}{}{}\n",
            marker.yellow(),
            position,
            name,
            padding,
            id.dimmed(),
            format_time_ago(dt.template.updated_at).dimmed()
        ));
    }
    out
}

/// Sections in rank order with their flags and a one-line value preview.
pub fn render_sections(template: &Template) -> String {
    let mut out = format!("{}\n", template.name.bold());
    let fixed = 4 + KEY_WIDTH + 1;
    let available = LINE_WIDTH.saturating_sub(fixed);

    for section in template.ordered_sections() {
        let check = if section.enabled { "[x]" } else { "[ ]" };
        let key = format!("{:<width$}", section.key.as_str(), width = KEY_WIDTH);
        let preview: String = section
            .value
            .chars()
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let preview = truncate_to_width(preview.trim(), available);

        let label = if section.required {
            format!("{} *", section.title)
        } else {
            section.title.clone()
        };
        let body = if preview.is_empty() {
            label.dimmed().to_string()
        } else {
            format!("{}: {}", label, preview)
        };

        let check = if section.enabled {
            check.green()
        } else {
            check.dimmed()
        };
        out.push_str(&format!("{} {} {}\n", check, key.cyan(), body));
    }
    out
}

pub fn render_stats(stats: &TextStats) -> String {
    format!(
        "{:>8} characters\n{:>8} words\n{:>8} tokens (est.)\n",
        stats.characters, stats.words, stats.tokens
    )
}

pub fn render_issues(issues: &[String]) -> String {
    issues
        .iter()
        .map(|issue| format!("{} {}\n", "!".yellow(), issue))
        .collect()
}

pub fn render_config(config: &PromptConfig) -> String {
    CONFIG_KEYS
        .iter()
        .map(|key| {
            let value = config.get(key).unwrap_or_default();
            format!("{} = {}\n", key, value)
        })
        .collect()
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;

    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
