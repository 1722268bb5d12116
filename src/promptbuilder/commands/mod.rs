//! # Command Layer
//!
//! One module per group of user-facing operations. Each `run`-style function calls
//! exactly one [`TemplateStore`](crate::store::TemplateStore) operation and wraps the
//! outcome in a [`CmdResult`]: the data a UI needs to render, plus status messages.
//!
//! No-ops are not errors here either. They come back as `Ok` with an info message
//! ("Already at the top", "No section edited yet", ...). Only rejected input
//! (a bad import, an unknown selector) is an `Err`.

use crate::config::PromptConfig;
use crate::estimator::TextStats;
use crate::index::DisplayTemplate;
use crate::model::Template;
use std::path::PathBuf;

pub mod config;
pub mod export;
pub mod import;
pub mod preview;
pub mod sections;
pub mod templates;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// The current template after the operation, when the UI shows it.
    pub template: Option<Template>,
    pub listed_templates: Vec<DisplayTemplate>,
    pub markdown: Option<String>,
    pub html: Option<String>,
    pub stats: Option<TextStats>,
    pub issues: Vec<String>,
    pub paths: Vec<PathBuf>,
    pub config: Option<PromptConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_template(mut self, template: Option<Template>) -> Self {
        self.template = template;
        self
    }

    pub fn with_listed_templates(mut self, templates: Vec<DisplayTemplate>) -> Self {
        self.listed_templates = templates;
        self
    }

    pub fn with_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.paths = paths;
        self
    }

    pub fn with_config(mut self, config: PromptConfig) -> Self {
        self.config = Some(config);
        self
    }
}
