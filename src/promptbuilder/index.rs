//! # Template Selection
//!
//! Ids are long and opaque, so users pick templates in one of two ways:
//!
//! - **Position**: `1`, `2`, ...: the 1-based position in the collection as `list`
//!   shows it (newest copies first).
//! - **Id**: the full id, or any prefix of it that matches exactly one template.
//!
//! A purely numeric input is always read as a position. Prefix it with `id:` to
//! select by id instead (`id:42` for an imported template whose id is `42`).

use crate::error::{PromptError, Result};
use crate::model::{Template, TemplateId};
use std::str::FromStr;

const ID_PREFIX: &str = "id:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSelector {
    Position(usize),
    Id(String),
}

impl std::fmt::Display for TemplateSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSelector::Position(n) => write!(f, "{}", n),
            TemplateSelector::Id(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for TemplateSelector {
    type Err = PromptError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(PromptError::Api("Empty template selector".to_string()));
        }
        if let Some(id) = s.strip_prefix(ID_PREFIX) {
            let id = id.trim();
            if id.is_empty() {
                return Err(PromptError::Api("Empty template id".to_string()));
            }
            return Ok(TemplateSelector::Id(id.to_string()));
        }
        match s.parse::<usize>() {
            Ok(0) => Err(PromptError::Api(
                "Template positions start at 1".to_string(),
            )),
            Ok(n) => Ok(TemplateSelector::Position(n)),
            Err(_) => Ok(TemplateSelector::Id(s.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DisplayTemplate {
    pub position: usize,
    pub is_current: bool,
    pub template: Template,
}

/// Pairs each template with its 1-based position, flagging the current one.
pub fn index_templates(
    templates: &[Template],
    current: Option<&TemplateId>,
) -> Vec<DisplayTemplate> {
    templates
        .iter()
        .enumerate()
        .map(|(i, t)| DisplayTemplate {
            position: i + 1,
            is_current: Some(&t.id) == current,
            template: t.clone(),
        })
        .collect()
}

pub fn resolve(templates: &[Template], selector: &TemplateSelector) -> Result<TemplateId> {
    match selector {
        TemplateSelector::Position(n) => n
            .checked_sub(1)
            .and_then(|i| templates.get(i))
            .map(|t| t.id.clone())
            .ok_or_else(|| PromptError::TemplateNotFound(format!("position {}", n))),
        TemplateSelector::Id(wanted) => {
            if let Some(t) = templates.iter().find(|t| t.id.as_str() == wanted) {
                return Ok(t.id.clone());
            }
            let matches: Vec<&Template> = templates
                .iter()
                .filter(|t| t.id.as_str().starts_with(wanted.as_str()))
                .collect();
            match matches.as_slice() {
                [only] => Ok(only.id.clone()),
                [] => Err(PromptError::TemplateNotFound(wanted.clone())),
                _ => Err(PromptError::Api(format!(
                    "Id prefix {} matches {} templates",
                    wanted,
                    matches.len()
                ))),
            }
        }
    }
}
