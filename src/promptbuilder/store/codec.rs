//! JSON encoding of templates for persistence and import/export.
//!
//! A candidate record is accepted only when it is a JSON object with a non-empty
//! string `id` and an array `sections`. Records that pass the structural check are
//! then decoded with serde defaults for the optional fields and normalized so the
//! section invariants hold (see [`Template::normalize`]).

use crate::error::{PromptError, Result};
use crate::model::{Template, TemplateId};
use serde_json::Value;
use tracing::warn;

/// Key holding the JSON array of every template.
pub const TEMPLATES_KEY: &str = "templates";
/// Key holding the current template as a single JSON object.
pub const CURRENT_TEMPLATE_KEY: &str = "current_template";

/// Structural check applied to every record entering the store.
pub fn validate(candidate: &Value) -> Result<()> {
    let obj = candidate
        .as_object()
        .ok_or_else(|| PromptError::Validation("expected a JSON object".to_string()))?;

    match obj.get("id").and_then(Value::as_str) {
        Some(id) if !id.trim().is_empty() => {}
        _ => {
            return Err(PromptError::Validation(
                "missing or empty `id`".to_string(),
            ))
        }
    }

    if !obj.get("sections").is_some_and(Value::is_array) {
        return Err(PromptError::Validation(
            "`sections` must be an array".to_string(),
        ));
    }
    Ok(())
}

/// Validates, decodes and normalizes one template record.
pub fn decode_template(candidate: Value) -> Result<Template> {
    validate(&candidate)?;
    let mut template: Template = serde_json::from_value(candidate)
        .map_err(|e| PromptError::Validation(e.to_string()))?;
    template.normalize();
    Ok(template)
}

/// Parses JSON text into a template. Unparseable text is a serialization error;
/// parseable text that fails the structural check is a validation error.
pub fn parse_template(json: &str) -> Result<Template> {
    let value: Value = serde_json::from_str(json).map_err(PromptError::Serialization)?;
    decode_template(value)
}

/// Decodes the persisted collection. Entries that fail validation are dropped, as
/// are later duplicates of an id. Returns `None` when the text is not an array.
pub fn decode_collection(json: &str) -> Option<Vec<Template>> {
    let entries = match serde_json::from_str::<Value>(json) {
        Ok(Value::Array(entries)) => entries,
        Ok(_) => {
            warn!("persisted templates record is not an array, ignoring it");
            return None;
        }
        Err(e) => {
            warn!(error = %e, "persisted templates record does not parse, ignoring it");
            return None;
        }
    };

    let mut seen: Vec<TemplateId> = Vec::with_capacity(entries.len());
    let mut templates = Vec::with_capacity(entries.len());
    for (position, entry) in entries.into_iter().enumerate() {
        match decode_template(entry) {
            Ok(template) if seen.contains(&template.id) => {
                warn!(id = %template.id, "dropping duplicate template id");
            }
            Ok(template) => {
                seen.push(template.id.clone());
                templates.push(template);
            }
            Err(e) => warn!(position, error = %e, "dropping invalid persisted template"),
        }
    }
    Some(templates)
}

pub fn encode_template(template: &Template) -> Result<String> {
    serde_json::to_string(template).map_err(PromptError::Serialization)
}

pub fn encode_collection(templates: &[Template]) -> Result<String> {
    serde_json::to_string(templates).map_err(PromptError::Serialization)
}

/// Pretty JSON used for file export.
pub fn export_json(template: &Template) -> Result<String> {
    serde_json::to_string_pretty(template).map_err(PromptError::Serialization)
}

/// Suggested export filename: `<template name>.json`, or `template.json` when the
/// name has nothing usable in it.
pub fn export_filename(template: &Template) -> String {
    let stem = sanitize_filename(&template.name);
    if stem.is_empty() {
        "template.json".to_string()
    } else {
        format!("{}.json", stem)
    }
}

pub(crate) fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .trim_start_matches('.')
        .to_string()
}
