//! # Domain Model: Templates and Sections
//!
//! A [`Template`] is a named collection of labeled text [`Section`]s. Every template
//! carries exactly one section per [`SectionKey`]; sections are never added or removed
//! on their own, only toggled, edited and reordered.
//!
//! ## Ordering
//!
//! Each section has an `order` rank. Across a template the ranks form a permutation
//! of `0..N-1`: no duplicates, no gaps. Reordering swaps ranks between neighbours so
//! the permutation is preserved without renumbering the rest of the list.
//!
//! ## Titles
//!
//! A section's title is derived from its key through a fixed table
//! ([`SectionKey::title`]). Titles are serialized for readability, but whatever a
//! persisted record says is overwritten by [`Template::normalize`].
//!
//! ## Wire Format
//!
//! Templates serialize to camelCase JSON (`updatedAt`, `outputFormat`, ...), the same
//! shape that is written to persistence and produced by export.
//!
//! Decoding is strict only about identity (`id`, section `key`). Every other field
//! tolerates `null`, and unknown `locale`/`mode` values fall back to the default, so
//! a record written by another client is never dropped over a cosmetic field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub const DEFAULT_TEMPLATE_NAME: &str = "Untitled";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKey {
    Context,
    Role,
    Goal,
    Audience,
    Input,
    OutputFormat,
    Constraints,
    Process,
    Validation,
    StyleTone,
    ToolsApis,
    TokenBudget,
    Language,
    Determinism,
    DosDonts,
    FollowUp,
    Metadata,
}

impl SectionKey {
    /// All keys, in the order a fresh template lays them out.
    pub const ALL: [SectionKey; 17] = [
        SectionKey::Context,
        SectionKey::Role,
        SectionKey::Goal,
        SectionKey::Audience,
        SectionKey::Input,
        SectionKey::OutputFormat,
        SectionKey::Constraints,
        SectionKey::Process,
        SectionKey::Validation,
        SectionKey::StyleTone,
        SectionKey::ToolsApis,
        SectionKey::TokenBudget,
        SectionKey::Language,
        SectionKey::Determinism,
        SectionKey::DosDonts,
        SectionKey::FollowUp,
        SectionKey::Metadata,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKey::Context => "context",
            SectionKey::Role => "role",
            SectionKey::Goal => "goal",
            SectionKey::Audience => "audience",
            SectionKey::Input => "input",
            SectionKey::OutputFormat => "outputFormat",
            SectionKey::Constraints => "constraints",
            SectionKey::Process => "process",
            SectionKey::Validation => "validation",
            SectionKey::StyleTone => "styleTone",
            SectionKey::ToolsApis => "toolsApis",
            SectionKey::TokenBudget => "tokenBudget",
            SectionKey::Language => "language",
            SectionKey::Determinism => "determinism",
            SectionKey::DosDonts => "dosDonts",
            SectionKey::FollowUp => "followUp",
            SectionKey::Metadata => "metadata",
        }
    }

    /// Display label used as the markdown heading.
    pub fn title(&self) -> &'static str {
        match self {
            SectionKey::Context => "Context",
            SectionKey::Role => "Role",
            SectionKey::Goal => "Goal",
            SectionKey::Audience => "Audience",
            SectionKey::Input => "Input",
            SectionKey::OutputFormat => "Output Format",
            SectionKey::Constraints => "Constraints",
            SectionKey::Process => "Process",
            SectionKey::Validation => "Validation",
            SectionKey::StyleTone => "Style & Tone",
            SectionKey::ToolsApis => "Tools & APIs",
            SectionKey::TokenBudget => "Token Budget",
            SectionKey::Language => "Language",
            SectionKey::Determinism => "Determinism",
            SectionKey::DosDonts => "Do / Don't",
            SectionKey::FollowUp => "Follow-up",
            SectionKey::Metadata => "Metadata",
        }
    }

    /// Whether a freshly created template marks this section required (and enabled).
    pub fn required_by_default(&self) -> bool {
        matches!(self, SectionKey::Goal | SectionKey::OutputFormat)
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SectionKey {
    type Err = String;

    /// Accepts the canonical camelCase key as well as kebab/snake spellings
    /// (`output-format`, `output_format`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        SectionKey::ALL
            .iter()
            .find(|key| key.as_str().to_lowercase() == wanted)
            .copied()
            .ok_or_else(|| format!("Unknown section key: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub key: SectionKey,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub value: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub required: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub order: usize,
}

impl Section {
    pub fn new(key: SectionKey, order: usize) -> Self {
        let required = key.required_by_default();
        Self {
            key,
            title: key.title().to_string(),
            enabled: required,
            value: String::new(),
            required,
            order,
        }
    }
}

/// Opaque template identity. Generated ids are UUIDv4 strings, but imported
/// records may carry any non-empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(String);

impl TemplateId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, for list display.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TemplateId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TemplateId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locale::En => f.write_str("en"),
            Locale::Es => f.write_str("es"),
        }
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "es" => Ok(Locale::Es),
            other => Err(format!("Unsupported locale: {}", other)),
        }
    }
}

/// Verbosity hint. Carried through persistence; synthesis does not read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Concise,
    Verbose,
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "concise" => Ok(Mode::Concise),
            "verbose" => Ok(Mode::Verbose),
            other => Err(format!("Unsupported mode: {}", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: TemplateId,
    #[serde(default = "default_name", deserialize_with = "null_as_default")]
    pub name: String,
    pub sections: Vec<Section>,
    #[serde(default = "Utc::now", deserialize_with = "timestamp_or_now")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "known_or_default")]
    pub locale: Locale,
    #[serde(default, deserialize_with = "known_or_default")]
    pub mode: Mode,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fences: bool,
}

fn default_name() -> String {
    DEFAULT_TEMPLATE_NAME.to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Anything that is not a recognized variant name decodes to the default variant.
fn known_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + Default,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(raw
        .as_str()
        .and_then(|s| s.parse().ok())
        .unwrap_or_default())
}

fn timestamp_or_now<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = serde_json::Value::deserialize(deserializer)?;
    Ok(raw
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(Utc::now))
}

/// Trims a user-supplied name, falling back to [`DEFAULT_TEMPLATE_NAME`] when blank.
pub fn clean_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        DEFAULT_TEMPLATE_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

impl Template {
    /// A fresh template with the full section set: everything disabled except
    /// `goal` and `outputFormat`, which are enabled and required.
    pub fn new(locale: Locale) -> Self {
        Self {
            id: TemplateId::generate(),
            name: DEFAULT_TEMPLATE_NAME.to_string(),
            sections: default_sections(),
            updated_at: Utc::now(),
            tags: Vec::new(),
            locale,
            mode: Mode::Concise,
            fences: false,
        }
    }

    pub fn section(&self, key: SectionKey) -> Option<&Section> {
        self.sections.iter().find(|s| s.key == key)
    }

    pub fn section_mut(&mut self, key: SectionKey) -> Option<&mut Section> {
        self.sections.iter_mut().find(|s| s.key == key)
    }

    /// Sections sorted ascending by `order`.
    pub fn ordered_sections(&self) -> Vec<&Section> {
        let mut ordered: Vec<&Section> = self.sections.iter().collect();
        ordered.sort_by_key(|s| s.order);
        ordered
    }

    /// True when the `order` values are exactly `0..N-1`.
    pub fn has_valid_order(&self) -> bool {
        let mut orders: Vec<usize> = self.sections.iter().map(|s| s.order).collect();
        orders.sort_unstable();
        orders.iter().enumerate().all(|(idx, order)| idx == *order)
    }

    /// Sets `updated_at` to now, never moving it backwards.
    pub fn touch(&mut self) {
        let now = Utc::now();
        if now > self.updated_at {
            self.updated_at = now;
        }
    }

    /// Restores the structural invariants on a record that came from outside
    /// (persistence or import):
    ///
    /// 1. Duplicate keys keep their first occurrence.
    /// 2. Missing keys are appended as fresh, disabled, non-required sections.
    /// 3. Ranks are renumbered to `0..N-1`, keeping the relative order of the
    ///    record (ties broken by position).
    /// 4. Titles are re-derived from keys; a blank name becomes "Untitled".
    pub fn normalize(&mut self) {
        let mut seen = Vec::with_capacity(SectionKey::ALL.len());
        self.sections.retain(|s| {
            if seen.contains(&s.key) {
                false
            } else {
                seen.push(s.key);
                true
            }
        });

        let mut indexed: Vec<(usize, Section)> = self.sections.drain(..).enumerate().collect();
        indexed.sort_by_key(|(pos, s)| (s.order, *pos));
        let mut sections: Vec<Section> = indexed.into_iter().map(|(_, s)| s).collect();

        for key in SectionKey::ALL {
            if !seen.contains(&key) {
                sections.push(Section {
                    key,
                    title: String::new(),
                    enabled: false,
                    value: String::new(),
                    required: false,
                    order: 0,
                });
            }
        }

        for (order, section) in sections.iter_mut().enumerate() {
            section.order = order;
            section.title = section.key.title().to_string();
        }
        self.sections = sections;
        self.name = clean_name(&self.name);
    }
}

pub fn default_sections() -> Vec<Section> {
    SectionKey::ALL
        .iter()
        .enumerate()
        .map(|(order, key)| Section::new(*key, order))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template_shape() {
        let tpl = Template::new(Locale::En);
        assert_eq!(tpl.name, "Untitled");
        assert_eq!(tpl.sections.len(), 17);
        assert!(tpl.has_valid_order());
        assert!(!tpl.fences);

        let enabled: Vec<SectionKey> = tpl
            .sections
            .iter()
            .filter(|s| s.enabled)
            .map(|s| s.key)
            .collect();
        assert_eq!(enabled, vec![SectionKey::Goal, SectionKey::OutputFormat]);
        assert!(tpl.section(SectionKey::Goal).unwrap().required);
        assert!(!tpl.section(SectionKey::Role).unwrap().required);
    }

    #[test]
    fn test_generated_ids_differ() {
        let a = Template::new(Locale::En);
        let b = Template::new(Locale::En);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_section_key_parsing() {
        assert_eq!("goal".parse::<SectionKey>(), Ok(SectionKey::Goal));
        assert_eq!(
            "outputFormat".parse::<SectionKey>(),
            Ok(SectionKey::OutputFormat)
        );
        assert_eq!(
            "output-format".parse::<SectionKey>(),
            Ok(SectionKey::OutputFormat)
        );
        assert_eq!("DOS_DONTS".parse::<SectionKey>(), Ok(SectionKey::DosDonts));
        assert!("headline".parse::<SectionKey>().is_err());
    }

    #[test]
    fn test_titles_follow_lookup_table() {
        assert_eq!(SectionKey::StyleTone.title(), "Style & Tone");
        assert_eq!(SectionKey::DosDonts.title(), "Do / Don't");
        assert_eq!(SectionKey::FollowUp.title(), "Follow-up");
    }

    #[test]
    fn test_serializes_camel_case() {
        let tpl = Template::new(Locale::Es);
        let json = serde_json::to_value(&tpl).unwrap();
        assert!(json.get("updatedAt").is_some());
        assert_eq!(json["locale"], "es");
        assert_eq!(json["mode"], "concise");
        assert_eq!(json["sections"][5]["key"], "outputFormat");
    }

    #[test]
    fn test_normalize_repairs_orders_and_titles() {
        let mut tpl = Template::new(Locale::En);
        tpl.sections.truncate(3);
        tpl.sections[0].order = 7;
        tpl.sections[1].order = 7;
        tpl.sections[2].order = 2;
        tpl.sections[2].title = "Wrong".into();
        let dup = tpl.sections[0].clone();
        tpl.sections.push(dup);
        tpl.name = "   ".into();

        tpl.normalize();

        assert_eq!(tpl.sections.len(), 17);
        assert!(tpl.has_valid_order());
        let ordered: Vec<SectionKey> = tpl.ordered_sections().iter().map(|s| s.key).collect();
        assert_eq!(
            &ordered[..3],
            &[SectionKey::Goal, SectionKey::Context, SectionKey::Role]
        );
        assert_eq!(tpl.section(SectionKey::Goal).unwrap().title, "Goal");
        assert_eq!(tpl.name, "Untitled");
    }

    #[test]
    fn test_touch_is_monotonic() {
        let mut tpl = Template::new(Locale::En);
        let future = Utc::now() + chrono::Duration::hours(1);
        tpl.updated_at = future;
        tpl.touch();
        assert_eq!(tpl.updated_at, future);
    }

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name("  Copy "), "Copy");
        assert_eq!(clean_name(""), "Untitled");
    }
}
