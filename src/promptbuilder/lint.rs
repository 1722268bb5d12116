//! # Template Linting
//!
//! A [`Linter`] runs an ordered list of [`LintRule`]s against a template and collects
//! one message per failing rule, in rule order. Rules are independent: each one sees
//! the template as-is and may fire regardless of what the others reported.
//!
//! The default rule set checks the two required sections:
//!
//! | Rule | Fires when |
//! |------|------------|
//! | goal | `goal` missing, disabled, or trimmed value shorter than 10 characters |
//! | output format | `outputFormat` missing, disabled, or trimmed value empty |
//!
//! New checks are added by implementing [`LintRule`] and appending it with
//! [`Linter::with_rule`]; existing rules are not affected.

use crate::model::{SectionKey, Template};

pub const GOAL_MIN_CHARS: usize = 10;
pub const GOAL_ISSUE: &str = "Goal is required and should be at least 10 characters.";
pub const OUTPUT_FORMAT_ISSUE: &str = "Output format is required.";

pub trait LintRule {
    /// Returns the issue message when the template fails this rule.
    fn check(&self, template: &Template) -> Option<String>;
}

/// A section that must be present, enabled, and hold at least `min_chars`
/// characters once trimmed. `min_chars == 0` still demands a non-empty value.
#[derive(Debug, Clone)]
pub struct RequiredSection {
    pub key: SectionKey,
    pub min_chars: usize,
    pub message: String,
}

impl RequiredSection {
    pub fn new(key: SectionKey, min_chars: usize, message: impl Into<String>) -> Self {
        Self {
            key,
            min_chars,
            message: message.into(),
        }
    }
}

impl LintRule for RequiredSection {
    fn check(&self, template: &Template) -> Option<String> {
        let passes = template.section(self.key).is_some_and(|s| {
            let chars = s.value.trim().chars().count();
            s.enabled && chars > 0 && chars >= self.min_chars
        });
        if passes {
            None
        } else {
            Some(self.message.clone())
        }
    }
}

pub struct Linter {
    rules: Vec<Box<dyn LintRule>>,
}

impl Default for Linter {
    fn default() -> Self {
        Self::with_goal_min_chars(GOAL_MIN_CHARS)
    }
}

impl Linter {
    fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// The default rule set with a custom goal threshold. The goal message keeps
    /// its default wording only when the threshold is the default one.
    pub fn with_goal_min_chars(min_chars: usize) -> Self {
        let goal_message = if min_chars == GOAL_MIN_CHARS {
            GOAL_ISSUE.to_string()
        } else {
            format!(
                "Goal is required and should be at least {} characters.",
                min_chars
            )
        };
        Self::empty()
            .with_rule(RequiredSection::new(
                SectionKey::Goal,
                min_chars,
                goal_message,
            ))
            .with_rule(RequiredSection::new(
                SectionKey::OutputFormat,
                0,
                OUTPUT_FORMAT_ISSUE,
            ))
    }

    pub fn with_rule<R: LintRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn lint(&self, template: Option<&Template>) -> Vec<String> {
        match template {
            Some(tpl) => self.rules.iter().filter_map(|r| r.check(tpl)).collect(),
            None => Vec::new(),
        }
    }
}

/// Lints with the default rule set.
pub fn lint(template: Option<&Template>) -> Vec<String> {
    Linter::default().lint(template)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Locale;

    fn set(tpl: &mut Template, key: SectionKey, value: &str, enabled: bool) {
        let s = tpl.section_mut(key).unwrap();
        s.value = value.to_string();
        s.enabled = enabled;
    }

    #[test]
    fn test_short_goal_and_disabled_output_format() {
        let mut tpl = Template::new(Locale::En);
        set(&mut tpl, SectionKey::Goal, "Hi", true);
        set(&mut tpl, SectionKey::OutputFormat, "Markdown table", false);

        assert_eq!(lint(Some(&tpl)), vec![GOAL_ISSUE, OUTPUT_FORMAT_ISSUE]);
    }

    #[test]
    fn test_clean_template() {
        let mut tpl = Template::new(Locale::En);
        set(&mut tpl, SectionKey::Goal, "Summarize the report", true);
        set(&mut tpl, SectionKey::OutputFormat, "Bullets", true);
        assert!(lint(Some(&tpl)).is_empty());
    }

    #[test]
    fn test_goal_counts_trimmed_characters() {
        let mut tpl = Template::new(Locale::En);
        set(&mut tpl, SectionKey::Goal, "   123456789   ", true);
        set(&mut tpl, SectionKey::OutputFormat, "JSON", true);
        assert_eq!(lint(Some(&tpl)), vec![GOAL_ISSUE]);

        set(&mut tpl, SectionKey::Goal, "1234567890", true);
        assert!(lint(Some(&tpl)).is_empty());
    }

    #[test]
    fn test_missing_sections_fire() {
        let mut tpl = Template::new(Locale::En);
        tpl.sections.clear();
        assert_eq!(lint(Some(&tpl)).len(), 2);
    }

    #[test]
    fn test_absent_template_has_no_issues() {
        assert!(lint(None).is_empty());
    }

    struct NoTags;

    impl LintRule for NoTags {
        fn check(&self, template: &Template) -> Option<String> {
            template.tags.is_empty().then(|| "Add at least one tag.".to_string())
        }
    }

    #[test]
    fn test_custom_rule_appends_after_defaults() {
        let tpl = Template::new(Locale::En);
        let issues = Linter::default().with_rule(NoTags).lint(Some(&tpl));
        assert_eq!(
            issues,
            vec![GOAL_ISSUE, OUTPUT_FORMAT_ISSUE, "Add at least one tag."]
        );
    }

    #[test]
    fn test_custom_goal_threshold() {
        let mut tpl = Template::new(Locale::En);
        set(&mut tpl, SectionKey::Goal, "Short", true);
        set(&mut tpl, SectionKey::OutputFormat, "Text", true);
        assert!(Linter::with_goal_min_chars(3).lint(Some(&tpl)).is_empty());
        assert_eq!(
            Linter::with_goal_min_chars(20).lint(Some(&tpl)),
            vec!["Goal is required and should be at least 20 characters."]
        );
    }
}
