//! # Markdown Synthesis
//!
//! Turns a template into a single markdown document:
//!
//! 1. Sections are taken in ascending `order`.
//! 2. A section is skipped when it is disabled or its trimmed value is empty.
//! 3. Each kept section becomes `"## {title}\n{trimmed value}"`.
//! 4. Blocks are joined with one blank line.
//! 5. With `fences` on, the body is wrapped in a triple-backtick fence, opening and
//!    closing fence each on their own line, even when the body is empty.
//!
//! The function is total and deterministic; a missing template yields `""`.

use crate::model::Template;

const FENCE: &str = "```";

pub fn synthesize(template: Option<&Template>) -> String {
    let Some(template) = template else {
        return String::new();
    };

    let body = template
        .ordered_sections()
        .into_iter()
        .filter(|s| s.enabled)
        .filter_map(|s| {
            let value = s.value.trim();
            if value.is_empty() {
                None
            } else {
                Some(format!("## {}\n{}", s.title, value))
            }
        })
        .collect::<Vec<_>>()
        .join("\n\n");

    if template.fences {
        format!("{FENCE}\n{body}\n{FENCE}")
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Locale, SectionKey};

    fn template_with(values: &[(SectionKey, &str, bool)]) -> Template {
        let mut tpl = Template::new(Locale::En);
        for (key, value, enabled) in values {
            let section = tpl.section_mut(*key).unwrap();
            section.value = value.to_string();
            section.enabled = *enabled;
        }
        tpl
    }

    #[test]
    fn test_absent_template_is_empty() {
        assert_eq!(synthesize(None), "");
    }

    #[test]
    fn test_fenced_single_section() {
        let mut tpl = template_with(&[(SectionKey::Goal, "Write a haiku", true)]);
        tpl.fences = true;
        assert_eq!(
            synthesize(Some(&tpl)),
            "```\n## Goal\nWrite a haiku\n```"
        );
    }

    #[test]
    fn test_fences_wrap_empty_body() {
        let mut tpl = Template::new(Locale::En);
        tpl.fences = true;
        assert_eq!(synthesize(Some(&tpl)), "```\n\n```");
    }

    #[test]
    fn test_skips_disabled_and_blank_sections() {
        let tpl = template_with(&[
            (SectionKey::Context, "Hidden context", false),
            (SectionKey::Goal, "  Explain lifetimes  ", true),
            (SectionKey::OutputFormat, "   ", true),
            (SectionKey::Constraints, "Under 200 words", true),
        ]);
        let md = synthesize(Some(&tpl));
        assert_eq!(
            md,
            "## Goal\nExplain lifetimes\n\n## Constraints\nUnder 200 words"
        );
        assert!(!md.contains("Hidden context"));
        assert!(!md.contains("Output Format"));
    }

    #[test]
    fn test_follows_order_not_vec_position() {
        let mut tpl = template_with(&[
            (SectionKey::Context, "first in vec", true),
            (SectionKey::Goal, "second in vec", true),
        ]);
        let goal_order = tpl.section(SectionKey::Goal).unwrap().order;
        tpl.section_mut(SectionKey::Goal).unwrap().order = 0;
        tpl.section_mut(SectionKey::Context).unwrap().order = goal_order;

        let md = synthesize(Some(&tpl));
        assert!(md.starts_with("## Goal\nsecond in vec"));
        assert!(md.ends_with("## Context\nfirst in vec"));
    }

    #[test]
    fn test_deterministic() {
        let tpl = template_with(&[
            (SectionKey::Role, "Senior reviewer", true),
            (SectionKey::Goal, "Review this diff", true),
        ]);
        assert_eq!(synthesize(Some(&tpl)), synthesize(Some(&tpl)));
    }
}
