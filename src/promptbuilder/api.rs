//! # API Facade
//!
//! The single entry point for every prompt-builder operation, whatever the UI.
//! It owns the [`TemplateStore`] and the loaded [`PromptConfig`], and for each call:
//!
//! - **Normalizes inputs**: section names and template selectors arrive as strings
//!   and are parsed here.
//! - **Dispatches** to exactly one function in `commands/*`.
//! - **Returns** a [`CmdResult`]. Nothing here prints or formats.
//!
//! `PromptApi<B: StorageBackend>` is generic over the backend: `FsBackend` in the
//! binary, `MemBackend` in tests.

use crate::commands::{self, config::ConfigAction, CmdResult};
use crate::config::PromptConfig;
use crate::error::{PromptError, Result};
use crate::index::TemplateSelector;
use crate::lint::Linter;
use crate::model::SectionKey;
use crate::store::{StorageBackend, TemplateStore};
use std::path::{Path, PathBuf};

pub struct PromptApi<B: StorageBackend> {
    store: TemplateStore<B>,
    config: PromptConfig,
    data_dir: PathBuf,
}

impl<B: StorageBackend> PromptApi<B> {
    /// Builds the store on `backend` and runs its initialization.
    pub fn new(backend: B, config: PromptConfig, data_dir: PathBuf) -> Self {
        let mut store =
            TemplateStore::with_backend(backend).with_default_locale(config.default_locale);
        store.initialize();
        Self {
            store,
            config,
            data_dir,
        }
    }

    pub fn store(&self) -> &TemplateStore<B> {
        &self.store
    }

    pub fn config(&self) -> &PromptConfig {
        &self.config
    }

    // --- Preview ---

    pub fn show(&self, as_html: bool) -> Result<CmdResult> {
        commands::preview::show(&self.store, as_html)
    }

    pub fn stats(&self) -> Result<CmdResult> {
        commands::preview::stats(&self.store)
    }

    pub fn lint(&self) -> Result<CmdResult> {
        let linter = Linter::with_goal_min_chars(self.config.min_goal_chars);
        commands::preview::lint(&self.store, &linter)
    }

    // --- Sections ---

    pub fn sections(&self) -> Result<CmdResult> {
        commands::sections::list(&self.store)
    }

    pub fn enable_section(&mut self, key: &str) -> Result<CmdResult> {
        commands::sections::set_enabled(&mut self.store, parse_key(key)?, true)
    }

    pub fn disable_section(&mut self, key: &str) -> Result<CmdResult> {
        commands::sections::set_enabled(&mut self.store, parse_key(key)?, false)
    }

    pub fn set_section(&mut self, key: &str, value: String) -> Result<CmdResult> {
        commands::sections::set_value(&mut self.store, parse_key(key)?, value)
    }

    pub fn clear_all(&mut self) -> Result<CmdResult> {
        commands::sections::clear_all(&mut self.store)
    }

    pub fn toggle_fences(&mut self) -> Result<CmdResult> {
        commands::sections::toggle_fences(&mut self.store)
    }

    pub fn move_up(&mut self, key: Option<&str>) -> Result<CmdResult> {
        let key = key.map(parse_key).transpose()?;
        commands::sections::move_up(&mut self.store, key)
    }

    pub fn move_down(&mut self, key: Option<&str>) -> Result<CmdResult> {
        let key = key.map(parse_key).transpose()?;
        commands::sections::move_down(&mut self.store, key)
    }

    // --- Templates ---

    pub fn list(&self) -> Result<CmdResult> {
        commands::templates::list(&self.store)
    }

    pub fn save_as(&mut self, name: &str) -> Result<CmdResult> {
        commands::templates::save_as(&mut self.store, name)
    }

    pub fn rename(&mut self, name: &str) -> Result<CmdResult> {
        commands::templates::rename(&mut self.store, name)
    }

    pub fn switch(&mut self, selector: &str) -> Result<CmdResult> {
        let selector: TemplateSelector = selector.parse()?;
        commands::templates::switch(&mut self.store, &selector)
    }

    pub fn delete(&mut self, selector: Option<&str>) -> Result<CmdResult> {
        let selector = selector.map(str::parse::<TemplateSelector>).transpose()?;
        commands::templates::delete(&mut self.store, selector.as_ref())
    }

    // --- Files ---

    pub fn export(&self, output: Option<&Path>, all: bool) -> Result<CmdResult> {
        let dir = self.export_dir()?;
        if all {
            commands::export::run_all(&self.store, &dir, output)
        } else {
            commands::export::run(&self.store, &dir, output)
        }
    }

    pub fn import(&mut self, path: &Path) -> Result<CmdResult> {
        commands::import::run(&mut self.store, path)
    }

    /// The synthesized markdown, for callers that hand it to the clipboard.
    pub fn markdown(&self) -> String {
        self.store.markdown()
    }

    // --- Config ---

    pub fn config_cmd(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let result = commands::config::run(&self.data_dir, action)?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }

    fn export_dir(&self) -> Result<PathBuf> {
        match &self.config.export_dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().map_err(PromptError::Io),
        }
    }
}

fn parse_key(key: &str) -> Result<SectionKey> {
    key.parse::<SectionKey>().map_err(PromptError::Api)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::mem_backend::MemBackend;

    fn api() -> (PromptApi<MemBackend>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let api = PromptApi::new(
            MemBackend::new(),
            PromptConfig::default(),
            dir.path().to_path_buf(),
        );
        (api, dir)
    }

    #[test]
    fn test_new_initializes_store() {
        let (api, _dir) = api();
        assert!(api.store().current().is_some());
    }

    #[test]
    fn test_new_uses_configured_locale() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = PromptConfig::default();
        config.default_locale = crate::model::Locale::Es;
        let api = PromptApi::new(MemBackend::new(), config, dir.path().to_path_buf());
        assert_eq!(api.store().current().unwrap().locale, crate::model::Locale::Es);
    }

    #[test]
    fn test_section_names_are_parsed() {
        let (mut api, _dir) = api();
        api.set_section("style-tone", "Warm".into()).unwrap();
        api.enable_section("StyleTone").unwrap();
        assert!(api.markdown().contains("## Style & Tone\nWarm"));
    }

    #[test]
    fn test_unknown_section_is_error() {
        let (mut api, _dir) = api();
        assert!(matches!(
            api.set_section("nonsense", "x".into()),
            Err(PromptError::Api(_))
        ));
        assert!(api.move_up(Some("nonsense")).is_err());
    }

    #[test]
    fn test_switch_parses_selector() {
        let (mut api, _dir) = api();
        api.save_as("Second").unwrap();
        api.switch("2").unwrap();
        assert_eq!(api.store().current().unwrap().name, "Untitled");
        assert!(api.switch("0").is_err());
    }

    #[test]
    fn test_lint_uses_configured_threshold() {
        let (mut api, _dir) = api();
        api.set_section("goal", "Do it".into()).unwrap();
        api.set_section("output-format", "Bullets".into()).unwrap();
        assert_eq!(api.lint().unwrap().issues.len(), 1);

        let res = api
            .config_cmd(ConfigAction::Set("min-goal-chars".into(), "3".into()))
            .unwrap();
        assert_eq!(res.messages[0].level, MessageLevel::Success);
        assert!(api.lint().unwrap().issues.is_empty());
    }

    #[test]
    fn test_export_goes_to_configured_dir() {
        let (mut api, dir) = api();
        let out = dir.path().join("exports");
        api.config_cmd(ConfigAction::Set(
            "export-dir".into(),
            out.display().to_string(),
        ))
        .unwrap();
        let res = api.export(None, false).unwrap();
        assert_eq!(res.paths, vec![out.join("Untitled.json")]);
    }
}
