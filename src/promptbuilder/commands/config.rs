use crate::commands::{CmdMessage, CmdResult};
use crate::config::{PromptConfig, CONFIG_KEYS};
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = PromptConfig::load(dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = PromptConfig::load(dir)?;
            let message = match config.get(&key) {
                Ok(val) => CmdMessage::info(val),
                Err(e) => unknown_key(e.to_string()),
            };
            Ok(CmdResult::default().with_message(message))
        }
        ConfigAction::Set(key, value) => {
            let mut config = PromptConfig::load(dir)?;
            if let Err(e) = config.set(&key, &value) {
                return Ok(CmdResult::default().with_message(unknown_key(e.to_string())));
            }
            config.save(dir)?;
            let shown = config.get(&key).unwrap_or(value);
            Ok(CmdResult::default()
                .with_message(CmdMessage::success(format!("{} set to {}", key, shown)))
                .with_config(config))
        }
    }
}

fn unknown_key(error: String) -> CmdMessage {
    CmdMessage::error(format!("{} (keys: {})", error, CONFIG_KEYS.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::model::Locale;

    #[test]
    fn test_set_persists() {
        let dir = tempfile::tempdir().unwrap();
        let res = run(
            dir.path(),
            ConfigAction::Set("default-locale".into(), "es".into()),
        )
        .unwrap();
        assert_eq!(res.messages[0].content, "default-locale set to es");
        assert_eq!(
            PromptConfig::load(dir.path()).unwrap().default_locale,
            Locale::Es
        );
    }

    #[test]
    fn test_show_key() {
        let dir = tempfile::tempdir().unwrap();
        let res = run(dir.path(), ConfigAction::ShowKey("min-goal-chars".into())).unwrap();
        assert_eq!(res.messages[0].content, "10");
    }

    #[test]
    fn test_unknown_key_is_reported_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let res = run(dir.path(), ConfigAction::Set("colour".into(), "red".into())).unwrap();
        assert_eq!(res.messages[0].level, MessageLevel::Error);
        assert!(res.messages[0].content.contains("default-locale"));
        assert!(!dir.path().join("config.json").exists());
    }

    #[test]
    fn test_show_all_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let res = run(dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(res.config, Some(PromptConfig::default()));
    }
}
