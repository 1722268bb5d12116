use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PromptError, Result};
use crate::store::{StorageBackend, TemplateStore};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Replaces the collection with the template stored in `path`.
///
/// Unreadable files, bad JSON and records that fail the structural check are all
/// errors, and the store is left as it was.
pub fn run<B: StorageBackend>(store: &mut TemplateStore<B>, path: &Path) -> Result<CmdResult> {
    let content = fs::read_to_string(path).map_err(PromptError::Io)?;
    let candidate: Value = serde_json::from_str(&content).map_err(PromptError::Serialization)?;
    store.load_template(candidate)?;

    let mut result = CmdResult::default();
    if let Some(tpl) = store.current() {
        result.add_message(CmdMessage::success(format!(
            "Imported {} from {}",
            tpl.name,
            path.display()
        )));
    }
    Ok(result.with_template(store.current().cloned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Locale, SectionKey, Template};
    use crate::store::mem_backend::MemBackend;

    fn store() -> TemplateStore<MemBackend> {
        let mut store = TemplateStore::with_backend(MemBackend::new());
        store.initialize();
        store
    }

    #[test]
    fn test_import_valid_file() {
        let mut store = store();
        let dir = tempfile::tempdir().unwrap();
        let mut tpl = Template::new(Locale::En);
        tpl.name = "From disk".into();
        tpl.section_mut(SectionKey::Goal).unwrap().value = "Draft release notes".into();
        let path = dir.path().join("t.json");
        fs::write(&path, serde_json::to_string(&tpl).unwrap()).unwrap();

        let res = run(&mut store, &path).unwrap();
        assert_eq!(res.template.unwrap().id, tpl.id);
        assert_eq!(store.templates().len(), 1);
        assert_eq!(store.markdown(), "## Goal\nDraft release notes");
    }

    #[test]
    fn test_import_rejects_empty_object() {
        let mut store = store();
        let before = store.current().cloned();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");
        fs::write(&path, "{}").unwrap();

        assert!(matches!(
            run(&mut store, &path),
            Err(PromptError::Validation(_))
        ));
        assert_eq!(store.current().cloned(), before);
    }

    #[test]
    fn test_import_rejects_bad_json() {
        let mut store = store();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            run(&mut store, &path),
            Err(PromptError::Serialization(_))
        ));
    }

    #[test]
    fn test_import_missing_file() {
        let mut store = store();
        assert!(matches!(
            run(&mut store, Path::new("/nonexistent/prompt.json")),
            Err(PromptError::Io(_))
        ));
    }
}
