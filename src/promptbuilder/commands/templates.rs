use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PromptError, Result};
use crate::index::{index_templates, resolve, TemplateSelector};
use crate::store::{StorageBackend, TemplateStore};

pub fn list<B: StorageBackend>(store: &TemplateStore<B>) -> Result<CmdResult> {
    let listed = index_templates(store.templates(), store.current_id());
    Ok(CmdResult::default().with_listed_templates(listed))
}

pub fn save_as<B: StorageBackend>(store: &mut TemplateStore<B>, name: &str) -> Result<CmdResult> {
    let Some(_) = store.save_as(name) else {
        return Ok(CmdResult::default().with_message(CmdMessage::info("No current template.")));
    };
    let saved = store.current().cloned();
    let mut result = CmdResult::default();
    if let Some(tpl) = &saved {
        result.add_message(CmdMessage::success(format!(
            "Saved as {} ({})",
            tpl.name,
            tpl.id.short()
        )));
    }
    Ok(result.with_template(saved))
}

pub fn rename<B: StorageBackend>(store: &mut TemplateStore<B>, name: &str) -> Result<CmdResult> {
    if !store.rename(name) {
        return Ok(CmdResult::default().with_message(CmdMessage::info("No current template.")));
    }
    let renamed = store.current().cloned();
    let mut result = CmdResult::default();
    if let Some(tpl) = &renamed {
        result.add_message(CmdMessage::success(format!("Renamed to {}", tpl.name)));
    }
    Ok(result.with_template(renamed))
}

pub fn switch<B: StorageBackend>(
    store: &mut TemplateStore<B>,
    selector: &TemplateSelector,
) -> Result<CmdResult> {
    let id = resolve(store.templates(), selector)?;
    if !store.switch_to(&id) {
        return Err(PromptError::TemplateNotFound(selector.to_string()));
    }
    let current = store.current().cloned();
    let mut result = CmdResult::default();
    if let Some(tpl) = &current {
        result.add_message(CmdMessage::success(format!("Switched to {}", tpl.name)));
    }
    Ok(result.with_template(current))
}

/// Deletes the selected template, or the current one when no selector is given.
pub fn delete<B: StorageBackend>(
    store: &mut TemplateStore<B>,
    selector: Option<&TemplateSelector>,
) -> Result<CmdResult> {
    let id = match selector {
        Some(selector) => resolve(store.templates(), selector)?,
        None => match store.current_id() {
            Some(id) => id.clone(),
            None => {
                return Ok(
                    CmdResult::default().with_message(CmdMessage::info("No current template."))
                )
            }
        },
    };
    let name = store
        .templates()
        .iter()
        .find(|t| t.id == id)
        .map(|t| t.name.clone())
        .unwrap_or_default();

    store.delete_template(&id);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Deleted {} ({})", name, id.short())));
    if let Some(current) = store.current() {
        result.add_message(CmdMessage::info(format!("Current template: {}", current.name)));
    }
    Ok(result.with_template(store.current().cloned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;

    fn store() -> TemplateStore<MemBackend> {
        let mut store = TemplateStore::with_backend(MemBackend::new());
        store.initialize();
        store
    }

    #[test]
    fn test_list_marks_current() {
        let mut store = store();
        save_as(&mut store, "Second").unwrap();
        let res = list(&store).unwrap();
        assert_eq!(res.listed_templates.len(), 2);
        assert!(res.listed_templates[0].is_current);
        assert_eq!(res.listed_templates[0].template.name, "Second");
    }

    #[test]
    fn test_switch_by_position() {
        let mut store = store();
        save_as(&mut store, "Second").unwrap();
        let res = switch(&mut store, &TemplateSelector::Position(2)).unwrap();
        assert_eq!(res.template.unwrap().name, "Untitled");
        assert_eq!(store.current().unwrap().name, "Untitled");
    }

    #[test]
    fn test_switch_unknown_is_error() {
        let mut store = store();
        assert!(switch(&mut store, &TemplateSelector::Position(9)).is_err());
    }

    #[test]
    fn test_delete_current_by_default() {
        let mut store = store();
        save_as(&mut store, "Doomed").unwrap();
        let res = delete(&mut store, None).unwrap();
        assert!(res.messages[0].content.starts_with("Deleted Doomed"));
        assert_eq!(store.templates().len(), 1);
        assert_eq!(store.current().unwrap().name, "Untitled");
    }

    #[test]
    fn test_delete_last_leaves_fresh_default() {
        let mut store = store();
        rename(&mut store, "Only").unwrap();
        delete(&mut store, None).unwrap();
        assert_eq!(store.templates().len(), 1);
        assert_eq!(store.current().unwrap().name, "Untitled");
    }

    #[test]
    fn test_rename() {
        let mut store = store();
        let res = rename(&mut store, "  Weekly report ").unwrap();
        assert_eq!(res.messages[0].content, "Renamed to Weekly report");
    }
}
