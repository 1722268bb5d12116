use super::backend::StorageBackend;
use super::codec::{self, CURRENT_TEMPLATE_KEY, TEMPLATES_KEY};
use crate::error::Result;
use crate::estimator::TextStats;
use crate::lint::Linter;
use crate::model::{clean_name, Locale, SectionKey, Template, TemplateId};
use crate::synthesis::synthesize;
use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

pub struct TemplateStore<B: StorageBackend> {
    /// The underlying storage backend.
    pub(crate) backend: B,
    /// Committed collection. Replaced wholesale on every mutation, never edited in place.
    templates: Arc<Vec<Template>>,
    current_id: Option<TemplateId>,
    /// Session-only: the section whose value was edited last. Not persisted.
    last_edited: Option<SectionKey>,
    default_locale: Locale,
}

impl<B: StorageBackend> TemplateStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self {
            backend,
            templates: Arc::new(Vec::new()),
            current_id: None,
            last_edited: None,
            default_locale: Locale::En,
        }
    }

    /// Locale stamped on templates the store bootstraps itself.
    pub fn with_default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = locale;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    // --- Reads ---

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    /// The committed collection. Holders keep seeing this exact value no matter
    /// what the store does afterwards.
    pub fn snapshot(&self) -> Arc<Vec<Template>> {
        Arc::clone(&self.templates)
    }

    pub fn current_id(&self) -> Option<&TemplateId> {
        self.current_id.as_ref()
    }

    pub fn current(&self) -> Option<&Template> {
        let id = self.current_id.as_ref()?;
        self.templates.iter().find(|t| &t.id == id)
    }

    pub fn last_edited(&self) -> Option<SectionKey> {
        self.last_edited
    }

    pub fn markdown(&self) -> String {
        synthesize(self.current())
    }

    pub fn stats(&self) -> TextStats {
        TextStats::of(&self.markdown())
    }

    pub fn issues(&self, linter: &Linter) -> Vec<String> {
        linter.lint(self.current())
    }

    // --- Lifecycle ---

    /// Loads persisted state, or bootstraps a default template. Does nothing once
    /// the store holds templates.
    ///
    /// Restore precedence:
    /// 1. The `templates` array when it decodes to at least one valid template,
    ///    selecting the id found under `current_template` if it is in the array,
    ///    else the first entry.
    /// 2. The single `current_template` record.
    /// 3. A fresh default template.
    pub fn initialize(&mut self) {
        if !self.templates.is_empty() {
            return;
        }

        match self.restore() {
            Some((templates, current)) => {
                debug!(count = templates.len(), current = %current, "restored templates");
                self.templates = Arc::new(templates);
                self.current_id = Some(current);
            }
            None => self.bootstrap_default(),
        }
    }

    fn restore(&self) -> Option<(Vec<Template>, TemplateId)> {
        let current_record = self.read_key(CURRENT_TEMPLATE_KEY).and_then(|json| {
            codec::parse_template(&json)
                .map_err(|e| warn!(error = %e, "ignoring persisted current template"))
                .ok()
        });

        let collection = self
            .read_key(TEMPLATES_KEY)
            .and_then(|json| codec::decode_collection(&json))
            .filter(|templates| !templates.is_empty());

        if let Some(templates) = collection {
            let current = current_record
                .map(|t| t.id)
                .filter(|id| templates.iter().any(|t| &t.id == id))
                .unwrap_or_else(|| templates[0].id.clone());
            return Some((templates, current));
        }

        current_record.map(|t| {
            let id = t.id.clone();
            (vec![t], id)
        })
    }

    fn bootstrap_default(&mut self) {
        let template = Template::new(self.default_locale);
        debug!(id = %template.id, "bootstrapping default template");
        let id = template.id.clone();
        self.commit(vec![template], Some(id));
    }

    // --- Section mutations ---

    pub fn set_section_enabled(&mut self, key: SectionKey, enabled: bool) -> bool {
        self.update_current(|tpl| match tpl.section_mut(key) {
            Some(section) => {
                section.enabled = enabled;
                true
            }
            None => false,
        })
    }

    pub fn set_section_value(&mut self, key: SectionKey, value: impl Into<String>) -> bool {
        let value = value.into();
        let applied = self.update_current(|tpl| match tpl.section_mut(key) {
            Some(section) => {
                section.value = value;
                true
            }
            None => false,
        });
        if applied {
            self.last_edited = Some(key);
        }
        applied
    }

    /// Empties every section value, keeping enabled flags, ranks and required flags.
    pub fn clear_all_values(&mut self) -> bool {
        self.update_current(|tpl| {
            for section in &mut tpl.sections {
                section.value.clear();
            }
            true
        })
    }

    /// Flips `fences` on the current template and returns the new value.
    pub fn toggle_fences(&mut self) -> Option<bool> {
        let applied = self.update_current(|tpl| {
            tpl.fences = !tpl.fences;
            true
        });
        if applied {
            self.current().map(|t| t.fences)
        } else {
            None
        }
    }

    /// Moves `key` (or the last edited section) one place earlier.
    /// Returns false at the top edge or when there is nothing to move.
    pub fn move_section_up(&mut self, key: Option<SectionKey>) -> bool {
        self.move_section(key, Direction::Up)
    }

    /// Moves `key` (or the last edited section) one place later.
    /// Returns false at the bottom edge or when there is nothing to move.
    pub fn move_section_down(&mut self, key: Option<SectionKey>) -> bool {
        self.move_section(key, Direction::Down)
    }

    fn move_section(&mut self, key: Option<SectionKey>, direction: Direction) -> bool {
        let Some(key) = key.or(self.last_edited) else {
            return false;
        };
        self.update_current(|tpl| swap_with_neighbour(tpl, key, direction))
    }

    // --- Template mutations ---

    pub fn rename(&mut self, name: &str) -> bool {
        let name = clean_name(name);
        self.update_current(|tpl| {
            tpl.name = name;
            true
        })
    }

    /// Copies the current template under a new id and name, puts the copy first
    /// and selects it. The source is left untouched.
    pub fn save_as(&mut self, name: &str) -> Option<TemplateId> {
        let mut copy = self.current()?.clone();
        copy.id = TemplateId::generate();
        copy.name = clean_name(name);
        copy.updated_at = Utc::now();
        let id = copy.id.clone();

        let mut templates = Vec::with_capacity(self.templates.len() + 1);
        templates.push(copy);
        templates.extend(self.templates.iter().cloned());

        debug!(id = %id, "saved template copy");
        self.commit(templates, Some(id.clone()));
        Some(id)
    }

    pub fn switch_to(&mut self, id: &TemplateId) -> bool {
        if !self.templates.iter().any(|t| &t.id == id) {
            return false;
        }
        let templates = (*self.templates).clone();
        self.commit(templates, Some(id.clone()));
        true
    }

    /// Removes a template. Deleting the current one selects the new first entry;
    /// deleting the last one bootstraps a fresh default.
    pub fn delete_template(&mut self, id: &TemplateId) -> bool {
        if !self.templates.iter().any(|t| &t.id == id) {
            return false;
        }
        let templates: Vec<Template> = self
            .templates
            .iter()
            .filter(|t| &t.id != id)
            .cloned()
            .collect();

        if templates.is_empty() {
            debug!(id = %id, "deleted last template");
            self.templates = Arc::new(templates);
            self.current_id = None;
            self.bootstrap_default();
            return true;
        }

        let current = if self.current_id.as_ref() == Some(id) {
            Some(templates[0].id.clone())
        } else {
            self.current_id.clone()
        };
        debug!(id = %id, "deleted template");
        self.commit(templates, current);
        true
    }

    /// Replaces the whole collection with `candidate` and selects it.
    /// A candidate failing the structural check is rejected and nothing changes.
    pub fn load_template(&mut self, candidate: Value) -> Result<TemplateId> {
        let template = codec::decode_template(candidate)?;
        let id = template.id.clone();
        debug!(id = %id, "loaded template");
        self.commit(vec![template], Some(id.clone()));
        Ok(id)
    }

    // --- Internals ---

    /// Applies `mutator` to a copy of the current template. When it reports a
    /// change the copy is stamped, swapped into a new collection and persisted.
    fn update_current<F>(&mut self, mutator: F) -> bool
    where
        F: FnOnce(&mut Template) -> bool,
    {
        let Some(id) = self.current_id.clone() else {
            return false;
        };
        let Some(position) = self.templates.iter().position(|t| t.id == id) else {
            return false;
        };

        let mut updated = self.templates[position].clone();
        if !mutator(&mut updated) {
            return false;
        }
        updated.touch();

        let mut templates = (*self.templates).clone();
        templates[position] = updated;
        self.commit(templates, Some(id));
        true
    }

    fn commit(&mut self, templates: Vec<Template>, current: Option<TemplateId>) {
        self.templates = Arc::new(templates);
        self.current_id = current;
        self.persist();
    }

    /// Best effort: failures are logged and the in-memory state stays authoritative.
    fn persist(&self) {
        match codec::encode_collection(&self.templates) {
            Ok(json) => {
                if let Err(e) = self.backend.write(TEMPLATES_KEY, &json) {
                    warn!(error = %e, "failed to persist templates");
                }
            }
            Err(e) => warn!(error = %e, "failed to encode templates"),
        }

        if let Some(current) = self.current() {
            match codec::encode_template(current) {
                Ok(json) => {
                    if let Err(e) = self.backend.write(CURRENT_TEMPLATE_KEY, &json) {
                        warn!(error = %e, "failed to persist current template");
                    }
                }
                Err(e) => warn!(error = %e, "failed to encode current template"),
            }
        }
    }

    fn read_key(&self, key: &str) -> Option<String> {
        self.backend
            .read(key)
            .map_err(|e| warn!(key, error = %e, "failed to read persisted record"))
            .ok()
            .flatten()
    }
}

/// Swaps the rank of `key` with its neighbour in sorted order.
fn swap_with_neighbour(tpl: &mut Template, key: SectionKey, direction: Direction) -> bool {
    let mut by_order: Vec<usize> = (0..tpl.sections.len()).collect();
    by_order.sort_by_key(|&i| tpl.sections[i].order);

    let Some(pos) = by_order.iter().position(|&i| tpl.sections[i].key == key) else {
        return false;
    };
    let neighbour = match direction {
        Direction::Up => match pos.checked_sub(1) {
            Some(n) => n,
            None => return false,
        },
        Direction::Down if pos + 1 < by_order.len() => pos + 1,
        Direction::Down => return false,
    };

    let (a, b) = (by_order[pos], by_order[neighbour]);
    let order_a = tpl.sections[a].order;
    tpl.sections[a].order = tpl.sections[b].order;
    tpl.sections[b].order = order_a;
    true
}
