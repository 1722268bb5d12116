use crate::commands::{CmdMessage, CmdResult};
use crate::error::{PromptError, Result};
use crate::model::Template;
use crate::store::codec::{export_filename, export_json, sanitize_filename};
use crate::store::{StorageBackend, TemplateStore};
use chrono::Utc;
use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Writes the current template as pretty JSON. `output` names the file
/// explicitly; otherwise it lands in `dir` under its suggested filename.
pub fn run<B: StorageBackend>(
    store: &TemplateStore<B>,
    dir: &Path,
    output: Option<&Path>,
) -> Result<CmdResult> {
    let Some(template) = store.current() else {
        return Ok(CmdResult::default().with_message(CmdMessage::info("No current template.")));
    };

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => dir.join(export_filename(template)),
    };
    ensure_parent(&path)?;
    fs::write(&path, export_json(template)?).map_err(PromptError::Io)?;
    debug!(path = %path.display(), "exported template");

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Exported to {}",
            path.display()
        )))
        .with_paths(vec![path]))
}

/// Bundles every template into a `.tar.gz`, one JSON file each.
pub fn run_all<B: StorageBackend>(
    store: &TemplateStore<B>,
    dir: &Path,
    output: Option<&Path>,
) -> Result<CmdResult> {
    let templates = store.templates();
    if templates.is_empty() {
        return Ok(CmdResult::default().with_message(CmdMessage::info("No templates to export.")));
    }

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => dir.join(archive_filename()),
    };
    ensure_parent(&path)?;
    let file = File::create(&path).map_err(PromptError::Io)?;
    write_archive(file, templates)?;
    debug!(path = %path.display(), count = templates.len(), "exported bundle");

    Ok(CmdResult::default()
        .with_message(CmdMessage::success(format!(
            "Exported {} templates to {}",
            templates.len(),
            path.display()
        )))
        .with_paths(vec![path]))
}

fn archive_filename() -> String {
    format!(
        "prompt-builder-{}.tar.gz",
        Utc::now().format("%Y-%m-%d_%H-%M-%S")
    )
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
            fs::create_dir_all(parent).map_err(PromptError::Io)
        }
        _ => Ok(()),
    }
}

pub(crate) fn archive_entry_name(template: &Template) -> PathBuf {
    let stem = sanitize_filename(&template.name);
    let stem = if stem.is_empty() { "template" } else { &stem };
    PathBuf::from("prompt-builder").join(format!("{}-{}.json", stem, template.id.short()))
}

fn write_archive<W: Write>(writer: W, templates: &[Template]) -> Result<()> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);

    for template in templates {
        let content = export_json(template)?;

        let mut header = tar::Header::new_gnu();
        header.set_size(content.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(template.updated_at.timestamp().max(0) as u64);
        header.set_cksum();

        tar.append_data(&mut header, archive_entry_name(template), content.as_bytes())
            .map_err(PromptError::Io)?;
    }

    tar.into_inner()
        .map_err(PromptError::Io)?
        .finish()
        .map_err(PromptError::Io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Locale, SectionKey};
    use crate::store::mem_backend::MemBackend;
    use flate2::read::GzDecoder;
    use std::io::Read;

    fn store() -> TemplateStore<MemBackend> {
        let mut store = TemplateStore::with_backend(MemBackend::new());
        store.initialize();
        store
    }

    #[test]
    fn test_export_uses_suggested_filename() {
        let mut store = store();
        store.rename("Weekly report");
        store.set_section_value(SectionKey::Goal, "Summarize the week");
        let dir = tempfile::tempdir().unwrap();

        let res = run(&store, dir.path(), None).unwrap();
        let path = dir.path().join("Weekly report.json");
        assert_eq!(res.paths, vec![path.clone()]);

        let content = fs::read_to_string(path).unwrap();
        assert!(content.contains('\n'));
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["name"], "Weekly report");
    }

    #[test]
    fn test_export_explicit_output() {
        let store = store();
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("nested").join("mine.json");
        run(&store, dir.path(), Some(&out)).unwrap();
        assert!(out.exists());
    }

    #[test]
    fn test_archive_entry_name_falls_back() {
        let mut tpl = Template::new(Locale::En);
        tpl.name = "///".into();
        let name = archive_entry_name(&tpl);
        assert!(name.to_string_lossy().contains("___-"));

        tpl.name = "   ".into();
        let name = archive_entry_name(&tpl);
        assert!(name.starts_with("prompt-builder"));
        assert!(name
            .file_name()
            .unwrap()
            .to_string_lossy()
            .starts_with("template-"));
    }

    #[test]
    fn test_write_archive_contains_every_template() {
        let mut store = store();
        store.save_as("Second");
        let mut buf = Vec::new();
        write_archive(&mut buf, store.templates()).unwrap();
        assert_eq!(&buf[..2], &[0x1f, 0x8b]);

        let mut archive = tar::Archive::new(GzDecoder::new(buf.as_slice()));
        let mut names = Vec::new();
        for entry in archive.entries().unwrap() {
            let mut entry = entry.unwrap();
            names.push(entry.path().unwrap().to_string_lossy().into_owned());
            let mut body = String::new();
            entry.read_to_string(&mut body).unwrap();
            assert!(serde_json::from_str::<serde_json::Value>(&body).is_ok());
        }
        assert_eq!(names.len(), 2);
        assert!(names[0].contains("Second-"));
    }

    #[test]
    fn test_run_all_writes_bundle() {
        let store = store();
        let dir = tempfile::tempdir().unwrap();
        let res = run_all(&store, dir.path(), None).unwrap();
        let path = &res.paths[0];
        assert!(path.to_string_lossy().ends_with(".tar.gz"));
        assert!(path.exists());
    }
}
