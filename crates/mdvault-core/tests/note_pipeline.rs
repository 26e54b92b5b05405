//! End-to-end note mutation tests against an on-disk vault

use chrono::{NaiveDate, NaiveDateTime};
use mdvault_core::{
    append_to_section, parse_document, set_task_status, FixedClock, FrontmatterValue, Metadata,
    NoteEditor, ValidationError, Vault, VaultError,
};
use std::fs;
use tempfile::TempDir;

fn fixed_clock() -> FixedClock {
    FixedClock(NaiveDateTime::parse_from_str("2026-02-18 17:05:09", "%Y-%m-%d %H:%M:%S").unwrap())
}

fn vault_with(files: &[(&str, &str)]) -> (TempDir, Vault) {
    let dir = TempDir::new().unwrap();
    for (name, text) in files {
        let path = dir.path().join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, text).unwrap();
    }
    let vault = Vault::open(dir.path()).unwrap();
    (dir, vault)
}

#[test]
fn test_metadata_update_preserves_unrelated_fields() {
    let (_dir, vault) = vault_with(&[("note.md", "---\ntitle: T\ncreated: 2026-01-01\n---\nBody\n")]);
    let editor = NoteEditor::with_clock(fixed_clock());
    let path = vault.validate_note("note.md").unwrap();

    let mut updates = Metadata::new();
    updates.insert("status", "done");
    let text = editor.update_metadata(&path, updates).unwrap();

    let doc = parse_document(&text).unwrap();
    assert_eq!(doc.metadata.get("title").and_then(|v| v.as_str()), Some("T"));
    assert_eq!(
        doc.metadata.get("created"),
        Some(&FrontmatterValue::Date(NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()))
    );
    assert_eq!(doc.metadata.get("status").and_then(|v| v.as_str()), Some("done"));
    assert!(text.contains("updated_at: 2026-02-18 17:05:09\n"));
    assert_eq!(doc.body, "Body\n");
}

#[test]
fn test_daily_append_under_missing_subsection() {
    let (_dir, vault) = vault_with(&[("Journal/Daily/2026-02-18.md", "# 2026-02-18\n\n")]);
    let editor = NoteEditor::with_clock(fixed_clock());
    let path = vault.validate_note("Journal/Daily/2026-02-18.md").unwrap();

    let created = editor
        .update_body(&path, |body| {
            let outcome = append_to_section(body, "did work", Some("Logs"));
            Ok((outcome.body, outcome.created_section))
        })
        .unwrap();
    assert!(created);

    let again = editor
        .update_body(&path, |body| {
            let outcome = append_to_section(body, "more work", Some("Logs"));
            Ok((outcome.body, outcome.created_section))
        })
        .unwrap();
    assert!(!again);

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "---\nupdated_at: 2026-02-18 17:05:09\n---\n# 2026-02-18\n\n## Logs\n\ndid work\n\nmore work"
    );
}

#[test]
fn test_task_toggle_missing_task_does_not_write() {
    let original = "---\ntitle: T\n---\n- [ ] one\n";
    let (_dir, vault) = vault_with(&[("tasks.md", original)]);
    let editor = NoteEditor::with_clock(fixed_clock());
    let path = vault.validate_note("tasks.md").unwrap();

    let err = editor
        .update_body(&path, |body| set_task_status(body, "two", true))
        .unwrap_err();
    assert_eq!(err.to_string(), "No task found matching: two");
    assert_eq!(fs::read_to_string(&path).unwrap(), original);

    editor
        .update_body(&path, |body| set_task_status(body, "one", true))
        .unwrap();
    assert!(fs::read_to_string(&path).unwrap().ends_with("- [x] one\n"));
}

#[test]
fn test_escaping_path_is_rejected_before_any_read() {
    let (dir, vault) = vault_with(&[]);
    fs::write(dir.path().parent().unwrap().join("secret.md"), "secret").ok();

    let escaping = vault.root().join("..").join("secret.md");
    let err = vault.validate_note(&escaping).unwrap_err();
    assert!(matches!(
        err,
        VaultError::Validation(ValidationError::OutsideVault { .. })
    ));
    assert!(err.to_string().starts_with("Invalid path, must be within vault"));
}

#[test]
fn test_malformed_frontmatter_is_reported_not_overwritten() {
    let original = "---\ntitle: [broken\n---\nBody\n";
    let (_dir, vault) = vault_with(&[("bad.md", original)]);
    let editor = NoteEditor::with_clock(fixed_clock());
    let path = vault.validate_note("bad.md").unwrap();

    let err = editor
        .update_body(&path, |body| Ok((body.to_string(), ())))
        .unwrap_err();
    assert!(matches!(err, VaultError::Parse { .. }));
    assert_eq!(fs::read_to_string(&path).unwrap(), original);
}
