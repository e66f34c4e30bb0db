//! `smelter edit`: scripted form edits with undo.
//!
//! Each operation is applied to the current form and recorded as a
//! snapshot, so `--undo N` steps back over the last N of them before
//! the data is rebuilt.

use anyhow::{Context, Result, anyhow};

use super::EditArgs;
use super::common::{load, persist, rebuild};
use crate::config::SmelterConfig;
use crate::debug;
use crate::form::{FormDocument, NodePath};
use crate::history::History;
use crate::logger::status_warning;

pub fn edit_file(config: &SmelterConfig, args: &EditArgs) -> Result<()> {
    let loaded = load(config, &args.file)?;
    let mut history = History::new(loaded.form, config.form.history_limit);

    for op in operations(args)? {
        let mut form = history.current().clone();
        op.apply(&mut form)?;
        debug!("form"; "{op}");
        history.record(form);
    }

    for undone in 0..args.undo {
        if history.undo().is_none() {
            status_warning(&format!("only {undone} of {} edits could be undone", args.undo));
            break;
        }
    }

    let mut form = history.current().clone();
    let data = rebuild(&loaded.document.data, &mut form);
    persist(config, &args.file, &loaded.document, data, args.write.dry)
}

/// One scripted edit, addressed by shown labels.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Operation {
    Set { label: String, value: String },
    Duplicate(String),
    Remove(String),
    Move { label: String, target: String },
}

impl Operation {
    fn apply(&self, form: &mut FormDocument) -> Result<()> {
        match self {
            Self::Set { label, value } => form.set_value(&locate(form, label)?, value)?,
            Self::Duplicate(label) => {
                form.duplicate(&locate(form, label)?)?;
            }
            Self::Remove(label) => {
                form.remove(&locate(form, label)?)?;
            }
            Self::Move { label, target } => {
                let from = locate(form, label)?;
                let to = locate(form, target)?;
                form.move_node(&from, &to)?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Set { label, value } => write!(f, "set `{label}` = `{value}`"),
            Self::Duplicate(label) => write!(f, "duplicate `{label}`"),
            Self::Remove(label) => write!(f, "remove `{label}`"),
            Self::Move { label, target } => write!(f, "move `{label}` before `{target}`"),
        }
    }
}

/// Operations in execution order: sets, duplicates, removes, moves.
fn operations(args: &EditArgs) -> Result<Vec<Operation>> {
    let mut ops = Vec::new();
    for raw in &args.sets {
        let (label, value) = split_pair(raw, "--set")?;
        ops.push(Operation::Set { label, value });
    }
    ops.extend(args.duplicates.iter().cloned().map(Operation::Duplicate));
    ops.extend(args.removes.iter().cloned().map(Operation::Remove));
    for raw in &args.moves {
        let (label, target) = split_pair(raw, "--move")?;
        ops.push(Operation::Move { label, target });
    }
    Ok(ops)
}

fn split_pair(raw: &str, flag: &str) -> Result<(String, String)> {
    raw.split_once('=')
        .map(|(left, right)| (left.trim().to_string(), right.to_string()))
        .filter(|(left, _)| !left.is_empty())
        .ok_or_else(|| anyhow!("{flag} expects LABEL=..., got `{raw}`"))
}

fn locate(form: &FormDocument, label: &str) -> Result<NodePath> {
    form.find_by_label(label)
        .with_context(|| format!("no form element labelled `{label}`"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::WriteArgs;
    use crate::frontmatter::read_document;
    use serde_json::json;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args(file: PathBuf) -> EditArgs {
        EditArgs {
            file,
            sets: Vec::new(),
            duplicates: Vec::new(),
            removes: Vec::new(),
            moves: Vec::new(),
            undo: 0,
            write: WriteArgs { dry: false },
        }
    }

    fn setup(content: &str) -> (TempDir, SmelterConfig, PathBuf) {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("post.md");
        fs::write(&file, content).unwrap();
        let config = SmelterConfig {
            root: dir.path().to_path_buf(),
            ..SmelterConfig::default()
        };
        (dir, config, file)
    }

    #[test]
    fn test_split_pair() {
        assert_eq!(
            split_pair("Title = a=b", "--set").unwrap(),
            ("Title".to_string(), " a=b".to_string())
        );
        assert!(split_pair("Title", "--set").is_err());
        assert!(split_pair("=x", "--set").is_err());
    }

    #[test]
    fn test_operation_order() {
        let mut a = args(PathBuf::from("x.md"));
        a.moves = vec!["A=B".into()];
        a.removes = vec!["C".into()];
        a.sets = vec!["D=1".into()];
        let ops = operations(&a).unwrap();
        assert!(matches!(ops[0], Operation::Set { .. }));
        assert!(matches!(ops[1], Operation::Remove(_)));
        assert!(matches!(ops[2], Operation::Move { .. }));
    }

    #[test]
    fn test_edit_set_remove_move() {
        let (_dir, config, file) =
            setup("---\ntitle: Old\ndraft: true\nlinks:\n  - href: /a\n  - href: /b\n---\nBody\n");

        let mut a = args(file.clone());
        a.sets = vec!["Title=New".into(), "Draft=off".into()];
        a.removes = vec!["Item 1".into()];
        edit_file(&config, &a).unwrap();

        let saved = read_document(&file).unwrap();
        assert_eq!(
            saved.data,
            json!({"title": "New", "draft": false, "links": [{"href": "/b"}]})
        );
        assert_eq!(saved.body, "Body\n");
    }

    #[test]
    fn test_edit_move_and_duplicate_array_items() {
        let (_dir, config, file) = setup("---\ntags:\n  - name: a\n  - name: b\n---\n");
        let mut a = args(file.clone());
        a.duplicates = vec!["Item 1".into()];
        a.moves = vec!["Item 3=Item 1".into()];
        edit_file(&config, &a).unwrap();

        let saved = read_document(&file).unwrap();
        assert_eq!(
            saved.data,
            json!({"tags": [{"name": "b"}, {"name": "a"}, {"name": "a"}]})
        );
    }

    #[test]
    fn test_edit_undo() {
        let (_dir, config, file) = setup("---\ntitle: Old\ncount: 1\n---\n");
        let mut a = args(file.clone());
        a.sets = vec!["Title=New".into(), "Count=2".into()];
        a.undo = 1;
        edit_file(&config, &a).unwrap();

        let saved = read_document(&file).unwrap();
        assert_eq!(saved.data, json!({"title": "New", "count": 1}));
    }

    #[test]
    fn test_edit_undo_past_start() {
        let (_dir, config, file) = setup("---\ntitle: Old\n---\n");
        let mut a = args(file.clone());
        a.sets = vec!["Title=New".into()];
        a.undo = 3;
        edit_file(&config, &a).unwrap();

        let saved = read_document(&file).unwrap();
        assert_eq!(saved.data, json!({"title": "Old"}));
    }

    #[test]
    fn test_edit_refused_leaves_file() {
        let content = "---\nauthor:\n  name: Ada\n---\n";
        let (_dir, config, file) = setup(content);
        let mut a = args(file.clone());
        a.duplicates = vec!["Author".into()];

        let err = edit_file(&config, &a).unwrap_err();
        assert!(err.to_string().contains("does not allow duplication"));
        assert_eq!(fs::read_to_string(&file).unwrap(), content);
    }

    #[test]
    fn test_edit_unknown_label() {
        let (_dir, config, file) = setup("---\ntitle: Old\n---\n");
        let mut a = args(file);
        a.removes = vec!["Nope".into()];
        let err = edit_file(&config, &a).unwrap_err();
        assert!(err.to_string().contains("no form element labelled `Nope`"));
    }
}
