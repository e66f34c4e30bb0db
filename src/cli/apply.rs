//! `smelter apply`: rebuild data from an edited form and save it.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::WriteArgs;
use super::common::{persist, rebuild};
use crate::config::SmelterConfig;
use crate::form::html::parse_html;
use crate::frontmatter::read_document;

pub fn apply_form(
    config: &SmelterConfig,
    file: &Path,
    form_path: &Path,
    write: &WriteArgs,
) -> Result<()> {
    let document = read_document(file)?;
    let html = fs::read_to_string(form_path)
        .with_context(|| format!("failed to read {}", form_path.display()))?;
    let mut form =
        parse_html(&html).with_context(|| format!("failed to parse {}", form_path.display()))?;

    let data = rebuild(&document.data, &mut form);
    persist(config, file, &document, data, write.dry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::html::to_html;
    use crate::frontmatter::read_document;
    use std::fs;
    use tempfile::TempDir;

    fn setup(dir: &TempDir, html: &str) -> (std::path::PathBuf, std::path::PathBuf) {
        let file = dir.path().join("post.md");
        fs::write(&file, "---\ntitle: Old\ncount: 1\n---\nBody\n").unwrap();
        let form = dir.path().join("post.html");
        fs::write(&form, html).unwrap();
        (file, form)
    }

    #[test]
    fn test_apply_edited_form() {
        let dir = TempDir::new().unwrap();
        let config = SmelterConfig {
            root: dir.path().to_path_buf(),
            ..SmelterConfig::default()
        };
        let (file, form) = setup(&dir, "");

        let mut loaded = crate::cli::common::load(&config, &file).unwrap();
        let path = loaded.form.find_by_label("Title").unwrap();
        loaded.form.set_value(&path, "New").unwrap();
        fs::write(&form, to_html(&loaded.form)).unwrap();

        apply_form(&config, &file, &form, &WriteArgs { dry: false }).unwrap();
        let saved = read_document(&file).unwrap();
        assert_eq!(saved.data, serde_json::json!({"title": "New", "count": 1}));
        assert_eq!(saved.body, "Body\n");
    }

    #[test]
    fn test_apply_broken_form_does_not_write() {
        let dir = TempDir::new().unwrap();
        let html = r#"<div class="form-element"><label class="element-label">When</label>
            <input class="element-value" type="date" value="someday" /></div>"#;
        let (file, form) = setup(&dir, html);
        let before = fs::read_to_string(&file).unwrap();

        assert!(apply_form(&SmelterConfig::default(), &file, &form, &WriteArgs { dry: false }).is_err());
        assert_eq!(fs::read_to_string(&file).unwrap(), before);
    }
}
