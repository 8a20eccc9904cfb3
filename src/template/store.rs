//! Template directory layout
//!
//! A template directory holds mockup images as `<name>.png`, optional
//! placement parameters as `<name>.json`, and box templates as
//! `<name>-box.png` (the same mockup with the print area painted magenta).

use std::fs;
use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use log::{debug, info, warn};
use regex::Regex;
use serde::Serialize;

use crate::errors::{MockupError, MockupResult};

use super::params::{read_params, PlacementParams};

/// Suffix marking box templates
pub const BOX_SUFFIX: &str = "-box.png";

lazy_static! {
    static ref TEMPLATE_NAME: Regex = Regex::new(r"^[A-Za-z0-9][A-Za-z0-9_.-]*$")
        .expect("template name pattern is valid");
}

/// A template found in the template directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub name: String,
    #[serde(rename = "hasParams")]
    pub has_params: bool,
}

/// Parameter file path for a box template
///
/// `<dir>/<name>-box.png` maps to `<dir>/<name>.json`. Files without the box
/// suffix map to their file stem.
pub fn params_path_for_box(box_path: &Path) -> PathBuf {
    let file_name = box_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let base = match file_name.strip_suffix(BOX_SUFFIX) {
        Some(base) => base.to_string(),
        None => box_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };

    let parent = box_path.parent().unwrap_or_else(|| Path::new(""));
    parent.join(format!("{}.json", base))
}

/// Check a template name before it is joined onto a directory
pub fn validate_template_name(name: &str) -> MockupResult<()> {
    if TEMPLATE_NAME.is_match(name) {
        Ok(())
    } else {
        Err(MockupError::InvalidTemplateName(name.to_string()))
    }
}

/// Access to templates stored under one directory
#[derive(Debug, Clone)]
pub struct TemplateStore {
    root: PathBuf,
}

impl TemplateStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        TemplateStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the mockup image for `name`
    pub fn template_path(&self, name: &str) -> MockupResult<PathBuf> {
        validate_template_name(name)?;
        Ok(self.root.join(format!("{}.png", name)))
    }

    /// Path of the parameter file for `name`
    pub fn params_path(&self, name: &str) -> MockupResult<PathBuf> {
        validate_template_name(name)?;
        Ok(self.root.join(format!("{}.json", name)))
    }

    /// Path of the mockup image for `name`, failing if it does not exist
    pub fn require_template(&self, name: &str) -> MockupResult<PathBuf> {
        let path = self.template_path(name)?;
        if path.is_file() {
            Ok(path)
        } else {
            Err(MockupError::TemplateNotFound(name.to_string()))
        }
    }

    /// Stored parameters for `name`
    ///
    /// A missing or unreadable parameter file is not an error; the template
    /// is then placed with defaults.
    pub fn load_params(&self, name: &str) -> MockupResult<PlacementParams> {
        let path = self.params_path(name)?;
        if !path.is_file() {
            info!("No params file for template '{}', using defaults", name);
            return Ok(PlacementParams::default());
        }

        match read_params(&path) {
            Ok(params) => {
                debug!("Loaded params for '{}': {:?}", name, params);
                Ok(params)
            }
            Err(e) => {
                warn!("Ignoring params for template '{}': {}", name, e);
                Ok(PlacementParams::default())
            }
        }
    }

    /// All `.png` templates that can be addressed by name, sorted by name
    ///
    /// Creates the template directory when it does not exist yet. Files whose
    /// stem is not a valid template name are skipped.
    pub fn list(&self) -> MockupResult<Vec<TemplateInfo>> {
        fs::create_dir_all(&self.root)?;

        let files = self.file_names()?;
        let mut templates: Vec<TemplateInfo> = files
            .iter()
            .filter_map(|f| f.strip_suffix(".png"))
            .filter(|name| match validate_template_name(name) {
                Ok(()) => true,
                Err(_) => {
                    debug!("Skipping '{}.png': not a valid template name", name);
                    false
                }
            })
            .map(|name| TemplateInfo {
                name: name.to_string(),
                has_params: files.iter().any(|f| *f == format!("{}.json", name)),
            })
            .collect();

        templates.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(templates)
    }

    /// Box templates (`*-box.png`), sorted by path
    pub fn box_templates(&self) -> MockupResult<Vec<PathBuf>> {
        let mut paths: Vec<PathBuf> = self
            .file_names()?
            .into_iter()
            .filter(|f| f.ends_with(BOX_SUFFIX))
            .map(|f| self.root.join(f))
            .collect();

        paths.sort();
        Ok(paths)
    }

    fn file_names(&self) -> MockupResult<Vec<String>> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_path_for_box() {
        assert_eq!(
            params_path_for_box(Path::new("templates/tshirt-white-box.png")),
            PathBuf::from("templates/tshirt-white.json")
        );
        assert_eq!(
            params_path_for_box(Path::new("templates/hoodie.png")),
            PathBuf::from("templates/hoodie.json")
        );
        assert_eq!(params_path_for_box(Path::new("mug-box.png")), PathBuf::from("mug.json"));
    }

    #[test]
    fn test_template_names() {
        assert!(validate_template_name("tshirt-white").is_ok());
        assert!(validate_template_name("mug_11oz.v2").is_ok());
        assert!(validate_template_name("../etc/passwd").is_err());
        assert!(validate_template_name("a/b").is_err());
        assert!(validate_template_name("").is_err());
        assert!(validate_template_name(".hidden").is_err());
    }

    #[test]
    fn test_list_and_box_templates() {
        let dir = tempfile::tempdir().unwrap();
        for file in ["shirt.png", "shirt.json", "shirt-box.png", "mug.png", "notes.txt"] {
            fs::write(dir.path().join(file), b"").unwrap();
        }
        fs::create_dir(dir.path().join("nested.png")).unwrap();

        let store = TemplateStore::new(dir.path());
        let listed = store.list().unwrap();
        let names: Vec<(&str, bool)> = listed.iter().map(|t| (t.name.as_str(), t.has_params)).collect();
        assert_eq!(names, vec![("mug", false), ("shirt", true), ("shirt-box", false)]);

        let boxes = store.box_templates().unwrap();
        assert_eq!(boxes, vec![dir.path().join("shirt-box.png")]);
    }

    #[test]
    fn test_listed_names_resolve() {
        let dir = tempfile::tempdir().unwrap();
        for file in ["my shirt.png", ".hidden.png", "tote_bag.png", "cap.v2.png"] {
            fs::write(dir.path().join(file), b"").unwrap();
        }

        let store = TemplateStore::new(dir.path());
        let listed = store.list().unwrap();
        let names: Vec<&str> = listed.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["cap.v2", "tote_bag"]);

        for template in &listed {
            let path = store.template_path(&template.name).unwrap();
            assert!(path.is_file());
            assert!(store.require_template(&template.name).is_ok());
        }
    }

    #[test]
    fn test_list_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = TemplateStore::new(dir.path().join("templates"));
        assert!(store.list().unwrap().is_empty());
        assert!(store.root().is_dir());
    }

    #[test]
    fn test_load_params_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("broken.json"), "{").unwrap();
        fs::write(dir.path().join("placed.json"), r#"{"x": 4, "y": 8}"#).unwrap();
        let store = TemplateStore::new(dir.path());

        assert_eq!(store.load_params("absent").unwrap(), PlacementParams::default());
        assert_eq!(store.load_params("broken").unwrap(), PlacementParams::default());
        assert_eq!(store.load_params("placed").unwrap().y, Some(8));
    }

    #[test]
    fn test_require_template() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("mug.png"), b"").unwrap();
        let store = TemplateStore::new(dir.path());

        assert_eq!(store.require_template("mug").unwrap(), dir.path().join("mug.png"));
        assert!(matches!(store.require_template("cap"), Err(MockupError::TemplateNotFound(_))));
        assert!(matches!(store.require_template("../mug"), Err(MockupError::InvalidTemplateName(_))));
    }
}
