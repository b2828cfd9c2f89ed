//! User settings for notesplit, persisted as JSON.
//!
//! The split type is stored under its registry display name ("header",
//! "unordered list item", ...) so the file stays human-editable; it is
//! validated against the engine's catalog when converted into a
//! [`SplitConfig`], before any splitting runs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use notesplit_engine::{AttrValue, ConfigurationError, SplitConfig, registry};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse settings file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Failed to write settings file at {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize settings: {source}")]
    Serialize { source: serde_json::Error },

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// An attribute value that is neither a number nor a string.
    #[error("split attribute {attr:?} has an unsupported value: {value}")]
    UnsupportedAttrValue { attr: String, value: serde_json::Value },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Registry display name of the kind to split by.
    pub split_type: String,
    /// Attribute constraints for the split type; empty means any instance.
    pub split_attrs: BTreeMap<String, serde_json::Value>,
    /// Where the notes to split live.
    pub source_folder_path: PathBuf,
    /// Where new section files are written.
    pub destination_folder_path: PathBuf,
    /// File extensions eligible for splitting, each starting with a period.
    pub note_types: Vec<String>,
    /// Tag that marks a file as wanting to be split.
    pub split_keyword: String,
    pub create_index_file: bool,
    pub backlink: bool,
    pub copy_frontmatter: bool,
    pub copy_global_tags: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            split_type: "header".to_string(),
            split_attrs: BTreeMap::from([(
                "level".to_string(),
                serde_json::Value::from(2),
            )]),
            source_folder_path: PathBuf::new(),
            destination_folder_path: PathBuf::new(),
            note_types: vec![
                ".md".to_string(),
                ".markdown".to_string(),
                ".txt".to_string(),
            ],
            split_keyword: "#split".to_string(),
            create_index_file: true,
            backlink: false,
            copy_frontmatter: false,
            copy_global_tags: false,
        }
    }
}

impl Settings {
    /// Loads settings from `path`. A missing file is not an error; the
    /// caller falls back to defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Option<Self>, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let settings =
            serde_json::from_str(&content).map_err(|source| SettingsError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Some(settings))
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), SettingsError> {
        let path = path.as_ref();
        let write_err = |source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(write_err)?;
            }
        }
        let content = serde_json::to_string_pretty(self)
            .map_err(|source| SettingsError::Serialize { source })?;
        std::fs::write(path, content).map_err(write_err)
    }

    /// Converts the persisted split type and attributes into a validated
    /// engine criterion. Fails before any splitting when the name or an
    /// attribute is unknown.
    pub fn split_config(&self) -> Result<SplitConfig, SettingsError> {
        let kind = registry::kind_named(&self.split_type)?;
        let mut attrs = Vec::new();
        for (name, value) in &self.split_attrs {
            let value = match value {
                serde_json::Value::Number(n) => match n.as_i64() {
                    Some(i) => AttrValue::Int(i),
                    None => {
                        return Err(SettingsError::UnsupportedAttrValue {
                            attr: name.clone(),
                            value: value.clone(),
                        });
                    }
                },
                serde_json::Value::String(s) => AttrValue::Str(s.clone()),
                other => {
                    return Err(SettingsError::UnsupportedAttrValue {
                        attr: name.clone(),
                        value: other.clone(),
                    });
                }
            };
            attrs.push((name.clone(), value));
        }
        Ok(SplitConfig::new(kind, attrs)?)
    }
}
