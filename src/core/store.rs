//! Named filter store: one pretty-printed JSON document per filter.
//!
//! Layout is `<dir>/<name>.json` holding `{ "spec": .., "metadata": .. }`.
//! Writes go through a same-directory temp file and are renamed into place.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::filter::FilterSpec;
use crate::infra::io::write_atomic;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("filter not found: {0}")]
    NotFound(PathBuf),

    #[error("filter already exists: {0} (use --force to overwrite)")]
    AlreadyExists(PathBuf),

    #[error("invalid filter file {path}: {reason}")]
    InvalidFilter { path: PathBuf, reason: String },

    #[error(
        "invalid filter name {0:?}: must be non-empty, without path separators or a leading '.'"
    )]
    InvalidName(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterMetadata {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A spec plus the metadata it was saved with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedFilter {
    pub spec: FilterSpec,
    pub metadata: FilterMetadata,
}

impl SavedFilter {
    /// Stamp a spec with `created_at = now`.
    pub fn new(spec: FilterSpec, name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            spec,
            metadata: FilterMetadata {
                name: name.into(),
                description,
                created_at: Utc::now(),
            },
        }
    }
}

/// One row of `filter list`.
#[derive(Debug, Clone, Serialize)]
pub struct FilterListing {
    pub file: String,
    pub path: PathBuf,
    pub name: Option<String>,
    pub description: Option<String>,
    pub created_at: Option<String>,
}

/// Lenient shape used to validate and list files written by other tools.
#[derive(Deserialize)]
struct RawFilterFile {
    spec: Option<FilterSpec>,
    #[serde(default)]
    metadata: Option<RawMetadata>,
}

#[derive(Default, Deserialize)]
struct RawMetadata {
    name: Option<String>,
    description: Option<String>,
    // Kept as text so foreign timestamp formats still list
    created_at: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FilterStore {
    dir: PathBuf,
}

impl FilterStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File a filter named `name` lives in.
    pub fn path_for(&self, name: &str) -> StoreResult<PathBuf> {
        validate_name(name)?;
        Ok(self.dir.join(format!("{name}.json")))
    }

    /// Persist `filter` under its metadata name.
    pub fn save(&self, filter: &SavedFilter, overwrite: bool) -> StoreResult<PathBuf> {
        let path = self.path_for(&filter.metadata.name)?;
        if path.exists() && !overwrite {
            return Err(StoreError::AlreadyExists(path));
        }

        fs::create_dir_all(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let mut text = serde_json::to_string_pretty(filter).map_err(|source| StoreError::Json {
            path: path.clone(),
            source,
        })?;
        text.push('\n');

        write_atomic(&path, text.as_bytes()).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), "filter saved");
        Ok(path)
    }

    /// Load the filter called `name`.
    pub fn load(&self, name: &str) -> StoreResult<SavedFilter> {
        let path = self.path_for(name)?;
        load_file(&path)
    }

    /// The stored document for `name`, untouched, so foreign metadata
    /// (timestamps without an offset, extra fields) is shown as written.
    pub fn load_document(&self, name: &str) -> StoreResult<Value> {
        let path = self.path_for(name)?;
        read_document(&path)
    }

    /// Every readable `*.json` filter in the directory, sorted by file name.
    /// A missing directory lists as empty.
    pub fn list(&self) -> StoreResult<Vec<FilterListing>> {
        if !self.dir.is_dir() {
            warn!(dir = %self.dir.display(), "filter directory does not exist");
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir).map_err(|source| StoreError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let listings = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
            .sorted()
            .filter_map(|path| match read_raw(&path) {
                Ok(raw) => {
                    let meta = raw.metadata.unwrap_or_default();
                    Some(FilterListing {
                        file: path
                            .file_name()
                            .map(|n| n.to_string_lossy().into_owned())
                            .unwrap_or_default(),
                        path,
                        name: meta.name,
                        description: meta.description,
                        created_at: meta.created_at,
                    })
                }
                Err(err) => {
                    warn!(path = %path.display(), %err, "skipping unreadable filter");
                    None
                }
            })
            .collect();

        Ok(listings)
    }
}

fn validate_name(name: &str) -> StoreResult<()> {
    let bad = name.is_empty()
        || name.starts_with('.')
        || name.contains(['/', '\\'])
        || name.chars().any(char::is_control);
    if bad {
        return Err(StoreError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// The file as written, checked for a `spec` member.
fn read_document(path: &Path) -> StoreResult<Value> {
    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        std::io::ErrorKind::NotFound => StoreError::NotFound(path.to_path_buf()),
        _ => StoreError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;
    let document: Value = serde_json::from_str(&text).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    if document.get("spec").is_none_or(Value::is_null) {
        return Err(StoreError::InvalidFilter {
            path: path.to_path_buf(),
            reason: "missing 'spec' field".into(),
        });
    }
    Ok(document)
}

fn read_raw(path: &Path) -> StoreResult<RawFilterFile> {
    serde_json::from_value(read_document(path)?).map_err(|source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a filter document from an explicit path.
pub fn load_file(path: &Path) -> StoreResult<SavedFilter> {
    let raw = read_raw(path)?;
    let meta = raw.metadata.unwrap_or_default();
    let name = match meta.name {
        Some(name) => name,
        None => path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default(),
    };

    Ok(SavedFilter {
        spec: raw.spec.unwrap_or_default(),
        metadata: FilterMetadata {
            name,
            description: meta.description,
            created_at: meta
                .created_at
                .as_deref()
                .and_then(|ts| DateTime::parse_from_rfc3339(ts).ok())
                .map(|ts| ts.with_timezone(&Utc))
                .unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        },
    })
}
