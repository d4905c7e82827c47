//! # Project Storage
//!
//! Persists a project as three JSON blobs in a key-value store.
//!
//! ```text
//! pagecraft-elements → [Element, ...]
//! pagecraft-theme    → ThemeSettings
//! pagecraft-assets   → [Asset, ...]
//! ```
//!
//! Stores can be:
//! - **Memory-backed**: for tests and throwaway sessions
//! - **File-backed**: one `<key>.json` file per key under a directory
//!
//! Saves are explicit; nothing here runs on its own.

use pagecraft_common::{structural_violations, CommonError, FileSystem};
use pagecraft_document::{tree, Element, ThemeSettings};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::assets::Asset;
use crate::errors::EditorError;

pub const ELEMENTS_KEY: &str = "pagecraft-elements";
pub const THEME_KEY: &str = "pagecraft-theme";
pub const ASSETS_KEY: &str = "pagecraft-assets";

/// Opaque string store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, EditorError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), EditorError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, EditorError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), EditorError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One JSON file per key under `dir`
#[derive(Debug, Clone)]
pub struct FileStore<F: FileSystem> {
    fs: F,
    dir: PathBuf,
}

impl<F: FileSystem> FileStore<F> {
    pub fn new(fs: F, dir: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            dir: dir.into(),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, EditorError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(EditorError::Storage(format!("invalid key `{key}`")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    pub fn file_system(&self) -> &F {
        &self.fs
    }
}

impl<F: FileSystem> KeyValueStore for FileStore<F> {
    fn get(&self, key: &str) -> Result<Option<String>, EditorError> {
        let path = self.path_for(key)?;
        match self.fs.read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(CommonError::FileNotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), EditorError> {
        let path = self.path_for(key)?;
        self.fs.write(&path, value)?;
        Ok(())
    }
}

/// Everything persisted for one site
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub elements: Vec<Element>,
    pub theme: ThemeSettings,
    pub assets: Vec<Asset>,
}

pub fn save_project<S: KeyValueStore>(store: &mut S, project: &Project) -> Result<(), EditorError> {
    store.set(ELEMENTS_KEY, &serde_json::to_string(&project.elements)?)?;
    store.set(THEME_KEY, &serde_json::to_string(&project.theme)?)?;
    store.set(ASSETS_KEY, &serde_json::to_string(&project.assets)?)?;
    info!(
        elements = project.elements.len(),
        assets = project.assets.len(),
        "Project saved"
    );
    Ok(())
}

fn read_key<S: KeyValueStore, T: DeserializeOwned + Default>(
    store: &S,
    key: &str,
) -> Result<T, EditorError> {
    match store.get(key)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => {
            debug!(key, "Key absent, using default");
            Ok(T::default())
        }
    }
}

/// Recompute derived fields and refuse trees that break uniqueness
pub fn validate_elements(mut elements: Vec<Element>) -> Result<Vec<Element>, EditorError> {
    tree::normalize(&mut elements);
    if let Some(violation) = structural_violations(&elements).into_iter().next() {
        return Err(EditorError::CorruptDocument(violation.to_string()));
    }
    Ok(elements)
}

/// Load a project; absent keys fall back to empty defaults
pub fn load_project<S: KeyValueStore>(store: &S) -> Result<Project, EditorError> {
    let elements: Vec<Element> = read_key(store, ELEMENTS_KEY)?;
    let project = Project {
        elements: validate_elements(elements)?,
        theme: read_key(store, THEME_KEY)?,
        assets: read_key(store, ASSETS_KEY)?,
    };
    info!(
        elements = project.elements.len(),
        assets = project.assets.len(),
        "Project loaded"
    );
    Ok(project)
}
