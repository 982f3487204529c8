//! On-disk layout of the persisted editor state.
//!
//! The state file is a JSON object with a single namespace entry:
//!
//! ```json
//! { "geojsons.com": { "state": { "featureCollection": ..., "view": ... }, "version": 1 } }
//! ```
//!
//! Drafts, interaction flags and anything else transient never reach it.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::constants::{STORAGE_KEY, STORAGE_VERSION};
use crate::editor::{EditorSnapshot, ViewState};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid state document: {0}")]
    Json(#[from] serde_json::Error),

    #[error("state document has no \"{0}\" entry")]
    MissingNamespace(&'static str),

    #[error("unsupported state version {0}")]
    UnsupportedVersion(u32),
}

impl PersistenceError {
    /// Whether the file itself is unusable, as opposed to unreadable.
    pub fn is_corrupt(&self) -> bool {
        !matches!(self, PersistenceError::Io(_))
    }
}

pub type PersistenceResult<T> = Result<T, PersistenceError>;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StoredState {
    #[serde(flatten)]
    pub editor: EditorSnapshot,
    #[serde(default)]
    pub view: ViewState,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct PersistedState {
    state: StoredState,
    version: u32,
}

pub fn encode_state(state: &StoredState) -> PersistenceResult<String> {
    let entry = PersistedState {
        state: state.clone(),
        version: STORAGE_VERSION,
    };
    let mut document = Map::new();
    document.insert(STORAGE_KEY.to_string(), serde_json::to_value(entry)?);
    Ok(serde_json::to_string(&Value::Object(document))?)
}

pub fn decode_state(text: &str) -> PersistenceResult<StoredState> {
    let mut document: Map<String, Value> = serde_json::from_str(text)?;
    let entry = document
        .remove(STORAGE_KEY)
        .ok_or(PersistenceError::MissingNamespace(STORAGE_KEY))?;

    // Check the version before the body so a newer layout is reported as such
    let version = entry
        .get("version")
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(0);
    if version != STORAGE_VERSION {
        return Err(PersistenceError::UnsupportedVersion(version));
    }

    let persisted: PersistedState = serde_json::from_value(entry)?;
    Ok(persisted.state)
}

/// Read the state file. A missing file is `Ok(None)`.
pub fn read_state(path: &Path) -> PersistenceResult<Option<StoredState>> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    decode_state(&text).map(Some)
}

/// Write an encoded state, replacing the file atomically.
pub fn write_state(path: &Path, encoded: &str) -> PersistenceResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let tmp = temp_path(path);
    std::fs::write(&tmp, encoded)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

/// Delete the state file. Returns whether there was one.
pub fn remove_state(path: &Path) -> PersistenceResult<bool> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Move an unusable state file aside so it is not overwritten by the next save.
pub fn back_up_corrupt(path: &Path) -> PersistenceResult<PathBuf> {
    let backup = sibling_with_suffix(path, "corrupt");
    std::fs::rename(path, &backup)?;
    Ok(backup)
}

fn temp_path(path: &Path) -> PathBuf {
    sibling_with_suffix(path, "tmp")
}

fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}
