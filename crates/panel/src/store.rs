//! Persistence of per-transform "closed" preferences.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use serde_json::{Map, Value};
use thiserror::Error;

/// Key under which a transform's closed preference is stored.
pub fn closed_key(transform: &str) -> String {
	format!("transform_closed__{transform}")
}

/// Errors that can occur when persisting a preference.
#[derive(Debug, Error)]
pub enum StoreError {
	#[error("I/O error writing {path}: {error}")]
	Io {
		path: PathBuf,
		#[source]
		error: std::io::Error,
	},

	#[error("failed to encode store: {0}")]
	Json(#[from] serde_json::Error),
}

/// Durable boolean key/value store.
///
/// A failed [`PanelStore::set`] must leave the in-memory value updated so the
/// preference still applies for the rest of the session.
pub trait PanelStore: Send + Sync {
	/// Returns the stored boolean, or `None` if missing or not a boolean.
	fn get(&self, key: &str) -> Option<bool>;

	fn set(&self, key: &str, value: bool) -> Result<(), StoreError>;
}

/// In-process store; nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryStore {
	entries: Mutex<HashMap<String, bool>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}
}

impl PanelStore for MemoryStore {
	fn get(&self, key: &str) -> Option<bool> {
		self.entries.lock().get(key).copied()
	}

	fn set(&self, key: &str, value: bool) -> Result<(), StoreError> {
		self.entries.lock().insert(key.to_string(), value);
		Ok(())
	}
}

/// Store backed by a JSON object file.
///
/// The file is read once on open and rewritten on every `set`. Entries
/// written by other tools that are not booleans read as missing.
#[derive(Debug)]
pub struct FileStore {
	path: PathBuf,
	entries: Mutex<Map<String, Value>>,
}

impl FileStore {
	/// Opens the store at `path`.
	///
	/// A missing file starts an empty store; an unreadable or malformed one
	/// is logged and also starts empty.
	pub fn open(path: impl Into<PathBuf>) -> Self {
		let path = path.into();
		let entries = match std::fs::read_to_string(&path) {
			Ok(content) => match serde_json::from_str::<Value>(&content) {
				Ok(Value::Object(map)) => map,
				Ok(_) => {
					tracing::warn!(path = %path.display(), "store file is not a JSON object, ignoring");
					Map::new()
				}
				Err(error) => {
					tracing::warn!(path = %path.display(), %error, "failed to parse store file, ignoring");
					Map::new()
				}
			},
			Err(error) if error.kind() == std::io::ErrorKind::NotFound => Map::new(),
			Err(error) => {
				tracing::warn!(path = %path.display(), %error, "failed to read store file, ignoring");
				Map::new()
			}
		};
		tracing::debug!(path = %path.display(), entries = entries.len(), "store.open");
		Self {
			path,
			entries: Mutex::new(entries),
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	fn flush(&self, entries: &Map<String, Value>) -> Result<(), StoreError> {
		let content = serde_json::to_string_pretty(entries)?;
		if let Some(parent) = self.path.parent()
			&& !parent.as_os_str().is_empty()
		{
			std::fs::create_dir_all(parent).map_err(|error| StoreError::Io {
				path: parent.to_path_buf(),
				error,
			})?;
		}
		std::fs::write(&self.path, content).map_err(|error| StoreError::Io {
			path: self.path.clone(),
			error,
		})
	}
}

impl PanelStore for FileStore {
	fn get(&self, key: &str) -> Option<bool> {
		self.entries.lock().get(key).and_then(Value::as_bool)
	}

	fn set(&self, key: &str, value: bool) -> Result<(), StoreError> {
		let mut entries = self.entries.lock();
		entries.insert(key.to_string(), Value::Bool(value));
		self.flush(&entries)
	}
}
