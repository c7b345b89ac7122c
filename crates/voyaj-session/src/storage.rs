//! Persisted key-value store.
//!
//! The session credential outlives page loads through a string store
//! (`localStorage` in the browser). Values are JSON-encoded.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
	#[error("Storage unavailable: {0}")]
	Unavailable(String),

	#[error("Storage read failed: {0}")]
	Read(String),

	#[error("Storage write failed: {0}")]
	Write(String),

	#[error("Invalid stored value for '{key}': {reason}")]
	Decode { key: String, reason: String },
}

/// String key-value store.
pub trait KeyValueStore {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

	fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-memory [`KeyValueStore`].
///
/// Clones share the same data. Reads and writes can be made to fail to
/// exercise error paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
	data: Rc<RefCell<HashMap<String, String>>>,
	fail_reads: Rc<Cell<bool>>,
	fail_writes: Rc<Cell<bool>>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_data<I, K, V>(data: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let store = Self::new();
		store
			.data
			.borrow_mut()
			.extend(data.into_iter().map(|(k, v)| (k.into(), v.into())));
		store
	}

	pub fn set_fail_reads(&self, fail: bool) {
		self.fail_reads.set(fail);
	}

	pub fn set_fail_writes(&self, fail: bool) {
		self.fail_writes.set(fail);
	}

	/// Reads a value regardless of injected failures.
	pub fn raw(&self, key: &str) -> Option<String> {
		self.data.borrow().get(key).cloned()
	}

	pub fn len(&self) -> usize {
		self.data.borrow().len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.borrow().is_empty()
	}
}

impl KeyValueStore for MemoryStore {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
		if self.fail_reads.get() {
			return Err(StorageError::Read(format!("read of '{}' rejected", key)));
		}
		Ok(self.raw(key))
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		if self.fail_writes.get() {
			return Err(StorageError::Write(format!("write of '{}' rejected", key)));
		}
		self.data
			.borrow_mut()
			.insert(key.to_string(), value.to_string());
		Ok(())
	}

	fn remove(&self, key: &str) -> Result<(), StorageError> {
		if self.fail_writes.get() {
			return Err(StorageError::Write(format!("removal of '{}' rejected", key)));
		}
		self.data.borrow_mut().remove(key);
		Ok(())
	}
}

/// Reads and decodes a JSON value.
pub fn read_json<T: DeserializeOwned>(
	store: &dyn KeyValueStore,
	key: &str,
) -> Result<Option<T>, StorageError> {
	let Some(raw) = store.get(key)? else {
		return Ok(None);
	};
	serde_json::from_str(&raw)
		.map(Some)
		.map_err(|err| StorageError::Decode {
			key: key.to_string(),
			reason: err.to_string(),
		})
}

/// Encodes and writes a JSON value.
pub fn write_json<T: Serialize + ?Sized>(
	store: &dyn KeyValueStore,
	key: &str,
	value: &T,
) -> Result<(), StorageError> {
	let encoded = serde_json::to_string(value).map_err(|err| StorageError::Write(err.to_string()))?;
	store.set(key, &encoded)
}

/// Reads a token.
///
/// Tokens are stored as JSON strings (`"abc"`); a bare value is accepted as
/// is. Empty tokens count as absent.
pub fn read_token(store: &dyn KeyValueStore, key: &str) -> Result<Option<String>, StorageError> {
	let Some(raw) = store.get(key)? else {
		return Ok(None);
	};
	let token = match serde_json::from_str::<String>(&raw) {
		Ok(token) => token,
		Err(_) => raw.trim().trim_matches('"').to_string(),
	};
	Ok(Some(token).filter(|token| !token.is_empty()))
}
