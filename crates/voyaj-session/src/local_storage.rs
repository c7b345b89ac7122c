//! `window.localStorage` backed [`KeyValueStore`].

use crate::storage::{KeyValueStore, StorageError};
use wasm_bindgen::JsValue;

#[derive(Debug, Clone)]
pub struct LocalStorage {
	storage: web_sys::Storage,
}

impl LocalStorage {
	pub fn new() -> Result<Self, StorageError> {
		let window =
			web_sys::window().ok_or_else(|| StorageError::Unavailable("window".to_string()))?;
		let storage = window
			.local_storage()
			.map_err(|err| StorageError::Unavailable(js_error(&err)))?
			.ok_or_else(|| StorageError::Unavailable("localStorage".to_string()))?;
		Ok(Self { storage })
	}
}

impl KeyValueStore for LocalStorage {
	fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
		self.storage
			.get_item(key)
			.map_err(|err| StorageError::Read(js_error(&err)))
	}

	fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
		// Throws QuotaExceededError when full.
		self.storage
			.set_item(key, value)
			.map_err(|err| StorageError::Write(js_error(&err)))
	}

	fn remove(&self, key: &str) -> Result<(), StorageError> {
		self.storage
			.remove_item(key)
			.map_err(|err| StorageError::Write(js_error(&err)))
	}
}

fn js_error(err: &JsValue) -> String {
	err.as_string().unwrap_or_else(|| format!("{:?}", err))
}
