//! Data attached to a single navigation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Optional data attached to a navigation.
///
/// Only the trip identifier is reflected in the URL; any other field lives
/// in the history entry's state and is lost on a full reload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutePayload {
	/// Trip identifier, serialized as the second URL segment.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub trip_id: Option<String>,

	/// Any other navigation data.
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl RoutePayload {
	/// Creates an empty payload.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates a payload carrying a trip identifier.
	pub fn trip(trip_id: impl Into<String>) -> Self {
		Self {
			trip_id: Some(trip_id.into()),
			extra: Map::new(),
		}
	}

	/// Adds an extra field.
	pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.extra.insert(key.into(), value.into());
		self
	}

	/// Returns the trip identifier, ignoring empty strings.
	pub fn trip_id(&self) -> Option<&str> {
		self.trip_id.as_deref().filter(|id| !id.is_empty())
	}

	/// Returns an extra field.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.extra.get(key)
	}

	/// Returns `true` if the payload carries no data at all.
	pub fn is_empty(&self) -> bool {
		self.trip_id().is_none() && self.extra.is_empty()
	}
}
