//! `/trips/{id}/journal-entries` endpoints.

use super::{query_string, segment};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::services::trips::trip_path;
use serde_json::Value;

#[derive(Debug, Clone, Copy)]
pub struct JournalService<'a> {
	client: &'a ApiClient,
}

impl<'a> JournalService<'a> {
	pub fn new(client: &'a ApiClient) -> Self {
		Self { client }
	}

	pub async fn create(&self, trip_id: &str, entry: &Value) -> Result<Value, ApiError> {
		self.client
			.post(&trip_path(trip_id, "/journal-entries"), entry)
			.await
	}

	pub async fn list(&self, trip_id: &str) -> Result<Value, ApiError> {
		self.client.get(&trip_path(trip_id, "/journal-entries")).await
	}

	pub async fn get(&self, trip_id: &str, entry_id: &str) -> Result<Value, ApiError> {
		self.client.get(&entry_path(trip_id, entry_id)).await
	}

	pub async fn update(
		&self,
		trip_id: &str,
		entry_id: &str,
		changes: &Value,
	) -> Result<Value, ApiError> {
		self.client.put(&entry_path(trip_id, entry_id), changes).await
	}

	/// Full-text search over the trip's entries.
	pub async fn search(&self, trip_id: &str, query: &str) -> Result<Value, ApiError> {
		let path = trip_path(trip_id, "/journal-entries/search") + &query_string(&[("q", query)]);
		self.client.get(&path).await
	}
}

fn entry_path(trip_id: &str, entry_id: &str) -> String {
	trip_path(trip_id, &format!("/journal-entries/{}", segment(entry_id)))
}
