//! `/trips` endpoints.

use super::segment;
use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiError;
use serde_json::Value;

/// Trip management calls. Trip bodies are passed through as JSON.
#[derive(Debug, Clone, Copy)]
pub struct TripsService<'a> {
	client: &'a ApiClient,
}

impl<'a> TripsService<'a> {
	pub fn new(client: &'a ApiClient) -> Self {
		Self { client }
	}

	pub async fn list(&self) -> Result<Value, ApiError> {
		self.client.get("/trips").await
	}

	pub async fn create(&self, trip: &Value) -> Result<Value, ApiError> {
		self.client.post("/trips", trip).await
	}

	pub async fn get(&self, trip_id: &str) -> Result<Value, ApiError> {
		self.client.get(&trip_path(trip_id, "")).await
	}

	pub async fn update(&self, trip_id: &str, changes: &Value) -> Result<Value, ApiError> {
		self.client.put(&trip_path(trip_id, ""), changes).await
	}

	pub async fn delete(&self, trip_id: &str) -> Result<Value, ApiError> {
		self.client.delete(&trip_path(trip_id, "")).await
	}

	pub async fn analytics(&self, trip_id: &str) -> Result<Value, ApiError> {
		self.client.get(&trip_path(trip_id, "/analytics")).await
	}

	/// Downloads the trip report as a PDF document.
	pub async fn export(&self, trip_id: &str) -> Result<Vec<u8>, ApiError> {
		self.client
			.request_bytes(
				ApiRequest::get(trip_path(trip_id, "/export")).header("Accept", "application/pdf"),
			)
			.await
	}

	pub async fn invite(&self, trip_id: &str, invitation: &Value) -> Result<Value, ApiError> {
		self.client
			.post(&trip_path(trip_id, "/invite"), invitation)
			.await
	}

	/// Accepts or declines an invitation to `trip_id`.
	pub async fn respond_invitation(
		&self,
		trip_id: &str,
		response: &Value,
	) -> Result<Value, ApiError> {
		self.client
			.post(&trip_path(trip_id, "/respond-invitation"), response)
			.await
	}

	pub async fn add_activity(&self, trip_id: &str, activity: &Value) -> Result<Value, ApiError> {
		self.client
			.post(&trip_path(trip_id, "/activities"), activity)
			.await
	}

	pub async fn update_activity(
		&self,
		trip_id: &str,
		activity_id: &str,
		changes: &Value,
	) -> Result<Value, ApiError> {
		self.client
			.put(&activity_path(trip_id, activity_id), changes)
			.await
	}

	pub async fn delete_activity(
		&self,
		trip_id: &str,
		activity_id: &str,
	) -> Result<Value, ApiError> {
		self.client.delete(&activity_path(trip_id, activity_id)).await
	}
}

/// `/trips/{trip_id}{suffix}` with the identifier percent-encoded.
pub(crate) fn trip_path(trip_id: &str, suffix: &str) -> String {
	format!("/trips/{}{}", segment(trip_id), suffix)
}

fn activity_path(trip_id: &str, activity_id: &str) -> String {
	trip_path(trip_id, &format!("/activities/{}", segment(activity_id)))
}
