//! `/friendships` endpoints.

use super::segment;
use crate::client::ApiClient;
use crate::error::ApiError;
use serde_json::Value;

/// Friend requests and the friend list.
#[derive(Debug, Clone, Copy)]
pub struct FriendshipsService<'a> {
	client: &'a ApiClient,
}

impl<'a> FriendshipsService<'a> {
	pub fn new(client: &'a ApiClient) -> Self {
		Self { client }
	}

	pub async fn send_request(&self, user: &Value) -> Result<Value, ApiError> {
		self.client.post("/friendships/requests", user).await
	}

	/// Pending requests addressed to the current user.
	pub async fn requests(&self) -> Result<Value, ApiError> {
		self.client.get("/friendships/requests").await
	}

	pub async fn respond(&self, request_id: &str, response: &Value) -> Result<Value, ApiError> {
		self.client
			.post(
				&format!("/friendships/requests/{}/respond", segment(request_id)),
				response,
			)
			.await
	}

	pub async fn friends(&self) -> Result<Value, ApiError> {
		// The list lives at the collection root; the slash is significant.
		self.client.get("/friendships/").await
	}

	pub async fn remove(&self, friend_id: &str) -> Result<Value, ApiError> {
		self.client
			.delete(&format!("/friendships/{}", segment(friend_id)))
			.await
	}
}
