//! `/auth` endpoints.

use super::segment;
use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::models::{AuthResponse, User};
use crate::transport::FormPart;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
	pub email: String,
	pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
	pub email: String,
	pub password: String,
	pub name: String,
}

/// Account and authentication calls.
#[derive(Debug, Clone, Copy)]
pub struct AuthService<'a> {
	client: &'a ApiClient,
}

impl<'a> AuthService<'a> {
	pub fn new(client: &'a ApiClient) -> Self {
		Self { client }
	}

	pub async fn register(&self, request: &RegisterRequest) -> Result<AuthResponse, ApiError> {
		self.client.post("/auth/register", request).await
	}

	pub async fn login(&self, request: &LoginRequest) -> Result<AuthResponse, ApiError> {
		self.client.post("/auth/login", request).await
	}

	pub async fn profile(&self) -> Result<User, ApiError> {
		self.client.get("/auth/profile").await
	}

	pub async fn search_users(&self, query: &str) -> Result<Vec<User>, ApiError> {
		self.client
			.get(&format!("/auth/search?q={}", segment(query)))
			.await
	}

	pub async fn send_verification(&self) -> Result<Value, ApiError> {
		self.client
			.request(ApiRequest::post("/auth/send-verification"))
			.await
	}

	pub async fn verify_email(&self, data: &Value) -> Result<Value, ApiError> {
		self.client.post("/auth/verify-email", data).await
	}

	pub async fn send_password_reset(&self, email: &str) -> Result<Value, ApiError> {
		self.client
			.post("/auth/send-password-reset", &json!({ "email": email }))
			.await
	}

	pub async fn reset_password(&self, data: &Value) -> Result<Value, ApiError> {
		self.client.post("/auth/reset-password", data).await
	}

	/// Uploads a new profile photo as the `file` form field.
	pub async fn upload_profile_photo(
		&self,
		file_name: &str,
		content_type: &str,
		data: Vec<u8>,
	) -> Result<Value, ApiError> {
		self.client
			.request(
				ApiRequest::post("/auth/upload-profile-photo")
					.part(FormPart::file("file", file_name, content_type, data)),
			)
			.await
	}
}
