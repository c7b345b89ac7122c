//! Wire types shared by the services and the session layer.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Token pair returned by authentication endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthTokens {
	pub access_token: String,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<String>,
}

impl AuthTokens {
	pub fn new(access_token: impl Into<String>) -> Self {
		Self {
			access_token: access_token.into(),
			refresh_token: None,
		}
	}

	pub fn with_refresh(mut self, refresh_token: impl Into<String>) -> Self {
		self.refresh_token = Some(refresh_token.into());
		self
	}
}

/// User profile as returned by the backend.
///
/// Fields the client does not interpret are kept in `extra` so that the
/// cached profile round-trips without loss.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
	#[serde(default, deserialize_with = "string_or_number")]
	pub id: Option<String>,
	#[serde(default)]
	pub email: String,
	#[serde(default)]
	pub name: Option<String>,
	#[serde(default)]
	pub email_verified: bool,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl User {
	pub fn new(email: impl Into<String>) -> Self {
		Self {
			email: email.into(),
			..Self::default()
		}
	}

	pub fn verified(mut self, email_verified: bool) -> Self {
		self.email_verified = email_verified;
		self
	}
}

/// Body of a successful login or registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
	#[serde(flatten)]
	pub tokens: AuthTokens,
	pub user: User,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	Ok(match Option::<Value>::deserialize(deserializer)? {
		Some(Value::String(s)) => Some(s),
		Some(Value::Number(n)) => Some(n.to_string()),
		_ => None,
	})
}
