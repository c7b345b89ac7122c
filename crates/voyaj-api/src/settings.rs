//! Client settings.

use serde::{Deserialize, Serialize};

/// Backend base URL used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";

/// Connection settings for [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
	/// Backend origin, e.g. `https://api.voyaj.app`.
	pub base_url: String,
	/// Endpoint that exchanges a refresh token for new tokens. Refresh is
	/// disabled when unset.
	pub refresh_path: Option<String>,
}

impl Default for ApiSettings {
	fn default() -> Self {
		Self {
			base_url: DEFAULT_BASE_URL.to_string(),
			refresh_path: None,
		}
	}
}

impl ApiSettings {
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into(),
			..Self::default()
		}
	}

	pub fn with_refresh_path(mut self, path: impl Into<String>) -> Self {
		self.refresh_path = Some(path.into());
		self
	}

	/// Joins the base URL and an endpoint path.
	pub fn url(&self, path: &str) -> String {
		let base = self.base_url.trim_end_matches('/');
		if path.starts_with('/') {
			format!("{}{}", base, path)
		} else {
			format!("{}/{}", base, path)
		}
	}
}
