//! Landing routes.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use voyaj_router::RouteId;

/// A landing route with the wrong access level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionSettingsError {
	#[error("public landing route '{0}' requires authentication")]
	PublicLandingRequiresAuth(RouteId),

	#[error("authenticated landing route '{0}' is public")]
	AuthenticatedLandingIsPublic(RouteId),
}

/// Where the gate sends the user on session transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
	/// Shown after logout and forced sign-out. Must be public.
	pub public_landing: RouteId,
	/// Shown after login and when a signed-in user opens a public page.
	/// Must require authentication.
	pub authenticated_landing: RouteId,
}

impl Default for SessionSettings {
	fn default() -> Self {
		Self {
			public_landing: RouteId::Home,
			authenticated_landing: RouteId::Dashboard,
		}
	}
}

impl SessionSettings {
	/// Checks that each landing route has the expected access level.
	pub fn validate(&self) -> Result<(), SessionSettingsError> {
		if !self.public_landing.is_public() {
			return Err(SessionSettingsError::PublicLandingRequiresAuth(self.public_landing));
		}
		if self.authenticated_landing.is_public() {
			return Err(SessionSettingsError::AuthenticatedLandingIsPublic(
				self.authenticated_landing,
			));
		}
		Ok(())
	}
}
