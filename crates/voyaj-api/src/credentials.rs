//! Source of the bearer credential attached to requests.

use crate::models::AuthTokens;

/// Supplies and receives the session tokens.
///
/// The session layer implements this; the client only reads the access
/// token before each request and writes back refreshed tokens.
pub trait CredentialProvider {
	fn access_token(&self) -> Option<String>;

	fn refresh_token(&self) -> Option<String>;

	/// Replaces the stored tokens after a successful refresh.
	fn store_tokens(&self, tokens: AuthTokens);
}

/// Provider for clients that never authenticate.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl CredentialProvider for Anonymous {
	fn access_token(&self) -> Option<String> {
		None
	}

	fn refresh_token(&self) -> Option<String> {
		None
	}

	fn store_tokens(&self, _tokens: AuthTokens) {}
}
