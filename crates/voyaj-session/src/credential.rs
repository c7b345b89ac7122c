//! The persisted session credential.

use crate::storage::{KeyValueStore, StorageError, read_json, read_token, write_json};
use tracing::{debug, warn};
use voyaj_api::{AuthResponse, AuthTokens, User};

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USER_KEY: &str = "user";

/// Tokens plus the cached profile of the signed-in user.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionCredential {
	pub tokens: AuthTokens,
	pub user: User,
}

impl SessionCredential {
	pub fn new(tokens: AuthTokens, user: User) -> Self {
		Self { tokens, user }
	}

	/// Loads the credential.
	///
	/// Returns `None` unless both the access token and the user are present
	/// and decodable. Read failures count as "no session".
	pub fn load(store: &dyn KeyValueStore) -> Option<Self> {
		match Self::try_load(store) {
			Ok(credential) => credential,
			Err(err) => {
				warn!(error = %err, "stored session unreadable, starting anonymous");
				None
			}
		}
	}

	fn try_load(store: &dyn KeyValueStore) -> Result<Option<Self>, StorageError> {
		let Some(access_token) = read_token(store, ACCESS_TOKEN_KEY)? else {
			debug!("no stored access token");
			return Ok(None);
		};
		let Some(user) = read_json::<User>(store, USER_KEY)? else {
			debug!("access token stored without user");
			return Ok(None);
		};
		// A missing or broken refresh token does not invalidate the session.
		let refresh_token = read_token(store, REFRESH_TOKEN_KEY).unwrap_or_default();

		Ok(Some(Self {
			tokens: AuthTokens {
				access_token,
				refresh_token,
			},
			user,
		}))
	}

	/// Writes every key. Stops at the first failure.
	pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
		save_tokens(store, &self.tokens)?;
		write_json(store, USER_KEY, &self.user)
	}

	/// Removes every key, attempting all of them.
	pub fn clear(store: &dyn KeyValueStore) -> Result<(), StorageError> {
		let mut first_error = None;
		for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
			if let Err(err) = store.remove(key) {
				first_error.get_or_insert(err);
			}
		}
		first_error.map_or(Ok(()), Err)
	}
}

impl From<AuthResponse> for SessionCredential {
	fn from(response: AuthResponse) -> Self {
		Self::new(response.tokens, response.user)
	}
}

pub(crate) fn save_tokens(store: &dyn KeyValueStore, tokens: &AuthTokens) -> Result<(), StorageError> {
	write_json(store, ACCESS_TOKEN_KEY, &tokens.access_token)?;
	match &tokens.refresh_token {
		Some(refresh) => write_json(store, REFRESH_TOKEN_KEY, refresh),
		None => store.remove(REFRESH_TOKEN_KEY),
	}
}
