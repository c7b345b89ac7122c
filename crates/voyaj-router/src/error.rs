//! Error types for client-side routing.

use thiserror::Error;

/// Error type for router operations.
///
/// None of these are fatal: the router keeps its previous state whenever
/// an operation returns an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
	/// The route name is not part of the closed route set.
	#[error("Invalid route name: {0}")]
	InvalidRouteName(String),

	/// The history API rejected a push, replace or full navigation.
	#[error("Navigation failed: {0}")]
	NavigationFailed(String),

	/// A history state object could not be encoded or decoded.
	#[error("History state error: {0}")]
	State(String),

	/// A browser API (window, history, location) is not reachable.
	#[error("Browser API unavailable: {0}")]
	Unavailable(String),
}

impl From<serde_json::Error> for RouterError {
	fn from(err: serde_json::Error) -> Self {
		Self::State(err.to_string())
	}
}
