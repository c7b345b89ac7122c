//! Typed wrappers over the backend endpoints, one service per area.

mod auth;
mod expenses;
mod friendships;
mod journal;
mod photos;
mod subscriptions;
mod trips;

pub use auth::{AuthService, LoginRequest, RegisterRequest};
pub use expenses::ExpensesService;
pub use friendships::FriendshipsService;
pub use journal::JournalService;
pub use photos::PhotosService;
pub use subscriptions::SubscriptionsService;
pub use trips::TripsService;

/// Percent-encodes one path segment.
pub(crate) fn segment(value: &str) -> String {
	urlencoding::encode(value).into_owned()
}

/// Builds `?k=v&...` from `pairs`, or an empty string when there are none.
pub(crate) fn query_string(pairs: &[(&str, &str)]) -> String {
	if pairs.is_empty() {
		return String::new();
	}
	let encoded: Vec<String> = pairs
		.iter()
		.map(|(key, value)| format!("{}={}", segment(key), segment(value)))
		.collect();
	format!("?{}", encoded.join("&"))
}
