//! Conversion between routes and URLs.
//!
//! URLs have the shape `/{page}` or `/{page}/{tripId}`. The same shape is
//! accepted in the fragment (`#page/tripId`), which takes precedence over
//! the path when present.

use crate::payload::RoutePayload;
use crate::route::RouteId;
use std::borrow::Cow;

/// The parts of the browser location the router reads.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Location {
	/// Path component, e.g. `/trip-details/abc123`.
	pub pathname: String,
	/// Query string including the leading `?`, or empty.
	pub search: String,
	/// Fragment including the leading `#`, or empty.
	pub hash: String,
}

impl Location {
	/// Creates a location without a query string.
	pub fn new(pathname: impl Into<String>, hash: impl Into<String>) -> Self {
		Self {
			pathname: pathname.into(),
			search: String::new(),
			hash: hash.into(),
		}
	}

	pub fn with_search(mut self, search: impl Into<String>) -> Self {
		self.search = search.into();
		self
	}

	/// Splits a same-origin URL (`/path?query#hash`) into a location.
	///
	/// The query is kept for [`href`](Self::href) but never routed on.
	pub fn from_url(url: &str) -> Self {
		let (before_hash, hash) = match url.find('#') {
			Some(idx) => (&url[..idx], &url[idx..]),
			None => (url, ""),
		};
		let (pathname, search) = match before_hash.find('?') {
			Some(idx) => (&before_hash[..idx], &before_hash[idx..]),
			None => (before_hash, ""),
		};
		let pathname = if pathname.is_empty() { "/" } else { pathname };

		Self::new(pathname, hash).with_search(search)
	}

	/// Returns the path, query and fragment.
	pub fn href(&self) -> String {
		format!("{}{}{}", self.pathname, self.search, self.hash)
	}
}

/// Builds the URL for a route and its payload.
///
/// Only the trip identifier is encoded into the path.
pub fn build_url(route: RouteId, payload: Option<&RoutePayload>) -> String {
	match payload.and_then(RoutePayload::trip_id) {
		Some(trip_id) => format!("/{}/{}", route.as_str(), urlencoding::encode(trip_id)),
		None => format!("/{}", route.as_str()),
	}
}

/// Derives the route and payload from a location.
///
/// Never fails: an empty or unrecognized location resolves to
/// [`RouteId::DEFAULT`] without payload.
pub fn parse_location(location: &Location) -> (RouteId, Option<RoutePayload>) {
	let fragment = location.hash.trim_start_matches('#');
	if fragment.is_empty() {
		parse_segments(&location.pathname)
	} else {
		parse_segments(fragment)
	}
}

fn parse_segments(source: &str) -> (RouteId, Option<RoutePayload>) {
	let mut segments = source.split('/').filter(|segment| !segment.is_empty());

	let Some(page) = segments.next() else {
		return (RouteId::DEFAULT, None);
	};
	let Ok(route) = decode(page).parse::<RouteId>() else {
		tracing::debug!(page, "unrecognized page in URL, using default route");
		return (RouteId::DEFAULT, None);
	};

	let payload = segments
		.next()
		.map(|trip_id| RoutePayload::trip(decode(trip_id)));

	(route, payload)
}

fn decode(segment: &str) -> Cow<'_, str> {
	urlencoding::decode(segment).unwrap_or(Cow::Borrowed(segment))
}
