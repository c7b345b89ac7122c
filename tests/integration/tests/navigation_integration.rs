//! Navigation Integration Tests
//!
//! Router behaviour through the application surface: URL building, back and
//! forward, hash links and rejected route names.

use rstest::rstest;
use serde_json::json;
use voyaj_integration_tests::*;
use voyaj_router::{HistoryState, MemoryHistory, RouteId, RoutePayload};
use voyaj_session::MemoryStore;

#[rstest]
fn test_navigate_round_trip(signed_in_store: MemoryStore) {
	let t = TestApp::start("/dashboard", signed_in_store);

	t.app
		.navigate(RouteId::TripDetails, Some(RoutePayload::trip("abc123")))
		.unwrap();

	assert_eq!(t.app.current_route(), RouteId::TripDetails);
	assert_eq!(t.app.route_payload(), Some(RoutePayload::trip("abc123")));
	assert!(t.app.is_active(RouteId::TripDetails));
	assert_eq!(t.history.current_url(), "/trip-details/abc123");
	assert_eq!(t.history.len(), 2);
}

#[rstest]
fn test_same_route_twice_pushes_two_entries(signed_in_store: MemoryStore) {
	let t = TestApp::start("/dashboard", signed_in_store);

	t.app.navigate(RouteId::Profile, None).unwrap();
	t.app.navigate(RouteId::Profile, None).unwrap();

	assert_eq!(t.history.urls(), vec!["/dashboard", "/profile", "/profile"]);
}

#[rstest]
fn test_invalid_name_changes_nothing(empty_store: MemoryStore) {
	let t = TestApp::start("/home", empty_store);

	assert!(t.app.navigate_named("admin", None).is_err());

	assert_eq!(t.app.current_route(), RouteId::Home);
	assert_eq!(t.history.len(), 1);
}

#[rstest]
fn test_back_and_forward_restore_payload(signed_in_store: MemoryStore) {
	let t = TestApp::start("/dashboard", signed_in_store);
	t.app
		.navigate(RouteId::TripDetails, Some(RoutePayload::trip("t-1")))
		.unwrap();
	t.app.navigate(RouteId::Profile, None).unwrap();

	t.app.go_back();
	// The browser reports the move on a later turn.
	assert_eq!(t.app.current_route(), RouteId::Profile);
	assert_eq!(t.history.dispatch_pending(), 1);
	assert_eq!(t.app.current_route(), RouteId::TripDetails);
	assert_eq!(t.app.route_payload(), Some(RoutePayload::trip("t-1")));

	t.history.forward();
	t.history.dispatch_pending();
	assert_eq!(t.app.current_route(), RouteId::Profile);
}

#[rstest]
fn test_hash_link_is_parsed(signed_in_store: MemoryStore) {
	let t = TestApp::start("/dashboard", signed_in_store);

	t.history.edit_hash("#trip-details/xyz");
	t.history.dispatch_pending();

	assert_eq!(t.app.current_route(), RouteId::TripDetails);
	assert_eq!(t.app.route_payload(), Some(RoutePayload::trip("xyz")));
}

#[rstest]
#[case("/", RouteId::Home)]
#[case("/nowhere", RouteId::Home)]
#[case("/reset-password?token=abc", RouteId::ResetPassword)]
#[case("/login#register", RouteId::Register)]
fn test_start_url_resolution(#[case] url: &str, #[case] expected: RouteId) {
	let t = TestApp::start(url, MemoryStore::new());
	assert_eq!(t.app.current_route(), expected);
}

#[rstest]
fn test_existing_entry_state_wins_over_url() {
	let state = HistoryState::new(RouteId::Login).to_value().unwrap();
	let history = MemoryHistory::with_state("/register", state);
	let router = voyaj_router::Router::new(std::rc::Rc::new(history));

	assert_eq!(router.current_route(), RouteId::Login);
}

#[rstest]
fn test_foreign_entry_state_is_ignored() {
	let history = MemoryHistory::with_state("/profile", json!({"scroll": 120}));
	let router = voyaj_router::Router::new(std::rc::Rc::new(history));

	assert_eq!(router.current_route(), RouteId::Profile);
}

#[rstest]
fn test_queries_have_no_side_effects(signed_in_store: MemoryStore) {
	let t = TestApp::start("/dashboard", signed_in_store);
	let before = t.history.urls();

	for route in RouteId::ALL {
		t.app.is_public_route(route);
		t.app.is_active(route);
		t.app.require_auth(route);
	}

	assert_eq!(t.history.urls(), before);
	assert_eq!(t.app.current_route(), RouteId::Dashboard);
}
