//! Session Gate Integration Tests
//!
//! Start-up, sign-in and sign-out flows as the user experiences them.

use rstest::rstest;
use voyaj::Settings;
use voyaj_api::{AuthResponse, AuthTokens, User};
use voyaj_integration_tests::*;
use voyaj_router::{RouteId, RoutePayload};
use voyaj_session::{ACCESS_TOKEN_KEY, MemoryStore, USER_KEY, ViewDecision};

#[rstest]
fn test_anonymous_deep_link_renders_login_in_place(empty_store: MemoryStore) {
	let t = TestApp::start("/dashboard", empty_store);

	let (state, decision) = t.app.resolve_view();

	assert_eq!(state.route, RouteId::Dashboard);
	assert_eq!(decision, ViewDecision::RenderLogin);
	assert_eq!(t.history.urls(), vec!["/dashboard"]);
}

#[rstest]
fn test_unverified_user_stays_on_verify_email() {
	let store = MemoryStore::new();
	voyaj_session::SessionCredential::new(AuthTokens::new("t"), User::new("new@voyaj.app"))
		.save(&store)
		.unwrap();

	let t = TestApp::start("/verify-email", store);

	assert!(t.app.is_authenticated());
	assert_eq!(t.app.resolve_view().1, ViewDecision::RenderRequested);
	assert_eq!(t.app.current_route(), RouteId::VerifyEmail);
}

#[rstest]
fn test_signed_in_user_on_login_lands_on_dashboard(signed_in_store: MemoryStore) {
	let t = TestApp::start("/login", signed_in_store);

	assert_eq!(t.app.current_route(), RouteId::Dashboard);
	assert_eq!(t.history.urls(), vec!["/dashboard"]);
}

#[rstest]
fn test_configured_landing_route(signed_in_store: MemoryStore) {
	let settings = Settings::from_toml_str("[session]\nauthenticated_landing = \"trips\"").unwrap();
	let t = TestApp::start_with("/home", signed_in_store, settings);

	assert_eq!(t.app.current_route(), RouteId::Trips);
}

#[rstest]
fn test_signed_in_deep_link_keeps_trip(signed_in_store: MemoryStore) {
	let t = TestApp::start("/trip-details/abc%20123", signed_in_store);

	let (state, decision) = t.app.resolve_view();

	assert_eq!(decision, ViewDecision::RenderRequested);
	assert_eq!(state.route, RouteId::TripDetails);
	assert_eq!(state.payload, Some(RoutePayload::trip("abc 123")));
}

#[rstest]
fn test_corrupt_store_starts_anonymous() {
	let store = MemoryStore::with_data([(ACCESS_TOKEN_KEY, "\"t\""), (USER_KEY, "not json")]);

	let t = TestApp::start("/profile", store);

	assert!(!t.app.is_authenticated());
	assert_eq!(t.app.resolve_view().1, ViewDecision::RenderLogin);
}

#[rstest]
fn test_login_logout_cycle(empty_store: MemoryStore) {
	let t = TestApp::start("/login", empty_store);

	t.app.session().on_login_success(AuthResponse {
		tokens: AuthTokens::new("t"),
		user: verified_user(),
	});
	assert!(t.app.is_authenticated());
	assert_eq!(t.app.current_route(), RouteId::Dashboard);

	t.app.logout();
	assert!(!t.app.is_authenticated());
	assert!(t.store.is_empty());
	assert_eq!(t.app.current_route(), RouteId::Home);
	assert_eq!(t.history.urls(), vec!["/login", "/dashboard", "/home"]);
}

#[rstest]
fn test_verified_user_skips_register(signed_in_store: MemoryStore) {
	let t = TestApp::start("/dashboard", signed_in_store);
	t.app.navigate(RouteId::Register, None).unwrap();

	let (state, decision) = t.app.resolve_view();

	assert_eq!(state.route, RouteId::Dashboard);
	assert_eq!(decision, ViewDecision::RenderRequested);
}

#[rstest]
fn test_back_into_protected_page_after_logout(signed_in_store: MemoryStore) {
	let t = TestApp::start("/dashboard", signed_in_store);
	t.app.navigate(RouteId::Profile, None).unwrap();
	t.app.logout();

	t.app.go_back();
	t.history.dispatch_pending();

	assert_eq!(t.app.current_route(), RouteId::Profile);
	assert_eq!(t.app.resolve_view().1, ViewDecision::RenderLogin);
}
