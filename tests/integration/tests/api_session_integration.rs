//! API and Session Integration Tests
//!
//! Requests carry the gate's credential; a rejected credential signs the
//! user out.

use rstest::rstest;
use serde_json::json;
use voyaj::Settings;
use voyaj_api::ApiError;
use voyaj_api::services::RegisterRequest;
use voyaj_integration_tests::*;
use voyaj_router::RouteId;
use voyaj_session::{ACCESS_TOKEN_KEY, MemoryStore};

#[rstest]
#[tokio::test]
async fn test_login_through_api(empty_store: MemoryStore) {
	let t = TestApp::start("/login", empty_store);
	t.backend.respond(
		200,
		json!({
			"access_token": "tok",
			"user": { "id": 1, "email": "ana@voyaj.app", "email_verified": true }
		}),
	);

	t.app.login("ana@voyaj.app", "secret").await.unwrap();

	assert!(t.app.is_authenticated());
	assert_eq!(t.app.current_route(), RouteId::Dashboard);
	assert_eq!(t.store.raw(ACCESS_TOKEN_KEY).as_deref(), Some("\"tok\""));
	assert_eq!(t.backend.requests()[0].header("authorization"), None);
}

#[rstest]
#[tokio::test]
async fn test_failed_login_stays_put(empty_store: MemoryStore) {
	let t = TestApp::start("/login", empty_store);
	t.backend.respond(401, json!({ "detail": "Invalid credentials" }));

	let err = t.app.login("ana@voyaj.app", "wrong").await.unwrap_err();

	assert_eq!(err.user_message(), "Invalid credentials");
	assert!(!t.app.is_authenticated());
	assert_eq!(t.app.current_route(), RouteId::Login);
	assert!(t.history.page_loads().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_register_opens_verify_email(empty_store: MemoryStore) {
	let t = TestApp::start("/register", empty_store);
	t.backend.respond(
		201,
		json!({ "access_token": "tok", "user": { "email": "new@voyaj.app" } }),
	);

	t.app
		.register(&RegisterRequest {
			email: "new@voyaj.app".to_string(),
			password: "secret".to_string(),
			name: "New".to_string(),
		})
		.await
		.unwrap();

	assert_eq!(t.app.current_route(), RouteId::VerifyEmail);
	assert!(!t.app.session_state().email_verified());
}

#[rstest]
#[tokio::test]
async fn test_requests_carry_session_token(signed_in_store: MemoryStore) {
	let t = TestApp::start("/dashboard", signed_in_store);
	t.backend.respond(200, json!([]));

	t.app.trips().list().await.unwrap();

	let request = &t.backend.requests()[0];
	assert_eq!(request.url, "http://localhost:8000/trips");
	assert_eq!(request.header("authorization"), Some("Bearer token-1"));
}

#[rstest]
#[tokio::test]
async fn test_unauthorized_signs_out_from_any_route(signed_in_store: MemoryStore) {
	let t = TestApp::start("/trip-details/abc123", signed_in_store);
	t.backend.respond(401, json!({ "detail": "Token expired" }));

	let err = t.app.trips().get("abc123").await.unwrap_err();

	assert!(matches!(err, ApiError::Unauthorized(_)));
	assert!(!t.app.is_authenticated());
	assert!(t.store.is_empty());
	assert_eq!(t.history.page_loads(), vec!["/home"]);
	assert_eq!(t.app.current_route(), RouteId::Home);
}

#[rstest]
#[tokio::test]
async fn test_refresh_keeps_session(signed_in_store: MemoryStore) {
	let settings = Settings::from_toml_str("[api]\nrefresh_path = \"/auth/refresh\"").unwrap();
	let t = TestApp::start_with("/profile", signed_in_store, settings);
	t.backend.respond(401, json!({ "detail": "Token expired" }));
	t.backend.respond(200, json!({ "access_token": "token-2" }));
	t.backend.respond(200, json!({ "email": "ana@voyaj.app", "email_verified": true }));

	let user = t.app.refresh_profile().await.unwrap();

	assert_eq!(user.email, "ana@voyaj.app");
	assert!(t.app.is_authenticated());
	assert_eq!(t.store.raw(ACCESS_TOKEN_KEY).as_deref(), Some("\"token-2\""));
	assert_eq!(
		t.backend.requests()[2].header("authorization"),
		Some("Bearer token-2")
	);
	assert!(t.history.page_loads().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_photo_upload_carries_token_as_multipart(signed_in_store: MemoryStore) {
	let t = TestApp::start("/trip-details/abc123", signed_in_store);
	t.backend.respond(201, json!({ "id": "p1" }));

	let photo = t
		.app
		.photos()
		.upload("abc123", "day1.jpg", "image/jpeg", vec![0xff, 0xd8])
		.await
		.unwrap();

	assert_eq!(photo["id"], "p1");
	let request = &t.backend.requests()[0];
	assert_eq!(request.url, "http://localhost:8000/trips/abc123/photos/upload");
	assert_eq!(request.header("authorization"), Some("Bearer token-1"));
	assert_eq!(request.header("content-type"), None);
	assert_eq!(request.form_parts().map(|parts| parts[0].name.as_str()), Some("file"));
}

#[rstest]
#[tokio::test]
async fn test_export_returns_pdf(signed_in_store: MemoryStore) {
	let t = TestApp::start("/trip-details/abc123", signed_in_store);
	t.backend.respond_bytes(200, b"%PDF-1.7");

	let pdf = t.app.trips().export("abc123").await.unwrap();

	assert_eq!(pdf, b"%PDF-1.7".to_vec());
	assert_eq!(
		t.backend.requests()[0].header("accept"),
		Some("application/pdf")
	);
}

#[rstest]
#[tokio::test]
async fn test_expired_session_on_subscriptions_signs_out(signed_in_store: MemoryStore) {
	let t = TestApp::start("/profile", signed_in_store);
	t.backend.respond(401, json!({ "detail": "Token expired" }));

	let err = t.app.subscriptions().status().await.unwrap_err();

	assert!(matches!(err, ApiError::Unauthorized(_)));
	assert!(!t.app.is_authenticated());
	assert_eq!(t.history.page_loads(), vec!["/home"]);
}
