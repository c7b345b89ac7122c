//! Shared fixtures for the Voyaj integration tests.
//!
//! Every test runs the real crates on in-memory capabilities: a
//! [`MemoryHistory`] for the address bar, a [`MemoryStore`] for
//! `localStorage` and a [`ScriptedBackend`] for the network.

use async_trait::async_trait;
use rstest::fixture;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use voyaj::{AppContext, Settings};
use voyaj_api::{ApiError, AuthTokens, HttpRequest, HttpResponse, HttpTransport, User};
use voyaj_router::MemoryHistory;
use voyaj_session::{MemoryStore, SessionCredential};

/// Backend double answering with queued responses.
///
/// Unscripted requests get a 500.
#[derive(Default)]
pub struct ScriptedBackend {
	responses: RefCell<VecDeque<HttpResponse>>,
	requests: RefCell<Vec<HttpRequest>>,
}

impl ScriptedBackend {
	pub fn new() -> Rc<Self> {
		Rc::new(Self::default())
	}

	pub fn respond(&self, status: u16, body: serde_json::Value) {
		self.responses
			.borrow_mut()
			.push_back(HttpResponse::new(status, body.to_string()));
	}

	pub fn respond_bytes(&self, status: u16, body: &[u8]) {
		self.responses
			.borrow_mut()
			.push_back(HttpResponse::new(status, body));
	}

	pub fn requests(&self) -> Vec<HttpRequest> {
		self.requests.borrow().clone()
	}
}

#[async_trait(?Send)]
impl HttpTransport for ScriptedBackend {
	async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
		self.requests.borrow_mut().push(request);
		Ok(self
			.responses
			.borrow_mut()
			.pop_front()
			.unwrap_or_else(|| HttpResponse::new(500, "")))
	}
}

/// A running app and handles to its capabilities.
pub struct TestApp {
	pub app: AppContext,
	pub history: MemoryHistory,
	pub store: MemoryStore,
	pub backend: Rc<ScriptedBackend>,
}

impl TestApp {
	/// Starts the app at `url` on `store`.
	pub fn start(url: &str, store: MemoryStore) -> Self {
		Self::start_with(url, store, Settings::default())
	}

	pub fn start_with(url: &str, store: MemoryStore, settings: Settings) -> Self {
		let history = MemoryHistory::new(url);
		let backend = ScriptedBackend::new();
		let app = AppContext::new(
			settings,
			Rc::new(history.clone()),
			Rc::new(store.clone()),
			backend.clone(),
		);
		Self {
			app,
			history,
			store,
			backend,
		}
	}
}

pub fn verified_user() -> User {
	User::new("ana@voyaj.app").verified(true)
}

/// Store holding a session for a verified user.
#[fixture]
pub fn signed_in_store() -> MemoryStore {
	let store = MemoryStore::new();
	SessionCredential::new(AuthTokens::new("token-1").with_refresh("refresh-1"), verified_user())
		.save(&store)
		.expect("memory store accepts writes");
	store
}

#[fixture]
pub fn empty_store() -> MemoryStore {
	MemoryStore::new()
}
