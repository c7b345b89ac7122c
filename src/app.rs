//! Application bootstrap and the UI-facing surface.
//!
//! [`AppContext`] wires the router, the session gate and the API client
//! together and is what rendering code holds on to.

use crate::settings::Settings;
use std::rc::Rc;
use thiserror::Error;
use tracing::debug;
use voyaj_api::services::{
	AuthService, ExpensesService, FriendshipsService, JournalService, LoginRequest, PhotosService,
	RegisterRequest, SubscriptionsService, TripsService,
};
use voyaj_api::{ApiClient, ApiError, AuthEvents, HttpTransport, User};
use voyaj_router::{History, RouteId, RoutePayload, RouteState, Router, RouterError};
use voyaj_session::{KeyValueStore, SessionGate, SessionState, StorageError, ViewDecision};

#[derive(Debug, Error)]
pub enum AppError {
	#[error(transparent)]
	Router(#[from] RouterError),

	#[error(transparent)]
	Storage(#[from] StorageError),

	#[error(transparent)]
	Settings(#[from] crate::settings::SettingsError),
}

/// Handle to the running application. Clones share everything.
#[derive(Debug, Clone)]
pub struct AppContext {
	router: Router,
	gate: SessionGate,
	api: ApiClient,
	settings: Rc<Settings>,
}

impl AppContext {
	/// Builds the application on the given capabilities and restores the
	/// stored session.
	pub fn new(
		settings: Settings,
		history: Rc<dyn History>,
		store: Rc<dyn KeyValueStore>,
		transport: Rc<dyn HttpTransport>,
	) -> Self {
		let router = Router::new(history);
		let gate = SessionGate::new(router.clone(), store, settings.session);

		let events = AuthEvents::new();
		gate.watch(&events);
		let api = ApiClient::new(
			settings.api.clone(),
			transport,
			Rc::new(gate.clone()),
			events,
		);

		gate.initialize();
		debug!(route = %router.current_route(), authenticated = gate.is_authenticated(), "app started");

		Self {
			router,
			gate,
			api,
			settings: Rc::new(settings),
		}
	}

	/// Mounts on the browser window: `window.history`, `localStorage` and
	/// fetch through reqwest.
	#[cfg(all(target_arch = "wasm32", feature = "reqwest"))]
	pub fn mount(settings: Settings) -> Result<Self, AppError> {
		settings.validate()?;
		let history = voyaj_router::BrowserHistory::new()?;
		let store = voyaj_session::LocalStorage::new()?;
		Ok(Self::new(
			settings,
			Rc::new(history),
			Rc::new(store),
			Rc::new(voyaj_api::ReqwestTransport::new()),
		))
	}

	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	pub fn router(&self) -> &Router {
		&self.router
	}

	pub fn session(&self) -> &SessionGate {
		&self.gate
	}

	pub fn api(&self) -> &ApiClient {
		&self.api
	}

	pub fn auth(&self) -> AuthService<'_> {
		AuthService::new(&self.api)
	}

	pub fn trips(&self) -> TripsService<'_> {
		TripsService::new(&self.api)
	}

	pub fn expenses(&self) -> ExpensesService<'_> {
		ExpensesService::new(&self.api)
	}

	pub fn photos(&self) -> PhotosService<'_> {
		PhotosService::new(&self.api)
	}

	pub fn journal(&self) -> JournalService<'_> {
		JournalService::new(&self.api)
	}

	pub fn friendships(&self) -> FriendshipsService<'_> {
		FriendshipsService::new(&self.api)
	}

	pub fn subscriptions(&self) -> SubscriptionsService<'_> {
		SubscriptionsService::new(&self.api)
	}

	// Navigation

	pub fn current_route(&self) -> RouteId {
		self.router.current_route()
	}

	pub fn route_payload(&self) -> Option<RoutePayload> {
		self.router.route_payload()
	}

	pub fn navigate(&self, route: RouteId, payload: Option<RoutePayload>) -> Result<(), RouterError> {
		self.router.navigate(route, payload)
	}

	/// Navigates by route name, e.g. from a link's `data-route`.
	pub fn navigate_named(&self, name: &str, payload: Option<RoutePayload>) -> Result<(), RouterError> {
		self.router.navigate_named(name, payload)
	}

	pub fn replace(&self, route: RouteId, payload: Option<RoutePayload>) -> Result<(), RouterError> {
		self.router.replace(route, payload)
	}

	pub fn go_back(&self) {
		self.router.go_back();
	}

	pub fn is_public_route(&self, route: RouteId) -> bool {
		self.router.is_public_route(route)
	}

	pub fn is_active(&self, route: RouteId) -> bool {
		self.router.is_active(route)
	}

	// Session

	pub fn is_authenticated(&self) -> bool {
		self.gate.is_authenticated()
	}

	pub fn current_user(&self) -> Option<User> {
		self.gate.current_user()
	}

	pub fn session_state(&self) -> SessionState {
		self.gate.session()
	}

	pub fn require_auth(&self, route: RouteId) -> ViewDecision {
		self.gate.require_auth(route)
	}

	/// Resolves what to render for the current route, following redirects.
	pub fn resolve_view(&self) -> (RouteState, ViewDecision) {
		let (_, decision) = self.gate.resolve_current_view();
		(self.router.current(), decision)
	}

	/// Signs in and opens the authenticated landing route.
	pub async fn login(&self, email: &str, password: &str) -> Result<(), ApiError> {
		let request = LoginRequest {
			email: email.to_string(),
			password: password.to_string(),
		};
		let response = self.auth().login(&request).await?;
		self.gate.on_login_success(response);
		Ok(())
	}

	/// Creates an account and opens email verification.
	pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
		let response = self.auth().register(request).await?;
		self.gate.on_registered(response);
		Ok(())
	}

	pub fn logout(&self) {
		self.gate.on_logout();
	}

	/// Fetches the profile and replaces the cached copy.
	pub async fn refresh_profile(&self) -> Result<User, ApiError> {
		let user = self.auth().profile().await?;
		self.gate.update_user(user.clone());
		Ok(user)
	}
}
