//! The session gate.
//!
//! [`SessionGate`] owns the session credential. It is the only writer of
//! the persisted store and the only component that moves the user between
//! the anonymous and authenticated states.

use crate::credential::{SessionCredential, save_tokens};
use crate::decision::{SessionState, ViewDecision, decide_with};
use crate::settings::SessionSettings;
use crate::storage::KeyValueStore;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, error, info, warn};
use voyaj_api::{AuthEvent, AuthEvents, AuthResponse, AuthTokens, CredentialProvider, ListenerId, User};
use voyaj_router::{RouteId, Router};

/// Redirect chains longer than this are cut short.
const MAX_REDIRECTS: usize = 4;

struct GateInner {
	router: Router,
	store: Rc<dyn KeyValueStore>,
	settings: SessionSettings,
	credential: RefCell<Option<SessionCredential>>,
}

/// Session gate.
///
/// Cloning is cheap; clones share the same session. The gate starts
/// anonymous until [`initialize`](Self::initialize) reads the store.
#[derive(Clone)]
pub struct SessionGate {
	inner: Rc<GateInner>,
}

impl std::fmt::Debug for SessionGate {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SessionGate")
			.field("authenticated", &self.is_authenticated())
			.field("settings", &self.inner.settings)
			.finish()
	}
}

impl SessionGate {
	pub fn new(router: Router, store: Rc<dyn KeyValueStore>, settings: SessionSettings) -> Self {
		Self {
			inner: Rc::new(GateInner {
				router,
				store,
				settings,
				credential: RefCell::new(None),
			}),
		}
	}

	pub fn router(&self) -> &Router {
		&self.inner.router
	}

	pub fn settings(&self) -> &SessionSettings {
		&self.inner.settings
	}

	/// Restores the session from the store.
	///
	/// A signed-in user who opened a public page (other than email
	/// verification) is moved to the authenticated landing route without
	/// adding a history entry. Returns whether a session was restored.
	pub fn initialize(&self) -> bool {
		let credential = SessionCredential::load(self.inner.store.as_ref());
		let authenticated = credential.is_some();
		*self.inner.credential.borrow_mut() = credential;

		if !authenticated {
			debug!("session initialized anonymous");
			return false;
		}

		let route = self.inner.router.current_route();
		debug!(route = %route, "session restored");
		if route.is_public() && route != RouteId::VerifyEmail {
			let landing = self.inner.settings.authenticated_landing;
			if let Err(err) = self.inner.router.replace(landing, None) {
				warn!(error = %err, "could not leave public page after restore");
			}
		}
		true
	}

	pub fn is_authenticated(&self) -> bool {
		self.inner.credential.borrow().is_some()
	}

	pub fn current_user(&self) -> Option<User> {
		self.inner
			.credential
			.borrow()
			.as_ref()
			.map(|credential| credential.user.clone())
	}

	pub fn session(&self) -> SessionState {
		match self.current_user() {
			Some(user) => SessionState::authenticated(user),
			None => SessionState::anonymous(),
		}
	}

	/// Decides the view for `route`. Has no side effects.
	pub fn require_auth(&self, route: RouteId) -> ViewDecision {
		decide_with(route, &self.session(), &self.inner.settings)
	}

	/// Decides the view for the router's current route, carrying out
	/// redirects with `replace`.
	///
	/// Returns the route that ended up active and the decision for it.
	pub fn resolve_current_view(&self) -> (RouteId, ViewDecision) {
		let mut route = self.inner.router.current_route();
		for _ in 0..MAX_REDIRECTS {
			let decision = self.require_auth(route);
			let ViewDecision::RedirectTo(target) = decision else {
				return (route, decision);
			};
			debug!(from = %route, to = %target, "redirecting");
			if let Err(err) = self.inner.router.replace(target, None) {
				warn!(error = %err, "redirect failed");
				return (route, ViewDecision::RenderRequested);
			}
			route = target;
		}
		warn!(route = %route, "redirect loop");
		(route, ViewDecision::RenderRequested)
	}

	/// Starts a session from a login response and opens the authenticated
	/// landing route.
	pub fn on_login_success(&self, response: AuthResponse) {
		self.establish(response.into());
		info!("signed in");
		self.navigate(self.inner.settings.authenticated_landing);
	}

	/// Starts a session from a registration response and opens email
	/// verification.
	pub fn on_registered(&self, response: AuthResponse) {
		self.establish(response.into());
		info!("registered");
		self.navigate(RouteId::VerifyEmail);
	}

	/// Ends the session and opens the public landing route.
	pub fn on_logout(&self) {
		self.end();
		info!("signed out");
		self.navigate(self.inner.settings.public_landing);
	}

	/// Ends a session the backend rejected.
	///
	/// The public landing route is loaded as a full page so that no view
	/// state of the old session survives.
	pub fn on_unauthorized(&self) {
		self.end();
		warn!("session rejected, signing out");
		let landing = self.inner.settings.public_landing;
		if let Err(err) = self.inner.router.reload(landing, None) {
			error!(error = %err, "could not reload public landing route");
		}
	}

	/// Replaces the cached profile. Ignored without a session.
	pub fn update_user(&self, user: User) {
		{
			let mut credential = self.inner.credential.borrow_mut();
			let Some(credential) = credential.as_mut() else {
				warn!("profile update without a session ignored");
				return;
			};
			credential.user = user.clone();
		}
		if let Err(err) = crate::storage::write_json(
			self.inner.store.as_ref(),
			crate::credential::USER_KEY,
			&user,
		) {
			error!(error = %err, "could not persist profile");
		}
	}

	/// Signs out whenever `events` reports an unauthorized response.
	pub fn watch(&self, events: &AuthEvents) -> ListenerId {
		let weak: Weak<GateInner> = Rc::downgrade(&self.inner);
		events.subscribe(move |event| {
			if let Some(inner) = weak.upgrade() {
				match event {
					AuthEvent::Unauthorized => SessionGate { inner }.on_unauthorized(),
				}
			}
		})
	}

	fn establish(&self, credential: SessionCredential) {
		if let Err(err) = credential.save(self.inner.store.as_ref()) {
			error!(error = %err, "could not persist session");
		}
		*self.inner.credential.borrow_mut() = Some(credential);
	}

	fn end(&self) {
		if let Err(err) = SessionCredential::clear(self.inner.store.as_ref()) {
			error!(error = %err, "could not clear stored session");
		}
		self.inner.credential.borrow_mut().take();
	}

	fn navigate(&self, route: RouteId) {
		if let Err(err) = self.inner.router.navigate(route, None) {
			warn!(error = %err, route = %route, "navigation after session change failed");
		}
	}
}

impl CredentialProvider for SessionGate {
	fn access_token(&self) -> Option<String> {
		self.inner
			.credential
			.borrow()
			.as_ref()
			.map(|credential| credential.tokens.access_token.clone())
	}

	fn refresh_token(&self) -> Option<String> {
		self.inner
			.credential
			.borrow()
			.as_ref()
			.and_then(|credential| credential.tokens.refresh_token.clone())
	}

	fn store_tokens(&self, tokens: AuthTokens) {
		{
			let mut credential = self.inner.credential.borrow_mut();
			let Some(credential) = credential.as_mut() else {
				warn!("refreshed tokens without a session dropped");
				return;
			};
			credential.tokens = tokens.clone();
		}
		if let Err(err) = save_tokens(self.inner.store.as_ref(), &tokens) {
			error!(error = %err, "could not persist refreshed tokens");
		}
	}
}
