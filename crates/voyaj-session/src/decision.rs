//! View selection.
//!
//! Which view to render is a pure function of the requested route and the
//! session state; the gate feeds it and carries out the result.

use crate::settings::SessionSettings;
use voyaj_api::User;
use voyaj_router::RouteId;

/// Session state as seen by view selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
	user: Option<User>,
}

impl SessionState {
	pub fn authenticated(user: User) -> Self {
		Self { user: Some(user) }
	}

	pub fn anonymous() -> Self {
		Self::default()
	}

	pub fn is_authenticated(&self) -> bool {
		self.user.is_some()
	}

	pub fn is_anonymous(&self) -> bool {
		!self.is_authenticated()
	}

	pub fn user(&self) -> Option<&User> {
		self.user.as_ref()
	}

	pub fn email_verified(&self) -> bool {
		self.user.as_ref().is_some_and(|user| user.email_verified)
	}
}

/// What the application shell should do for a requested route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewDecision {
	/// Render the requested route.
	RenderRequested,
	/// Render the login view in place; the URL is left alone.
	RenderLogin,
	/// Replace the current entry with another route.
	RedirectTo(RouteId),
}

/// Decides with the default landing routes.
pub fn decide(route: RouteId, session: &SessionState) -> ViewDecision {
	decide_with(route, session, &SessionSettings::default())
}

/// Decides the view for `route`.
///
/// - protected route, no session: [`ViewDecision::RenderLogin`]
/// - registration page, verified session: redirect to the authenticated
///   landing route (an unverified user may still need it)
/// - otherwise: [`ViewDecision::RenderRequested`]
pub fn decide_with(
	route: RouteId,
	session: &SessionState,
	settings: &SessionSettings,
) -> ViewDecision {
	if session.is_anonymous() && !route.is_public() {
		return ViewDecision::RenderLogin;
	}
	if route == RouteId::Register && session.email_verified() {
		return ViewDecision::RedirectTo(settings.authenticated_landing);
	}
	ViewDecision::RenderRequested
}
