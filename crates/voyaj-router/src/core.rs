//! Core Router Implementation.
//!
//! This module provides the main [`Router`] struct: the single source of
//! truth for the page the user is looking at, kept consistent with the
//! address bar and the back/forward buttons.

use crate::error::RouterError;
use crate::history::{History, HistoryChange, HistoryState, NavigationType};
use crate::location::{Location, build_url, parse_location};
use crate::payload::RoutePayload;
use crate::route::RouteId;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use tracing::{debug, error, warn};

/// The route currently shown and its payload.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteState {
	/// Current page.
	pub route: RouteId,
	/// Payload of the navigation that led here.
	pub payload: Option<RoutePayload>,
}

impl RouteState {
	/// Creates a route state.
	pub fn new(route: RouteId, payload: Option<RoutePayload>) -> Self {
		Self { route, payload }
	}

	/// Derives the state from a history entry.
	///
	/// The entry's state object wins when it was written by the router;
	/// otherwise the location is parsed.
	pub fn derive(state: Option<&serde_json::Value>, location: &Location) -> Self {
		if let Some(value) = state
			&& let Some(history_state) = HistoryState::from_value(value)
		{
			return Self::new(history_state.page, history_state.data);
		}
		let (route, payload) = parse_location(location);
		Self::new(route, payload)
	}
}

/// Identifier returned by [`Router::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type RouteListener = Rc<dyn Fn(&RouteState)>;

struct RouterInner {
	history: Rc<dyn History>,
	state: RefCell<RouteState>,
	listeners: RefCell<Vec<(SubscriptionId, RouteListener)>>,
	next_subscription: Cell<u64>,
	// Bumped on every state change; a notification round stops once stale.
	generation: Cell<u64>,
}

/// The client-side router.
///
/// Cloning is cheap; clones share the same state. All methods run to
/// completion synchronously; the only deferred update is the reaction to
/// history-change notifications (`popstate`).
#[derive(Clone)]
pub struct Router {
	inner: Rc<RouterInner>,
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("state", &*self.inner.state.borrow())
			.field("listeners", &self.inner.listeners.borrow().len())
			.finish()
	}
}

impl Router {
	/// Mounts a router on the given history.
	///
	/// The initial route is derived from the current entry. If that entry
	/// has no state yet, it is stamped in place so that coming back to it
	/// later restores the same view. A history-change listener is installed
	/// for the lifetime of the history.
	pub fn new(history: Rc<dyn History>) -> Self {
		let location = history.location();
		let existing = history.state();
		let initial = RouteState::derive(existing.as_ref(), &location);

		if existing.is_none() {
			let stamped = HistoryState::new(initial.route).with_data(initial.payload.clone());
			let result = stamped
				.to_value()
				.and_then(|value| history.replace_state(&value, &location.href()));
			if let Err(err) = result {
				warn!(error = %err, "could not stamp initial history entry");
			}
		}

		debug!(route = %initial.route, "router mounted");

		let router = Self {
			inner: Rc::new(RouterInner {
				history,
				state: RefCell::new(initial),
				listeners: RefCell::new(Vec::new()),
				next_subscription: Cell::new(0),
				generation: Cell::new(0),
			}),
		};
		router.setup_history_listener();
		router
	}

	fn setup_history_listener(&self) {
		let weak: Weak<RouterInner> = Rc::downgrade(&self.inner);
		self.inner.history.listen(Rc::new(move |change: HistoryChange| {
			if let Some(inner) = weak.upgrade() {
				Router { inner }.handle_history_change(change);
			}
		}));
	}

	fn handle_history_change(&self, change: HistoryChange) {
		let next = RouteState::derive(change.state.as_ref(), &change.location);
		debug!(route = %next.route, "history changed");
		self.set_state(next);
	}

	/// Returns the current route and payload.
	pub fn current(&self) -> RouteState {
		self.inner.state.borrow().clone()
	}

	/// Returns the current route.
	pub fn current_route(&self) -> RouteId {
		self.inner.state.borrow().route
	}

	/// Returns the payload of the current route.
	pub fn route_payload(&self) -> Option<RoutePayload> {
		self.inner.state.borrow().payload.clone()
	}

	/// Navigates to a route, pushing a new history entry.
	///
	/// Navigating twice to the same route pushes two entries.
	pub fn navigate(&self, route: RouteId, payload: Option<RoutePayload>) -> Result<(), RouterError> {
		self.commit(route, payload, NavigationType::Push)
	}

	/// Navigates to a route, overwriting the current history entry.
	pub fn replace(&self, route: RouteId, payload: Option<RoutePayload>) -> Result<(), RouterError> {
		self.commit(route, payload, NavigationType::Replace)
	}

	/// Navigates to a route given by name.
	///
	/// Unknown names are logged and ignored: state and history are left
	/// untouched and [`RouterError::InvalidRouteName`] is returned.
	pub fn navigate_named(&self, name: &str, payload: Option<RoutePayload>) -> Result<(), RouterError> {
		let route = Self::validate(name)?;
		self.navigate(route, payload)
	}

	/// Replaces the current entry with a route given by name.
	///
	/// Unknown names are handled as in [`Router::navigate_named`].
	pub fn replace_named(&self, name: &str, payload: Option<RoutePayload>) -> Result<(), RouterError> {
		let route = Self::validate(name)?;
		self.replace(route, payload)
	}

	fn validate(name: &str) -> Result<RouteId, RouterError> {
		name.parse::<RouteId>().inspect_err(|_| {
			warn!(route = name, "ignoring navigation to unknown route");
		})
	}

	/// Goes back one history entry.
	///
	/// State is not updated here; it follows the history-change
	/// notification the browser delivers afterwards.
	pub fn go_back(&self) {
		self.inner.history.back();
	}

	/// Loads the route's URL as a full page navigation.
	///
	/// Used when all in-memory view state must be discarded. The router's
	/// own state follows the new URL so that anything observing it before
	/// the page unloads sees the target route.
	pub fn reload(&self, route: RouteId, payload: Option<RoutePayload>) -> Result<(), RouterError> {
		let url = build_url(route, payload.as_ref());
		self.inner.history.assign(&url).inspect_err(|err| {
			error!(error = %err, url = %url, "full page navigation failed");
		})?;
		self.set_state(RouteState::new(route, payload));
		Ok(())
	}

	fn commit(
		&self,
		route: RouteId,
		payload: Option<RoutePayload>,
		nav_type: NavigationType,
	) -> Result<(), RouterError> {
		let url = build_url(route, payload.as_ref());
		let state = HistoryState::new(route)
			.with_data(payload.clone())
			.to_value()?;

		let result = match nav_type {
			NavigationType::Push => self.inner.history.push_state(&state, &url),
			NavigationType::Replace => self.inner.history.replace_state(&state, &url),
		};
		result.inspect_err(|err| {
			error!(error = %err, url = %url, "history update failed");
		})?;

		debug!(route = %route, ?nav_type, "navigated");
		self.set_state(RouteState::new(route, payload));
		Ok(())
	}

	fn set_state(&self, next: RouteState) {
		*self.inner.state.borrow_mut() = next.clone();
		let generation = self.inner.generation.get().wrapping_add(1);
		self.inner.generation.set(generation);

		let listeners: Vec<RouteListener> = self
			.inner
			.listeners
			.borrow()
			.iter()
			.map(|(_, listener)| Rc::clone(listener))
			.collect();
		for listener in listeners {
			// A listener navigated; the nested round already delivered the
			// newer state to everyone.
			if self.inner.generation.get() != generation {
				break;
			}
			listener(&next);
		}
	}

	/// Returns `true` if the route is reachable without a session.
	pub fn is_public_route(&self, route: RouteId) -> bool {
		route.is_public()
	}

	/// Returns `true` if `route` is the current route.
	pub fn is_active(&self, route: RouteId) -> bool {
		self.current_route() == route
	}

	/// Builds the URL of a route, for links.
	pub fn url_for(&self, route: RouteId, payload: Option<&RoutePayload>) -> String {
		build_url(route, payload)
	}

	/// Registers a callback invoked after every route change.
	pub fn subscribe<F>(&self, listener: F) -> SubscriptionId
	where
		F: Fn(&RouteState) + 'static,
	{
		let id = SubscriptionId(self.inner.next_subscription.get());
		self.inner.next_subscription.set(id.0 + 1);
		self.inner
			.listeners
			.borrow_mut()
			.push((id, Rc::new(listener)));
		id
	}

	/// Removes a callback. Returns `false` if it was not registered.
	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		let mut listeners = self.inner.listeners.borrow_mut();
		let before = listeners.len();
		listeners.retain(|(existing, _)| *existing != id);
		listeners.len() != before
	}
}
