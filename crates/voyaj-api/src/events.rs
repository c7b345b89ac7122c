//! Authentication signals raised by the API client.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Signals emitted when the backend's view of the session changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthEvent {
	/// An authenticated request was rejected and could not be refreshed.
	Unauthorized,
}

/// Handle returned by [`AuthEvents::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Rc<dyn Fn(AuthEvent)>;

#[derive(Default)]
struct Inner {
	listeners: RefCell<Vec<(ListenerId, Listener)>>,
	next_id: Cell<u64>,
}

/// Single-threaded broadcast channel for [`AuthEvent`]s.
///
/// Clones share the same listener list.
#[derive(Clone, Default)]
pub struct AuthEvents {
	inner: Rc<Inner>,
}

impl AuthEvents {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn subscribe<F>(&self, listener: F) -> ListenerId
	where
		F: Fn(AuthEvent) + 'static,
	{
		let id = ListenerId(self.inner.next_id.get());
		self.inner.next_id.set(id.0 + 1);
		self.inner
			.listeners
			.borrow_mut()
			.push((id, Rc::new(listener)));
		id
	}

	/// Removes a listener. Returns `false` if it was already gone.
	pub fn unsubscribe(&self, id: ListenerId) -> bool {
		let mut listeners = self.inner.listeners.borrow_mut();
		let before = listeners.len();
		listeners.retain(|(existing, _)| *existing != id);
		listeners.len() != before
	}

	/// Delivers `event` to every listener registered at call time.
	pub fn emit(&self, event: AuthEvent) {
		// Listeners may subscribe or emit again while being called.
		let listeners: Vec<Listener> = self
			.inner
			.listeners
			.borrow()
			.iter()
			.map(|(_, listener)| Rc::clone(listener))
			.collect();

		tracing::debug!(?event, listeners = listeners.len(), "emitting auth event");
		for listener in listeners {
			listener(event);
		}
	}

	pub fn listener_count(&self) -> usize {
		self.inner.listeners.borrow().len()
	}
}

impl std::fmt::Debug for AuthEvents {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AuthEvents")
			.field("listeners", &self.listener_count())
			.finish()
	}
}
