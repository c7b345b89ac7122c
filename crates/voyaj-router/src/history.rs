//! History API abstraction.
//!
//! The router never talks to `window.history` directly. It goes through the
//! [`History`] trait so the browser implementation
//! ([`BrowserHistory`](crate::BrowserHistory), WASM only) can be swapped for
//! [`MemoryHistory`] in tests and on native targets.

use crate::error::RouterError;
use crate::location::Location;
use crate::payload::RoutePayload;
use crate::route::RouteId;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// State object stored with each history entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryState {
	/// The page shown for this entry.
	pub page: RouteId,
	/// The navigation payload, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub data: Option<RoutePayload>,
}

impl HistoryState {
	/// Creates a state for a page without payload.
	pub fn new(page: RouteId) -> Self {
		Self { page, data: None }
	}

	/// Sets the payload.
	pub fn with_data(mut self, data: Option<RoutePayload>) -> Self {
		self.data = data;
		self
	}

	/// Encodes the state for the history API.
	pub fn to_value(&self) -> Result<Value, RouterError> {
		Ok(serde_json::to_value(self)?)
	}

	/// Decodes a raw history state.
	///
	/// Returns `None` for states that were not written by the router
	/// (foreign objects, `null`, unknown pages).
	pub fn from_value(value: &Value) -> Option<Self> {
		serde_json::from_value(value.clone()).ok()
	}
}

/// Navigation type for history operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationType {
	/// Push a new entry.
	Push,
	/// Replace the current entry.
	Replace,
}

/// A history-change notification (browser `popstate`).
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryChange {
	/// Location after the change.
	pub location: Location,
	/// Raw state of the entry that became current.
	pub state: Option<Value>,
}

/// Callback invoked on every history-change notification.
pub type HistoryListener = Rc<dyn Fn(HistoryChange)>;

/// Capability over the browser's session history.
pub trait History {
	/// Returns the current location.
	fn location(&self) -> Location;

	/// Returns the raw state of the current entry.
	fn state(&self) -> Option<Value>;

	/// Pushes a new entry.
	fn push_state(&self, state: &Value, url: &str) -> Result<(), RouterError>;

	/// Overwrites the current entry.
	fn replace_state(&self, state: &Value, url: &str) -> Result<(), RouterError>;

	/// Moves one entry back. The change is reported through listeners.
	fn back(&self);

	/// Loads `url` as a full page navigation.
	fn assign(&self, url: &str) -> Result<(), RouterError>;

	/// Registers a listener for the lifetime of the history.
	fn listen(&self, listener: HistoryListener);
}

#[derive(Debug, Clone)]
struct MemoryEntry {
	url: String,
	state: Option<Value>,
}

struct MemoryHistoryInner {
	entries: Vec<MemoryEntry>,
	index: usize,
	pending: VecDeque<HistoryChange>,
	listeners: Vec<HistoryListener>,
	page_loads: Vec<String>,
	fail_writes: bool,
}

/// In-memory session history.
///
/// Mirrors browser semantics closely enough for the router:
/// - `push_state` discards forward entries,
/// - `back`/`forward` do not notify synchronously; the notification is
///   queued and delivered by [`MemoryHistory::dispatch_pending`], the
///   equivalent of one event-loop turn,
/// - `assign` records a full page load and pushes an entry without state.
#[derive(Clone)]
pub struct MemoryHistory {
	inner: Rc<RefCell<MemoryHistoryInner>>,
}

impl std::fmt::Debug for MemoryHistory {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let inner = self.inner.borrow();
		f.debug_struct("MemoryHistory")
			.field("entries", &inner.entries)
			.field("index", &inner.index)
			.field("pending", &inner.pending.len())
			.finish()
	}
}

impl Default for MemoryHistory {
	fn default() -> Self {
		Self::new("/")
	}
}

impl MemoryHistory {
	/// Creates a history with a single entry at `url` and no state.
	pub fn new(url: impl Into<String>) -> Self {
		Self {
			inner: Rc::new(RefCell::new(MemoryHistoryInner {
				entries: vec![MemoryEntry {
					url: url.into(),
					state: None,
				}],
				index: 0,
				pending: VecDeque::new(),
				listeners: Vec::new(),
				page_loads: Vec::new(),
				fail_writes: false,
			})),
		}
	}

	/// Creates a history whose single entry already carries a state.
	pub fn with_state(url: impl Into<String>, state: Value) -> Self {
		let history = Self::new(url);
		history.inner.borrow_mut().entries[0].state = Some(state);
		history
	}

	/// Makes subsequent push/replace/assign calls fail.
	pub fn set_fail_writes(&self, fail: bool) {
		self.inner.borrow_mut().fail_writes = fail;
	}

	/// Number of entries in the history stack.
	pub fn len(&self) -> usize {
		self.inner.borrow().entries.len()
	}

	/// Returns `true` if the stack is empty (never the case in practice).
	pub fn is_empty(&self) -> bool {
		self.inner.borrow().entries.is_empty()
	}

	/// Index of the current entry.
	pub fn index(&self) -> usize {
		self.inner.borrow().index
	}

	/// URLs of all entries, oldest first.
	pub fn urls(&self) -> Vec<String> {
		self.inner
			.borrow()
			.entries
			.iter()
			.map(|entry| entry.url.clone())
			.collect()
	}

	/// URL of the current entry.
	pub fn current_url(&self) -> String {
		let inner = self.inner.borrow();
		inner.entries[inner.index].url.clone()
	}

	/// URLs loaded through [`History::assign`].
	pub fn page_loads(&self) -> Vec<String> {
		self.inner.borrow().page_loads.clone()
	}

	/// Moves one entry forward, queuing a notification.
	pub fn forward(&self) {
		let mut inner = self.inner.borrow_mut();
		if inner.index + 1 < inner.entries.len() {
			inner.index += 1;
			let change = inner.current_change();
			inner.pending.push_back(change);
		}
	}

	/// Simulates a fragment edit in the address bar: a new entry without
	/// state is pushed and a notification is queued.
	pub fn edit_hash(&self, hash: &str) {
		let mut inner = self.inner.borrow_mut();
		let current = Location::from_url(&inner.entries[inner.index].url);
		let hash = hash.trim_start_matches('#');
		let url = format!("{}{}#{}", current.pathname, current.search, hash);
		inner.push(MemoryEntry { url, state: None });
		let change = inner.current_change();
		inner.pending.push_back(change);
	}

	/// Delivers queued notifications to the listeners.
	///
	/// Returns the number of notifications delivered. No borrow is held
	/// while a listener runs, so listeners may navigate again.
	pub fn dispatch_pending(&self) -> usize {
		let mut delivered = 0;
		loop {
			let next = {
				let mut inner = self.inner.borrow_mut();
				inner
					.pending
					.pop_front()
					.map(|change| (change, inner.listeners.clone()))
			};
			let Some((change, listeners)) = next else {
				break;
			};
			for listener in &listeners {
				listener(change.clone());
			}
			delivered += 1;
		}
		delivered
	}

	fn check_writable(&self) -> Result<(), RouterError> {
		if self.inner.borrow().fail_writes {
			return Err(RouterError::NavigationFailed("history writes disabled".to_string()));
		}
		Ok(())
	}
}

impl MemoryHistoryInner {
	fn push(&mut self, entry: MemoryEntry) {
		self.entries.truncate(self.index + 1);
		self.entries.push(entry);
		self.index = self.entries.len() - 1;
	}

	fn current_change(&self) -> HistoryChange {
		let entry = &self.entries[self.index];
		HistoryChange {
			location: Location::from_url(&entry.url),
			state: entry.state.clone(),
		}
	}
}

impl History for MemoryHistory {
	fn location(&self) -> Location {
		Location::from_url(&self.current_url())
	}

	fn state(&self) -> Option<Value> {
		let inner = self.inner.borrow();
		inner.entries[inner.index].state.clone()
	}

	fn push_state(&self, state: &Value, url: &str) -> Result<(), RouterError> {
		self.check_writable()?;
		self.inner.borrow_mut().push(MemoryEntry {
			url: url.to_string(),
			state: Some(state.clone()),
		});
		Ok(())
	}

	fn replace_state(&self, state: &Value, url: &str) -> Result<(), RouterError> {
		self.check_writable()?;
		let mut inner = self.inner.borrow_mut();
		let index = inner.index;
		inner.entries[index] = MemoryEntry {
			url: url.to_string(),
			state: Some(state.clone()),
		};
		Ok(())
	}

	fn back(&self) {
		let mut inner = self.inner.borrow_mut();
		if inner.index > 0 {
			inner.index -= 1;
			let change = inner.current_change();
			inner.pending.push_back(change);
		}
	}

	fn assign(&self, url: &str) -> Result<(), RouterError> {
		self.check_writable()?;
		let mut inner = self.inner.borrow_mut();
		inner.push(MemoryEntry {
			url: url.to_string(),
			state: None,
		});
		inner.pending.clear();
		inner.page_loads.push(url.to_string());
		Ok(())
	}

	fn listen(&self, listener: HistoryListener) {
		self.inner.borrow_mut().listeners.push(listener);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::{fixture, rstest};
	use serde_json::json;
	use std::cell::Cell;

	#[fixture]
	fn history() -> MemoryHistory {
		MemoryHistory::new("/home")
	}

	#[rstest]
	fn test_history_state_round_trip() {
		let state = HistoryState::new(RouteId::TripDetails)
			.with_data(Some(RoutePayload::trip("abc123")));
		let value = state.to_value().unwrap();

		assert_eq!(value, json!({ "page": "trip-details", "data": { "tripId": "abc123" } }));
		assert_eq!(HistoryState::from_value(&value), Some(state));
	}

	#[rstest]
	#[case(json!(null))]
	#[case(json!({ "page": "admin" }))]
	#[case(json!({ "key": "foreign" }))]
	#[case(json!("dashboard"))]
	fn test_foreign_state_is_ignored(#[case] value: Value) {
		assert_eq!(HistoryState::from_value(&value), None);
	}

	#[rstest]
	fn test_push_discards_forward_entries(history: MemoryHistory) {
		history.push_state(&json!(1), "/a").unwrap();
		history.push_state(&json!(2), "/b").unwrap();
		history.back();
		history.push_state(&json!(3), "/c").unwrap();

		assert_eq!(history.urls(), vec!["/home", "/a", "/c"]);
		assert_eq!(history.index(), 2);
	}

	#[rstest]
	fn test_replace_keeps_length(history: MemoryHistory) {
		history.replace_state(&json!(1), "/login").unwrap();

		assert_eq!(history.len(), 1);
		assert_eq!(history.current_url(), "/login");
		assert_eq!(history.state(), Some(json!(1)));
	}

	#[rstest]
	fn test_back_notifies_only_on_dispatch(history: MemoryHistory) {
		let calls = Rc::new(Cell::new(0));
		let counter = Rc::clone(&calls);
		history.listen(Rc::new(move |_: HistoryChange| counter.set(counter.get() + 1)));

		history.push_state(&json!(1), "/dashboard").unwrap();
		history.back();
		assert_eq!(calls.get(), 0);

		assert_eq!(history.dispatch_pending(), 1);
		assert_eq!(calls.get(), 1);
		assert_eq!(history.current_url(), "/home");
	}

	#[rstest]
	fn test_back_at_first_entry_is_noop(history: MemoryHistory) {
		history.back();
		assert_eq!(history.dispatch_pending(), 0);
		assert_eq!(history.index(), 0);
	}

	#[rstest]
	fn test_edit_hash_pushes_stateless_entry(history: MemoryHistory) {
		history.edit_hash("#trips");

		assert_eq!(history.current_url(), "/home#trips");
		assert_eq!(history.state(), None);
		assert_eq!(history.dispatch_pending(), 1);
	}

	#[rstest]
	fn test_assign_records_page_load(history: MemoryHistory) {
		history.assign("/home").unwrap();

		assert_eq!(history.page_loads(), vec!["/home"]);
		assert_eq!(history.state(), None);
		assert_eq!(history.len(), 2);
	}

	#[rstest]
	fn test_fail_writes(history: MemoryHistory) {
		history.set_fail_writes(true);

		assert!(history.push_state(&json!(1), "/a").is_err());
		assert!(history.replace_state(&json!(1), "/a").is_err());
		assert!(history.assign("/a").is_err());
		assert_eq!(history.urls(), vec!["/home"]);
	}
}
