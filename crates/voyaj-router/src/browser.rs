//! `window.history` backed implementation of [`History`].

use crate::error::RouterError;
use crate::history::{History, HistoryChange, HistoryListener};
use crate::location::Location;
use serde_json::Value;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

/// Session history of the current browser window.
#[derive(Debug, Clone)]
pub struct BrowserHistory {
	window: web_sys::Window,
}

impl BrowserHistory {
	/// Binds to the global `window`.
	pub fn new() -> Result<Self, RouterError> {
		let window =
			web_sys::window().ok_or_else(|| RouterError::Unavailable("window".to_string()))?;
		Ok(Self { window })
	}

	fn history(&self) -> Result<web_sys::History, RouterError> {
		self.window
			.history()
			.map_err(|err| RouterError::Unavailable(js_error(&err)))
	}

	fn read_location(window: &web_sys::Window) -> Location {
		let location = window.location();
		Location::new(
			location.pathname().unwrap_or_else(|_| "/".to_string()),
			location.hash().unwrap_or_default(),
		)
		.with_search(location.search().unwrap_or_default())
	}
}

impl History for BrowserHistory {
	fn location(&self) -> Location {
		Self::read_location(&self.window)
	}

	fn state(&self) -> Option<Value> {
		let state = self.history().ok()?.state().ok()?;
		from_js(&state)
	}

	fn push_state(&self, state: &Value, url: &str) -> Result<(), RouterError> {
		let js_state = to_js(state)?;
		self.history()?
			.push_state_with_url(&js_state, "", Some(url))
			.map_err(|err| RouterError::NavigationFailed(js_error(&err)))
	}

	fn replace_state(&self, state: &Value, url: &str) -> Result<(), RouterError> {
		let js_state = to_js(state)?;
		self.history()?
			.replace_state_with_url(&js_state, "", Some(url))
			.map_err(|err| RouterError::NavigationFailed(js_error(&err)))
	}

	fn back(&self) {
		if let Err(err) = self.history().and_then(|history| {
			history
				.back()
				.map_err(|err| RouterError::NavigationFailed(js_error(&err)))
		}) {
			tracing::warn!(error = %err, "history.back() failed");
		}
	}

	fn assign(&self, url: &str) -> Result<(), RouterError> {
		self.window
			.location()
			.assign(url)
			.map_err(|err| RouterError::NavigationFailed(js_error(&err)))
	}

	fn listen(&self, listener: HistoryListener) {
		let window = self.window.clone();
		let closure = Closure::<dyn FnMut(web_sys::PopStateEvent)>::new(
			move |event: web_sys::PopStateEvent| {
				listener(HistoryChange {
					location: Self::read_location(&window),
					state: from_js(&event.state()),
				});
			},
		);

		match self
			.window
			.add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref())
		{
			// The listener lives as long as the page.
			Ok(()) => closure.forget(),
			Err(err) => tracing::error!(error = %js_error(&err), "could not listen to popstate"),
		}
	}
}

fn to_js(value: &Value) -> Result<JsValue, RouterError> {
	let text = serde_json::to_string(value)?;
	js_sys::JSON::parse(&text).map_err(|err| RouterError::State(js_error(&err)))
}

fn from_js(value: &JsValue) -> Option<Value> {
	if value.is_null() || value.is_undefined() {
		return None;
	}
	let text: String = js_sys::JSON::stringify(value).ok()?.into();
	serde_json::from_str(&text).ok()
}

fn js_error(err: &JsValue) -> String {
	err.as_string().unwrap_or_else(|| format!("{:?}", err))
}
