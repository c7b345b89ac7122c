//! Logging setup.
//!
//! Everything in the workspace logs through `tracing`. [`init`] installs
//! the subscriber for the current target:
//!
//! | Target | Output |
//! |--------|--------|
//! | native | `tracing-subscriber` fmt layer on stderr |
//! | WASM | browser console, `console.debug`/`info`/`warn`/`error` by level |
//!
//! The filter comes from `RUST_LOG` when set natively, otherwise from the
//! configured directives.

use std::fmt::Write as _;
use tracing::field::{Field, Visit};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global subscriber. Returns `false` if one was already set.
pub fn init(filter: &str) -> bool {
	let env_filter = build_filter(filter);

	#[cfg(not(target_arch = "wasm32"))]
	let result = tracing_subscriber::registry()
		.with(env_filter)
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.try_init();

	#[cfg(target_arch = "wasm32")]
	let result = tracing_subscriber::registry()
		.with(env_filter)
		.with(console::ConsoleLayer)
		.try_init();

	result.is_ok()
}

fn build_filter(directives: &str) -> EnvFilter {
	#[cfg(not(target_arch = "wasm32"))]
	if let Ok(filter) = EnvFilter::try_from_default_env() {
		return filter;
	}
	EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Collects an event's fields into a single console line.
#[derive(Debug, Default)]
pub(crate) struct EventLine {
	message: String,
	fields: String,
}

impl EventLine {
	pub(crate) fn render(&self, level: &tracing::Level, target: &str) -> String {
		format!("{} {}: {}{}", level, target, self.message, self.fields)
	}
}

impl Visit for EventLine {
	fn record_str(&mut self, field: &Field, value: &str) {
		if field.name() == "message" {
			self.message.push_str(value);
		} else {
			let _ = write!(self.fields, " {}={}", field.name(), value);
		}
	}

	fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
		if field.name() == "message" {
			let _ = write!(self.message, "{:?}", value);
		} else {
			let _ = write!(self.fields, " {}={:?}", field.name(), value);
		}
	}
}

#[cfg(target_arch = "wasm32")]
mod console {
	use super::EventLine;
	use tracing::{Event, Level, Subscriber};
	use tracing_subscriber::layer::{Context, Layer};

	/// Writes events to the browser console.
	pub(super) struct ConsoleLayer;

	impl<S: Subscriber> Layer<S> for ConsoleLayer {
		fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
			let metadata = event.metadata();
			let mut line = EventLine::default();
			event.record(&mut line);
			let text = line.render(metadata.level(), metadata.target()).into();

			match *metadata.level() {
				Level::ERROR => web_sys::console::error_1(&text),
				Level::WARN => web_sys::console::warn_1(&text),
				Level::INFO => web_sys::console::info_1(&text),
				_ => web_sys::console::debug_1(&text),
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::sync::{Arc, Mutex};
	use tracing_subscriber::Layer;
	use tracing_subscriber::layer::Context;

	/// Captures rendered lines the way the console layer builds them.
	struct Capture(Arc<Mutex<Vec<String>>>);

	impl<S: tracing::Subscriber> Layer<S> for Capture {
		fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
			let mut line = EventLine::default();
			event.record(&mut line);
			let metadata = event.metadata();
			self.0
				.lock()
				.unwrap()
				.push(line.render(metadata.level(), metadata.target()));
		}
	}

	#[rstest]
	fn test_event_line_renders_message_and_fields() {
		let lines = Arc::new(Mutex::new(Vec::new()));
		let subscriber = tracing_subscriber::registry().with(Capture(Arc::clone(&lines)));

		tracing::subscriber::with_default(subscriber, || {
			tracing::warn!(target: "voyaj_router", name = "admin", "unknown route");
		});

		assert_eq!(
			*lines.lock().unwrap(),
			vec!["WARN voyaj_router: unknown route name=admin".to_string()]
		);
	}

	#[rstest]
	fn test_invalid_directives_fall_back() {
		// Must not panic on garbage.
		let _ = build_filter("=[[");
	}
}
