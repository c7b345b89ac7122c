//! # Voyaj
//!
//! Client core of the Voyaj travel planner, a single-page application.
//!
//! ## Crates
//!
//! - [`router`]: which page is shown, kept in sync with the address bar and
//!   the back/forward buttons
//! - [`session`]: the session gate deciding between the requested page, the
//!   login view and a redirect
//! - [`api`]: backend access with bearer authentication; rejected sessions
//!   are reported to the gate
//!
//! This crate adds [`settings`], [`logging`] and the [`AppContext`] that
//! wires everything together.
//!
//! ## Feature Flags
//!
//! - `reqwest` (default): HTTP through reqwest, enables `AppContext::mount`
//!   on WASM
//!
//! ## Example
//!
//! ```rust,ignore
//! use voyaj::prelude::*;
//!
//! let settings = Settings::load()?;
//! voyaj::logging::init(&settings.logging.filter);
//!
//! let app = AppContext::mount(settings)?;
//! match app.resolve_view() {
//!     (state, ViewDecision::RenderLogin) => render_login(),
//!     (state, _) => render(state.route, state.payload),
//! }
//! ```

pub mod app;
pub mod logging;
pub mod settings;

pub use voyaj_api as api;
pub use voyaj_router as router;
pub use voyaj_session as session;

pub use app::{AppContext, AppError};
pub use settings::{Settings, SettingsError};

pub mod prelude {
	pub use crate::app::{AppContext, AppError};
	pub use crate::settings::Settings;
	pub use voyaj_api::{ApiClient, ApiError, AuthEvent, AuthEvents, ErrorContext, User};
	pub use voyaj_router::{RouteId, RoutePayload, RouteState, Router, RouterError};
	pub use voyaj_session::{SessionGate, SessionState, ViewDecision};
}
