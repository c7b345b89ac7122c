//! Voyaj Router - client-side navigation for the Voyaj single-page application.
//!
//! The router keeps "which page is the user looking at" consistent with the
//! browser's address bar and back/forward buttons.
//!
//! ## Architecture
//!
//! - [`RouteId`]: the closed set of pages and their public/authenticated
//!   classification
//! - [`RoutePayload`]: per-navigation data (trip identifier and extras)
//! - [`location`]: URL building and parsing (`/{page}/{tripId}`, `#page`)
//! - [`History`]: injected history capability, with [`MemoryHistory`] for
//!   tests and native targets and `BrowserHistory` on WASM
//! - [`Router`]: navigation primitives and history-change handling
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use voyaj_router::{MemoryHistory, RoutePayload, RouteId, Router};
//!
//! let history = MemoryHistory::new("/");
//! let router = Router::new(Rc::new(history.clone()));
//!
//! router
//!     .navigate(RouteId::TripDetails, Some(RoutePayload::trip("abc123")))
//!     .unwrap();
//! assert_eq!(history.current_url(), "/trip-details/abc123");
//!
//! // Unknown names are ignored.
//! assert!(router.navigate_named("admin", None).is_err());
//! assert!(router.is_active(RouteId::TripDetails));
//! ```

#[cfg(target_arch = "wasm32")]
mod browser;
mod core;
mod error;
mod history;
pub mod location;
mod payload;
mod route;

#[cfg(target_arch = "wasm32")]
pub use browser::BrowserHistory;
pub use self::core::{RouteState, Router, SubscriptionId};
pub use error::RouterError;
pub use history::{
	History, HistoryChange, HistoryListener, HistoryState, MemoryHistory, NavigationType,
};
pub use location::{Location, build_url, parse_location};
pub use payload::RoutePayload;
pub use route::{RouteAccess, RouteId};
