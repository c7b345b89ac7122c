//! Voyaj API - REST client for the Voyaj backend.
//!
//! ## Architecture
//!
//! - [`ApiClient`]: requests carrying the session's bearer token
//! - [`HttpTransport`]: the wire, [`ReqwestTransport`] by default
//! - [`CredentialProvider`]: where tokens come from (the session layer)
//! - [`AuthEvents`]: raised when the backend rejects the session
//! - [`services`]: one service per backend area (auth, trips, expenses,
//!   photos, journal, friendships, subscriptions)
//!
//! ## Feature Flags
//!
//! - `reqwest` (default): enables [`ReqwestTransport`]

mod client;
mod credentials;
mod error;
mod events;
mod models;
pub mod services;
mod settings;
mod transport;

pub use client::{ApiBody, ApiClient, ApiRequest};
pub use credentials::{Anonymous, CredentialProvider};
pub use error::{ApiError, CONNECTION_ERROR, ErrorContext, error_message};
pub use events::{AuthEvent, AuthEvents, ListenerId};
pub use models::{AuthResponse, AuthTokens, User};
pub use settings::{ApiSettings, DEFAULT_BASE_URL};
#[cfg(feature = "reqwest")]
pub use transport::ReqwestTransport;
pub use transport::{FormPart, HttpRequest, HttpResponse, HttpTransport, Method, RequestBody};
