//! Voyaj Session - the session gate of the Voyaj client.
//!
//! Decides, from the persisted credential and the route classification,
//! whether the requested page, the login view or a redirect is shown, and
//! carries out every sign-in and sign-out transition.
//!
//! ## Architecture
//!
//! - [`KeyValueStore`]: persisted string store, [`MemoryStore`] natively and
//!   `LocalStorage` on WASM
//! - [`SessionCredential`]: tokens and cached user under `access_token`,
//!   `refresh_token` and `user`
//! - [`decide`]: pure view selection
//! - [`SessionGate`]: owner of the session; also the API client's
//!   [`CredentialProvider`](voyaj_api::CredentialProvider)

mod credential;
mod decision;
mod gate;
#[cfg(target_arch = "wasm32")]
mod local_storage;
mod settings;
pub mod storage;

pub use credential::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, SessionCredential, USER_KEY};
pub use decision::{SessionState, ViewDecision, decide, decide_with};
pub use gate::SessionGate;
#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorage;
pub use settings::{SessionSettings, SessionSettingsError};
pub use storage::{KeyValueStore, MemoryStore, StorageError};
