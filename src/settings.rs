//! Application settings.
//!
//! Settings are layered, later layers overriding earlier ones:
//!
//! 1. built-in defaults
//! 2. a TOML document (`voyaj.toml`)
//! 3. environment variables:
//!    - `VOYAJ_API_BASE_URL`
//!    - `VOYAJ_REFRESH_PATH` (empty disables refresh)
//!    - `VOYAJ_LOG`
//!
//! In the browser there is no process environment; the variables are read
//! when the crate is compiled instead.
//!
//! ```toml
//! [api]
//! base_url = "https://api.voyaj.app"
//! refresh_path = "/auth/refresh"
//!
//! [session]
//! public_landing = "home"
//! authenticated_landing = "dashboard"
//!
//! [logging]
//! filter = "voyaj=debug"
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use voyaj_api::ApiSettings;
use voyaj_session::{SessionSettings, SessionSettingsError};

pub const ENV_API_BASE_URL: &str = "VOYAJ_API_BASE_URL";
pub const ENV_REFRESH_PATH: &str = "VOYAJ_REFRESH_PATH";
pub const ENV_LOG: &str = "VOYAJ_LOG";

#[derive(Debug, Error)]
pub enum SettingsError {
	#[error("IO error reading {path}: {source}")]
	Io {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Invalid setting: {0}")]
	Invalid(String),

	#[error("Invalid session setting: {0}")]
	Session(#[from] SessionSettingsError),
}

/// Log filter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
	/// `tracing-subscriber` filter directives, e.g. `voyaj=debug,info`.
	pub filter: String,
}

impl Default for LoggingSettings {
	fn default() -> Self {
		Self {
			filter: "info".to_string(),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	pub api: ApiSettings,
	pub session: SessionSettings,
	pub logging: LoggingSettings,
}

impl Settings {
	/// Parses a TOML document over the defaults.
	pub fn from_toml_str(source: &str) -> Result<Self, SettingsError> {
		let settings: Self = toml::from_str(source)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Reads a TOML file over the defaults.
	#[cfg(not(target_arch = "wasm32"))]
	pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		let source = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
			path: path.display().to_string(),
			source,
		})?;
		Self::from_toml_str(&source)
	}

	/// Defaults, then the optional file, then the process environment.
	#[cfg(not(target_arch = "wasm32"))]
	pub fn load(path: Option<&std::path::Path>) -> Result<Self, SettingsError> {
		let settings = match path {
			Some(path) => Self::from_file(path)?,
			None => Self::default(),
		};
		let settings = settings.with_env(|key| std::env::var(key).ok());
		settings.validate()?;
		Ok(settings)
	}

	/// Defaults, then the environment captured at build time.
	#[cfg(target_arch = "wasm32")]
	pub fn load() -> Result<Self, SettingsError> {
		let settings = Self::default().with_env(|key| {
			match key {
				ENV_API_BASE_URL => option_env!("VOYAJ_API_BASE_URL"),
				ENV_REFRESH_PATH => option_env!("VOYAJ_REFRESH_PATH"),
				ENV_LOG => option_env!("VOYAJ_LOG"),
				_ => None,
			}
			.map(str::to_string)
		});
		settings.validate()?;
		Ok(settings)
	}

	/// Applies environment overrides read through `lookup`.
	pub fn with_env<F>(mut self, lookup: F) -> Self
	where
		F: Fn(&str) -> Option<String>,
	{
		if let Some(base_url) = lookup(ENV_API_BASE_URL) {
			self.api.base_url = base_url;
		}
		if let Some(refresh_path) = lookup(ENV_REFRESH_PATH) {
			self.api.refresh_path = Some(refresh_path).filter(|path| !path.is_empty());
		}
		if let Some(filter) = lookup(ENV_LOG) {
			self.logging.filter = filter;
		}
		self
	}

	pub fn validate(&self) -> Result<(), SettingsError> {
		let base_url = &self.api.base_url;
		if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
			return Err(SettingsError::Invalid(format!(
				"api.base_url must be an http(s) URL, got '{}'",
				base_url
			)));
		}
		if let Some(path) = &self.api.refresh_path
			&& !path.starts_with('/')
		{
			return Err(SettingsError::Invalid(format!(
				"api.refresh_path must start with '/', got '{}'",
				path
			)));
		}
		self.session.validate()?;
		Ok(())
	}
}
