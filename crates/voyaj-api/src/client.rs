//! Authenticated JSON client for the Voyaj backend.

use crate::credentials::CredentialProvider;
use crate::error::{ApiError, error_message};
use crate::events::{AuthEvent, AuthEvents};
use crate::models::AuthTokens;
use crate::settings::ApiSettings;
use crate::transport::{FormPart, HttpRequest, HttpResponse, HttpTransport, Method, RequestBody};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::rc::Rc;
use tracing::{debug, warn};

/// Body of an [`ApiRequest`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApiBody {
	Json(Value),
	Multipart(Vec<FormPart>),
}

/// A backend call, relative to [`ApiSettings::base_url`].
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
	pub method: Method,
	pub path: String,
	pub body: Option<ApiBody>,
	pub headers: Vec<(String, String)>,
}

impl ApiRequest {
	pub fn new(method: Method, path: impl Into<String>) -> Self {
		Self {
			method,
			path: path.into(),
			body: None,
			headers: Vec::new(),
		}
	}

	pub fn get(path: impl Into<String>) -> Self {
		Self::new(Method::Get, path)
	}

	pub fn post(path: impl Into<String>) -> Self {
		Self::new(Method::Post, path)
	}

	pub fn put(path: impl Into<String>) -> Self {
		Self::new(Method::Put, path)
	}

	pub fn patch(path: impl Into<String>) -> Self {
		Self::new(Method::Patch, path)
	}

	pub fn delete(path: impl Into<String>) -> Self {
		Self::new(Method::Delete, path)
	}

	/// Attaches a JSON body.
	pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self, ApiError> {
		let value =
			serde_json::to_value(body).map_err(|err| ApiError::Serialization(err.to_string()))?;
		self.body = Some(ApiBody::Json(value));
		Ok(self)
	}

	/// Adds a form field, turning the body into `multipart/form-data`.
	/// A JSON body set earlier is discarded.
	pub fn part(mut self, part: FormPart) -> Self {
		match &mut self.body {
			Some(ApiBody::Multipart(parts)) => parts.push(part),
			_ => self.body = Some(ApiBody::Multipart(vec![part])),
		}
		self
	}

	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));
		self
	}
}

/// JSON client that attaches the session's bearer token.
///
/// A 401 on a request that carried a token means the session is no longer
/// valid. When a refresh endpoint is configured the client tries one token
/// refresh and retries once; otherwise (or if that fails too) it emits
/// [`AuthEvent::Unauthorized`] and returns [`ApiError::Unauthorized`].
#[derive(Clone)]
pub struct ApiClient {
	settings: ApiSettings,
	transport: Rc<dyn HttpTransport>,
	credentials: Rc<dyn CredentialProvider>,
	events: AuthEvents,
}

impl ApiClient {
	pub fn new(
		settings: ApiSettings,
		transport: Rc<dyn HttpTransport>,
		credentials: Rc<dyn CredentialProvider>,
		events: AuthEvents,
	) -> Self {
		Self {
			settings,
			transport,
			credentials,
			events,
		}
	}

	/// Client using [`ReqwestTransport`](crate::ReqwestTransport).
	#[cfg(feature = "reqwest")]
	pub fn with_reqwest(
		settings: ApiSettings,
		credentials: Rc<dyn CredentialProvider>,
		events: AuthEvents,
	) -> Self {
		Self::new(
			settings,
			Rc::new(crate::transport::ReqwestTransport::new()),
			credentials,
			events,
		)
	}

	pub fn settings(&self) -> &ApiSettings {
		&self.settings
	}

	pub fn events(&self) -> &AuthEvents {
		&self.events
	}

	/// Sends `request` and returns the decoded JSON body.
	///
	/// An empty success body decodes to `Value::Null`.
	pub async fn request(&self, request: ApiRequest) -> Result<Value, ApiError> {
		let response = self.execute(&request).await?;
		decode(&response)
	}

	/// Sends `request` and returns the raw success body, e.g. a PDF export.
	pub async fn request_bytes(&self, request: ApiRequest) -> Result<Vec<u8>, ApiError> {
		let response = self.execute(&request).await?;
		Ok(response.body)
	}

	/// Like [`request`](Self::request), deserializing into `T`.
	pub async fn request_as<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, ApiError> {
		let value = self.request(request).await?;
		serde_json::from_value(value).map_err(|err| ApiError::InvalidResponse(err.to_string()))
	}

	pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
		self.request_as(ApiRequest::get(path)).await
	}

	pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
	where
		B: Serialize + ?Sized,
		T: DeserializeOwned,
	{
		self.request_as(ApiRequest::post(path).json(body)?).await
	}

	pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
	where
		B: Serialize + ?Sized,
		T: DeserializeOwned,
	{
		self.request_as(ApiRequest::put(path).json(body)?).await
	}

	pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
		self.request_as(ApiRequest::delete(path)).await
	}

	/// Sends `request`, handling a rejected session, and fails on any
	/// non-success status.
	async fn execute(&self, request: &ApiRequest) -> Result<HttpResponse, ApiError> {
		let (response, authenticated) = self.dispatch(request).await?;

		if response.status == 401 && authenticated {
			if self.refresh().await {
				let (retried, _) = self.dispatch(request).await?;
				if retried.status != 401 {
					return check_status(retried);
				}
			}

			warn!(
				method = %request.method,
				path = %request.path,
				"session rejected by backend"
			);
			self.events.emit(AuthEvent::Unauthorized);
			return Err(ApiError::Unauthorized(error_message(&response.text())));
		}

		check_status(response)
	}

	/// Builds and sends the wire request. The flag reports whether a
	/// bearer token was attached.
	async fn dispatch(&self, request: &ApiRequest) -> Result<(HttpResponse, bool), ApiError> {
		let token = self.credentials.access_token();
		let authenticated = token.is_some();

		let mut headers = Vec::new();
		// The transport sets the multipart content type with its boundary.
		if !matches!(request.body, Some(ApiBody::Multipart(_))) {
			headers.push(("Content-Type".to_string(), "application/json".to_string()));
		}
		if let Some(token) = token {
			headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
		}
		headers.extend(request.headers.iter().cloned());

		let body = match &request.body {
			Some(ApiBody::Json(value)) => Some(RequestBody::Json(
				serde_json::to_string(value)
					.map_err(|err| ApiError::Serialization(err.to_string()))?,
			)),
			Some(ApiBody::Multipart(parts)) => Some(RequestBody::Multipart(parts.clone())),
			None => None,
		};

		let wire = HttpRequest {
			method: request.method,
			url: self.settings.url(&request.path),
			headers,
			body,
		};

		debug!(method = %wire.method, url = %wire.url, authenticated, "sending request");
		let response = self.transport.send(wire).await?;
		debug!(status = response.status, "received response");

		Ok((response, authenticated))
	}

	/// Exchanges the refresh token for new tokens. Returns whether the
	/// credential was renewed.
	async fn refresh(&self) -> bool {
		let Some(path) = self.settings.refresh_path.as_deref() else {
			return false;
		};
		let Some(refresh_token) = self.credentials.refresh_token() else {
			return false;
		};

		let wire = HttpRequest {
			method: Method::Post,
			url: self.settings.url(path),
			headers: vec![("Content-Type".to_string(), "application/json".to_string())],
			body: Some(RequestBody::Json(
				serde_json::json!({ "refresh_token": refresh_token }).to_string(),
			)),
		};

		let response = match self.transport.send(wire).await {
			Ok(response) => response,
			Err(err) => {
				warn!(error = %err, "token refresh failed");
				return false;
			}
		};
		if !response.is_success() {
			debug!(status = response.status, "token refresh rejected");
			return false;
		}

		match serde_json::from_slice::<AuthTokens>(&response.body) {
			Ok(mut tokens) => {
				if tokens.refresh_token.is_none() {
					tokens.refresh_token = Some(refresh_token);
				}
				self.credentials.store_tokens(tokens);
				debug!("access token refreshed");
				true
			}
			Err(err) => {
				warn!(error = %err, "malformed refresh response");
				false
			}
		}
	}
}

impl std::fmt::Debug for ApiClient {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ApiClient")
			.field("settings", &self.settings)
			.field("events", &self.events)
			.finish_non_exhaustive()
	}
}

fn check_status(response: HttpResponse) -> Result<HttpResponse, ApiError> {
	if response.is_success() {
		Ok(response)
	} else {
		Err(ApiError::Http {
			status: response.status,
			message: error_message(&response.text()),
		})
	}
}

fn decode(response: &HttpResponse) -> Result<Value, ApiError> {
	if response.body.trim_ascii().is_empty() {
		return Ok(Value::Null);
	}
	serde_json::from_slice(&response.body).map_err(|err| ApiError::InvalidResponse(err.to_string()))
}
