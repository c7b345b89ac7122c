//! HTTP transport abstraction.
//!
//! [`ApiClient`](crate::ApiClient) never talks to the network directly; it
//! hands fully-built requests to an [`HttpTransport`]. The browser build uses
//! [`ReqwestTransport`], tests script responses.

use crate::error::ApiError;
use async_trait::async_trait;
use std::borrow::Cow;

/// HTTP methods used by the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
	Get,
	Post,
	Put,
	Patch,
	Delete,
}

impl Method {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Get => "GET",
			Self::Post => "POST",
			Self::Put => "PUT",
			Self::Patch => "PATCH",
			Self::Delete => "DELETE",
		}
	}
}

impl std::fmt::Display for Method {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// One field of a `multipart/form-data` body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPart {
	pub name: String,
	pub file_name: Option<String>,
	pub content_type: Option<String>,
	pub data: Vec<u8>,
}

impl FormPart {
	/// A plain text field.
	pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			file_name: None,
			content_type: None,
			data: value.into().into_bytes(),
		}
	}

	/// A file field.
	pub fn file(
		name: impl Into<String>,
		file_name: impl Into<String>,
		content_type: impl Into<String>,
		data: impl Into<Vec<u8>>,
	) -> Self {
		Self {
			name: name.into(),
			file_name: Some(file_name.into()),
			content_type: Some(content_type.into()),
			data: data.into(),
		}
	}
}

/// Encoded request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
	/// Serialized JSON text.
	Json(String),
	/// Form fields; the transport picks the boundary.
	Multipart(Vec<FormPart>),
}

/// A request ready to be put on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
	pub method: Method,
	pub url: String,
	pub headers: Vec<(String, String)>,
	pub body: Option<RequestBody>,
}

impl HttpRequest {
	/// Returns the first header with the given name (case-insensitive).
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers
			.iter()
			.find(|(key, _)| key.eq_ignore_ascii_case(name))
			.map(|(_, value)| value.as_str())
	}

	/// The JSON text of the body, if the body is JSON.
	pub fn json_body(&self) -> Option<&str> {
		match &self.body {
			Some(RequestBody::Json(text)) => Some(text),
			_ => None,
		}
	}

	/// The form fields of the body, if the body is multipart.
	pub fn form_parts(&self) -> Option<&[FormPart]> {
		match &self.body {
			Some(RequestBody::Multipart(parts)) => Some(parts),
			_ => None,
		}
	}
}

/// Raw response: status and body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
	pub status: u16,
	pub body: Vec<u8>,
}

impl HttpResponse {
	pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
		Self {
			status,
			body: body.into(),
		}
	}

	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Body decoded as UTF-8, replacing invalid sequences.
	pub fn text(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(&self.body)
	}
}

/// Sends HTTP requests.
///
/// Futures are not required to be `Send`: the browser fetch API is
/// single-threaded.
#[async_trait(?Send)]
pub trait HttpTransport {
	/// Sends `request`. Only failures to obtain a response are errors;
	/// every HTTP status is returned as a response.
	async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError>;
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_impl::ReqwestTransport;

#[cfg(feature = "reqwest")]
mod reqwest_impl {
	use super::{FormPart, HttpRequest, HttpResponse, HttpTransport, Method, RequestBody};
	use crate::error::ApiError;
	use async_trait::async_trait;
	use reqwest::multipart;

	/// [`HttpTransport`] backed by `reqwest`.
	#[derive(Debug, Clone, Default)]
	pub struct ReqwestTransport {
		client: reqwest::Client,
	}

	impl ReqwestTransport {
		pub fn new() -> Self {
			Self::default()
		}

		/// Wraps an existing client, e.g. one with custom defaults.
		pub fn with_client(client: reqwest::Client) -> Self {
			Self { client }
		}
	}

	#[async_trait(?Send)]
	impl HttpTransport for ReqwestTransport {
		async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
			let method = match request.method {
				Method::Get => reqwest::Method::GET,
				Method::Post => reqwest::Method::POST,
				Method::Put => reqwest::Method::PUT,
				Method::Patch => reqwest::Method::PATCH,
				Method::Delete => reqwest::Method::DELETE,
			};

			let mut builder = self.client.request(method, &request.url);
			for (name, value) in &request.headers {
				builder = builder.header(name.as_str(), value.as_str());
			}
			builder = match request.body {
				Some(RequestBody::Json(text)) => builder.body(text),
				Some(RequestBody::Multipart(parts)) => builder.multipart(build_form(parts)?),
				None => builder,
			};

			let response = builder
				.send()
				.await
				.map_err(|err| ApiError::Network(err.to_string()))?;
			let status = response.status().as_u16();
			let body = response
				.bytes()
				.await
				.map_err(|err| ApiError::Network(err.to_string()))?;

			Ok(HttpResponse::new(status, body.to_vec()))
		}
	}

	fn build_form(parts: Vec<FormPart>) -> Result<multipart::Form, ApiError> {
		let mut form = multipart::Form::new();
		for part in parts {
			let mut field = multipart::Part::bytes(part.data);
			if let Some(file_name) = part.file_name {
				field = field.file_name(file_name);
			}
			if let Some(content_type) = part.content_type {
				field = field
					.mime_str(&content_type)
					.map_err(|err| ApiError::Serialization(err.to_string()))?;
			}
			form = form.part(part.name, field);
		}
		Ok(form)
	}
}
