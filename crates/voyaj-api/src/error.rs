//! API error types and user-facing messages.

use serde_json::Value;
use thiserror::Error;

/// Message used when the backend gives no usable explanation.
pub const CONNECTION_ERROR: &str = "Connection error";

/// Errors returned by [`ApiClient`](crate::ApiClient).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
	/// The backend answered with a non-success status.
	#[error("{message}")]
	Http {
		/// HTTP status code.
		status: u16,
		/// Message extracted from the error body.
		message: String,
	},

	/// The backend rejected the credential (HTTP 401).
	#[error("Unauthorized: {0}")]
	Unauthorized(String),

	/// The request never produced a response.
	#[error("Network error: {0}")]
	Network(String),

	/// A success response could not be decoded.
	#[error("Invalid response: {0}")]
	InvalidResponse(String),

	/// A request body could not be encoded.
	#[error("Serialization error: {0}")]
	Serialization(String),
}

impl ApiError {
	/// Returns the HTTP status, if the backend answered.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Http { status, .. } => Some(*status),
			Self::Unauthorized(_) => Some(401),
			_ => None,
		}
	}

	/// Returns the message to show to the user.
	pub fn user_message(&self) -> &str {
		match self {
			Self::Http { message, .. } | Self::Unauthorized(message) => message,
			Self::Network(_) | Self::InvalidResponse(_) | Self::Serialization(_) => {
				CONNECTION_ERROR
			}
		}
	}
}

/// Extracts the error message from a backend error body.
///
/// `detail` wins over `message`. A `detail` list (validation errors) is
/// flattened by joining each entry's `msg`.
pub fn error_message(body: &str) -> String {
	let Ok(value) = serde_json::from_str::<Value>(body) else {
		return CONNECTION_ERROR.to_string();
	};

	match value.get("detail") {
		Some(Value::String(detail)) => return detail.clone(),
		Some(Value::Array(items)) => {
			let messages: Vec<&str> = items
				.iter()
				.filter_map(|item| item.get("msg").and_then(Value::as_str))
				.collect();
			if !messages.is_empty() {
				return messages.join("; ");
			}
		}
		_ => {}
	}

	value
		.get("message")
		.and_then(Value::as_str)
		.map(str::to_string)
		.unwrap_or_else(|| CONNECTION_ERROR.to_string())
}

/// Feature area a request belongs to, used to pick friendly messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorContext {
	Auth,
	Trips,
	Expenses,
	Photos,
	Subscriptions,
	General,
}

impl ErrorContext {
	/// Maps a known backend error string to a friendly message.
	///
	/// Unknown strings fall back to a per-context message; the general
	/// context passes the backend message through.
	pub fn describe(self, backend_message: &str) -> String {
		let table: &[(&str, &str)] = match self {
			Self::Auth => &[
				("Invalid credentials", "Incorrect email or password"),
				("User already exists", "An account with this email already exists"),
				("Email not verified", "Email not verified"),
				("Invalid token", "Invalid or expired token"),
				("Token expired", "Session expired"),
				("User not found", "User not found"),
			],
			Self::Trips => &[
				("Trip not found", "Trip not found"),
				("User not authorized", "You do not have access to this trip"),
				("Invalid date range", "Invalid date range"),
				("Budget exceeded", "Budget exceeded"),
				("Activity not found", "Activity not found"),
				("Already invited", "User already invited"),
			],
			Self::Expenses => &[
				("Expense not found", "Expense not found"),
				("Invalid amount", "Invalid amount"),
				("Currency not supported", "Currency not supported"),
				("Split amounts invalid", "Invalid expense split"),
				("Cannot delete expense", "This expense cannot be deleted"),
			],
			Self::Photos => &[
				("File too large", "File too large (max 5MB)"),
				("Invalid file type", "Invalid file type"),
				("Photo not found", "Photo not found"),
				("Upload failed", "Photo upload failed"),
				("Storage limit exceeded", "Storage limit exceeded"),
			],
			Self::Subscriptions => &[
				("PRO subscription required", "PRO subscription required"),
				("Payment failed", "Payment failed"),
				("Invalid plan", "Invalid plan"),
				("Already subscribed", "You already have an active subscription"),
				("Subscription not found", "Subscription not found"),
			],
			Self::General => {
				return if backend_message.is_empty() {
					"Unknown error".to_string()
				} else {
					backend_message.to_string()
				};
			}
		};

		table
			.iter()
			.find(|(known, _)| *known == backend_message)
			.map(|(_, friendly)| friendly.to_string())
			.unwrap_or_else(|| self.fallback().to_string())
	}

	fn fallback(self) -> &'static str {
		match self {
			Self::Auth => "Authentication error",
			Self::Trips => "Trip error",
			Self::Expenses => "Expense error",
			Self::Photos => "Photo error",
			Self::Subscriptions => "Subscription error",
			Self::General => "Unknown error",
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(r#"{"detail":"Invalid credentials"}"#, "Invalid credentials")]
	#[case(r#"{"message":"Trip not found"}"#, "Trip not found")]
	#[case(r#"{"detail":"a","message":"b"}"#, "a")]
	#[case(r#"{"detail":[{"msg":"field required"},{"msg":"too short"}]}"#, "field required; too short")]
	#[case(r#"{"error":"x"}"#, CONNECTION_ERROR)]
	#[case("<html>502</html>", CONNECTION_ERROR)]
	#[case("", CONNECTION_ERROR)]
	fn test_error_message(#[case] body: &str, #[case] expected: &str) {
		assert_eq!(error_message(body), expected);
	}

	#[rstest]
	fn test_user_message() {
		let err = ApiError::Http {
			status: 404,
			message: "Trip not found".to_string(),
		};
		assert_eq!(err.user_message(), "Trip not found");
		assert_eq!(err.status(), Some(404));

		let err = ApiError::Network("dns".to_string());
		assert_eq!(err.user_message(), CONNECTION_ERROR);
		assert_eq!(err.status(), None);
	}

	#[rstest]
	#[case(ErrorContext::Auth, "Token expired", "Session expired")]
	#[case(ErrorContext::Auth, "Something else", "Authentication error")]
	#[case(ErrorContext::Photos, "File too large", "File too large (max 5MB)")]
	#[case(ErrorContext::Subscriptions, "Nope", "Subscription error")]
	#[case(ErrorContext::General, "Raw backend text", "Raw backend text")]
	#[case(ErrorContext::General, "", "Unknown error")]
	fn test_error_context_describe(
		#[case] context: ErrorContext,
		#[case] backend: &str,
		#[case] expected: &str,
	) {
		assert_eq!(context.describe(backend), expected);
	}
}
