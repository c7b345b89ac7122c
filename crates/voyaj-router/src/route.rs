//! Route identifiers and the route classification table.
//!
//! The set of pages is closed: every page the application can show is a
//! [`RouteId`] variant, and every variant is classified exactly once as
//! public or authenticated.

use crate::error::RouterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a navigable page.
///
/// The string form (used in URLs and history state) is kebab-case,
/// e.g. `trip-details`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteId {
	/// Landing page.
	Home,
	/// Sign-in form.
	Login,
	/// Account creation form.
	Register,
	/// Email verification screen, reachable with a limited credential.
	VerifyEmail,
	/// Password reset form (token from email).
	ResetPassword,
	/// Request a password reset email.
	ForgotPassword,
	/// Authenticated landing page.
	Dashboard,
	/// Current user's profile.
	Profile,
	/// A single trip; the trip id travels in the route payload.
	TripDetails,
	/// All trips of the current user.
	Trips,
	/// Friends and friendship requests.
	Friends,
	/// Subscription plans and billing.
	Subscription,
}

/// Access classification of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteAccess {
	/// Reachable without a session.
	Public,
	/// Requires an authenticated session.
	Authenticated,
}

impl RouteId {
	/// Every route, in declaration order.
	pub const ALL: [RouteId; 12] = [
		RouteId::Home,
		RouteId::Login,
		RouteId::Register,
		RouteId::VerifyEmail,
		RouteId::ResetPassword,
		RouteId::ForgotPassword,
		RouteId::Dashboard,
		RouteId::Profile,
		RouteId::TripDetails,
		RouteId::Trips,
		RouteId::Friends,
		RouteId::Subscription,
	];

	/// Route used when the URL is empty or unrecognized.
	pub const DEFAULT: RouteId = RouteId::Home;

	/// Returns the URL/history name of the route.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Home => "home",
			Self::Login => "login",
			Self::Register => "register",
			Self::VerifyEmail => "verify-email",
			Self::ResetPassword => "reset-password",
			Self::ForgotPassword => "forgot-password",
			Self::Dashboard => "dashboard",
			Self::Profile => "profile",
			Self::TripDetails => "trip-details",
			Self::Trips => "trips",
			Self::Friends => "friends",
			Self::Subscription => "subscription",
		}
	}

	/// Looks the route up in the classification table.
	pub fn access(self) -> RouteAccess {
		match self {
			Self::Home
			| Self::Login
			| Self::Register
			| Self::VerifyEmail
			| Self::ResetPassword
			| Self::ForgotPassword => RouteAccess::Public,
			Self::Dashboard
			| Self::Profile
			| Self::TripDetails
			| Self::Trips
			| Self::Friends
			| Self::Subscription => RouteAccess::Authenticated,
		}
	}

	/// Returns `true` if the route is reachable without a session.
	pub fn is_public(self) -> bool {
		self.access() == RouteAccess::Public
	}
}

impl fmt::Display for RouteId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for RouteId {
	type Err = RouterError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::ALL
			.into_iter()
			.find(|route| route.as_str() == s)
			.ok_or_else(|| RouterError::InvalidRouteName(s.to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(RouteId::Home, RouteAccess::Public)]
	#[case(RouteId::Login, RouteAccess::Public)]
	#[case(RouteId::Register, RouteAccess::Public)]
	#[case(RouteId::VerifyEmail, RouteAccess::Public)]
	#[case(RouteId::ResetPassword, RouteAccess::Public)]
	#[case(RouteId::ForgotPassword, RouteAccess::Public)]
	#[case(RouteId::Dashboard, RouteAccess::Authenticated)]
	#[case(RouteId::Profile, RouteAccess::Authenticated)]
	#[case(RouteId::TripDetails, RouteAccess::Authenticated)]
	#[case(RouteId::Trips, RouteAccess::Authenticated)]
	#[case(RouteId::Friends, RouteAccess::Authenticated)]
	#[case(RouteId::Subscription, RouteAccess::Authenticated)]
	fn test_classification_table(#[case] route: RouteId, #[case] expected: RouteAccess) {
		assert_eq!(route.access(), expected);
		assert_eq!(route.is_public(), expected == RouteAccess::Public);
	}

	#[rstest]
	fn test_every_route_parses_back_from_its_name() {
		for route in RouteId::ALL {
			assert_eq!(route.as_str().parse::<RouteId>(), Ok(route));
		}
	}

	#[rstest]
	#[case("")]
	#[case("settings")]
	#[case("Dashboard")]
	#[case("trip_details")]
	#[case("dashboard/")]
	fn test_unknown_names_rejected(#[case] name: &str) {
		assert_eq!(
			name.parse::<RouteId>(),
			Err(RouterError::InvalidRouteName(name.to_string()))
		);
	}

	#[rstest]
	fn test_serde_uses_url_names() {
		let json = serde_json::to_string(&RouteId::TripDetails).unwrap();
		assert_eq!(json, "\"trip-details\"");

		let route: RouteId = serde_json::from_str("\"verify-email\"").unwrap();
		assert_eq!(route, RouteId::VerifyEmail);

		assert!(serde_json::from_str::<RouteId>("\"admin\"").is_err());
	}

	#[rstest]
	fn test_default_route_is_public() {
		assert!(RouteId::DEFAULT.is_public());
	}
}
