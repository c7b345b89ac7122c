//! `/subscriptions` endpoints.

use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiError;
use serde_json::{Value, json};

/// PRO plan status and payments.
#[derive(Debug, Clone, Copy)]
pub struct SubscriptionsService<'a> {
	client: &'a ApiClient,
}

impl<'a> SubscriptionsService<'a> {
	pub fn new(client: &'a ApiClient) -> Self {
		Self { client }
	}

	pub async fn status(&self) -> Result<Value, ApiError> {
		self.client.get("/subscriptions/status").await
	}

	/// Starts a payment for `plan`; the response carries the checkout data.
	pub async fn create_payment(&self, plan: &str) -> Result<Value, ApiError> {
		self.client
			.post("/subscriptions/create-payment", &json!({ "plan": plan }))
			.await
	}

	pub async fn cancel(&self) -> Result<Value, ApiError> {
		self.client
			.request(ApiRequest::post("/subscriptions/cancel"))
			.await
	}

	pub async fn payment_history(&self) -> Result<Value, ApiError> {
		self.client.get("/subscriptions/payment-history").await
	}

	pub async fn payment_statistics(&self) -> Result<Value, ApiError> {
		self.client.get("/subscriptions/payment-statistics").await
	}
}
