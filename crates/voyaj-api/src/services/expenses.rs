//! `/trips/{id}/expenses` endpoints.

use super::{query_string, segment};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::services::trips::trip_path;
use serde_json::Value;

/// Shared trip expenses.
#[derive(Debug, Clone, Copy)]
pub struct ExpensesService<'a> {
	client: &'a ApiClient,
}

impl<'a> ExpensesService<'a> {
	pub fn new(client: &'a ApiClient) -> Self {
		Self { client }
	}

	pub async fn create(&self, trip_id: &str, expense: &Value) -> Result<Value, ApiError> {
		self.client.post(&trip_path(trip_id, "/expenses"), expense).await
	}

	pub async fn list(&self, trip_id: &str) -> Result<Value, ApiError> {
		self.client.get(&trip_path(trip_id, "/expenses")).await
	}

	pub async fn update(
		&self,
		trip_id: &str,
		expense_id: &str,
		changes: &Value,
	) -> Result<Value, ApiError> {
		self.client
			.put(&expense_path(trip_id, expense_id), changes)
			.await
	}

	pub async fn delete(&self, trip_id: &str, expense_id: &str) -> Result<Value, ApiError> {
		self.client.delete(&expense_path(trip_id, expense_id)).await
	}

	/// Totals for the trip. `filters` become query parameters and are
	/// omitted entirely when empty.
	pub async fn summary(&self, trip_id: &str, filters: &[(&str, &str)]) -> Result<Value, ApiError> {
		let path = trip_path(trip_id, "/expenses/summary") + &query_string(filters);
		self.client.get(&path).await
	}
}

fn expense_path(trip_id: &str, expense_id: &str) -> String {
	trip_path(trip_id, &format!("/expenses/{}", segment(expense_id)))
}
