//! `/trips/{id}/photos` endpoints.

use super::segment;
use crate::client::{ApiClient, ApiRequest};
use crate::error::ApiError;
use crate::services::trips::trip_path;
use crate::transport::FormPart;
use serde_json::Value;

/// Trip photo album.
#[derive(Debug, Clone, Copy)]
pub struct PhotosService<'a> {
	client: &'a ApiClient,
}

impl<'a> PhotosService<'a> {
	pub fn new(client: &'a ApiClient) -> Self {
		Self { client }
	}

	/// Uploads one image as the `file` form field.
	pub async fn upload(
		&self,
		trip_id: &str,
		file_name: &str,
		content_type: &str,
		data: Vec<u8>,
	) -> Result<Value, ApiError> {
		self.client
			.request(
				ApiRequest::post(trip_path(trip_id, "/photos/upload"))
					.part(FormPart::file("file", file_name, content_type, data)),
			)
			.await
	}

	pub async fn list(&self, trip_id: &str) -> Result<Value, ApiError> {
		self.client.get(&trip_path(trip_id, "/photos")).await
	}

	pub async fn get(&self, trip_id: &str, photo_id: &str) -> Result<Value, ApiError> {
		self.client.get(&photo_path(trip_id, photo_id)).await
	}

	pub async fn delete(&self, trip_id: &str, photo_id: &str) -> Result<Value, ApiError> {
		self.client.delete(&photo_path(trip_id, photo_id)).await
	}

	/// Photos grouped by trip day.
	pub async fn by_day(&self, trip_id: &str) -> Result<Value, ApiError> {
		self.client.get(&trip_path(trip_id, "/photos/by-day")).await
	}
}

fn photo_path(trip_id: &str, photo_id: &str) -> String {
	trip_path(trip_id, &format!("/photos/{}", segment(photo_id)))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::client::testing::{ScriptedTransport, StaticCredentials, client};
	use crate::error::ErrorContext;
	use crate::models::AuthTokens;
	use crate::settings::ApiSettings;
	use crate::transport::{HttpResponse, Method};

	#[tokio::test]
	async fn test_upload_is_multipart() {
		let transport = ScriptedTransport::new(vec![HttpResponse::new(201, r#"{"id":"p1"}"#)]);
		let client = client(
			ApiSettings::default(),
			&transport,
			StaticCredentials::with(AuthTokens::new("t")),
		);

		let photo = PhotosService::new(&client)
			.upload("t1", "beach.jpg", "image/jpeg", vec![0xff, 0xd8, 0xff])
			.await
			.unwrap();

		assert_eq!(photo["id"], "p1");
		let sent = transport.sent.borrow();
		assert_eq!(sent[0].method, Method::Post);
		assert_eq!(sent[0].url, "http://localhost:8000/trips/t1/photos/upload");
		assert_eq!(sent[0].header("content-type"), None);
		assert_eq!(
			sent[0].form_parts(),
			Some(&[FormPart::file("file", "beach.jpg", "image/jpeg", vec![0xff, 0xd8, 0xff])][..])
		);
	}

	#[tokio::test]
	async fn test_oversized_upload_message() {
		let transport =
			ScriptedTransport::new(vec![HttpResponse::new(413, r#"{"detail":"File too large"}"#)]);
		let client = client(
			ApiSettings::default(),
			&transport,
			StaticCredentials::with(AuthTokens::new("t")),
		);

		let err = PhotosService::new(&client)
			.upload("t1", "huge.png", "image/png", vec![0; 16])
			.await
			.unwrap_err();

		assert_eq!(err.status(), Some(413));
		assert_eq!(
			ErrorContext::Photos.describe(err.user_message()),
			"File too large (max 5MB)"
		);
	}

	#[tokio::test]
	async fn test_read_paths() {
		let transport = ScriptedTransport::new(vec![
			HttpResponse::new(200, "[]"),
			HttpResponse::new(200, "{}"),
			HttpResponse::new(200, r#"{"id":"p/1"}"#),
			HttpResponse::new(204, ""),
		]);
		let client = client(
			ApiSettings::default(),
			&transport,
			StaticCredentials::with(AuthTokens::new("t")),
		);
		let photos = PhotosService::new(&client);

		photos.list("t1").await.unwrap();
		photos.by_day("t1").await.unwrap();
		photos.get("t1", "p/1").await.unwrap();
		photos.delete("t1", "p/1").await.unwrap();

		let urls: Vec<String> = transport
			.sent
			.borrow()
			.iter()
			.map(|request| request.url.clone())
			.collect();
		assert_eq!(
			urls,
			vec![
				"http://localhost:8000/trips/t1/photos",
				"http://localhost:8000/trips/t1/photos/by-day",
				"http://localhost:8000/trips/t1/photos/p%2F1",
				"http://localhost:8000/trips/t1/photos/p%2F1",
			]
		);
		assert_eq!(transport.sent.borrow()[3].method, Method::Delete);
	}
}
