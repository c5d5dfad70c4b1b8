//! REST driver for the shipment-list service
//!
//! Thin `reqwest` wrapper around the service's REST surface. Methods return
//! the raw [`reqwest::Response`] so callers assert on status and body
//! themselves; [`ShipmentClient::list_shipments`] additionally parses the
//! list body.

use crate::shipment::Shipment;
use bytes::Bytes;
use std::time::Duration;
use thiserror::Error;

/// Request timeout for all driver calls
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Driver errors
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// HTTP driver for the shipment API
pub struct ShipmentClient {
    base_url: String,
    http: reqwest::Client,
}

impl ShipmentClient {
    /// Create a driver for the service at `base_url`
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    /// Base URL the driver targets
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST `/api/shipment/{id}/image/upload` with a multipart form whose
    /// `file` field carries the image bytes.
    pub async fn upload_image(
        &self,
        shipment_id: &str,
        file_name: &str,
        image: Bytes,
    ) -> Result<reqwest::Response, ClientError> {
        let part = reqwest::multipart::Part::bytes(image.to_vec())
            .file_name(file_name.to_string())
            .mime_str("image/jpeg")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let response = self
            .http
            .post(self.shipment_url(&format!("{}/image/upload", shipment_id)))
            .multipart(form)
            .send()
            .await?;
        Ok(response)
    }

    /// GET `/api/shipment/{id}/image/download`
    pub async fn download_image(
        &self,
        shipment_id: &str,
    ) -> Result<reqwest::Response, ClientError> {
        let response = self
            .http
            .get(self.shipment_url(&format!("{}/image/download", shipment_id)))
            .send()
            .await?;
        Ok(response)
    }

    /// GET `/api/shipment`
    pub async fn list_shipments_raw(&self) -> Result<reqwest::Response, ClientError> {
        let response = self.http.get(self.api_url()).send().await?;
        Ok(response)
    }

    /// GET `/api/shipment`, parsing the body as a shipment list.
    ///
    /// Returns the status alongside the parsed list; the body is only parsed
    /// for 2xx responses.
    pub async fn list_shipments(
        &self,
    ) -> Result<(reqwest::StatusCode, Option<Vec<Shipment>>), ClientError> {
        let response = self.list_shipments_raw().await?;
        let status = response.status();
        if status.is_success() {
            let shipments = response.json::<Vec<Shipment>>().await?;
            Ok((status, Some(shipments)))
        } else {
            Ok((status, None))
        }
    }

    /// POST `/api/shipment` with a JSON shipment body
    pub async fn create_shipment(
        &self,
        shipment: &Shipment,
    ) -> Result<reqwest::Response, ClientError> {
        let response = self
            .http
            .post(self.api_url())
            .json(shipment)
            .send()
            .await?;
        Ok(response)
    }

    /// DELETE `/api/shipment/{id}`
    pub async fn delete_shipment(
        &self,
        shipment_id: &str,
    ) -> Result<reqwest::Response, ClientError> {
        let response = self
            .http
            .delete(self.shipment_url(shipment_id))
            .send()
            .await?;
        Ok(response)
    }

    fn api_url(&self) -> String {
        format!("{}/api/shipment", self.base_url)
    }

    fn shipment_url(&self, suffix: &str) -> String {
        format!("{}/api/shipment/{}", self.base_url, suffix)
    }
}
