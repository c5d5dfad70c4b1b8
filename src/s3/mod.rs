//! S3-side bucket inspection
//!
//! Verifies object-storage state directly against the emulator, independent
//! of both the service under test and the in-container CLI.

use crate::emulator::Emulator;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::Client;
use thiserror::Error;

/// Inspector errors
#[derive(Error, Debug)]
pub enum InspectorError {
    #[error("ListObjects failed: {0}")]
    ListObjects(String),
}

/// S3 client pointed at the emulator
pub struct BucketInspector {
    client: Client,
}

impl BucketInspector {
    /// Build an inspector from the emulator's endpoint and credentials.
    ///
    /// Path-style addressing is forced; virtual-hosted bucket names do not
    /// resolve against a local endpoint.
    pub fn for_emulator(emulator: &Emulator) -> Self {
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(emulator.region()))
            .endpoint_url(emulator.endpoint())
            .credentials_provider(Credentials::new(
                emulator.access_key(),
                emulator.secret_key(),
                None,
                None,
                "shipment-e2e",
            ))
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(config),
        }
    }

    /// True when the bucket exists and is reachable
    pub async fn bucket_exists(&self, bucket: &str) -> bool {
        self.client
            .head_bucket()
            .bucket(bucket)
            .send()
            .await
            .is_ok()
    }

    /// Number of objects currently stored in the bucket
    pub async fn object_count(&self, bucket: &str) -> Result<usize, InspectorError> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| InspectorError::ListObjects(e.to_string()))?;

        Ok(output.contents().len())
    }
}
