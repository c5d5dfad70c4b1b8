//! Service configuration bindings
//!
//! The shipment-list service builds its S3, DynamoDB, SQS and SNS clients
//! from its configuration namespace at startup. Before that happens the
//! harness publishes the emulator endpoint and credentials under the
//! property names the service reads, so every cloud client targets the
//! emulator instead of real AWS.

use crate::emulator::Emulator;
use tracing::debug;

/// Property names read by the service under test
const PROP_S3_ENDPOINT: &str = "aws.s3.endpoint";
const PROP_DYNAMODB_ENDPOINT: &str = "aws.dynamodb.endpoint";
const PROP_SQS_ENDPOINT: &str = "aws.sqs.endpoint";
const PROP_SNS_ENDPOINT: &str = "aws.sns.endpoint";
const PROP_ACCESS_KEY: &str = "aws.credentials.access-key";
const PROP_SECRET_KEY: &str = "aws.credentials.secret-key";
const PROP_REGION: &str = "aws.region";
const PROP_BUCKET: &str = "shipment-picture-bucket";

/// The configuration values published to the service under test.
#[derive(Debug, Clone)]
pub struct ServiceBindings {
    endpoint: String,
    access_key: String,
    secret_key: String,
    region: String,
    bucket: String,
}

impl ServiceBindings {
    /// Bindings for an explicit endpoint and credential set
    pub fn new(
        endpoint: &str,
        access_key: &str,
        secret_key: &str,
        region: &str,
        bucket: &str,
    ) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            access_key: access_key.to_string(),
            secret_key: secret_key.to_string(),
            region: region.to_string(),
            bucket: bucket.to_string(),
        }
    }

    /// Bind all cloud clients of the service to the given emulator.
    pub fn for_emulator(emulator: &Emulator, bucket: &str) -> Self {
        Self::new(
            emulator.endpoint(),
            emulator.access_key(),
            emulator.secret_key(),
            emulator.region(),
            bucket,
        )
    }

    /// The properties by the names the service reads them under. All four
    /// service endpoints are the emulator's single edge endpoint.
    pub fn properties(&self) -> Vec<(String, String)> {
        vec![
            (PROP_S3_ENDPOINT.into(), self.endpoint.clone()),
            (PROP_DYNAMODB_ENDPOINT.into(), self.endpoint.clone()),
            (PROP_SQS_ENDPOINT.into(), self.endpoint.clone()),
            (PROP_SNS_ENDPOINT.into(), self.endpoint.clone()),
            (PROP_ACCESS_KEY.into(), self.access_key.clone()),
            (PROP_SECRET_KEY.into(), self.secret_key.clone()),
            (PROP_REGION.into(), self.region.clone()),
            (PROP_BUCKET.into(), self.bucket.clone()),
        ]
    }

    /// The properties as environment variables, using relaxed mapping
    /// (uppercase, `.` and `-` become `_`).
    pub fn env(&self) -> Vec<(String, String)> {
        self.properties()
            .into_iter()
            .map(|(key, value)| (env_key(&key), value))
            .collect()
    }

    /// Publish the bindings into the current process environment so that
    /// both in-process consumers and launched children see them.
    pub fn export(&self) {
        for (key, value) in self.env() {
            debug!(key = %key, value = %value, "Publishing service binding");
            std::env::set_var(key, value);
        }
    }
}

/// Map a dotted property name to its environment variable form
fn env_key(property: &str) -> String {
    property
        .chars()
        .map(|c| match c {
            '.' | '-' => '_',
            _ => c.to_ascii_uppercase(),
        })
        .collect()
}
