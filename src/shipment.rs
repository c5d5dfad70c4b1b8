//! Shipment record
//!
//! The harness treats shipments as mostly opaque: only the identifier and
//! the image link are inspected, everything else rides along as raw JSON.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// A shipment as exchanged with the service's REST surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    /// Unique identifier, a hyphenated 36-character value
    pub shipment_id: String,

    /// Link to the shipment's picture, absent until one is uploaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_link: Option<String>,

    /// All remaining fields, passed through untouched
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Shipment {
    /// Read a shipment fixture from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(std::io::Error::other)
    }
}
