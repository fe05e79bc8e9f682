// Console API response body types

use serde::Serialize;

/// Uniform success payload.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: String,
}

impl StatusResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A log file with its on-disk metadata, computed fresh on every listing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub name: String,
    pub size_bytes: u64,
    pub last_modified: i64,
}

/// An installed dependency artifact. The coordinate fields are only present
/// when the file name splits into `<group>_<artifact>_<version>.jar`; any
/// other shape keeps only the name.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencyRecord {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl DependencyRecord {
    /// Derive coordinate fields from an artifact file name.
    pub fn from_file_name(name: &str) -> Self {
        let parts: Vec<&str> = name.split('_').collect();
        if parts.len() == 3 {
            Self {
                name: name.to_string(),
                group_id: Some(parts[0].to_string()),
                artifact_id: Some(parts[1].to_string()),
                version: Some(parts[2].trim_end_matches(".jar").to_string()),
            }
        } else {
            Self {
                name: name.to_string(),
                group_id: None,
                artifact_id: None,
                version: None,
            }
        }
    }
}

/// Inference endpoint advertisement for the console UI.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceAddress {
    pub inference_address: String,
    pub cors_allowed: String,
}
