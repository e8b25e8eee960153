//! Shared request/response types used by API-facing crates.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    pub status: String,
}

impl HealthCheckResponse {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

/// Attribute bag of a file record. Always a JSON object.
pub type Attributes = Map<String, Value>;

/// Payload of `POST /files`, forwarded to the service untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreateFileDto(pub Attributes);

/// Payload of `PATCH /files/{id}`, forwarded to the service untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UpdateFileDto(pub Attributes);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: i32,
    #[serde(flatten)]
    pub attributes: Attributes,
}

impl FileRecord {
    /// Builds a record, dropping any `id` key from the attributes so the
    /// flattened JSON never carries two ids.
    #[must_use]
    pub fn new(id: i32, mut attributes: Attributes) -> Self {
        attributes.remove("id");
        Self { id, attributes }
    }
}
