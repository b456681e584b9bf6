//! Response envelopes shared by every endpoint
//!
//! All success payloads carry `success: true` and a human-readable message;
//! list and single-item endpoints add a `data` field.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Standard success envelope
///
/// `data` is omitted from the JSON body when the endpoint has no payload
/// beyond the confirmation (register, delete).
#[derive(Debug, Serialize)]
pub struct ApiResponse<T = serde_json::Value> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Confirmation-only response
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    /// Response carrying a payload
    pub fn with_data(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

/// Payload for the `GET /` liveness check
#[derive(Debug, Serialize)]
pub struct ServerStatus {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ServerStatus {
    pub fn now() -> Self {
        Self {
            message: "Server is running smoothly".to_string(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ok_omits_data_field() {
        let response: ApiResponse = ApiResponse::ok("done");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["message"], "done");
        assert!(value.get("data").is_none());
    }

    #[test]
    fn test_with_data_includes_payload() {
        let response = ApiResponse::with_data("fetched", json!([1, 2, 3]));
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["data"], json!([1, 2, 3]));
    }

    #[test]
    fn test_server_status_shape() {
        let status = ServerStatus::now();
        let value = serde_json::to_value(&status).unwrap();
        assert!(value["message"].as_str().unwrap().contains("running"));
        assert!(value.get("timestamp").is_some());
    }
}
