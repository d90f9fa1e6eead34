//! Shared API models for PDF Digest.
//!
//! Request and response shapes exposed by the HTTP surface, plus the
//! error envelope.

use crate::summarize::{SummaryKind, SummaryMode};
use serde::{Deserialize, Serialize};

/// Response to a successful upload
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct UploadResponse {
    /// Identifier to use for later summarize/delete calls
    pub file_id: String,
    /// Original filename as sent by the client
    pub filename: String,
    /// Number of text-bearing pages found during the immediate extraction
    pub page_count: usize,
    pub message: String,
}

/// Request body for summarization
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
pub struct SummarizeRequest {
    /// Identifier returned by the upload endpoint
    pub file_id: String,
    /// "short", "medium" or "detailed"; anything else falls back to medium
    #[serde(default)]
    pub mode: Option<String>,
}

impl SummarizeRequest {
    pub fn mode(&self) -> SummaryMode {
        self.mode
            .as_deref()
            .map(SummaryMode::parse)
            .unwrap_or_default()
    }
}

/// Summarization response
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct SummarizeResponse {
    pub summary: String,
    /// Whether the text came from the service, the mock, or a failure
    pub kind: SummaryKind,
    pub mode: SummaryMode,
}

/// Response to a delete call. Always 200; `deleted` reports whether the
/// file was actually there.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub message: String,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// True when no completion credential is configured
    pub mock_mode: bool,
}

/// API error envelope
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiError {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiErrorDetail {
    pub message: String,
    pub r#type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ApiError {
    pub fn new(message: impl Into<String>, error_type: impl Into<String>) -> Self {
        Self {
            error: ApiErrorDetail {
                message: message.into(),
                r#type: error_type.into(),
                code: None,
            },
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(message, "invalid_request_error")
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(message, "not_found_error")
    }

    pub fn extraction_error(message: impl Into<String>) -> Self {
        Self::new(message, "extraction_error")
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new(message, "internal_error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarize::SummaryMode;

    #[test]
    fn test_summarize_request_mode_default() {
        let req = SummarizeRequest {
            file_id: "x".to_string(),
            mode: None,
        };
        assert_eq!(req.mode(), SummaryMode::Medium);

        let req = SummarizeRequest {
            file_id: "x".to_string(),
            mode: Some("short".to_string()),
        };
        assert_eq!(req.mode(), SummaryMode::Short);

        // Unrecognized mode strings fall back instead of failing
        let req = SummarizeRequest {
            file_id: "x".to_string(),
            mode: Some("extra-verbose".to_string()),
        };
        assert_eq!(req.mode(), SummaryMode::Medium);
    }

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::not_found("File not found");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("not_found_error"));
        assert!(json.contains("File not found"));
        // No code set, so the field is omitted
        assert!(!json.contains("\"code\""));
    }
}
