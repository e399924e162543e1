use serde::Serialize;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_FAILED: &str = "failed";

/// Success body: `{status, message, data?}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub status: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            status: STATUS_SUCCESS,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Success body without a `data` member
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: STATUS_SUCCESS,
            message: message.into(),
            data: None,
        }
    }
}

/// Failure body: `{status: "failed", code, message, data?: {fields}}`
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub status: &'static str,
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR")
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<FieldErrors>,
}

/// Names of the request fields a validation failure refers to
#[derive(Debug, Serialize)]
pub struct FieldErrors {
    pub fields: Vec<String>,
}
