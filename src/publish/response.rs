use serde::Deserialize;
use serde_json::Value;

use crate::error::{GraphError, Result};

/// Error object of a Graph API response.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphApiError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub error_subcode: Option<i64>,
}

/// Interpret a publish response body.
///
/// Any JSON body without an `error` member is a success and is returned
/// verbatim. A body that is not JSON at all is an invalid response.
pub fn parse_response(status: u16, body: String) -> Result<String> {
    let value: Value = serde_json::from_str(&body).map_err(|e| GraphError::InvalidResponse {
        status,
        message: e.to_string(),
    })?;

    if let Some(error) = value.get("error") {
        let api_error = serde_json::from_value::<GraphApiError>(error.clone()).unwrap_or_else(
            |_| GraphApiError {
                code: 0,
                message: error.to_string(),
                kind: None,
                error_subcode: None,
            },
        );
        tracing::debug!(
            code = api_error.code,
            kind = api_error.kind.as_deref().unwrap_or(""),
            subcode = api_error.error_subcode,
            "Graph API error"
        );
        return Err(GraphError::api(api_error.code, api_error.message));
    }

    if !(200..300).contains(&status) {
        tracing::warn!(status, "Publish answered with a non-success status but no error object");
    }
    Ok(body)
}
