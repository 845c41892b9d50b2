//! Error types for graphpub.

use strum::{AsRefStr, Display};
use thiserror::Error;

use crate::auth::AuthError;

/// Graph API error code for an invalid or expired access token.
pub const CODE_INVALID_TOKEN: i64 = 190;
/// Graph API error code for a permission the token was not granted.
pub const CODE_PERMISSION_DENIED: i64 = 200;

/// The user-visible action an outcome belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Action {
    Authorize,
    Publish,
}

/// Primary error type for all graphpub operations.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Authorization failed: {0}")]
    Authorization(#[from] AuthError),

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error (code {code}): {message}")]
    Api { code: i64, message: String },

    #[error("Invalid response (status {status}): {message}")]
    InvalidResponse { status: u16, message: String },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl GraphError {
    /// Create an API error from the code and message of a Graph error object.
    pub fn api(code: i64, message: impl Into<String>) -> Self {
        Self::Api {
            code,
            message: message.into(),
        }
    }

    /// The action that produced this error.
    pub fn action(&self) -> Action {
        match self {
            Self::Authorization(_) => Action::Authorize,
            _ => Action::Publish,
        }
    }

    /// Whether a fresh authorization may fix this error.
    ///
    /// Only API rejections of the token itself qualify; transport failures
    /// and unrelated API errors never trigger a new login.
    pub fn is_reauthorizable(&self) -> bool {
        matches!(
            self,
            Self::Api { code, .. } if *code == CODE_INVALID_TOKEN || *code == CODE_PERMISSION_DENIED
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, GraphError>;
