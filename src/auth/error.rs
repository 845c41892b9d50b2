use thiserror::Error;

/// Errors raised while acquiring or persisting an access token.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Login window closed before authorization")]
    UserCancelled,
    #[error("Malformed redirect: {0}")]
    MalformedRedirect(String),
    #[error("Browser surface error: {0}")]
    Surface(String),
    #[error("Invalid authorization request: {0}")]
    InvalidRequest(String),
    #[error("Token file error: {0}")]
    FileAccess(String),
    #[error("Authorization session is {0}")]
    SessionClosed(String),
}

impl From<std::io::Error> for AuthError {
    fn from(error: std::io::Error) -> Self {
        Self::FileAccess(error.to_string())
    }
}

impl From<url::ParseError> for AuthError {
    fn from(error: url::ParseError) -> Self {
        Self::InvalidRequest(error.to_string())
    }
}
