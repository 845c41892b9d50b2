//! Convenience re-exports for common use.

pub use crate::auth::{AuthFlow, AuthRequest, Authorizer, FileTokenStore, Token, TokenStore};
pub use crate::config::GraphConfig;
pub use crate::error::{Action, GraphError, Result};
pub use crate::publish::{PublishListener, PublishRequest, Publisher};
