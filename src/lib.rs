//! graphpub: publish to a social graph API from the desktop.
//!
//! Authorization uses the OAuth 2.0 implicit grant: the user logs in inside a
//! browser surface and the access token is captured from the fragment of the
//! redirect URL, so no local callback server is needed. The token is kept in
//! a plain-text file and reused until the API rejects it.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use graphpub::auth::{AuthFlow, ConsoleSurfaceProvider, FileTokenStore, TokenStore};
//! use graphpub::config::GraphConfig;
//! use graphpub::publish::{PublishRequest, Publisher};
//!
//! # async fn example() -> graphpub::error::Result<()> {
//! let config = GraphConfig::from_env();
//! let store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(config.token_file.clone()));
//! let flow = AuthFlow::new(
//!     config.auth_request()?,
//!     store.clone(),
//!     Arc::new(ConsoleSurfaceProvider::default()),
//! );
//! let publisher = Publisher::new(&config, store, Arc::new(flow));
//!
//! let request = PublishRequest::builder()
//!     .message("Hello from graphpub".to_string())
//!     .build();
//! let body = publisher.publish(&request).await?;
//! println!("{body}");
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod prelude;
pub mod publish;

#[cfg(feature = "cli")]
pub mod cli;
