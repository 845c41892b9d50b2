use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use super::error::AuthError;
use super::request::AuthRequest;
use super::session::{AuthSession, Navigation};
use super::store::TokenStore;
use super::surface::{NavigableSurface, SurfaceEvent, SurfaceProvider};
use super::token::Token;

/// Anything that can produce a fresh access token.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn authorize(&self) -> Result<Token, AuthError>;
}

/// Browser-driven implicit-grant authorization.
///
/// Every call to [`authorize`](Authorizer::authorize) opens a new surface and
/// runs a fresh [`AuthSession`]. On success the token is saved to the store
/// before it is returned.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
/// use graphpub::auth::{AuthFlow, AuthRequest, Authorizer, ConsoleSurfaceProvider, FileTokenStore};
///
/// # async fn example() -> Result<(), graphpub::auth::AuthError> {
/// let flow = AuthFlow::new(
///     AuthRequest::new("368780939859975", ["publish_stream"]),
///     Arc::new(FileTokenStore::new_default()),
///     Arc::new(ConsoleSurfaceProvider),
/// );
/// let token = flow.authorize().await?;
/// # Ok(())
/// # }
/// ```
pub struct AuthFlow {
    request: AuthRequest,
    token_store: Arc<dyn TokenStore>,
    surfaces: Arc<dyn SurfaceProvider>,
}

impl AuthFlow {
    pub fn new(
        request: AuthRequest,
        token_store: Arc<dyn TokenStore>,
        surfaces: Arc<dyn SurfaceProvider>,
    ) -> Self {
        Self {
            request,
            token_store,
            surfaces,
        }
    }

    /// Run one session on an already opened surface.
    pub async fn run(&self, surface: &mut dyn NavigableSurface) -> Result<Token, AuthError> {
        let mut session = AuthSession::new(self.request.clone());
        let url = session.start()?;
        tracing::info!(client_id = self.request.client_id(), "Starting authorization");
        if let Err(err) = surface.load(&url).await {
            surface.destroy().await;
            return Err(err);
        }

        loop {
            let event = surface.next_event().await.unwrap_or(SurfaceEvent::Closed);
            match event {
                SurfaceEvent::Navigated(target) => {
                    tracing::debug!(url = %without_secrets(&target), "Navigation");
                    match session.on_navigate(&target) {
                        Ok(Navigation::Pending) => {
                            if let Err(err) = surface.show().await {
                                surface.destroy().await;
                                return Err(err);
                            }
                        }
                        Ok(Navigation::Ignored) => {}
                        Ok(Navigation::Authorized(token)) => {
                            let saved = self.token_store.save(&token);
                            surface.destroy().await;
                            if let Err(err) = saved {
                                session.fail();
                                return Err(err);
                            }
                            let token = session.complete()?;
                            tracing::info!("Authorization complete");
                            return Ok(token);
                        }
                        Err(err) => {
                            tracing::warn!(error = %err, "Authorization redirect rejected");
                            surface.destroy().await;
                            return Err(err);
                        }
                    }
                }
                SurfaceEvent::Closed => {
                    surface.destroy().await;
                    let err = session.on_close().err().unwrap_or(AuthError::UserCancelled);
                    tracing::info!(state = %session.state(), "Browser surface closed");
                    return Err(err);
                }
            }
        }
    }
}

/// Navigation target reduced to scheme, host and path. The redirect carries
/// the bearer in its fragment and must never reach the log.
fn without_secrets(target: &str) -> String {
    match Url::parse(target) {
        Ok(mut url) => {
            url.set_query(None);
            url.set_fragment(None);
            url.to_string()
        }
        Err(_) => "<not a url>".to_string(),
    }
}

#[async_trait]
impl Authorizer for AuthFlow {
    async fn authorize(&self) -> Result<Token, AuthError> {
        let mut surface = self.surfaces.open().await?;
        let result = self.run(surface.as_mut()).await;
        if let Err(err) = &result {
            tracing::warn!(error = %err, "Authorization failed");
        }
        result
    }
}
