use std::sync::{Arc, Mutex};

use crate::auth::{Authorizer, Token, TokenStore};
use crate::config::GraphConfig;
use crate::error::{Action, GraphError, Result};

use super::listener::PublishListener;
use super::request::PublishRequest;
use super::response::parse_response;

/// Re-authorizations allowed per publish call before an API rejection of
/// the token is reported as final.
pub const MAX_REAUTHORIZATIONS: u32 = 2;

/// Publishes posts, acquiring and refreshing the access token as needed.
///
/// The token is looked up in memory first, then in the token store. When
/// neither has one, or the API rejects the one in use with code 190 or 200,
/// the [`Authorizer`] is asked for a new token and the post is retried.
pub struct Publisher {
    client: reqwest::Client,
    publish_url: String,
    token_store: Arc<dyn TokenStore>,
    authorizer: Arc<dyn Authorizer>,
    token: Mutex<Option<Token>>,
}

impl Publisher {
    pub fn new(
        config: &GraphConfig,
        token_store: Arc<dyn TokenStore>,
        authorizer: Arc<dyn Authorizer>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            publish_url: config.publish_url.clone(),
            token_store,
            authorizer,
            token: Mutex::new(None),
        }
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn with_publish_url(mut self, url: impl Into<String>) -> Self {
        self.publish_url = url.into();
        self
    }

    /// The token held in memory, if any.
    pub fn cached_token(&self) -> Option<Token> {
        self.token.lock().ok().and_then(|guard| guard.clone())
    }

    fn set_cached_token(&self, token: Option<Token>) {
        if let Ok(mut guard) = self.token.lock() {
            *guard = token;
        }
    }

    fn current_token(&self) -> Option<Token> {
        if let Some(token) = self.cached_token() {
            return Some(token);
        }
        tracing::debug!("No token in memory, loading from store");
        let token = self.token_store.load()?;
        self.set_cached_token(Some(token.clone()));
        Some(token)
    }

    /// Run a fresh authorization and keep the resulting token in memory.
    ///
    /// The cached token is dropped first, so a failed authorization leaves
    /// the publisher without one.
    pub async fn authorize(&self) -> Result<Token> {
        self.set_cached_token(None);
        let token = self.authorizer.authorize().await?;
        self.set_cached_token(Some(token.clone()));
        Ok(token)
    }

    /// Publish a post and return the raw response body.
    pub async fn publish(&self, request: &PublishRequest) -> Result<String> {
        let mut attempt: u32 = 0;
        loop {
            tracing::info!(attempt, "Publishing");
            let token = match self.current_token() {
                Some(token) => token,
                None => {
                    tracing::info!("No token available, authorizing");
                    self.authorize().await?;
                    attempt += 1;
                    continue;
                }
            };

            match self.post(request, &token).await {
                Ok(body) => {
                    tracing::info!(attempt, "Published");
                    return Ok(body);
                }
                Err(err) if err.is_reauthorizable() && attempt < MAX_REAUTHORIZATIONS => {
                    tracing::warn!(attempt, error = %err, "Token rejected, reauthorizing");
                    self.authorize().await?;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// [`publish`](Self::publish), reporting the outcome to a listener.
    pub async fn publish_and_notify(
        &self,
        request: &PublishRequest,
        listener: &dyn PublishListener,
    ) {
        match self.publish(request).await {
            Ok(body) => listener.on_success(Action::Publish, &body),
            Err(err) => listener.on_failure(err.action(), &failure_message(&err)),
        }
    }

    /// [`authorize`](Self::authorize), reporting the outcome to a listener.
    pub async fn authorize_and_notify(&self, listener: &dyn PublishListener) {
        match self.authorize().await {
            Ok(token) => listener.on_success(Action::Authorize, &token.access_token),
            Err(err) => listener.on_failure(err.action(), &failure_message(&err)),
        }
    }

    async fn post(&self, request: &PublishRequest, token: &Token) -> Result<String> {
        let form = request.form_fields(&token.access_token);
        let resp = self
            .client
            .post(&self.publish_url)
            .form(&form)
            .send()
            .await?;
        let status = resp.status();
        let body = resp.text().await?;
        parse_response(status.as_u16(), body)
    }
}

/// Message handed to failure listeners: the API's own text for API errors,
/// the full error description otherwise.
fn failure_message(err: &GraphError) -> String {
    match err {
        GraphError::Api { message, .. } => message.clone(),
        GraphError::Authorization(inner) => inner.to_string(),
        other => other.to_string(),
    }
}
