use url::Url;

use super::error::AuthError;

pub const DEFAULT_AUTH_ENDPOINT: &str = "https://www.facebook.com/dialog/oauth";
pub const DEFAULT_REDIRECT_URI: &str = "https://www.facebook.com/connect/login_success.html";

/// Parameters of one implicit-grant authorization attempt.
///
/// # Example
/// ```
/// use graphpub::auth::AuthRequest;
///
/// let request = AuthRequest::new("368780939859975", ["publish_stream"]);
/// let url = request.authorize_url()?;
/// assert!(url.as_str().contains("response_type=token"));
/// # Ok::<(), graphpub::auth::AuthError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthRequest {
    client_id: String,
    scope: Vec<String>,
    redirect_uri: String,
    auth_endpoint: String,
}

impl AuthRequest {
    /// Scope entries are trimmed and de-duplicated, keeping first occurrence order.
    pub fn new<I, S>(client_id: impl Into<String>, scope: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut scopes: Vec<String> = Vec::new();
        for entry in scope {
            let entry = entry.into().trim().to_string();
            if !entry.is_empty() && !scopes.contains(&entry) {
                scopes.push(entry);
            }
        }
        Self {
            client_id: client_id.into(),
            scope: scopes,
            redirect_uri: DEFAULT_REDIRECT_URI.to_string(),
            auth_endpoint: DEFAULT_AUTH_ENDPOINT.to_string(),
        }
    }

    pub fn with_redirect_uri(mut self, uri: impl Into<String>) -> Self {
        self.redirect_uri = uri.into();
        self
    }

    pub fn with_auth_endpoint(mut self, url: impl Into<String>) -> Self {
        self.auth_endpoint = url.into();
        self
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    pub fn scope(&self) -> &[String] {
        &self.scope
    }

    pub fn redirect_uri(&self) -> &str {
        &self.redirect_uri
    }

    pub fn auth_endpoint(&self) -> &str {
        &self.auth_endpoint
    }

    /// Parsed redirect target. Must carry a host to be matched against.
    pub fn redirect_target(&self) -> Result<Url, AuthError> {
        let url = Url::parse(&self.redirect_uri)?;
        if url.host_str().is_none() {
            return Err(AuthError::InvalidRequest(format!(
                "redirect URI has no host: {}",
                self.redirect_uri
            )));
        }
        Ok(url)
    }

    /// Authorization URL the browser surface is pointed at.
    pub fn authorize_url(&self) -> Result<Url, AuthError> {
        if self.client_id.trim().is_empty() {
            return Err(AuthError::InvalidRequest("client id is empty".to_string()));
        }
        let mut url = Url::parse(&self.auth_endpoint)?;
        if url.cannot_be_a_base() {
            return Err(AuthError::InvalidRequest(format!(
                "authorization endpoint is not a web URL: {}",
                self.auth_endpoint
            )));
        }
        self.redirect_target()?;

        let scope = self.scope.join(",");
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("response_type", "token")
            .append_pair("scope", &scope);
        Ok(url)
    }
}
