//! Implicit-grant state machine.
//!
//! [`AuthSession`] holds everything one authorization attempt needs and
//! advances on surface events. It performs no I/O; [`super::flow::AuthFlow`]
//! drives it against a real surface and the token store.

use strum::Display;
use url::Url;

use super::error::AuthError;
use super::request::AuthRequest;
use super::token::Token;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum AuthState {
    Idle,
    AwaitingRedirect,
    TokenExtracted,
    Done,
    Cancelled,
    Failed,
}

impl AuthState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Cancelled | Self::Failed)
    }
}

/// What the driver must do after a navigation event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Not the redirect yet; make the surface visible and keep waiting.
    Pending,
    /// The redirect carried a token.
    Authorized(Token),
    /// The session already finished; the event is ignored.
    Ignored,
}

/// One authorization attempt.
#[derive(Debug, Clone)]
pub struct AuthSession {
    request: AuthRequest,
    state: AuthState,
    redirect: Option<Url>,
    token: Option<Token>,
}

impl AuthSession {
    pub fn new(request: AuthRequest) -> Self {
        Self {
            request,
            state: AuthState::Idle,
            redirect: None,
            token: None,
        }
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    /// Validate the request and return the URL the surface must load.
    pub fn start(&mut self) -> Result<Url, AuthError> {
        if self.state != AuthState::Idle {
            return Err(AuthError::SessionClosed(self.state.to_string()));
        }
        let url = self.request.authorize_url()?;
        self.redirect = Some(self.request.redirect_target()?);
        self.state = AuthState::AwaitingRedirect;
        Ok(url)
    }

    pub fn on_navigate(&mut self, target: &str) -> Result<Navigation, AuthError> {
        if self.state != AuthState::AwaitingRedirect {
            tracing::debug!(state = %self.state, "Navigation after session ended");
            return Ok(Navigation::Ignored);
        }
        let fragment = match self.redirect_fragment(target) {
            Some(fragment) => fragment,
            None => return Ok(Navigation::Pending),
        };

        self.state = AuthState::TokenExtracted;
        match parse_fragment(&fragment) {
            Ok(token) => {
                self.token = Some(token.clone());
                Ok(Navigation::Authorized(token))
            }
            Err(err) => {
                self.state = AuthState::Failed;
                Err(err)
            }
        }
    }

    /// Mark the token as persisted; the session is finished.
    pub fn complete(&mut self) -> Result<Token, AuthError> {
        match (self.state, &self.token) {
            (AuthState::TokenExtracted, Some(token)) => {
                self.state = AuthState::Done;
                Ok(token.clone())
            }
            _ => Err(AuthError::SessionClosed(self.state.to_string())),
        }
    }

    /// Mark the attempt as failed after the token could not be persisted.
    pub fn fail(&mut self) {
        if !self.state.is_terminal() {
            self.state = AuthState::Failed;
        }
    }

    /// The surface was closed. Only a close before extraction is a failure.
    pub fn on_close(&mut self) -> Result<(), AuthError> {
        match self.state {
            AuthState::Idle | AuthState::AwaitingRedirect => {
                self.state = AuthState::Cancelled;
                Err(AuthError::UserCancelled)
            }
            _ => Ok(()),
        }
    }

    fn redirect_fragment(&self, target: &str) -> Option<String> {
        let expected = self.redirect.as_ref()?;
        let url = Url::parse(target).ok()?;
        if url.host_str() != expected.host_str()
            || url.port_or_known_default() != expected.port_or_known_default()
            || url.path() != expected.path()
        {
            return None;
        }
        url.fragment()
            .filter(|fragment| !fragment.is_empty())
            .map(str::to_string)
    }
}

fn parse_fragment(fragment: &str) -> Result<Token, AuthError> {
    let mut access_token = None;
    let mut expires_in = None;
    for (key, value) in url::form_urlencoded::parse(fragment.as_bytes()) {
        if value.is_empty() {
            continue;
        }
        match key.as_ref() {
            "access_token" if access_token.is_none() => access_token = Some(value.into_owned()),
            "expires_in" if expires_in.is_none() => expires_in = Some(value.into_owned()),
            _ => {}
        }
    }
    let access_token = access_token.ok_or_else(|| {
        AuthError::MalformedRedirect(format!("fragment has no access_token: {fragment}"))
    })?;
    Ok(Token::new(access_token).with_expires_in(expires_in.unwrap_or_default()))
}
