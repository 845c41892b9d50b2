/// Bearer token captured from an implicit-grant redirect.
///
/// `expires_in` is kept verbatim from the redirect fragment; an empty string
/// means the provider did not report an expiry. It is informational only:
/// a token is used until the API rejects it.
///
/// # Example
/// ```
/// use graphpub::auth::Token;
///
/// let token = Token::new("EAAB...").with_expires_in("0");
/// assert_eq!(token.access_token, "EAAB...");
/// assert!(!token.expires_in.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    pub expires_in: String,
}

impl Token {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_in: String::new(),
        }
    }

    pub fn with_expires_in(mut self, expires_in: impl Into<String>) -> Self {
        self.expires_in = expires_in.into();
        self
    }

    /// `true` when the provider reported no expiry, or an expiry of zero.
    pub fn never_expires(&self) -> bool {
        matches!(self.expires_in.trim(), "" | "0")
    }
}
