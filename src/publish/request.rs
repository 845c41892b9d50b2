use bon::Builder;

/// A post to publish. Every field is optional; empty strings are skipped.
///
/// # Example
/// ```
/// use graphpub::publish::PublishRequest;
///
/// let request = PublishRequest::builder()
///     .message("Testing something, ignore")
///     .link("http://google.com")
///     .build();
/// assert!(!request.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
pub struct PublishRequest {
    #[builder(into)]
    pub message: Option<String>,
    #[builder(into)]
    pub link: Option<String>,
    #[builder(into)]
    pub picture: Option<String>,
}

impl PublishRequest {
    /// `true` when no field carries content.
    pub fn is_empty(&self) -> bool {
        [&self.message, &self.link, &self.picture]
            .iter()
            .all(|field| field.as_deref().map_or(true, str::is_empty))
    }

    /// Form body for the publish endpoint: the token plus non-empty fields.
    pub fn form_fields<'a>(&'a self, access_token: &'a str) -> Vec<(&'static str, &'a str)> {
        let mut fields = vec![("access_token", access_token)];
        let optional = [
            ("message", &self.message),
            ("link", &self.link),
            ("picture", &self.picture),
        ];
        for (name, value) in optional {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                fields.push((name, value));
            }
        }
        fields
    }
}
