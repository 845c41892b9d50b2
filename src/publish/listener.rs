use crate::error::Action;

/// Receives the outcome of an authorize or publish call.
///
/// `payload` is the access token for [`Action::Authorize`] and the raw
/// response body for [`Action::Publish`].
pub trait PublishListener: Send + Sync {
    fn on_success(&self, action: Action, payload: &str);
    fn on_failure(&self, action: Action, message: &str);
}
