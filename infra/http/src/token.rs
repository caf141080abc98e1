use std::fmt::Debug;

/// Supplies the bearer token attached to authenticated requests.
///
/// Looked up on every request, so a login performed through one clone of the client is
/// picked up by all others.
pub trait TokenSource: Debug + Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

/// Never authenticates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoToken;

impl TokenSource for NoToken {
    fn bearer_token(&self) -> Option<String> {
        None
    }
}

/// A fixed token, e.g. from a CI secret.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl Debug for StaticToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("StaticToken").field(&"<redacted>").finish()
    }
}

impl TokenSource for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        (!self.0.is_empty()).then(|| self.0.clone())
    }
}

impl<T: TokenSource + ?Sized> TokenSource for std::sync::Arc<T> {
    fn bearer_token(&self) -> Option<String> {
        (**self).bearer_token()
    }
}
