use fdesk_domain::constants::TOKEN_KEYS;
use fdesk_http::TokenSource;
use fdesk_storage::LocalStore;

/// Bearer token read from the persistent [`LocalStore`].
///
/// Checks `access_token`, `token` and `auth_token` in that order and uses the first
/// non-empty value, so stores written by older front ends keep working.
#[derive(Debug, Clone)]
pub struct StoredToken {
    store: LocalStore,
}

impl StoredToken {
    #[must_use]
    pub const fn new(store: LocalStore) -> Self {
        Self { store }
    }

    #[must_use]
    pub const fn store(&self) -> &LocalStore {
        &self.store
    }
}

impl TokenSource for StoredToken {
    fn bearer_token(&self) -> Option<String> {
        self.store.first_of(&TOKEN_KEYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_order() {
        let store = LocalStore::in_memory();
        let token = StoredToken::new(store.clone());
        assert_eq!(token.bearer_token(), None);

        store.set("auth_token", "legacy").await.unwrap();
        assert_eq!(token.bearer_token().as_deref(), Some("legacy"));

        store.set("token", "older").await.unwrap();
        assert_eq!(token.bearer_token().as_deref(), Some("older"));

        store.set("access_token", "current").await.unwrap();
        assert_eq!(token.bearer_token().as_deref(), Some("current"));
    }
}
