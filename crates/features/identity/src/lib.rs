//! Identity feature slice.
//!
//! Logs in against `/auth/login/`, keeps the issued tokens in the [`LocalStore`] and
//! administers users under `/users/`. The [`StoredToken`] source reads the same store, so
//! a client built with it picks up a login immediately.

mod error;
mod token;

pub use crate::error::{IdentityError, IdentityErrorExt};
pub use crate::token::StoredToken;

use fdesk_domain::constants::{REFRESH_TOKEN_KEY, TOKEN_KEYS, endpoints};
use fdesk_domain::{Credentials, Id, RegisterPayload, TokenPair, User, UserPatch, UserPayload};
use fdesk_http::{ApiClient, ApiError, ListQuery, Resource};
use fdesk_storage::LocalStore;
use tracing::info;

/// Identity feature state.
#[derive(Debug, Clone)]
pub struct Identity {
    client: ApiClient,
    store: LocalStore,
    users: Resource<User>,
}

impl Identity {
    #[must_use]
    pub fn new(client: ApiClient, store: LocalStore) -> Self {
        Self { users: Resource::new(client.clone(), endpoints::USERS), client, store }
    }

    /// Exchanges credentials for tokens and stores them.
    ///
    /// The access token goes under `access_token`, the refresh token (if any) under
    /// `refresh_token`. Nothing is stored when the backend rejects the credentials.
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenPair, IdentityError> {
        let tokens: TokenPair = self
            .client
            .post(endpoints::LOGIN, credentials)
            .await
            .context(format!("Login as '{}'", credentials.username))?;

        if tokens.access.is_empty() {
            return Err("Login response carried no access token".into());
        }

        self.store.set(TOKEN_KEYS[0], tokens.access.as_str()).await?;
        match tokens.refresh.as_deref().filter(|r| !r.is_empty()) {
            Some(refresh) => self.store.set(REFRESH_TOKEN_KEY, refresh).await?,
            None => {
                self.store.remove(REFRESH_TOKEN_KEY).await?;
            },
        }

        info!(username = %credentials.username, "Logged in");
        Ok(tokens)
    }

    pub async fn register(&self, payload: &RegisterPayload) -> Result<User, ApiError> {
        let user: User = self.client.post(endpoints::REGISTER, payload).await?;
        info!(id = user.id, username = %user.username, "Account registered");
        Ok(user)
    }

    /// Forgets every stored token. Returns whether anything was stored.
    pub async fn logout(&self) -> Result<bool, IdentityError> {
        let mut keys = TOKEN_KEYS.to_vec();
        keys.push(REFRESH_TOKEN_KEY);
        let removed = self.store.remove_all(&keys).await?;
        info!(removed, "Logged out");
        Ok(removed > 0)
    }

    /// Whether a token is stored. Says nothing about whether the backend still accepts it.
    #[must_use]
    pub fn has_token(&self) -> bool {
        self.store.first_of(&TOKEN_KEYS).is_some()
    }

    pub async fn current_user(&self) -> Result<User, ApiError> {
        self.client.get(endpoints::CURRENT_USER).await
    }

    // --- User administration ---

    pub async fn list_users(&self, query: &ListQuery) -> Result<Vec<User>, ApiError> {
        self.users.list(query).await
    }

    pub async fn fetch_user(&self, id: Id) -> Result<User, ApiError> {
        self.users.fetch(id).await
    }

    pub async fn create_user(&self, payload: &UserPayload) -> Result<User, ApiError> {
        let user = self.users.create(payload).await?;
        info!(id = user.id, username = %user.username, role = %user.role, "User created");
        Ok(user)
    }

    pub async fn update_user(&self, id: Id, patch: &UserPatch) -> Result<User, ApiError> {
        self.users.patch(id, patch).await
    }

    pub async fn set_user_active(&self, id: Id, active: bool) -> Result<User, ApiError> {
        let patch = UserPatch { is_active: Some(active), ..UserPatch::default() };
        let user = self.users.patch(id, &patch).await?;
        info!(id, active, "User activation changed");
        Ok(user)
    }

    pub async fn delete_user(&self, id: Id) -> Result<(), ApiError> {
        self.users.delete(id).await
    }
}
