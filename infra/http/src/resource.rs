use crate::client::ApiClient;
use crate::error::ApiError;
use crate::query::ListQuery;
use fdesk_domain::{Id, Page};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

/// CRUD verbs over one collection endpoint, e.g. `/vehicles/`.
///
/// Item paths follow the backend router: `{collection}{id}/` and
/// `{collection}{id}/{action}/`.
pub struct Resource<T> {
    client: ApiClient,
    path: Cow<'static, str>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Resource<T> {
    fn clone(&self) -> Self {
        Self { client: self.client.clone(), path: self.path.clone(), _marker: PhantomData }
    }
}

impl<T> fmt::Debug for Resource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resource")
            .field("path", &self.path)
            .field("item", &std::any::type_name::<T>())
            .finish()
    }
}

impl<T: DeserializeOwned> Resource<T> {
    pub fn new(client: ApiClient, path: impl Into<Cow<'static, str>>) -> Self {
        Self { client, path: path.into(), _marker: PhantomData }
    }

    #[must_use]
    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[must_use]
    pub fn item_path(&self, id: Id) -> String {
        format!("{}/{id}/", self.path.trim_end_matches('/'))
    }

    #[must_use]
    pub fn action_path(&self, id: Id, action: &str) -> String {
        format!("{}{}/", self.item_path(id), action.trim_matches('/'))
    }

    pub async fn list(&self, query: &ListQuery) -> Result<Vec<T>, ApiError> {
        self.client.list(&self.path, query).await
    }

    /// Every item of the collection, across all pages.
    pub async fn list_all(&self, query: &ListQuery) -> Result<Vec<T>, ApiError> {
        self.client.list_all(&self.path, query).await
    }

    pub async fn page(&self, query: &ListQuery) -> Result<Page<T>, ApiError> {
        self.client.page(&self.path, query).await
    }

    pub async fn fetch(&self, id: Id) -> Result<T, ApiError> {
        self.client.get(&self.item_path(id)).await
    }

    pub async fn create<B: Serialize + ?Sized>(&self, body: &B) -> Result<T, ApiError> {
        self.client.post(&self.path, body).await
    }

    /// Full replacement (`PUT`).
    pub async fn update<B: Serialize + ?Sized>(&self, id: Id, body: &B) -> Result<T, ApiError> {
        self.client.put(&self.item_path(id), body).await
    }

    /// Partial update (`PATCH`).
    pub async fn patch<B: Serialize + ?Sized>(&self, id: Id, body: &B) -> Result<T, ApiError> {
        self.client.patch(&self.item_path(id), body).await
    }

    pub async fn delete(&self, id: Id) -> Result<(), ApiError> {
        self.client.delete(&self.item_path(id)).await
    }
}
