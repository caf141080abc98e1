//! # REST client
//!
//! One shared, cheaply cloneable [`ApiClient`] for the Fleetdesk backend.
//!
//! * **Auth**: every request carries `Authorization: Bearer <token>` when the configured
//!   [`TokenSource`] yields one, except calls to `/auth/login` and `/auth/register` and
//!   absolute URLs on another origin than the API root.
//! * **Errors**: failures are logged with `tracing::error!` and returned as [`ApiError`].
//!   A `401` becomes [`ApiError::Unauthorized`] and nothing else happens: no redirect,
//!   no token removal, no retry.
//! * **Lists**: collection endpoints may answer with a paginated envelope. [`ApiClient::list`]
//!   returns its `results`, or the body itself when there is no envelope.
//!   [`ApiClient::list_all`] follows `next` links and returns every page.
//! * **Resources**: [`Resource`] wraps the usual CRUD verbs for one collection path.
//!
//! ```rust,no_run
//! use fdesk_domain::Vehicle;
//! use fdesk_http::{ApiClient, ListQuery, StaticToken};
//!
//! # async fn run() -> Result<(), fdesk_http::ApiError> {
//! let client = ApiClient::builder()
//!     .base_url("https://fleet.example.com/api/v1")
//!     .token_source(StaticToken::new("secret"))
//!     .build()?;
//!
//! let query = ListQuery::builder().search("corolla").build();
//! let vehicles: Vec<Vehicle> = client.list("/vehicles/", &query).await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod fallback;
mod query;
mod resource;
#[cfg(feature = "testing")]
pub mod testing;
mod token;

pub use crate::client::{ApiClient, ApiClientBuilder, ApiClientInner, MAX_PAGES, requires_auth, unwrap_results};
pub use crate::error::{ApiError, ApiErrorExt};
pub use crate::fallback::{with_default, with_fallback};
pub use crate::query::ListQuery;
pub use crate::resource::Resource;
pub use crate::token::{NoToken, StaticToken, TokenSource};
pub use reqwest::Method;
