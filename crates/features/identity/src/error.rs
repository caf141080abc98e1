use fdesk_http::ApiError;
use fdesk_storage::StorageError;
use std::borrow::Cow;

/// A specialized [`IdentityError`] enum of this crate.
#[fdesk_derive::fdesk_error]
pub enum IdentityError {
    /// The backend call failed, including `401` for bad credentials.
    #[error("{source}{}", format_context(.context))]
    Api { source: ApiError, context: Option<Cow<'static, str>> },

    /// The token store could not be updated.
    #[error("Token store error{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },

    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal identity error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl IdentityError {
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api { source, .. } if source.is_unauthorized())
    }
}
