use fdesk_http::ApiError;
use fdesk_kernel::config::ConfigError;
use fdesk_storage::StorageError;
use std::borrow::Cow;

/// Errors raised while opening a session.
#[fdesk_derive::fdesk_error]
pub enum FleetdeskError {
    #[error("Configuration error{}: {source}", format_context(.context))]
    Config { source: ConfigError, context: Option<Cow<'static, str>> },

    #[error("Session store error{}: {source}", format_context(.context))]
    Storage { source: StorageError, context: Option<Cow<'static, str>> },

    #[error("API client error{}: {source}", format_context(.context))]
    Api { source: ApiError, context: Option<Cow<'static, str>> },
}
