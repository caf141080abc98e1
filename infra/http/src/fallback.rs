use std::fmt::Display;
use tracing::warn;

/// Awaits `call` and returns `fallback` if it fails.
///
/// The failure is logged as a warning and otherwise swallowed, so one broken fetch
/// cannot take down a screen that combines several of them.
pub async fn with_fallback<T, E, F>(label: &str, call: F, fallback: T) -> T
where
    F: Future<Output = Result<T, E>>,
    E: Display,
{
    match call.await {
        Ok(value) => value,
        Err(err) => {
            warn!(call = label, error = %err, "Falling back after failed call");
            fallback
        },
    }
}

/// [`with_fallback`] with `T::default()` as the fallback.
pub async fn with_default<T, E, F>(label: &str, call: F) -> T
where
    F: Future<Output = Result<T, E>>,
    E: Display,
    T: Default,
{
    with_fallback(label, call, T::default()).await
}
