use config::{Config, Environment, File, Map};
use fdesk_domain::config::ClientConfig;
use serde::de::DeserializeOwned;
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, info};

/// Prefix of environment overrides, e.g. `FLEET__API__BASE_URL`.
pub const ENV_PREFIX: &str = "FLEET";
/// Separator between nesting levels in environment keys.
pub const ENV_SEPARATOR: &str = "__";

/// Custom error type for config loading.
#[fdesk_derive::fdesk_error]
pub enum ConfigError {
    #[error("Config error{}: {source}", format_context(.context))]
    Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
}

/// A reusable configuration loader that combines file-based settings with environment overrides.
///
/// Layers, lowest priority first:
/// 1. **Defaults**: whatever `T` falls back to through `#[serde(default)]`.
/// 2. **File**: `path` when given. The format follows the extension (`.toml`, `.yaml`,
///    `.json`, ...). A path that does not exist is an error; `None` skips the layer.
/// 3. **Environment**: variables prefixed with `FLEET__`. Nested keys use double
///    underscores, so `FLEET__API__BASE_URL` maps to `api.base_url`.
///
/// # Errors
/// Returns [`ConfigError::Config`] if the file is missing or malformed, or if the merged
/// values do not fit `T`.
///
/// # Example
/// ```rust
/// use fdesk_kernel::config::load_config;
///
/// #[derive(Default, serde::Deserialize)]
/// struct AppConfig {
///     port: u16,
/// }
///
/// let cfg: AppConfig = load_config(Some("config/local.toml")).unwrap_or_default();
/// ```
pub fn load_config<T>(path: Option<impl AsRef<Path>>) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    build(path.as_ref().map(AsRef::as_ref), environment(None))
}

/// Same as [`load_config`], but reads overrides from `vars` instead of the process
/// environment. Keys still carry the `FLEET__` prefix.
pub fn load_config_with_env<T>(
    path: Option<impl AsRef<Path>>,
    vars: Map<String, String>,
) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    build(path.as_ref().map(AsRef::as_ref), environment(Some(vars)))
}

/// Loads the [`ClientConfig`] used by the SDK and the terminal front end.
pub fn load_client_config(path: Option<impl AsRef<Path>>) -> Result<ClientConfig, ConfigError> {
    load_config(path)
}

fn environment(vars: Option<Map<String, String>>) -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator(ENV_SEPARATOR)
        .convert_case(config::Case::Snake)
        .try_parsing(true)
        .source(vars)
}

fn build<T>(path: Option<&Path>, env: Environment) -> Result<T, ConfigError>
where
    T: DeserializeOwned,
{
    let mut builder = Config::builder();

    if let Some(path) = path {
        info!("Loading config from {}", path.display());
        builder = builder.add_source(File::from(path).required(true));
    } else {
        debug!("No config file given, using defaults and environment");
    }

    let config = builder
        .add_source(env)
        .build()
        .context("Failed to build config")?
        .try_deserialize::<T>()
        .context("Failed to deserialize config")?;

    Ok(config)
}
