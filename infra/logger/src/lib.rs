//! # Logger
//!
//! Installs the process-wide `tracing` subscriber for Fleetdesk binaries.
//!
//! Diagnostics never touch stdout: the console sink writes to **stderr**, so `fleetdesk
//! --json ... | jq` keeps working at any verbosity. An optional rolling file sink records
//! the same events through a non-blocking writer.
//!
//! Level resolution, strongest first:
//! 1. an explicit filter ([`LoggerBuilder::filter`], `[log] filter`),
//! 2. `RUST_LOG`,
//! 3. the base level, raised (never lowered) by `-v` flags.
//!
//! ```rust
//! use fdesk_logger::{LevelFilter, Logger};
//!
//! let _logger = Logger::builder("fleetdesk").level(LevelFilter::DEBUG).init().unwrap();
//! tracing::debug!("ready");
//! ```

mod error;

pub use crate::error::{LoggerError, LoggerErrorExt};
pub use tracing::level_filters::LevelFilter;
pub use tracing_appender::rolling::Rotation;

use fdesk_domain::config::LogConfig;
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// Rotated files kept next to the current one.
const KEEP_LOG_FILES: usize = 7;

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Line format shared by every sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Rolling file output: `{dir}/{app}.{date}.log`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct FileSink {
    dir: PathBuf,
    rotation: Rotation,
    keep: usize,
}

/// Collects sink and level settings; nothing is installed until [`LoggerBuilder::init`].
#[derive(Debug)]
#[must_use = "call `init` to install the subscriber"]
pub struct LoggerBuilder {
    app: String,
    level: LevelFilter,
    filter: Option<String>,
    format: LogFormat,
    stderr: bool,
    file: Option<FileSink>,
}

impl LoggerBuilder {
    fn new(app: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            level: LevelFilter::WARN,
            filter: None,
            format: LogFormat::Compact,
            stderr: true,
            file: None,
        }
    }

    /// Base level when neither a filter nor `RUST_LOG` is given.
    pub const fn level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Per-target directives such as `fdesk_http=debug,reqwest=warn`. Overrides `RUST_LOG`.
    pub fn filter(mut self, directives: impl Into<String>) -> Self {
        self.filter = Some(directives.into());
        self
    }

    pub const fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Turns the stderr sink on or off. It is on by default.
    pub const fn stderr(mut self, enabled: bool) -> Self {
        self.stderr = enabled;
        self
    }

    /// Adds a daily rolling file sink under `dir`, created on [`init`](Self::init).
    pub fn file(mut self, dir: impl Into<PathBuf>) -> Self {
        self.file = Some(FileSink { dir: dir.into(), rotation: Rotation::DAILY, keep: KEEP_LOG_FILES });
        self
    }

    /// Rotation period and retained file count of the file sink. No-op without [`file`](Self::file).
    pub fn rotate(mut self, rotation: Rotation, keep: usize) -> Self {
        if let Some(sink) = self.file.as_mut() {
            sink.rotation = rotation;
            sink.keep = keep;
        }
        self
    }

    /// Installs the global subscriber.
    ///
    /// Keep the returned [`Logger`] alive for the life of the process: dropping it flushes
    /// and stops the file writer.
    ///
    /// # Errors
    /// [`LoggerError::InvalidConfiguration`] for an empty app name, a bad filter, a zero
    /// retention count or no sink at all. [`LoggerError::Directory`] and
    /// [`LoggerError::Appender`] when the file sink cannot be opened.
    /// [`LoggerError::Subscriber`] when logging is already initialized.
    pub fn init(self) -> Result<Logger, LoggerError> {
        self.check()?;
        let filter = self.env_filter()?;

        let mut sinks: Vec<BoxedLayer> = Vec::with_capacity(2);
        if self.stderr {
            let console = fmt::layer().with_writer(std::io::stderr).with_target(false);
            sinks.push(match self.format {
                LogFormat::Json => console.json().boxed(),
                LogFormat::Compact => console.compact().boxed(),
            });
        }

        let guard = match &self.file {
            Some(sink) => {
                let (layer, guard) = self.file_layer(sink)?;
                sinks.push(layer);
                Some(guard)
            },
            None => None,
        };

        tracing_subscriber::registry().with(sinks).with(filter).try_init()?;
        Ok(Logger { guard })
    }

    fn check(&self) -> Result<(), LoggerError> {
        let problem = if self.app.trim().is_empty() {
            Some("application name is empty")
        } else if !self.stderr && self.file.is_none() {
            Some("no sink enabled; turn on stderr or add a log directory")
        } else if self.file.as_ref().is_some_and(|sink| sink.keep == 0) {
            Some("at least one log file must be kept")
        } else {
            None
        };

        problem.map_or(Ok(()), |message| {
            Err(LoggerError::InvalidConfiguration { message: message.into(), context: None })
        })
    }

    fn env_filter(&self) -> Result<EnvFilter, LoggerError> {
        let builder = EnvFilter::builder().with_default_directive(self.level.into());
        let Some(directives) = self.filter.as_deref() else {
            return Ok(builder.from_env_lossy());
        };
        builder.parse(directives).map_err(|e| LoggerError::InvalidConfiguration {
            message: format!("bad filter '{directives}': {e}").into(),
            context: None,
        })
    }

    fn file_layer(&self, sink: &FileSink) -> Result<(BoxedLayer, WorkerGuard), LoggerError> {
        fs::create_dir_all(&sink.dir).context(sink.dir.display().to_string())?;

        let appender = RollingFileAppender::builder()
            .rotation(sink.rotation.clone())
            .filename_prefix(&self.app)
            .filename_suffix("log")
            .max_log_files(sink.keep)
            .build(&sink.dir)
            .context(sink.dir.display().to_string())?;
        let (writer, guard) = tracing_appender::non_blocking(appender);

        let layer = fmt::layer().with_writer(writer).with_ansi(false);
        let layer = match self.format {
            LogFormat::Json => layer.json().boxed(),
            LogFormat::Compact => layer.boxed(),
        };
        Ok((layer, guard))
    }
}

/// Live logging handle. Owns the file writer, if any.
#[derive(Debug)]
#[must_use = "dropping the handle stops the file writer"]
pub struct Logger {
    guard: Option<WorkerGuard>,
}

impl Logger {
    /// Starts configuring logging for `app`, which also prefixes log file names.
    pub fn builder(app: impl Into<String>) -> LoggerBuilder {
        LoggerBuilder::new(app)
    }

    /// Installs logging from the `[log]` section plus the `-v` count of the command line.
    ///
    /// Each `-v` can only raise the configured level.
    ///
    /// # Errors
    /// An unparsable `level`, plus everything [`LoggerBuilder::init`] rejects.
    pub fn from_config(app: &str, config: &LogConfig, verbosity: u8) -> Result<Self, LoggerError> {
        let level = parse_level(&config.level)?.max(level_for_verbosity(verbosity));
        let format = if config.json { LogFormat::Json } else { LogFormat::Compact };

        let mut builder = Self::builder(app).level(level).format(format);
        if let Some(directives) = config.filter.as_deref().map(str::trim).filter(|f| !f.is_empty()) {
            builder = builder.filter(directives);
        }
        if let Some(dir) = &config.directory {
            builder = builder.file(dir);
        }
        builder.init()
    }

    /// Whether a file sink is running behind this handle.
    #[must_use]
    pub const fn writes_file(&self) -> bool {
        self.guard.is_some()
    }
}

/// Reads a level name such as `warn` or `OFF`.
///
/// # Errors
/// [`LoggerError::InvalidConfiguration`] for anything `tracing` does not know.
pub fn parse_level(level: &str) -> Result<LevelFilter, LoggerError> {
    level.trim().parse::<LevelFilter>().map_err(|e| LoggerError::InvalidConfiguration {
        message: format!("unknown level '{level}': {e}").into(),
        context: None,
    })
}

/// `-v` count to level: none adds nothing, then info, debug and trace.
#[must_use]
pub const fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::OFF,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_builder_defaults_to_warn_on_stderr() {
        let builder = Logger::builder("fleetdesk");
        assert_eq!(builder.level, LevelFilter::WARN);
        assert_eq!(builder.format, LogFormat::Compact);
        assert!(builder.stderr);
        assert!(builder.file.is_none());
    }

    #[test]
    fn test_rotate_applies_only_to_an_existing_file_sink() {
        let builder = Logger::builder("fleetdesk").rotate(Rotation::HOURLY, 3);
        assert!(builder.file.is_none());

        let builder = Logger::builder("fleetdesk").file("logs").rotate(Rotation::HOURLY, 3);
        let sink = builder.file.unwrap();
        assert_eq!((sink.rotation, sink.keep), (Rotation::HOURLY, 3));
    }

    #[test]
    fn test_verbosity_only_raises_level() {
        assert_eq!(level_for_verbosity(0), LevelFilter::OFF);
        assert_eq!(level_for_verbosity(2), LevelFilter::DEBUG);
        assert_eq!(level_for_verbosity(9), LevelFilter::TRACE);
        assert_eq!(LevelFilter::WARN.max(level_for_verbosity(0)), LevelFilter::WARN);
        assert_eq!(LevelFilter::WARN.max(level_for_verbosity(1)), LevelFilter::INFO);
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("Debug").unwrap(), LevelFilter::DEBUG);
        assert_eq!(parse_level(" off ").unwrap(), LevelFilter::OFF);
        assert!(matches!(parse_level("loud"), Err(LoggerError::InvalidConfiguration { .. })));
    }

    #[test]
    #[serial]
    fn test_bad_settings_fail_before_install() {
        let rejected = [
            Logger::builder("fleetdesk").filter("fdesk=loud"),
            Logger::builder("fleetdesk").stderr(false),
            Logger::builder("  "),
            Logger::builder("fleetdesk").file("logs").rotate(Rotation::DAILY, 0),
        ];
        for builder in rejected {
            let err = builder.init().unwrap_err();
            assert!(matches!(err, LoggerError::InvalidConfiguration { .. }), "{err}");
        }
    }
}
