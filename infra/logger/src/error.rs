use std::borrow::Cow;

#[fdesk_derive::fdesk_error]
pub enum LoggerError {
    /// The log directory could not be created.
    #[error("Cannot prepare log directory{}: {source}", format_context(.context))]
    Directory { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Cannot open rolling log file{}: {source}", format_context(.context))]
    Appender { source: tracing_appender::rolling::InitError, context: Option<Cow<'static, str>> },

    /// Another subscriber already owns this process.
    #[error("Logging already initialized{}: {source}", format_context(.context))]
    Subscriber {
        source: tracing_subscriber::util::TryInitError,
        context: Option<Cow<'static, str>>,
    },

    /// Bad level, filter or file settings.
    #[error("Invalid log settings{}: {message}", format_context(.context))]
    InvalidConfiguration { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
