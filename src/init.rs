use crate::env::{
    env_flag, env_or, EVENTS_ENABLE_ARGS_ENV, EVENTS_FORCE_TEXT_ENV, EVENTS_PREFIX_ENV,
    EVENTS_TIME_FORMAT_ENV,
};
use crate::handler::Handler;
use crate::layer::EventLayer;
use crate::logger::Logger;
use crate::terminal::{is_terminal, STDOUT_FD};
use crate::text::TextHandler;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

static DEFAULT_HANDLER: OnceLock<Arc<dyn Handler>> = OnceLock::new();

/// Configuration of the handler selected at startup.
///
/// **Fields**
/// - `prefix`: text prepended to every line of the text handler.
/// - `enable_args`: render event args below the message line.
/// - `time_format`: strftime layout for the text handler; `None` or an
///   empty layout leaves the timestamp out.
/// - `force_text`: use the text handler even when stdout is not a
///   terminal.
#[derive(Clone, Debug, Default)]
pub struct InitConfig {
    pub prefix: String,
    pub enable_args: bool,
    pub time_format: Option<String>,
    pub force_text: bool,
}

impl InitConfig {
    /// Build a config from the `EVENTS_*` variables in [`crate::env`].
    pub fn from_env() -> Self {
        InitConfig {
            prefix: env_or(EVENTS_PREFIX_ENV, ""),
            enable_args: env_flag(EVENTS_ENABLE_ARGS_ENV),
            time_format: std::env::var(EVENTS_TIME_FORMAT_ENV).ok(),
            force_text: env_flag(EVENTS_FORCE_TEXT_ENV),
        }
    }

    /// Text handler configured from this config, writing to `output`.
    pub fn text_handler<W: Write + Send>(&self, output: W) -> TextHandler<W> {
        TextHandler::new(self.prefix.clone(), output)
            .with_args(self.enable_args)
            .with_time_format(self.time_format.clone().unwrap_or_default())
    }
}

/// Which handler [`select_default_handler`] installs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultKind {
    /// [`TextHandler`] on stderr.
    Text,
    /// [`EcsHandler`](crate::ecs::EcsHandler) on stdout.
    Ecs,
}

impl DefaultKind {
    /// Decide from the config and whether stdout is a terminal.
    pub fn select(config: &InitConfig, stdout_is_terminal: bool) -> Self {
        if cfg!(feature = "ecs") && !config.force_text && !stdout_is_terminal {
            DefaultKind::Ecs
        } else {
            DefaultKind::Text
        }
    }
}

/// Build the handler a process should use by default.
///
/// When stdout is not a terminal, events go to stdout as JSON lines
/// tagged with the program name and pid. Otherwise they are rendered as
/// text on stderr.
pub fn select_default_handler(config: &InitConfig) -> Arc<dyn Handler> {
    match DefaultKind::select(config, is_terminal(STDOUT_FD)) {
        #[cfg(feature = "ecs")]
        DefaultKind::Ecs => Arc::new(crate::ecs::EcsHandler::new(
            io::stdout(),
            program_name(),
            std::process::id(),
        )),
        _ => Arc::new(config.text_handler(io::stderr())),
    }
}

/// Base name of the running executable, as invoked.
pub fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Install `handler` as the process-wide default. Succeeds only once.
pub fn install_default(handler: Arc<dyn Handler>) -> Result<(), InitError> {
    DEFAULT_HANDLER
        .set(handler)
        .map_err(|_| InitError::DefaultAlreadyInstalled)
}

/// The installed default handler, selecting one from the environment on
/// first use if nothing was installed.
pub fn default_handler() -> Arc<dyn Handler> {
    DEFAULT_HANDLER
        .get_or_init(|| select_default_handler(&InitConfig::from_env()))
        .clone()
}

/// A [`Logger`] over [`default_handler`].
pub fn default_logger() -> Logger {
    Logger::new(default_handler())
}

/// Install a global `tracing` subscriber that forwards every event to
/// `handler` through [`EventLayer`].
pub fn init_tracing(handler: Arc<dyn Handler>) -> Result<(), InitError> {
    let subscriber = Registry::default().with(EventLayer::new(handler));
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Select, install and bridge the default handler in one call.
///
/// Meant for the top of `main`; libraries should take a [`Logger`] or a
/// handler instead of calling this.
pub fn init_with_config(config: &InitConfig) -> Result<Logger, InitError> {
    let handler = select_default_handler(config);
    install_default(Arc::clone(&handler))?;
    init_tracing(Arc::clone(&handler))?;
    Ok(Logger::new(handler))
}

/// Equivalent to [`init_with_config`] with [`InitConfig::from_env`].
pub fn init() -> Result<Logger, InitError> {
    init_with_config(&InitConfig::from_env())
}

/// Error type returned by the startup wiring.
#[derive(thiserror::Error, Debug)]
pub enum InitError {
    #[error("a default handler has already been installed")]
    DefaultAlreadyInstalled,

    #[error("failed to set global tracing subscriber: {0}")]
    Subscriber(#[from] tracing::subscriber::SetGlobalDefaultError),
}
