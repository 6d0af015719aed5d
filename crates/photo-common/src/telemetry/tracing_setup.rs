//! Tracing and logging setup
//!
//! One subscriber for the whole process: an `EnvFilter` (honouring
//! `RUST_LOG`) plus a pretty or JSON fmt layer.

use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::AppSettings;

/// Directive used when nothing more specific is asked for
const DEFAULT_FILTER: &str = "info";

/// Debug output for the workspace crates, info for dependencies
const DEVELOPMENT_FILTER: &str =
    "info,photo_app=debug,photo_service=debug,photo_store=debug,photo_images=debug";

/// Logging options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Filter directive applied when `RUST_LOG` is unset
    pub filter: String,
    /// Emit one JSON object per event
    pub json: bool,
    /// Log span open and close (engine call timings)
    pub span_events: bool,
    /// Include file and line numbers
    pub file_line: bool,
    pub thread_names: bool,
    pub thread_ids: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            json: false,
            span_events: false,
            file_line: true,
            thread_names: false,
            thread_ids: false,
        }
    }
}

impl TracingConfig {
    /// Verbose, human-readable output for local runs
    #[must_use]
    pub fn development() -> Self {
        Self {
            filter: DEVELOPMENT_FILTER.to_string(),
            span_events: true,
            thread_names: true,
            ..Self::default()
        }
    }

    /// JSON output for log collectors
    #[must_use]
    pub fn production() -> Self {
        Self {
            json: true,
            file_line: false,
            ..Self::default()
        }
    }

    /// Pick a preset from the application settings
    #[must_use]
    pub fn from_settings(settings: &AppSettings) -> Self {
        if settings.log_json {
            Self::production()
        } else if settings.env.is_development() {
            Self::development()
        } else {
            Self::default()
        }
    }

    fn span_events(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        }
    }
}

/// Env filter plus either a JSON or a pretty fmt layer
fn build_subscriber(config: &TracingConfig) -> impl tracing::Subscriber + Send + Sync + 'static {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let json_layer = config.json.then(|| {
        fmt::layer()
            .json()
            .with_file(config.file_line)
            .with_line_number(config.file_line)
            .with_thread_names(config.thread_names)
            .with_thread_ids(config.thread_ids)
            .with_span_events(config.span_events())
    });

    let pretty_layer = (!config.json).then(|| {
        fmt::layer()
            .with_file(config.file_line)
            .with_line_number(config.file_line)
            .with_thread_names(config.thread_names)
            .with_thread_ids(config.thread_ids)
            .with_span_events(config.span_events())
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(pretty_layer)
}

/// Initialize the subscriber with the default options
///
/// # Panics
/// Panics if a global subscriber is already set.
pub fn init_tracing() {
    init_tracing_with_config(TracingConfig::default());
}

/// Initialize the subscriber with `config`
///
/// # Panics
/// Panics if a global subscriber is already set.
pub fn init_tracing_with_config(config: TracingConfig) {
    build_subscriber(&config).init();
}

/// Like [`init_tracing`], but reports a second initialization instead of panicking
pub fn try_init_tracing() -> Result<(), TracingError> {
    try_init_tracing_with_config(TracingConfig::default())
}

/// Like [`init_tracing_with_config`], but reports a second initialization instead of panicking
pub fn try_init_tracing_with_config(config: TracingConfig) -> Result<(), TracingError> {
    build_subscriber(&config)
        .try_init()
        .map_err(|_| TracingError::AlreadyInitialized)
}

/// Tracing initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}
