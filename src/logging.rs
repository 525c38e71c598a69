//! Tracing subscriber setup from logging settings.

use crate::config::LoggingSettings;
use crate::error::ConfigError;
use tracing_subscriber::EnvFilter;

/// Filter directives: `RUST_LOG` wins, then `LOG_LEVEL`, then `info` if the level does not parse.
/// Verbose mode also turns on debug output from the HTTP stack.
pub fn env_filter(settings: &LoggingSettings, verbose: bool) -> EnvFilter {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if !verbose {
        return filter;
    }
    match "tower_http=debug".parse() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Install the global subscriber. JSON lines when `LOG_FORMAT=json`, human-readable otherwise.
/// Logs go to stderr; stdout is reserved for command output such as `migrate status`.
pub fn init(settings: &LoggingSettings, verbose: bool) -> Result<(), ConfigError> {
    let builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(env_filter(settings, verbose))
        .with_target(verbose);

    let res = if settings.is_json() {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    res.map_err(|e| ConfigError::Logging(e.to_string()))
}
