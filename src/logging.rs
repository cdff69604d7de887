use std::path::Path;
use tracing::{info, Level};
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::error::{Result, Vid2CaptionsError};

pub const LOG_FILE_NAME: &str = "vid2captions.log";

/// Console level for the given verbosity
pub fn log_level(verbose: bool) -> Level {
    if verbose { Level::INFO } else { Level::WARN }
}

/// Setup logging to stderr and, when `log_dir` is given, to a daily-rotated file
pub fn setup_logging(verbose: bool, log_dir: Option<&Path>) -> Result<()> {
    let level = log_level(verbose);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let file_layer = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let (writer, guard) = non_blocking(rolling::daily(dir, LOG_FILE_NAME));
            // Flushes on drop; the subscriber lives for the whole process
            std::mem::forget(guard);

            Some(
                fmt::layer()
                    .with_writer(writer)
                    .with_target(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_ansi(false)
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(level.into()))
        .with(console_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| Vid2CaptionsError::Config(format!("Failed to initialize logging: {}", e)))?;

    match log_dir {
        Some(dir) => info!("Logging initialized - console: {}, file: {}", level, dir.join(LOG_FILE_NAME).display()),
        None => info!("Logging initialized - console: {}", level),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(true), Level::INFO);
        assert_eq!(log_level(false), Level::WARN);
    }
}
