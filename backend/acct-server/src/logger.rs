use crate::error::{Result as ServerErrorResult, ServerError};

use acct_config::LogLevel;

use std::fmt::Display;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::time::SystemTime;

use fern::colors::{Color, ColoredLevelConfig};
use fern::{Dispatch, FormatCallback};
use log::{LevelFilter, Record, info};

/// Crates whose chatter is capped regardless of the configured level
const QUIET_TARGETS: [&str; 4] = ["sqlx", "hyper", "reqwest", "lettre"];

/// Install the global fern logger.
///
/// With `log_file` set, lines are appended to that file uncolored; otherwise
/// they go to stdout, colored when `colored` is true.
pub fn initialize(
    log_level: LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let level_filter = LevelFilter::from(log_level);

    let mut root = Dispatch::new().level(level_filter);
    for target in QUIET_TARGETS {
        root = root.level_for(target, LevelFilter::Warn.min(level_filter));
    }

    let output = match log_file {
        Some(ref path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| ServerError::Logger {
                    message: format!("Failed to open log file {}: {}", path.display(), e),
                })?;
            Dispatch::new()
                .format(|out, message, record| write_line(out, message, record, record.level()))
                .chain(file)
        }
        None if colored => {
            let colors = ColoredLevelConfig::new()
                .trace(Color::Magenta)
                .debug(Color::Blue)
                .info(Color::Green)
                .warn(Color::Yellow)
                .error(Color::Red);
            Dispatch::new()
                .format(move |out, message, record| {
                    write_line(out, message, record, colors.color(record.level()))
                })
                .chain(std::io::stdout())
        }
        None => Dispatch::new()
            .format(|out, message, record| write_line(out, message, record, record.level()))
            .chain(std::io::stdout()),
    };

    root.chain(output).apply().map_err(|e| ServerError::Logger {
        message: format!("Failed to initialize logger: {e}"),
    })?;

    match log_file {
        Some(path) => info!("Logging at {:?} to {}", level_filter, path.display()),
        None => info!("Logging at {:?} to stdout", level_filter),
    }

    // Route `tracing` events from dependencies into `log`
    tracing_log::LogTracer::init().ok();

    Ok(())
}

fn write_line(
    out: FormatCallback,
    message: &std::fmt::Arguments,
    record: &Record,
    level: impl Display,
) {
    out.finish(format_args!(
        "[{} - {}] {} [{}:{}]",
        humantime::format_rfc3339(SystemTime::now()),
        level,
        message,
        record.file().unwrap_or("unknown"),
        record.line().unwrap_or(0),
    ))
}
