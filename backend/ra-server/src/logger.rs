use crate::error::{Result as ServerErrorResult, ServerError};

use std::path::PathBuf;
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::{Color, ColoredLevelConfig};
use log::info;

macro_rules! finish_line {
    ($out:expr, $message:expr, $record:expr, $level:expr) => {
        $out.finish(format_args!(
            "[{date} - {level}] {message} [{file}:{line}]",
            date = humantime::format_rfc3339(SystemTime::now()),
            level = $level,
            message = $message,
            file = $record.file().unwrap_or("unknown"),
            line = $record.line().unwrap_or(0),
        ))
    };
}

/// Initialize the global logger.
///
/// * `log_file` - None logs to stdout, Some appends to that file
/// * `colored` - colored levels on stdout; ignored for file output
pub fn initialize(
    log_level: ra_config::LogLevel,
    log_file: Option<PathBuf>,
    colored: bool,
) -> ServerErrorResult<()> {
    let level_filter = log_level.0;

    let output = match log_file {
        Some(ref log_path) => {
            let file = fern::log_file(log_path).map_err(|e| ServerError::LogFile {
                path: log_path.display().to_string(),
                source: e,
            })?;

            Dispatch::new()
                .format(|out, message, record| {
                    finish_line!(out, message, record, record.level())
                })
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
                    finish_line!(out, message, record, colors.color(record.level()))
                })
                .chain(std::io::stdout())
        }
        // Plain output for non-TTY (systemd, docker logs)
        None => Dispatch::new()
            .format(|out, message, record| finish_line!(out, message, record, record.level()))
            .chain(std::io::stdout()),
    };

    Dispatch::new()
        .level(level_filter)
        .chain(output)
        .apply()
        .map_err(|e| ServerError::Logger {
            message: e.to_string(),
        })?;

    match log_file {
        Some(ref path) => info!(
            "Logger initialized: level={:?}, file={}",
            level_filter,
            path.display()
        ),
        None => info!("Logger initialized: level={:?}, stdout", level_filter),
    }

    // Bridge tracing (axum, tower-http) into log
    tracing_log::LogTracer::init().ok();

    Ok(())
}
