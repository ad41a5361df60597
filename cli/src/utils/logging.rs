use chrono::Local;
use colored::*;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How the process should log
#[derive(Debug, Clone)]
pub struct LogOptions {
    /// Append records to a daily file under `dir`
    pub file_enabled: bool,
    /// Level used when `RUST_LOG` is not set
    pub level: String,
    pub dir: PathBuf,
    /// Mirror records to stderr at debug level
    pub verbose: bool,
}

/// `snippetkit-YYYY-MM-DD.log` for today.
pub fn log_file_name() -> String {
    format!("snippetkit-{}.log", Local::now().format("%Y-%m-%d"))
}

fn normalize_level(level: &str) -> &'static str {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => "trace",
        "debug" => "debug",
        "warn" | "warning" => "warn",
        "error" => "error",
        _ => "info",
    }
}

/// Install the global subscriber. Returns the log file in use, if any.
///
/// Failing to open the log file only prints a warning.
pub fn init(options: &LogOptions) -> Option<PathBuf> {
    let level = if options.verbose {
        "debug"
    } else {
        normalize_level(&options.level)
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("snippetkit={level},snippetkit_cli={level}"))
    });

    let mut log_path = None;
    let file_layer = if options.file_enabled {
        match open_log_file(options) {
            Ok((path, file)) => {
                log_path = Some(path);
                Some(
                    fmt::layer()
                        .with_ansi(false)
                        .with_target(false)
                        .with_writer(Mutex::new(file)),
                )
            }
            Err(e) => {
                eprintln!("{} Failed to open log file: {}", "Warning:".yellow().bold(), e);
                None
            }
        }
    } else {
        None
    };

    let stderr_layer = options
        .verbose
        .then(|| fmt::layer().with_target(false).with_writer(std::io::stderr));

    // Ignore a second initialization (tests, embedding)
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init();

    log_path
}

fn open_log_file(options: &LogOptions) -> std::io::Result<(PathBuf, fs::File)> {
    fs::create_dir_all(&options.dir)?;
    let path = options.dir.join(log_file_name());
    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    Ok((path, file))
}
