use chrono::Local;
use log::{LevelFilter, Metadata, Record, SetLoggerError};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::OnceLock;

// Custom logger structure
#[derive(Debug)]
struct RaceLogger {
    level: LevelFilter,
    debug_filters: Option<HashSet<String>>,
}

impl RaceLogger {
    // Pulls "Level N" out of a message so every line about a level gets an [LNN] prefix
    fn level_context(message: &str) -> Option<u32> {
        let start = message.find("Level ")? + "Level ".len();
        let digits: String = message[start..]
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }
}

impl log::Log for RaceLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() <= self.level {
            // Debug and trace output is limited to the selected topics, if any
            if let Some(filters) = &self.debug_filters {
                if metadata.level() == log::Level::Debug || metadata.level() == log::Level::Trace {
                    return filters.contains(metadata.target())
                        || filters.iter().any(|f| metadata.target().starts_with(f));
                }
            }
            return true;
        }
        false
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let level_color = match record.level() {
            log::Level::Error => "\x1B[31m", // Red
            log::Level::Warn => "\x1B[33m",  // Yellow
            log::Level::Info => "\x1B[32m",  // Green
            log::Level::Debug => "\x1B[36m", // Cyan
            log::Level::Trace => "\x1B[35m", // Magenta
        };
        let reset = "\x1B[0m";
        let timestamp = Local::now().format("%H:%M:%S%.3f");

        let message = record.args().to_string();
        let context = match Self::level_context(&message) {
            Some(level) if !message.starts_with("[L") => format!("[L{:02}] ", level),
            _ => String::new(),
        };

        let mut output = format!(
            "{timestamp} {level_color}{level:5}{reset} {context}{target}: {message}",
            level = record.level(),
            target = record.target(),
        );

        if let Some(module_path) = record.module_path() {
            if module_path != record.target() {
                output.push_str(&format!(" [{}]", module_path));
            }
        }

        // Write failures are ignored
        let mut stdout = io::stdout();
        let _ = writeln!(stdout, "{}", output);
        let _ = stdout.flush();
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
    }
}

static LOGGER: OnceLock<RaceLogger> = OnceLock::new();

/// Installs the global logger. `debug_filter` is a comma-separated list of topics
/// (`car`, `path`, `race`, `progress`) that limits debug and trace output.
pub fn init_logger(level: LevelFilter, debug_filter: Option<String>) -> Result<(), SetLoggerError> {
    let debug_filters = debug_filter.map(|filter_str| {
        filter_str
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<HashSet<String>>()
    });

    let logger = LOGGER.get_or_init(|| RaceLogger {
        level,
        debug_filters,
    });

    log::set_logger(logger).map(|()| log::set_max_level(level))
}

/// Maps a `--log-level` argument onto a filter, defaulting to `Info`.
pub fn parse_level(name: &str) -> LevelFilter {
    match name.to_lowercase().as_str() {
        "off" => LevelFilter::Off,
        "error" => LevelFilter::Error,
        "warn" => LevelFilter::Warn,
        "info" => LevelFilter::Info,
        "debug" => LevelFilter::Debug,
        "trace" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    }
}

// Helper macros for specific debug topics
#[macro_export]
macro_rules! debug_car {
    ($label:expr, $($arg:tt)*) => {
        log::debug!(target: "car", "[{}] {}", $label, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_path {
    ($($arg:tt)*) => {
        log::debug!(target: "path", "{}", format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_race {
    ($level:expr, $($arg:tt)*) => {
        log::debug!(target: "race", "[L{:02}] {}", $level, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_progress {
    ($($arg:tt)*) => {
        log::debug!(target: "progress", "{}", format_args!($($arg)*))
    };
}
