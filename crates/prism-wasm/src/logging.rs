//! Browser console logger.

use std::sync::Once;

use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::JsValue;

/// Logger configuration.
///
/// `target_prefix` keeps only records whose target starts with it
/// (e.g. `"prism"` to silence dependencies).
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: LevelFilter,
    pub target_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: if cfg!(debug_assertions) {
                LevelFilter::Debug
            } else {
                LevelFilter::Info
            },
            target_prefix: Some("prism".to_string()),
        }
    }
}

/// Forwards `log` records to `console.*`.
struct ConsoleLogger {
    level: LevelFilter,
    target_prefix: Option<String>,
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
            && self
                .target_prefix
                .as_deref()
                .map_or(true, |prefix| metadata.target().starts_with(prefix))
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = JsValue::from_str(&format_record(record));
        match record.level() {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    fn flush(&self) {}
}

fn format_record(record: &Record) -> String {
    format!("[{} {}] {}", record.level(), record.target(), record.args())
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// This function is idempotent; subsequent calls are ignored.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let logger = ConsoleLogger {
            level: config.level,
            target_prefix: config.target_prefix,
        };
        if log::set_boxed_logger(Box::new(logger)).is_ok() {
            log::set_max_level(config.level);
        }

        log::debug!("logging initialized");
    });
}
