//! FILENAME: table-core/src/logging.rs
// PURPOSE: Category-tagged diagnostics for the table engine.
// CONTEXT: Lines carry a process-wide sequence number and a category
// (SORT, SUMMARY, BOTTOM, RENDER, COLUMNS, TABLE). They go through the `log` facade
// with the category as target, so the embedding application picks the sink.

use std::sync::atomic::{AtomicU64, Ordering};

pub use log::Level;

// ============================================================================
// SEQUENCED LOG LINES
// ============================================================================

/// Global sequence counter shared by every log line
static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

/// Get next sequence number
pub fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst) + 1
}

/// Format a log line body in the unified `seq|category|message` shape
pub fn format_line(seq: u64, category: &str, message: &str) -> String {
    format!("{}|{}|{}", seq, category, message)
}

/// Write a log line in unified format
pub fn write_log(level: Level, category: &str, message: &str) {
    if !log::log_enabled!(target: category, level) {
        return;
    }
    let line = format_line(next_seq(), category, message);
    log::log!(target: category, level, "{}", line);
}

/// Body of an ENTER line: `ENTER func params`
pub fn enter_message(func_name: &str, params: &str) -> String {
    if params.is_empty() {
        format!("ENTER {}", func_name)
    } else {
        format!("ENTER {} {}", func_name, params)
    }
}

/// Body of an EXIT line: `EXIT func result`
pub fn exit_message(func_name: &str, result: &str) -> String {
    if result.is_empty() {
        format!("EXIT {}", func_name)
    } else {
        format!("EXIT {} {}", func_name, result)
    }
}

/// Write an ENTER log line for function entry
pub fn write_log_enter(level: Level, category: &str, func_name: &str, params: &str) {
    write_log(level, category, &enter_message(func_name, params));
}

/// Write an EXIT log line for function exit
pub fn write_log_exit(level: Level, category: &str, func_name: &str, result: &str) {
    write_log(level, category, &exit_message(func_name, result));
}

// ============================================================================
// MACRO DEFINITIONS & EXPORTS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::Level::Debug, $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::Level::Info, $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::Level::Warn, $cat, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::write_log($crate::logging::Level::Error, $cat, &format!($($arg)*))
    };
}

// ENTER/EXIT macros for function tracing

#[macro_export]
macro_rules! log_enter {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_enter($crate::logging::Level::Debug, $cat, $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_enter($crate::logging::Level::Debug, $cat, $func, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_exit {
    ($cat:expr, $func:expr) => {
        $crate::logging::write_log_exit($crate::logging::Level::Debug, $cat, $func, "")
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::write_log_exit($crate::logging::Level::Debug, $cat, $func, &format!($($arg)*))
    };
}

// Re-export the macros so they can be imported via `use table_core::logging::log_warn;`
pub use crate::log_debug;
pub use crate::log_enter;
pub use crate::log_error;
pub use crate::log_exit;
pub use crate::log_info;
pub use crate::log_warn;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_increasing() {
        let a = next_seq();
        let b = next_seq();
        assert!(b > a);
    }

    #[test]
    fn test_format_line() {
        assert_eq!(format_line(7, "SORT", "no column"), "7|SORT|no column");
    }

    #[test]
    fn test_enter_exit_messages() {
        assert_eq!(enter_message("summarize_columns", ""), "ENTER summarize_columns");
        assert_eq!(
            enter_message("summarize_columns", "columns=3"),
            "ENTER summarize_columns columns=3"
        );
        assert_eq!(exit_message("compute_bottom_rows", "rows=2"), "EXIT compute_bottom_rows rows=2");
    }

    #[test]
    fn test_macros_expand_without_logger() {
        log_warn!("SORT", "column {} not found", "x");
        log_error!("RENDER", "renderer failed for column {}", "v");
        log_enter!("SUMMARY", "summarize_columns", "columns={}", 3);
        log_exit!("SUMMARY", "summarize_columns");
    }
}
