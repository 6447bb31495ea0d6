use std::cell::Cell;

/// Severity of a frontend log line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

thread_local! {
    static MIN_LEVEL: Cell<LogLevel> = Cell::new(LogLevel::Info);
}

/// Component-tagged logger writing to the browser console
pub struct Logger;

impl Logger {
    /// Lines below `level` are dropped
    pub fn set_min_level(level: LogLevel) {
        MIN_LEVEL.with(|min| min.set(level));
    }

    pub fn min_level() -> LogLevel {
        MIN_LEVEL.with(|min| min.get())
    }

    pub fn debug_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Debug, message, component);
    }

    pub fn info_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Info, message, component);
    }

    pub fn warn_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Warn, message, component);
    }

    pub fn error_with_component(component: &str, message: &str) {
        Self::log(LogLevel::Error, message, component);
    }

    fn log(level: LogLevel, message: &str, component: &str) {
        if level < Self::min_level() {
            return;
        }

        let line = format_line(level, component, message);
        match level {
            LogLevel::Debug => gloo::console::debug!(line),
            LogLevel::Info => gloo::console::info!(line),
            LogLevel::Warn => gloo::console::warn!(line),
            LogLevel::Error => gloo::console::error!(line),
        }
    }
}

pub(crate) fn format_line(level: LogLevel, component: &str, message: &str) -> String {
    format!("[{}] [{}] {}", level.as_str(), component, message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_format_line() {
        assert_eq!(
            format_line(LogLevel::Warn, "overdue-sweeper", "1 update failed"),
            "[WARN] [overdue-sweeper] 1 update failed"
        );
    }

    #[wasm_bindgen_test]
    fn test_level_ordering_and_threshold() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Warn < LogLevel::Error);

        Logger::set_min_level(LogLevel::Warn);
        assert_eq!(Logger::min_level(), LogLevel::Warn);
        Logger::set_min_level(LogLevel::Info);
    }
}
