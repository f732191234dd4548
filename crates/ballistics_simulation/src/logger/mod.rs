//! Глобальный logger симуляции
//!
//! Printer подключается один раз на процесс (консоль в headless, свой в host).
//! Порог уровня хранится рядом с printer'ом под одним mutex'ом и задаётся из
//! `BallisticsConfig::log_level`. Отфильтрованные сообщения не форматируются.

use std::sync::{Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
        }
    }

    /// Проходит ли сообщение уровня `self` через порог `threshold`
    pub fn passes(&self, threshold: LogLevel) -> bool {
        *self >= threshold
    }
}

pub trait LogPrinter: Send + Sync {
    fn log(&self, level: LogLevel, message: &str);
}

struct LoggerState {
    printer: Option<Box<dyn LogPrinter>>,
    threshold: LogLevel,
}

static LOGGER: Lazy<Mutex<LoggerState>> = Lazy::new(|| {
    Mutex::new(LoggerState {
        printer: None,
        threshold: LogLevel::Debug,
    })
});

// Паника внутри printer'а не должна глушить логи остальных систем
fn state() -> MutexGuard<'static, LoggerState> {
    LOGGER.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn set_logger(printer: Box<dyn LogPrinter>) {
    state().printer = Some(printer);
}

pub fn set_logger_if_needed(printer: Box<dyn LogPrinter>) {
    state().printer.get_or_insert(printer);
}

pub fn set_log_level(level: LogLevel) {
    state().threshold = level;
}

pub fn log(message: &str) {
    log_with_level(LogLevel::Debug, message);
}

pub fn log_info(message: &str) {
    log_with_level(LogLevel::Info, message);
}

pub fn log_warning(message: &str) {
    log_with_level(LogLevel::Warning, message);
}

pub fn log_error(message: &str) {
    log_with_level(LogLevel::Error, message);
}

pub fn log_with_level(level: LogLevel, message: &str) {
    let state = state();
    if !level.passes(state.threshold) {
        return;
    }

    if let Some(printer) = state.printer.as_ref() {
        let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
        printer.log(level, &format!("[{}] {}", timestamp, message));
    }
}

/// Headless printer: stdout, ошибки в stderr
pub struct ConsoleLogger;

impl LogPrinter for ConsoleLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Error => eprintln!("[{}] {}", level.as_str(), message),
            _ => println!("[{}] {}", level.as_str(), message),
        }
    }
}

pub fn init_logger() {
    set_logger_if_needed(Box::new(ConsoleLogger));
}
