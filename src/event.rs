//! Process-wide log and event hooks.
//!
//! The engine has no opinion about where diagnostics go; embedders register
//! callbacks and the engine reports through them. Events cover structural
//! changes (`rewrap`, `clear`), logs cover anomalies (dropped segment
//! overrides, content that cannot fit a viewport).

use std::sync::{Mutex, OnceLock};

/// Log level for diagnostic callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Default)]
struct Hooks {
    log: Option<Box<dyn Fn(LogLevel, &str) + Send + Sync + 'static>>,
    event: Option<Box<dyn Fn(&str, &str) + Send + Sync + 'static>>,
}

fn hooks() -> &'static Mutex<Hooks> {
    static HOOKS: OnceLock<Mutex<Hooks>> = OnceLock::new();
    HOOKS.get_or_init(|| Mutex::new(Hooks::default()))
}

/// Register the global log callback.
pub fn set_log_callback<F>(callback: F)
where
    F: Fn(LogLevel, &str) + Send + Sync + 'static,
{
    hooks().lock().expect("hook lock").log = Some(Box::new(callback));
}

/// Register the global event callback.
pub fn set_event_callback<F>(callback: F)
where
    F: Fn(&str, &str) + Send + Sync + 'static,
{
    hooks().lock().expect("hook lock").event = Some(Box::new(callback));
}

/// Emit a log message to the registered callback, if any.
pub fn emit_log(level: LogLevel, message: &str) {
    if let Ok(guard) = hooks().lock() {
        if let Some(log) = guard.log.as_ref() {
            log(level, message);
        }
    }
}

/// Emit a named event to the registered callback, if any.
pub fn emit_event(name: &str, data: &str) {
    if let Ok(guard) = hooks().lock() {
        if let Some(event) = guard.event.as_ref() {
            event(name, data);
        }
    }
}
