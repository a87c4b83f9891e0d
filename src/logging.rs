//! Low-level debug tracing.
//!
//! User-facing messaging goes through the [`Output`](crate::output::Output)
//! trait; this channel only echoes external command invocations and similar
//! internals when `--verbose` is set.

use std::sync::OnceLock;

static DEBUG: OnceLock<bool> = OnceLock::new();

/// Turn debug tracing on or off for the rest of the process.
pub fn init_logging(verbose: bool) {
    DEBUG.set(verbose).ok(); // Ignore errors if already set
}

pub fn debug_enabled() -> bool {
    *DEBUG.get().unwrap_or(&false)
}

/// Emit one trace line. Callers gate on [`debug_enabled`]; prefer the
/// [`log_debug!`](crate::log_debug) macro, which does both.
pub fn emit(message: &str) {
    eprintln!("trace: {message}");
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        if $crate::logging::debug_enabled() {
            $crate::logging::emit(&format!($($arg)*));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_first_write_wins() {
        init_logging(false);
        init_logging(true);
        assert!(!debug_enabled());
    }
}
