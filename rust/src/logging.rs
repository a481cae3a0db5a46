//! Logging macros for the scheduling engines with verbosity level control.
//!
//! Provides zero-cost logging when disabled (verbosity=0). Everything goes to
//! stderr so the trace sink only ever sees the formatted report lines.
//! - 0: SILENT (nothing)
//! - 1: CHANGES (intervals emitted, completions, time jumps)
//! - 2: CHECKS (candidate selection, preemptions, skipped visits)
//! - 3: DEBUG (ready-queue internals, wait accrual)

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_CHANGES: u8 = 1;
pub const VERBOSITY_CHECKS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at CHANGES level (verbosity >= 1).
///
/// Used for: emitted intervals, completions, idle jumps.
#[macro_export]
macro_rules! log_changes {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHANGES {
            eprintln!($($arg)*);
        }
    };
}

/// Log at CHECKS level (verbosity >= 2).
///
/// Used for: candidate consideration, preemption decisions, skipped turns.
#[macro_export]
macro_rules! log_checks {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_CHECKS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!($($arg)*);
        }
    };
}
