//! Conditional logging macros that check a module-level `ENABLE_LOGS` flag.
//!
//! Each module that uses them defines the flag first:
//! ```rust
//! const ENABLE_LOGS: bool = true;
//!
//! use rollcall::{log_info, log_warn, log_error};
//!
//! log_info!("logged only while ENABLE_LOGS is true");
//! ```

/// Macro for conditional info logging.
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

/// Macro for conditional warn logging.
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

/// Macro for conditional error logging.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}
