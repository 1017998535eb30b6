//! Logging macros that only fire the first time their call site is reached.
//!
//! Used for conditions that can happen once per sample and would otherwise flood the log.

#[macro_export]
macro_rules! log_once {
    ($lvl:expr, $($arg:tt)+) => {{
        static FIRED: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(false);
        if !FIRED.swap(true, std::sync::atomic::Ordering::Relaxed) {
            log::log!($lvl, $($arg)+);
        }
    }};
}

#[macro_export]
macro_rules! warn_once {
    ($($arg:tt)+) => ($crate::log_once!(log::Level::Warn, $($arg)+));
}

#[macro_export]
macro_rules! error_once {
    ($($arg:tt)+) => ($crate::log_once!(log::Level::Error, $($arg)+));
}

pub use error_once;
pub use log_once;
pub use warn_once;
