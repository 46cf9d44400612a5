//! Conditional logging macros.
//!
//! With the `tracing` feature these are the `tracing` macros. Without it they
//! expand to nothing, so statement dispatch and include resolution log for free.

#[cfg(feature = "tracing")]
pub use tracing::{debug, info, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, info, warn};
