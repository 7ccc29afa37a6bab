//! Logging shims.
//!
//! With the `tracing` feature the macros below are the `tracing` ones.
//! Without it they swallow their arguments, so call sites in the layout
//! loops compile to nothing.
//!
//! Levels used by the crate:
//! - `trace`: per-label layout results
//! - `debug`: skipped features, degenerate metrics, pass summary
//! - `warn`: a feature that failed and was left out of the output

#[cfg(feature = "tracing")]
pub use tracing::{debug, trace, warn};

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! trace {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
pub use crate::{debug, trace, warn};
