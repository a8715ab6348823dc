//! Logging shims.
//!
//! Expand to [`log`] calls behind the `log` feature and to nothing
//! without it, so call sites never need their own `cfg`. Only the levels
//! the crate emits are shimmed: `debug` for body lifecycle transitions
//! and event dispatch, `warning` for rejected URI input.

macro_rules! debug {
    ($($tt:tt)*) => {
        #[cfg(feature = "log")]
        ::log::debug!($($tt)*);
    };
}

macro_rules! warning {
    ($($tt:tt)*) => {
        #[cfg(feature = "log")]
        ::log::warn!($($tt)*);
    };
}

pub(crate) use {debug, warning};
