//! Logging shims that forward to `defmt` when the feature is enabled.
//!
//! With the `defmt` feature disabled the macros still consume their
//! arguments so call sites compile without warnings.

#![allow(unused_macros)]

macro_rules! error {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::error!($s $(, $x)*);
        #[cfg(not(feature = "defmt"))]
        let _ = ($( & $x ),*);
    }};
}

macro_rules! info {
    ($s:literal $(, $x:expr)* $(,)?) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($s $(, $x)*);
        #[cfg(not(feature = "defmt"))]
        let _ = ($( & $x ),*);
    }};
}

pub(crate) use error;
pub(crate) use info;
