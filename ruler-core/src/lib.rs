//! Ruler Core - Fundamental types
//!
//! This crate provides the core types used throughout Ruler:
//! - `Number`: Exact decimal numbers for scale factors and input values
//! - `RulerError`: Structured errors for adapters

mod number;
mod error;

pub use number::{Number, NumberError};
pub use error::{RulerError, Severity, codes};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{Number, NumberError, RulerError, Severity};
    pub use crate::error::codes;
}
