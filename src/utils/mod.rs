//! Utility modules for Sundial.
//!
//! - [`mask`] - Token-style format masks translated to chrono strftime strings

pub mod mask;
