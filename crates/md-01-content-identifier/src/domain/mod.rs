//! # Domain Layer
//!
//! Pure decoding logic with no I/O dependencies.

pub mod codec;
pub mod entities;
pub mod errors;
