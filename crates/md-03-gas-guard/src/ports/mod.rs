//! # Ports Layer
//!
//! - **Outbound (Driven)**: account balance lookup

pub mod outbound;
