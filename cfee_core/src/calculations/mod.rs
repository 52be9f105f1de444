//! # Fee Calculations
//!
//! Each calculation follows the pattern:
//!
//! - an input record (JSON-serializable)
//! - a result record (JSON-serializable)
//! - a pure function from one to the other
//!
//! ## Available Calculations
//!
//! - [`break_even`] - Round-trip fees, break-even sell and PnL needed

pub mod break_even;

// Re-export commonly used types
pub use break_even::{recompute, FeeBreakdown};
