//! # cfee_core - Trade Fee Calculation Engine
//!
//! `cfee_core` works out what a buy-then-sell round trip costs once
//! percentage taxes and fixed per-transaction fees are included, the sell
//! amount that breaks even, and the price move needed to recoup it all.
//!
//! ## Design Philosophy
//!
//! - **Pure engine**: the breakdown is a total function of the inputs
//! - **Never fails on input**: anything non-numeric is treated as zero
//! - **Explicit reset state machine**: owned, cancellable timers, at most
//!   one live per kind
//! - **JSON-First**: inputs, results and settings implement Serialize
//!
//! ## Quick Start
//!
//! ```rust
//! use cfee_core::calculations::recompute;
//! use cfee_core::input::FeeInput;
//!
//! let input = FeeInput { buy_amount: 1.0, ..FeeInput::DEFAULT };
//! let result = recompute(&input);
//!
//! println!("Sell for {:.6} SOL to break even", result.break_even_amount);
//! ```
//!
//! ## Modules
//!
//! - [`input`] - The input record, field names and coercion
//! - [`calculations`] - The break-even calculation
//! - [`reset`] - Two-phase confirmable reset
//! - [`timer`] - Cancellable single-shot timers
//! - [`session`] - Host binding tying inputs, results and reset together
//! - [`settings`] - Reset windows, labels and display settings
//! - [`display`] - Labelled result lines for front-ends
//! - [`units`] - Percent helper and number formatting
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod display;
pub mod errors;
pub mod input;
pub mod reset;
pub mod session;
pub mod settings;
pub mod timer;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{recompute, FeeBreakdown};
pub use errors::{CalcError, CalcResult};
pub use input::{Field, FeeInput};
pub use reset::{ResetController, ResetMode, ResetTransition};
pub use session::Session;
pub use settings::Settings;
