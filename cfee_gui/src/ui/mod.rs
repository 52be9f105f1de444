//! UI module for the CFee GUI
//!
//! # Panel Structure
//! - `header` - Title and tagline
//! - `buy_panel` - Buy inputs, total buy fees
//! - `sell_panel` - Break-even sell, sell inputs, total sell fees
//! - `summary_panel` - Incinerator rebate, totals, reset button
//! - `status_bar` - Validation and settings messages
//!
//! # Shared Components
//! - `fee_input` - Labelled input rows, result rows and the card frame

pub mod header;
pub mod buy_panel;
pub mod sell_panel;
pub mod summary_panel;
pub mod status_bar;

pub mod fee_input;
