//! # Break-Even Calculation
//!
//! Computes what a buy/sell round trip costs and how far the price has to
//! move before selling recovers it.
//!
//! ## Formula Order
//!
//! Fees are tax-inclusive in sequence:
//!
//! 1. Buy tax is levied on the raw principal.
//! 2. The break-even sell covers the principal plus every buy-side cost.
//! 3. Sell tax is levied on the break-even amount, since tax is charged on
//!    the transaction value at sale time.
//! 4. The incinerator rebate is a flat credit applied after both totals.
//! 5. PnL needed is a percentage of the principal, and exactly `0` when the
//!    principal is `0`.
//!
//! No rounding happens here. A rebate larger than the fees yields a
//! negative total (and a negative PnL needed); that is a valid result.
//!
//! ## Example
//!
//! ```rust
//! use cfee_core::calculations::break_even::recompute;
//! use cfee_core::input::FeeInput;
//!
//! let input = FeeInput {
//!     buy_amount: 1.0,
//!     ..FeeInput::DEFAULT
//! };
//!
//! let result = recompute(&input);
//! assert!((result.break_even_amount - 1.0087).abs() < 1e-12);
//! assert!((result.pnl_percent_needed - 1.546525).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::input::FeeInput;

/// Derived values for a [`FeeInput`].
///
/// Never edited directly; produce a fresh one with [`recompute`] whenever
/// the input changes.
///
/// ## JSON Example
///
/// ```json
/// {
///   "total_buy_fees": 0.0087,
///   "break_even_amount": 1.0087,
///   "total_sell_fees": 0.00876525,
///   "total_fees_spent": 0.01546525,
///   "pnl_percent_needed": 1.546525
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FeeBreakdown {
    /// Buy tax plus the fixed buy-side fees
    pub total_buy_fees: f64,

    /// Gross sell proceeds needed to recover principal and buy-side costs
    pub break_even_amount: f64,

    /// Sell tax on the break-even amount plus the fixed sell-side fees
    pub total_sell_fees: f64,

    /// Both fee totals minus the incinerator rebate. May be negative.
    pub total_fees_spent: f64,

    /// Price appreciation needed to recoup `total_fees_spent`, in percent
    pub pnl_percent_needed: f64,
}

/// Recompute every derived value from the input.
///
/// Total and side-effect free: calling it twice on the same input gives
/// bit-identical results. Fields are read through [`FeeInput::coerced`],
/// so a record built by hand with negative or non-finite values computes
/// as if those fields were `0`.
pub fn recompute(input: &FeeInput) -> FeeBreakdown {
    let input = &input.coerced();

    let total_buy_fees = input.buying_tax().of(input.buy_amount)
        + input.priority_fee_buy
        + input.bribe_fee_buy
        + input.gas_fee_buy;

    let break_even_amount = total_buy_fees + input.buy_amount;

    let total_sell_fees = input.selling_tax().of(break_even_amount)
        + input.priority_fee_sell
        + input.bribe_fee_sell
        + input.gas_fee_sell;

    let total_fees_spent = total_buy_fees + total_sell_fees - input.sol_incinerator_rebate;

    let pnl_percent_needed = if input.buy_amount > 0.0 {
        (total_fees_spent / input.buy_amount) * 100.0
    } else {
        0.0
    };

    debug!(
        buy_amount = input.buy_amount,
        total_fees_spent,
        pnl_percent_needed,
        "recomputed fee breakdown"
    );

    FeeBreakdown {
        total_buy_fees,
        break_even_amount,
        total_sell_fees,
        total_fees_spent,
        pnl_percent_needed,
    }
}
