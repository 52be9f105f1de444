//! # Input Record
//!
//! [`FeeInput`] is the mutable set of numeric parameters the user edits:
//! the amount committed to the buy, the tax percentages on each side, the
//! fixed per-transaction fees and the incinerator rebate.
//!
//! Values arrive from a form as raw text. They are coerced to a
//! non-negative finite number before being stored, with `0.0` as the
//! fallback for anything empty, unparseable or negative, so the engine
//! always has something to compute with.
//!
//! ## Example
//!
//! ```rust
//! use cfee_core::input::{Field, FeeInput};
//!
//! let mut input = FeeInput::DEFAULT;
//! input.set_raw(Field::BuyAmount, "1.5");
//! input.set_raw(Field::GasFeeBuy, "not a number");
//!
//! assert_eq!(input.buy_amount, 1.5);
//! assert_eq!(input.gas_fee_buy, 0.0);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::units::{Percent, Unit};

/// Input parameters for a buy/sell round trip.
///
/// Missing fields deserialize as `0.0`, not as the defaults: an absent
/// value is treated like an empty form field. For the same reason
/// `FeeInput::default()` is all zeros; the form defaults are
/// [`FeeInput::DEFAULT`].
///
/// ## JSON Example
///
/// ```json
/// {
///   "buy_amount": 1.0,
///   "buying_tax_percent": 0.75,
///   "priority_fee_buy": 0.0001,
///   "bribe_fee_buy": 0.0001,
///   "gas_fee_buy": 0.001,
///   "selling_tax_percent": 0.75,
///   "priority_fee_sell": 0.0001,
///   "bribe_fee_sell": 0.0001,
///   "gas_fee_sell": 0.001,
///   "sol_incinerator_rebate": 0.002
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeInput {
    /// Principal spent entering the position
    pub buy_amount: f64,

    /// Tax levied on the buy, 0-100
    pub buying_tax_percent: f64,

    /// Priority fee charged on the buy transaction
    pub priority_fee_buy: f64,

    /// Bribe (tip) fee charged on the buy transaction
    pub bribe_fee_buy: f64,

    /// Network gas fee charged on the buy transaction
    pub gas_fee_buy: f64,

    /// Tax levied on the sell, 0-100
    pub selling_tax_percent: f64,

    /// Priority fee charged on the sell transaction
    pub priority_fee_sell: f64,

    /// Bribe (tip) fee charged on the sell transaction
    pub bribe_fee_sell: f64,

    /// Network gas fee charged on the sell transaction
    pub gas_fee_sell: f64,

    /// Flat credit recovered from closing accounts, subtracted from total cost
    pub sol_incinerator_rebate: f64,
}

impl FeeInput {
    /// Values used when a session starts and after a confirmed reset.
    pub const DEFAULT: FeeInput = FeeInput {
        buy_amount: 0.0,
        buying_tax_percent: 0.75,
        priority_fee_buy: 0.0001,
        bribe_fee_buy: 0.0001,
        gas_fee_buy: 0.001,
        selling_tax_percent: 0.75,
        priority_fee_sell: 0.0001,
        bribe_fee_sell: 0.0001,
        gas_fee_sell: 0.001,
        sol_incinerator_rebate: 0.002,
    };

    /// Read a field by name.
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::BuyAmount => self.buy_amount,
            Field::BuyingTaxPercent => self.buying_tax_percent,
            Field::PriorityFeeBuy => self.priority_fee_buy,
            Field::BribeFeeBuy => self.bribe_fee_buy,
            Field::GasFeeBuy => self.gas_fee_buy,
            Field::SellingTaxPercent => self.selling_tax_percent,
            Field::PriorityFeeSell => self.priority_fee_sell,
            Field::BribeFeeSell => self.bribe_fee_sell,
            Field::GasFeeSell => self.gas_fee_sell,
            Field::SolIncineratorRebate => self.sol_incinerator_rebate,
        }
    }

    /// Store a value after coercing it with [`coerce`].
    pub fn set(&mut self, field: Field, value: f64) {
        let value = coerce(value);
        let slot = match field {
            Field::BuyAmount => &mut self.buy_amount,
            Field::BuyingTaxPercent => &mut self.buying_tax_percent,
            Field::PriorityFeeBuy => &mut self.priority_fee_buy,
            Field::BribeFeeBuy => &mut self.bribe_fee_buy,
            Field::GasFeeBuy => &mut self.gas_fee_buy,
            Field::SellingTaxPercent => &mut self.selling_tax_percent,
            Field::PriorityFeeSell => &mut self.priority_fee_sell,
            Field::BribeFeeSell => &mut self.bribe_fee_sell,
            Field::GasFeeSell => &mut self.gas_fee_sell,
            Field::SolIncineratorRebate => &mut self.sol_incinerator_rebate,
        };
        *slot = value;
    }

    /// Store raw form text after coercing it with [`coerce_str`].
    pub fn set_raw(&mut self, field: Field, raw: &str) {
        self.set(field, coerce_str(raw));
    }

    /// Copy of this record with every field passed through [`coerce`].
    pub fn coerced(&self) -> FeeInput {
        let mut input = FeeInput::default();
        for field in Field::ALL {
            input.set(field, self.get(field));
        }
        input
    }

    /// Buy-side tax as a [`Percent`]
    pub fn buying_tax(&self) -> Percent {
        Percent(self.buying_tax_percent)
    }

    /// Sell-side tax as a [`Percent`]
    pub fn selling_tax(&self) -> Percent {
        Percent(self.selling_tax_percent)
    }

    /// Check the ranges a form would flag.
    ///
    /// This is advisory: the engine computes a result for any input, so a
    /// host shows the returned error next to the field and carries on.
    pub fn validate(&self) -> CalcResult<()> {
        for field in Field::ALL {
            let value = self.get(field);
            if !value.is_finite() || value < 0.0 {
                return Err(CalcError::invalid_input(
                    field.key(),
                    value.to_string(),
                    "Value must be a non-negative number",
                ));
            }
            if field.unit() == Unit::Percent && value > 100.0 {
                return Err(CalcError::invalid_input(
                    field.key(),
                    value.to_string(),
                    "Tax cannot exceed 100%",
                ));
            }
        }
        Ok(())
    }
}

/// Coerce a number to the non-negative finite range, falling back to `0.0`.
pub fn coerce(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Parse raw form text and coerce it. Empty or unparseable text yields `0.0`.
pub fn coerce_str(raw: &str) -> f64 {
    raw.trim().parse::<f64>().map(coerce).unwrap_or(0.0)
}

/// Names of the input fields, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Field {
    BuyAmount,
    BuyingTaxPercent,
    PriorityFeeBuy,
    BribeFeeBuy,
    GasFeeBuy,
    SellingTaxPercent,
    PriorityFeeSell,
    BribeFeeSell,
    GasFeeSell,
    SolIncineratorRebate,
}

impl Field {
    /// All fields in form order (buy side, sell side, summary)
    pub const ALL: [Field; 10] = [
        Field::BuyAmount,
        Field::BuyingTaxPercent,
        Field::PriorityFeeBuy,
        Field::BribeFeeBuy,
        Field::GasFeeBuy,
        Field::SellingTaxPercent,
        Field::PriorityFeeSell,
        Field::BribeFeeSell,
        Field::GasFeeSell,
        Field::SolIncineratorRebate,
    ];

    /// Fields shown on the buy card
    pub const BUY: [Field; 5] = [
        Field::BuyAmount,
        Field::BuyingTaxPercent,
        Field::PriorityFeeBuy,
        Field::BribeFeeBuy,
        Field::GasFeeBuy,
    ];

    /// Fields shown on the sell card
    pub const SELL: [Field; 4] = [
        Field::SellingTaxPercent,
        Field::PriorityFeeSell,
        Field::BribeFeeSell,
        Field::GasFeeSell,
    ];

    /// Stable machine key
    pub fn key(&self) -> &'static str {
        match self {
            Field::BuyAmount => "buyAmount",
            Field::BuyingTaxPercent => "buyingTaxPercent",
            Field::PriorityFeeBuy => "priorityFeeBuy",
            Field::BribeFeeBuy => "bribeFeeBuy",
            Field::GasFeeBuy => "gasFeeBuy",
            Field::SellingTaxPercent => "sellingTaxPercent",
            Field::PriorityFeeSell => "priorityFeeSell",
            Field::BribeFeeSell => "bribeFeeSell",
            Field::GasFeeSell => "gasFeeSell",
            Field::SolIncineratorRebate => "solIncineratorRebate",
        }
    }

    /// Label shown next to the input
    pub fn label(&self) -> &'static str {
        match self {
            Field::BuyAmount => "Amount you put in",
            Field::BuyingTaxPercent => "Buying tax",
            Field::PriorityFeeBuy | Field::PriorityFeeSell => "Priority fee",
            Field::BribeFeeBuy | Field::BribeFeeSell => "Bribe fee",
            Field::GasFeeBuy | Field::GasFeeSell => "Gas fee",
            Field::SellingTaxPercent => "Selling tax",
            Field::SolIncineratorRebate => "SOL incinerator",
        }
    }

    /// Unit the value is entered in
    pub fn unit(&self) -> Unit {
        match self {
            Field::BuyingTaxPercent | Field::SellingTaxPercent => Unit::Percent,
            _ => Unit::Currency,
        }
    }

}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Field {
    type Err = CalcError;

    /// Accepts the camelCase key, its snake_case form, or a short alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        let field = match normalized.as_str() {
            "buyamount" | "buy" | "amount" => Field::BuyAmount,
            "buyingtaxpercent" | "buyingtax" | "buytax" => Field::BuyingTaxPercent,
            "priorityfeebuy" => Field::PriorityFeeBuy,
            "bribefeebuy" => Field::BribeFeeBuy,
            "gasfeebuy" => Field::GasFeeBuy,
            "sellingtaxpercent" | "sellingtax" | "selltax" => Field::SellingTaxPercent,
            "priorityfeesell" => Field::PriorityFeeSell,
            "bribefeesell" => Field::BribeFeeSell,
            "gasfeesell" => Field::GasFeeSell,
            "solincineratorrebate" | "solincinerator" | "incinerator" | "rebate" => {
                Field::SolIncineratorRebate
            }
            _ => return Err(CalcError::unknown_field(s.trim())),
        };
        Ok(field)
    }
}
