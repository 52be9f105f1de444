//! Result lines shared by the front-ends, so the CLI table and the GUI
//! cards list the same values under the same labels.

use serde::Serialize;

use crate::calculations::break_even::FeeBreakdown;
use crate::units::{format_with_unit, Unit};

/// Which card a result belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Section {
    Buy,
    Sell,
    Summary,
}

/// One labelled result value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultLine {
    pub section: Section,
    pub label: &'static str,
    pub value: f64,
    pub unit: Unit,
    /// Emphasised as a card footer
    pub is_total: bool,
}

impl ResultLine {
    /// Value with unit, rounded for display
    pub fn formatted(&self, precision: usize, currency: &str) -> String {
        format_with_unit(self.value, self.unit, precision, currency)
    }
}

/// Results in display order.
pub fn result_lines(breakdown: &FeeBreakdown) -> Vec<ResultLine> {
    vec![
        ResultLine {
            section: Section::Buy,
            label: "Total buy fees",
            value: breakdown.total_buy_fees,
            unit: Unit::Currency,
            is_total: true,
        },
        ResultLine {
            section: Section::Sell,
            label: "Break-even sell",
            value: breakdown.break_even_amount,
            unit: Unit::Currency,
            is_total: false,
        },
        ResultLine {
            section: Section::Sell,
            label: "Total sell fees",
            value: breakdown.total_sell_fees,
            unit: Unit::Currency,
            is_total: true,
        },
        ResultLine {
            section: Section::Summary,
            label: "Total spent in fees",
            value: breakdown.total_fees_spent,
            unit: Unit::Currency,
            is_total: false,
        },
        ResultLine {
            section: Section::Summary,
            label: "PnL needed to break even",
            value: breakdown.pnl_percent_needed,
            unit: Unit::Percent,
            is_total: true,
        },
    ]
}

/// Results belonging to one card
pub fn section_lines(breakdown: &FeeBreakdown, section: Section) -> Vec<ResultLine> {
    result_lines(breakdown)
        .into_iter()
        .filter(|line| line.section == section)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::break_even::recompute;
    use crate::input::FeeInput;

    #[test]
    fn test_lines_cover_every_result() {
        let breakdown = recompute(&FeeInput { buy_amount: 1.0, ..FeeInput::DEFAULT });
        let lines = result_lines(&breakdown);

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1].value, breakdown.break_even_amount);
        assert_eq!(lines[4].unit, Unit::Percent);
    }

    #[test]
    fn test_formatted() {
        let breakdown = recompute(&FeeInput { buy_amount: 1.0, ..FeeInput::DEFAULT });
        let lines = result_lines(&breakdown);

        assert_eq!(lines[1].formatted(6, "SOL"), "1.008700 SOL");
        assert_eq!(lines[4].formatted(6, "SOL"), "1.546525 %");
    }

    #[test]
    fn test_section_lines() {
        let breakdown = recompute(&FeeInput::DEFAULT);
        assert_eq!(section_lines(&breakdown, Section::Buy).len(), 1);
        assert_eq!(section_lines(&breakdown, Section::Sell).len(), 2);
        assert_eq!(section_lines(&breakdown, Section::Summary).len(), 2);
    }
}
