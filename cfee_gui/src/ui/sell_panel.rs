//! Sell card: break-even sell, selling tax and sell-side fees.

use iced::widget::{text, Column};
use iced::Element;

use cfee_core::display::{section_lines, Section};
use cfee_core::input::Field;

use super::fee_input::{card, labeled_input, result_row};
use crate::{App, Message};

/// Render the sell card
pub fn view(app: &App) -> Element<'_, Message> {
    let settings = app.session.settings();
    let (totals, highlights): (Vec<_>, Vec<_>) =
        section_lines(app.session.output(), Section::Sell)
            .into_iter()
            .partition(|line| line.is_total);

    let mut body: Column<'_, Message> = Column::new();
    for line in &highlights {
        body = body.push(result_row(line, settings));
    }
    body = body.push(
        text("Total you need to sell for to cover all fees and the initial investment.")
            .size(10)
            .color([0.5, 0.5, 0.5]),
    );
    for field in Field::SELL {
        body = body.push(labeled_input(app, field));
    }

    let footer = totals.iter().map(|line| result_row(line, settings)).collect();

    card("Sell", "Fees for the break-even sell transaction.", body, footer)
}
