//! Buy card: principal, buying tax and buy-side fees.

use iced::widget::Column;
use iced::Element;

use cfee_core::display::{section_lines, Section};
use cfee_core::input::Field;

use super::fee_input::{card, labeled_input, result_row};
use crate::{App, Message};

/// Render the buy card
pub fn view(app: &App) -> Element<'_, Message> {
    let mut body: Column<'_, Message> = Column::new();
    for field in Field::BUY {
        body = body.push(labeled_input(app, field));
    }

    let settings = app.session.settings();
    let footer = section_lines(app.session.output(), Section::Buy)
        .iter()
        .map(|line| result_row(line, settings))
        .collect();

    card("Buy", "Enter your buy transaction details.", body, footer)
}
