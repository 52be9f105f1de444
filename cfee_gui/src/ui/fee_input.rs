//! Shared building blocks for the calculator cards.

use iced::widget::{column, container, row, rule, text, text_input, Column, Space};
use iced::{Alignment, Element, Length};

use cfee_core::display::ResultLine;
use cfee_core::input::Field;
use cfee_core::settings::Settings;

use crate::{App, Message};

/// Input row for one field: label (with unit) and a text input.
pub fn labeled_input<'a>(app: &'a App, field: Field) -> Element<'a, Message> {
    let currency = &app.session.settings().currency;
    let label = format!("{} ({})", field.label(), field.unit().symbol(currency));

    row![
        text(label).size(12).width(Length::Fixed(170.0)),
        text_input("0.00", app.draft(field))
            .on_input(move |raw| Message::FieldChanged(field, raw))
            .width(Length::Fill)
            .padding(4)
            .size(12),
    ]
    .align_y(Alignment::Center)
    .into()
}

/// One result value. Totals are drawn larger, like a card footer.
pub fn result_row(line: &ResultLine, settings: &Settings) -> Element<'static, Message> {
    let size = if line.is_total { 15 } else { 12 };
    let value = line.formatted(settings.display_precision, &settings.currency);

    row![
        text(line.label).size(size),
        Space::new().width(Length::Fill),
        text(value).size(size),
    ]
    .align_y(Alignment::Center)
    .into()
}

/// Titled card with a description, body and optional footer rows.
pub fn card<'a>(
    title: &'a str,
    description: &'a str,
    body: Column<'a, Message>,
    footer: Vec<Element<'a, Message>>,
) -> Element<'a, Message> {
    let mut content = column![
        text(title).size(18),
        text(description).size(11).color([0.5, 0.5, 0.5]),
        Space::new().height(6),
        body.spacing(8),
    ]
    .spacing(4);

    if !footer.is_empty() {
        content = content.push(Space::new().height(6)).push(rule::horizontal(1));
        for line in footer {
            content = content.push(line);
        }
    }

    container(content)
        .padding(12)
        .width(Length::FillPortion(1))
        .style(container::bordered_box)
        .into()
}
