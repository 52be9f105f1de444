//! Summary card: incinerator rebate, totals and the reset button.
//!
//! The reset button sits in a mouse area so leaving it cancels an armed
//! reset or dismisses the acknowledgement.

use iced::widget::{button, column, mouse_area, text, Column};
use iced::{Element, Length, Padding};

use cfee_core::display::{section_lines, Section};
use cfee_core::input::Field;
use cfee_core::reset::ResetMode;

use super::fee_input::{card, labeled_input, result_row};
use crate::{App, Message};

/// Render the summary card
pub fn view(app: &App) -> Element<'_, Message> {
    let settings = app.session.settings();

    let mut body: Column<'_, Message> = column![labeled_input(app, Field::SolIncineratorRebate)];
    for line in section_lines(app.session.output(), Section::Summary) {
        body = body.push(result_row(&line, settings));
    }
    body = body.push(view_reset_button(app));

    card("Summary", "A summary of your total costs to break even.", body, Vec::new())
}

fn view_reset_button(app: &App) -> Element<'_, Message> {
    let style = match app.session.mode() {
        ResetMode::Idle => button::secondary,
        ResetMode::Armed => button::danger,
        ResetMode::Announcing => button::success,
    };

    let reset = button(text(app.session.label()).size(13))
        .on_press(Message::ResetPressed)
        .padding(Padding::from([8, 12]))
        .width(Length::Fill)
        .style(style);

    mouse_area(reset).on_exit(Message::ResetLeft).into()
}
