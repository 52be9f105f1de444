//! Application header

use iced::widget::{column, text};
use iced::{Alignment, Element, Length};

use crate::Message;

/// Render the title block
pub fn view() -> Element<'static, Message> {
    column![
        text("CFee v1").size(32),
        text("The simplest meme coin fee calculator for Solana.")
            .size(14)
            .color([0.5, 0.5, 0.5]),
    ]
    .spacing(4)
    .width(Length::Fill)
    .align_x(Alignment::Center)
    .into()
}
