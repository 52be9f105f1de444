//! Status Bar (Bottom)
//!
//! Shows validation warnings (e.g. a tax above 100%) and settings load
//! problems. Empty when everything is fine.

use iced::widget::{row, text, Space};
use iced::{Element, Length, Padding};

use crate::Message;

/// Render the status bar
pub fn view(status: &str) -> Element<'_, Message> {
    row![
        text(status).size(11).color([0.8, 0.2, 0.2]),
        Space::new().width(Length::Fill),
        text(concat!("v", env!("CARGO_PKG_VERSION"))).size(10).color([0.5, 0.5, 0.5]),
    ]
    .padding(Padding::from([4, 0]))
    .into()
}
