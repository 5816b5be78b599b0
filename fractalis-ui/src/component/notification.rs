use iced::Length;

use crate::{component::text, theme, widget::*};

pub fn error<'a, T: 'a>(message: impl std::fmt::Display) -> Container<'a, T> {
    Container::new(text::p2_regular(message))
        .padding(12)
        .width(Length::Fill)
        .style(theme::notification::error)
}

pub fn success<'a, T: 'a>(title: &'a str, message: &'a str) -> Container<'a, T> {
    Container::new(
        Column::new()
            .spacing(5)
            .push(text::p1_bold(title))
            .push(text::p2_regular(message)),
    )
    .padding(15)
    .width(Length::Fill)
    .style(theme::notification::success)
}

/// Shown while a request is in flight.
pub fn pending<'a, T: 'a>(message: &'a str) -> Container<'a, T> {
    Container::new(text::p2_regular(message))
        .padding(12)
        .width(Length::Fill)
        .style(theme::notification::pending)
}
