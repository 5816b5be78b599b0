pub mod button;
pub mod card;
pub mod form;
pub mod header;
pub mod notification;
pub mod text;

use iced::{Alignment, Length};

use crate::{color, theme, widget::*};

pub use header::header;

/// "Étape 2 sur 5" with a progress track underneath.
pub fn step_indicator<'a, T: 'a>(position: usize, total: usize, title: &'a str) -> Column<'a, T> {
    let track = (1..=total).fold(Row::new().spacing(5), |row, i| {
        row.push(
            Container::new(Column::new())
                .width(Length::Fill)
                .height(Length::Fixed(4.0))
                .style(theme::container::custom(if i <= position {
                    color::BLUE
                } else {
                    color::SLATE_200
                })),
        )
    });
    Column::new()
        .spacing(10)
        .push(
            Row::new()
                .align_y(Alignment::Center)
                .push(text::h4_bold(title).width(Length::Fill))
                .push(
                    text::caption(format!("Étape {} sur {}", position, total))
                        .color(color::SLATE_600),
                ),
        )
        .push(track)
}

/// Label on the left, value on the right, as in a summary table.
pub fn summary_line<'a, T: 'a>(label: &'a str, value: impl std::fmt::Display) -> Row<'a, T> {
    Row::new()
        .push(
            text::p2_regular(label)
                .color(color::SLATE_600)
                .width(Length::Fill),
        )
        .push(text::p2_medium(value))
}
