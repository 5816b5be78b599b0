use iced::{alignment::Vertical, Alignment, Length};

use crate::{
    color,
    component::{button, text},
    theme,
    widget::*,
};

/// Top bar of every screen.
///
/// `back` adds a return button on the left. `account` holds the name and phone
/// of the connected user along with the logout message.
pub fn header<'a, T: Clone + 'a>(
    title: &'a str,
    brand: &'a str,
    back: Option<T>,
    account: Option<(String, String, T)>,
) -> Container<'a, T> {
    let left = Row::new()
        .spacing(15)
        .align_y(Vertical::Center)
        .push_maybe(back.map(|msg| button::transparent(None, "← Retour").on_press(msg)))
        .push(
            Column::new()
                .push(text::h5_medium(title))
                .push(text::caption(brand).color(color::BLUE)),
        );

    let right = account.map(|(name, phone, logout)| {
        Row::new()
            .spacing(15)
            .align_y(Vertical::Center)
            .push(
                Column::new()
                    .align_x(Alignment::End)
                    .push(text::p2_medium(name))
                    .push(text::caption(phone).color(color::SLATE_600)),
            )
            .push(
                button::secondary(None, "Déconnexion")
                    .width(Length::Fixed(140.0))
                    .on_press(logout),
            )
    });

    Container::new(
        Row::new()
            .align_y(Alignment::Center)
            .push(Container::new(left).width(Length::Fill))
            .push_maybe(right),
    )
    .padding([15, 30])
    .width(Length::Fill)
    .style(theme::container::header)
}
