use iced::widget::container::{transparent, Catalog, Style, StyleFn};
use iced::{Background, Border, Shadow, Vector};

use super::Theme;

impl Catalog for Theme {
    type Class<'a> = StyleFn<'a, Self>;

    fn default<'a>() -> Self::Class<'a> {
        Box::new(transparent)
    }

    fn style(&self, class: &Self::Class<'_>) -> Style {
        class(self)
    }
}

pub fn header(theme: &Theme) -> Style {
    Style {
        background: Some(Background::Color(theme.colors.general.header)),
        shadow: Shadow {
            color: iced::Color {
                a: 0.08,
                ..iced::Color::BLACK
            },
            offset: Vector::new(0.0, 1.0),
            blur_radius: 4.0,
        },
        ..Default::default()
    }
}

pub fn custom(color: iced::Color) -> Box<dyn Fn(&Theme) -> Style> {
    Box::new(move |_theme: &Theme| Style {
        background: Some(Background::Color(color)),
        border: Border {
            radius: 8.0.into(),
            ..Default::default()
        },
        ..Default::default()
    })
}
