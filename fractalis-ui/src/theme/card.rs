use iced::widget::container::Style;
use iced::{Background, Border};

use super::palette::ContainerPalette;
use super::Theme;

fn card(palette: &ContainerPalette) -> Style {
    Style {
        background: Some(Background::Color(palette.background)),
        text_color: palette.text,
        border: match palette.border {
            Some(color) => Border {
                radius: 12.0.into(),
                width: 1.0,
                color,
            },
            None => Border::default(),
        },
        ..Default::default()
    }
}

pub fn simple(theme: &Theme) -> Style {
    card(&theme.colors.cards.simple)
}

/// Selected offer or recommended formula.
pub fn highlighted(theme: &Theme) -> Style {
    card(&theme.colors.cards.highlighted)
}

pub fn info(theme: &Theme) -> Style {
    card(&theme.colors.cards.info)
}

pub fn success(theme: &Theme) -> Style {
    card(&theme.colors.cards.success)
}

pub fn warning(theme: &Theme) -> Style {
    card(&theme.colors.cards.warning)
}
