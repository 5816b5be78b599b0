use iced::widget::button::{Catalog, Status, Style, StyleFn};
use iced::{Background, Border};

use super::palette::{Button, ButtonPalette};
use super::Theme;

const RADIUS: f32 = 8.0;

impl Catalog for Theme {
    type Class<'a> = StyleFn<'a, Self>;

    fn default<'a>() -> Self::Class<'a> {
        Box::new(primary)
    }

    fn style(&self, class: &Self::Class<'_>, status: Status) -> Style {
        class(self, status)
    }
}

pub fn primary(theme: &Theme, status: Status) -> Style {
    button(&theme.colors.buttons.primary, status)
}

pub fn secondary(theme: &Theme, status: Status) -> Style {
    button(&theme.colors.buttons.secondary, status)
}

pub fn success(theme: &Theme, status: Status) -> Style {
    button(&theme.colors.buttons.success, status)
}

pub fn transparent(theme: &Theme, status: Status) -> Style {
    button(&theme.colors.buttons.transparent, status)
}

/// Dashboard product tile.
pub fn tile(theme: &Theme, status: Status) -> Style {
    button(&theme.colors.buttons.tile, status)
}

pub fn choice(theme: &Theme, status: Status) -> Style {
    button(&theme.colors.buttons.choice, status)
}

pub fn choice_selected(theme: &Theme, status: Status) -> Style {
    button(&theme.colors.buttons.choice_selected, status)
}

fn style(p: &ButtonPalette) -> Style {
    Style {
        background: Some(Background::Color(p.background)),
        text_color: p.text,
        border: match p.border {
            Some(color) => Border {
                radius: RADIUS.into(),
                width: 1.0,
                color,
            },
            None => Border {
                radius: RADIUS.into(),
                ..Default::default()
            },
        },
        ..Default::default()
    }
}

fn button(p: &Button, status: Status) -> Style {
    match status {
        Status::Active => style(&p.active),
        Status::Hovered => style(&p.hovered),
        Status::Pressed => style(p.pressed.as_ref().unwrap_or(&p.hovered)),
        Status::Disabled => match p.disabled {
            Some(disabled) => style(&disabled),
            None => {
                let mut active = style(&p.active);
                active.text_color.a = 0.5;
                active
            }
        },
    }
}
