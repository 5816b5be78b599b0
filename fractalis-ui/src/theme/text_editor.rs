use iced::{
    widget::text_editor::{Catalog, Status, Style, StyleFn},
    Background, Border,
};

use super::{palette::TextInputPalette, Theme};

impl Catalog for Theme {
    type Class<'a> = StyleFn<'a, Self>;

    fn default<'a>() -> Self::Class<'a> {
        Box::new(primary)
    }

    fn style(&self, class: &Self::Class<'_>, status: Status) -> Style {
        class(self, status)
    }
}

/// Multi-line input sharing the palette of the single line ones.
pub fn primary(theme: &Theme, status: Status) -> Style {
    let c = &theme.colors.text_inputs.primary;
    match status {
        Status::Active | Status::Hovered => style(&c.active),
        Status::Focused { .. } => style(&c.focused),
        Status::Disabled => style(&c.disabled),
    }
}

pub fn invalid(theme: &Theme, _status: Status) -> Style {
    style(&theme.colors.text_inputs.invalid.active)
}

fn style(p: &TextInputPalette) -> Style {
    Style {
        background: Background::Color(p.background),
        border: Border {
            radius: 8.0.into(),
            width: if p.border.is_some() { 1.0 } else { 0.0 },
            color: p.border.unwrap_or(p.background),
        },
        icon: p.icon,
        placeholder: p.placeholder,
        value: p.value,
        selection: p.selection,
    }
}
