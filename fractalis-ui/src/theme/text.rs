use iced::widget::text::{Catalog, Style, StyleFn};

use super::Theme;

impl Catalog for Theme {
    type Class<'a> = StyleFn<'a, Self>;

    fn default<'a>() -> Self::Class<'a> {
        Box::new(body)
    }

    fn style(&self, class: &Self::Class<'_>) -> Style {
        class(self)
    }
}

/// Body text, overridden per widget with `.color(..)`.
pub fn body(theme: &Theme) -> Style {
    Style {
        color: Some(theme.colors.text.primary),
    }
}
