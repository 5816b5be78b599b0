use super::text::text;
use crate::font::MEDIUM;
use crate::{theme, widget::*};
use iced::alignment::{Horizontal, Vertical};
use iced::widget::{container, row};

pub fn primary<'a, T: 'a>(icon: Option<Text<'a>>, t: &'static str) -> Button<'a, T> {
    Button::new(content(icon, text(t).font(MEDIUM))).style(theme::button::primary)
}

pub fn secondary<'a, T: 'a>(icon: Option<Text<'a>>, t: &'static str) -> Button<'a, T> {
    Button::new(content(icon, text(t))).style(theme::button::secondary)
}

/// Final confirmation of a flow, payment or submission.
pub fn success<'a, T: 'a>(icon: Option<Text<'a>>, t: &'static str) -> Button<'a, T> {
    Button::new(content(icon, text(t).font(MEDIUM))).style(theme::button::success)
}

pub fn transparent<'a, T: 'a>(icon: Option<Text<'a>>, t: &'static str) -> Button<'a, T> {
    Button::new(content_left_aligned(icon, text(t))).style(theme::button::transparent)
}

pub fn link<'a, T: 'a>(t: &'static str) -> Button<'a, T> {
    Button::new(text(t).size(super::text::P2_SIZE))
        .padding(0)
        .style(theme::button::transparent)
}

/// Selectable option in a grid of choices; `selected` switches the style.
pub fn choice<'a, T: 'a>(content: impl Into<Element<'a, T>>, selected: bool) -> Button<'a, T> {
    Button::new(container(content).padding(10).width(iced::Length::Fill)).style(if selected {
        theme::button::choice_selected
    } else {
        theme::button::choice
    })
}

fn content<'a, T: 'a>(icon: Option<Text<'a>>, text: Text<'a>) -> Container<'a, T> {
    match icon {
        None => container(text)
            .align_y(Vertical::Center)
            .align_x(Horizontal::Center)
            .width(iced::Length::Fill)
            .padding(5),
        Some(i) => container(row![i, text].spacing(10).align_y(Vertical::Center))
            .align_x(Horizontal::Center)
            .width(iced::Length::Fill)
            .padding(5),
    }
}

fn content_left_aligned<'a, T: 'a>(icon: Option<Text<'a>>, text: Text<'a>) -> Container<'a, T> {
    match icon {
        None => container(text).align_y(Vertical::Center).padding(5),
        Some(i) => container(row![i, text].spacing(10).align_y(Vertical::Center)).padding(5),
    }
}
