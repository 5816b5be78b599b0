use crate::{theme, widget::*};

pub fn simple<'a, T: 'a, C: Into<Element<'a, T>>>(content: C) -> Container<'a, T> {
    Container::new(content).padding(15).style(theme::card::simple)
}

pub fn highlighted<'a, T: 'a, C: Into<Element<'a, T>>>(content: C) -> Container<'a, T> {
    Container::new(content)
        .padding(15)
        .style(theme::card::highlighted)
}

pub fn info<'a, T: 'a, C: Into<Element<'a, T>>>(content: C) -> Container<'a, T> {
    Container::new(content).padding(15).style(theme::card::info)
}

pub fn success<'a, T: 'a, C: Into<Element<'a, T>>>(content: C) -> Container<'a, T> {
    Container::new(content).padding(15).style(theme::card::success)
}

pub fn warning<'a, T: 'a, C: Into<Element<'a, T>>>(content: C) -> Container<'a, T> {
    Container::new(content).padding(15).style(theme::card::warning)
}
