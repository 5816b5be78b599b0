use iced::Length;

use crate::{color, component::text, theme, widget::*};

#[derive(Debug, Clone)]
pub struct Value<T> {
    pub value: T,
    pub valid: bool,
}

impl Default for Value<String> {
    fn default() -> Self {
        Self {
            value: String::new(),
            valid: true,
        }
    }
}

/// Labelled text input showing a caption under it when invalid.
pub struct Form<'a, Message> {
    label: Option<&'a str>,
    input: TextInput<'a, Message>,
    warning: Option<&'a str>,
    valid: bool,
}

impl<'a, Message: 'a> Form<'a, Message>
where
    Message: Clone,
{
    pub fn new<F>(placeholder: &str, value: &Value<String>, on_change: F) -> Self
    where
        F: 'static + Fn(String) -> Message,
    {
        Self {
            label: None,
            input: TextInput::new(placeholder, &value.value)
                .on_input(on_change)
                .padding(10),
            warning: None,
            valid: value.valid,
        }
    }

    /// Same as [`Form::new`], surrounding spaces are dropped from what is typed.
    pub fn new_trimmed<F>(placeholder: &str, value: &Value<String>, on_change: F) -> Self
    where
        F: 'static + Fn(String) -> Message,
    {
        Self {
            label: None,
            input: TextInput::new(placeholder, &value.value)
                .on_input(move |s| on_change(s.trim().to_string()))
                .padding(10),
            warning: None,
            valid: value.valid,
        }
    }

    pub fn label(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }

    /// Masks the value, for passwords.
    pub fn secure(mut self) -> Self {
        self.input = self.input.secure(true);
        self
    }

    pub fn on_submit(mut self, message: Message) -> Self {
        self.input = self.input.on_submit(message);
        self
    }

    /// Caption shown under the input while it is invalid.
    pub fn warning(mut self, warning: &'a str) -> Self {
        self.warning = Some(warning);
        self
    }

}

impl<'a, Message: 'a + Clone> From<Form<'a, Message>> for Element<'a, Message> {
    fn from(form: Form<'a, Message>) -> Element<'a, Message> {
        Container::new(
            Column::new()
                .push_maybe(form.label.map(|l| text::p2_medium(l).color(color::SLATE_600)))
                .push(if form.valid {
                    form.input
                } else {
                    form.input.style(theme::text_input::invalid)
                })
                .push_maybe(
                    form.warning
                        .filter(|_| !form.valid)
                        .map(|message| text::caption(message).color(color::RED)),
                )
                .width(Length::Fill)
                .spacing(5),
        )
        .width(Length::Fill)
        .into()
    }
}
