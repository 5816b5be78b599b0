//! Six cell verification code entry shared by registration and password reset.

use std::time::Duration;

use iced::{widget::text_input, Alignment, Length, Subscription, Task};

use fractalis::otp::OtpInput;
use fractalis_ui::{
    color,
    component::{button, notification, text::*},
    widget::*,
};

#[derive(Debug, Clone)]
pub enum Message {
    Input(usize, String),
    Verify,
    Resend,
    Tick,
}

/// What the owning screen has to do after a message was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Verify(String),
    Resend,
}

pub fn cell_id(index: usize) -> text_input::Id {
    text_input::Id::new(format!("otp-{}", index))
}

pub fn focus<T: Send + 'static>(index: usize) -> Task<T> {
    text_input::focus(cell_id(index))
}

/// Applies `message` to `otp`. While `processing`, nothing is submitted nor
/// sent again.
pub fn update<T: Send + 'static>(
    otp: &mut OtpInput,
    processing: bool,
    message: Message,
) -> (Task<T>, Option<Request>) {
    match message {
        Message::Input(index, value) => {
            let outcome = otp.input(index, &value);
            let task = outcome.focus.map(focus).unwrap_or_else(Task::none);
            let request = if processing {
                None
            } else {
                outcome.submit.map(Request::Verify)
            };
            (task, request)
        }
        Message::Verify => {
            if otp.verify_enabled() && !processing {
                (Task::none(), Some(Request::Verify(otp.code())))
            } else {
                (Task::none(), None)
            }
        }
        Message::Resend => {
            if !processing && otp.resend() {
                (focus(0), Some(Request::Resend))
            } else {
                (Task::none(), None)
            }
        }
        Message::Tick => {
            otp.tick();
            (Task::none(), None)
        }
    }
}

/// Ticks the resend cooldown once per second, only while it runs.
pub fn subscription(otp: &OtpInput) -> Subscription<Message> {
    if otp.countdown().is_running() {
        iced::time::every(Duration::from_secs(1)).map(|_| Message::Tick)
    } else {
        Subscription::none()
    }
}

pub fn view<'a>(
    otp: &'a OtpInput,
    phone: &'a str,
    processing: bool,
    error: Option<&'a str>,
) -> Element<'a, Message> {
    let cells = otp
        .cells()
        .iter()
        .enumerate()
        .fold(Row::new().spacing(10), |row, (index, cell)| {
            row.push(
                TextInput::new("", cell)
                    .id(cell_id(index))
                    .on_input_maybe(
                        (!processing).then_some(move |value| Message::Input(index, value)),
                    )
                    .size(H3_SIZE)
                    .padding(10)
                    .width(Length::Fixed(50.0)),
            )
        });

    let resend: Element<'a, Message> = if otp.resend_enabled() {
        button::link("Renvoyer le code")
            .on_press_maybe((!processing).then_some(Message::Resend))
            .into()
    } else {
        p2_regular(format!(
            "Renvoyer le code dans {}s",
            otp.countdown().remaining()
        ))
        .color(color::SLATE_600)
        .into()
    };

    Column::new()
        .spacing(20)
        .align_x(Alignment::Center)
        .push(h4_bold("Vérification du code"))
        .push(
            p2_regular(format!("Un code à 6 chiffres a été envoyé au {}", phone))
                .color(color::SLATE_600),
        )
        .push(cells)
        .push_maybe(error.map(notification::error))
        .push(
            button::primary(None, if processing { "Vérification..." } else { "Vérifier" })
                .width(Length::Fill)
                .on_press_maybe(
                    (otp.verify_enabled() && !processing).then_some(Message::Verify),
                ),
        )
        .push(resend)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_code(otp: &mut OtpInput, code: &str, processing: bool) -> Vec<Request> {
        code.chars()
            .enumerate()
            .filter_map(|(i, c)| {
                let (_task, request) =
                    update::<()>(otp, processing, Message::Input(i, c.to_string()));
                request
            })
            .collect()
    }

    #[test]
    fn complete_code_is_submitted_once() {
        let mut otp = OtpInput::new();
        assert_eq!(
            type_code(&mut otp, "123456", false),
            vec![Request::Verify("123456".to_string())]
        );
        // Editing the last cell of a complete code does not submit again.
        let (_, request) = update::<()>(&mut otp, false, Message::Input(5, "7".to_string()));
        assert_eq!(request, None);
    }

    #[test]
    fn nothing_is_submitted_while_processing() {
        let mut otp = OtpInput::new();
        assert!(type_code(&mut otp, "123456", true).is_empty());
        let (_, request) = update::<()>(&mut otp, true, Message::Verify);
        assert_eq!(request, None);
        let (_, request) = update::<()>(&mut otp, false, Message::Verify);
        assert_eq!(request, Some(Request::Verify("123456".to_string())));
    }

    #[test]
    fn resend_waits_for_cooldown() {
        let mut otp = OtpInput::new();
        let (_, request) = update::<()>(&mut otp, false, Message::Resend);
        assert_eq!(request, None);
        while otp.countdown().is_running() {
            let _ = update::<()>(&mut otp, false, Message::Tick);
        }
        let (_, request) = update::<()>(&mut otp, false, Message::Resend);
        assert_eq!(request, Some(Request::Resend));
        assert!(otp.countdown().is_running());
    }
}
