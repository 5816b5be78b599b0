use iced::{Alignment, Length, Subscription, Task};

use fractalis::{otp::OtpInput, validation::Rule, SessionError};
use fractalis_ui::{
    color,
    component::{button, form, notification, text::*},
    widget::*,
};

use super::{otp, Context, Route};

const PASSWORD_MISMATCH: &str = "Les mots de passe ne correspondent pas";
const SEND_OTP_FAILED: &str = "Erreur lors de l'envoi du code. Veuillez réessayer.";
const RESET_FAILED: &str = "Erreur lors de la réinitialisation du mot de passe";

#[derive(Debug, Clone)]
pub enum Message {
    View(ViewMessage),
    OtpSent(Result<(), SessionError>),
    OtpVerified(String, Result<(), SessionError>),
    PasswordReset(Result<(), SessionError>),
    Navigate(Route),
}

#[derive(Debug, Clone)]
pub enum ViewMessage {
    PhoneEdited(String),
    PasswordEdited(String),
    ConfirmationEdited(String),
    SendCode,
    Otp(otp::Message),
    Reset,
    Previous,
    Login,
}

#[derive(Debug)]
enum Step {
    Phone,
    Otp(OtpInput),
    /// The verified code is kept for the reset call.
    NewPassword {
        code: String,
    },
}

#[derive(Debug)]
pub struct ForgotPassword {
    phone: form::Value<String>,
    password: form::Value<String>,
    confirmation: form::Value<String>,
    step: Step,
    processing: bool,
    error: Option<&'static str>,
}

impl Default for ForgotPassword {
    fn default() -> Self {
        Self::new()
    }
}

impl ForgotPassword {
    pub fn new() -> Self {
        Self {
            phone: form::Value::default(),
            password: form::Value::default(),
            confirmation: form::Value::default(),
            step: Step::Phone,
            processing: false,
            error: None,
        }
    }

    pub fn update(&mut self, ctx: &Context, message: Message) -> Task<Message> {
        match message {
            Message::View(ViewMessage::PhoneEdited(value)) => {
                self.phone.value = value;
                self.phone.valid = true;
            }
            Message::View(ViewMessage::PasswordEdited(value)) => {
                self.password.value = value;
                self.password.valid = true;
            }
            Message::View(ViewMessage::ConfirmationEdited(value)) => {
                self.confirmation.value = value;
                self.confirmation.valid = true;
            }
            Message::View(ViewMessage::SendCode) => {
                if self.processing {
                    return Task::none();
                }
                if !Rule::Phone.check(&self.phone.value) {
                    self.phone.valid = false;
                    return Task::none();
                }
                self.error = None;
                return self.send_otp(ctx);
            }
            Message::OtpSent(res) => {
                self.processing = false;
                match res {
                    Ok(()) => {
                        if let Step::Phone = self.step {
                            self.step = Step::Otp(OtpInput::new());
                            return otp::focus(0);
                        }
                    }
                    Err(e) => {
                        tracing::warn!("Failed to send otp: {}", e);
                        self.error = Some(SEND_OTP_FAILED);
                    }
                }
            }
            Message::View(ViewMessage::Otp(msg)) => {
                let Step::Otp(input) = &mut self.step else {
                    return Task::none();
                };
                let (task, request) = otp::update(input, self.processing, msg);
                return match request {
                    Some(otp::Request::Verify(code)) => {
                        self.processing = true;
                        self.error = None;
                        let session = ctx.session.clone();
                        Task::batch([
                            task,
                            Task::perform(
                                async move {
                                    let res = session.verify_otp(&code).await;
                                    (code, res)
                                },
                                |(code, res)| Message::OtpVerified(code, res),
                            ),
                        ])
                    }
                    Some(otp::Request::Resend) => {
                        self.error = None;
                        Task::batch([task, self.send_otp(ctx)])
                    }
                    None => task,
                };
            }
            Message::OtpVerified(code, res) => {
                if !matches!(self.step, Step::Otp(_)) {
                    tracing::debug!("Ignoring a verification answered after leaving the code step");
                    return Task::none();
                }
                self.processing = false;
                match res {
                    Ok(()) => {
                        self.interrupt();
                        self.step = Step::NewPassword { code };
                    }
                    Err(e) => {
                        tracing::warn!("Otp verification failed: {}", e);
                        self.error = Some(e.user_message());
                    }
                }
            }
            Message::View(ViewMessage::Reset) => {
                let Step::NewPassword { code } = &self.step else {
                    return Task::none();
                };
                if self.processing {
                    return Task::none();
                }
                if self.password.value.is_empty() {
                    self.password.valid = false;
                    return Task::none();
                }
                if self.password.value != self.confirmation.value {
                    self.confirmation.valid = false;
                    self.error = Some(PASSWORD_MISMATCH);
                    return Task::none();
                }
                self.processing = true;
                self.error = None;
                let session = ctx.session.clone();
                let phone = self.phone.value.trim().to_string();
                let password = self.password.value.clone();
                let code = code.clone();
                return Task::perform(
                    async move { session.reset_password(&phone, &password, &code).await },
                    Message::PasswordReset,
                );
            }
            Message::PasswordReset(res) => {
                self.processing = false;
                match res {
                    Ok(()) => return Task::done(Message::Navigate(Route::Login)),
                    Err(e) => {
                        tracing::warn!("Password reset failed: {}", e);
                        self.error = Some(RESET_FAILED);
                    }
                }
            }
            Message::View(ViewMessage::Previous) => {
                if self.processing {
                    return Task::none();
                }
                self.interrupt();
                self.error = None;
                self.step = Step::Phone;
            }
            Message::View(ViewMessage::Login) => {
                self.interrupt();
                return Task::done(Message::Navigate(Route::Login));
            }
            // Handled by the router.
            Message::Navigate(_) => {}
        }
        Task::none()
    }

    fn send_otp(&mut self, ctx: &Context) -> Task<Message> {
        self.processing = true;
        let session = ctx.session.clone();
        let phone = self.phone.value.trim().to_string();
        Task::perform(
            async move { session.send_otp(&phone).await },
            Message::OtpSent,
        )
    }

    pub fn subscription(&self) -> Subscription<Message> {
        match &self.step {
            Step::Otp(input) => otp::subscription(input)
                .map(|msg| Message::View(ViewMessage::Otp(msg))),
            _ => Subscription::none(),
        }
    }

    pub fn interrupt(&mut self) {
        if let Step::Otp(input) = &mut self.step {
            input.cancel();
        }
    }

    pub fn view(&self) -> Element<Message> {
        let step: Element<ViewMessage> = match &self.step {
            Step::Phone => Column::new()
                .spacing(20)
                .push(
                    p2_regular(
                        "Saisissez votre numéro de téléphone pour recevoir un code de vérification.",
                    )
                    .color(color::SLATE_600),
                )
                .push_maybe(self.error.map(notification::error))
                .push(
                    form::Form::new("07 00 00 00 00", &self.phone, ViewMessage::PhoneEdited)
                        .label("Numéro de téléphone")
                        .on_submit(ViewMessage::SendCode)
                        .warning("Numéro de téléphone invalide"),
                )
                .push(
                    button::primary(
                        None,
                        if self.processing {
                            "Envoi du code..."
                        } else {
                            "Envoyer le code"
                        },
                    )
                    .width(Length::Fill)
                    .on_press_maybe((!self.processing).then_some(ViewMessage::SendCode)),
                )
                .into(),
            Step::Otp(input) => Column::new()
                .spacing(20)
                .push(
                    otp::view(input, &self.phone.value, self.processing, self.error)
                        .map(ViewMessage::Otp),
                )
                .push(
                    button::link("← Modifier le numéro")
                        .on_press_maybe((!self.processing).then_some(ViewMessage::Previous)),
                )
                .into(),
            Step::NewPassword { .. } => Column::new()
                .spacing(20)
                .push(p2_regular("Choisissez votre nouveau mot de passe.").color(color::SLATE_600))
                .push_maybe(self.error.map(notification::error))
                .push(
                    form::Form::new(
                        "Nouveau mot de passe",
                        &self.password,
                        ViewMessage::PasswordEdited,
                    )
                    .label("Nouveau mot de passe")
                    .secure()
                    .warning("Le mot de passe est requis"),
                )
                .push(
                    form::Form::new(
                        "Confirmez le mot de passe",
                        &self.confirmation,
                        ViewMessage::ConfirmationEdited,
                    )
                    .label("Confirmation")
                    .secure()
                    .on_submit(ViewMessage::Reset)
                    .warning(PASSWORD_MISMATCH),
                )
                .push(
                    button::primary(
                        None,
                        if self.processing {
                            "Réinitialisation..."
                        } else {
                            "Réinitialiser le mot de passe"
                        },
                    )
                    .width(Length::Fill)
                    .on_press_maybe((!self.processing).then_some(ViewMessage::Reset)),
                )
                .into(),
        };

        let content = Column::new()
            .spacing(20)
            .align_x(Alignment::Center)
            .push(h4_bold("Mot de passe oublié"))
            .push(step)
            .push(button::link("Retour à la connexion").on_press(ViewMessage::Login));

        super::auth_layout(content).map(Message::View)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::test_context;

    #[tokio::test]
    async fn reset_uses_the_verified_code() {
        let ctx = test_context();
        let mut screen = ForgotPassword::new();

        let _ = screen.update(&ctx, Message::View(ViewMessage::SendCode));
        assert!(!screen.phone.valid);
        assert!(!screen.processing);

        let _ = screen.update(
            &ctx,
            Message::View(ViewMessage::PhoneEdited("+225 07 00 00 00 00".into())),
        );
        let _ = screen.update(&ctx, Message::View(ViewMessage::SendCode));
        assert!(screen.processing);
        let _ = screen.update(&ctx, Message::OtpSent(Ok(())));
        assert!(matches!(screen.step, Step::Otp(_)));

        let res = ctx.session.verify_otp("123456").await;
        let _ = screen.update(&ctx, Message::OtpVerified("123456".into(), res));
        assert!(matches!(&screen.step, Step::NewPassword { code } if code == "123456"));

        let _ = screen.update(&ctx, Message::View(ViewMessage::PasswordEdited("a".into())));
        let _ = screen.update(
            &ctx,
            Message::View(ViewMessage::ConfirmationEdited("b".into())),
        );
        let _ = screen.update(&ctx, Message::View(ViewMessage::Reset));
        assert_eq!(screen.error, Some(PASSWORD_MISMATCH));

        let res = ctx.session.reset_password("0700000000", "a", "000000").await;
        let _ = screen.update(&ctx, Message::PasswordReset(res));
        assert_eq!(screen.error, Some(RESET_FAILED));
    }

    #[test]
    fn late_verification_does_not_skip_the_phone_step() {
        let ctx = test_context();
        let mut screen = ForgotPassword::new();
        screen.phone.value = "0700000000".into();
        let _ = screen.update(&ctx, Message::OtpSent(Ok(())));
        let Step::Otp(input) = &mut screen.step else {
            panic!("code step expected");
        };
        for (index, digit) in "12345".chars().enumerate() {
            input.input(index, &digit.to_string());
        }
        let _ = screen.update(
            &ctx,
            Message::View(ViewMessage::Otp(otp::Message::Input(5, "6".into()))),
        );
        assert!(screen.processing);

        // Going back is refused while the code is checked.
        let _ = screen.update(&ctx, Message::View(ViewMessage::Previous));
        assert!(matches!(screen.step, Step::Otp(_)));

        let _ = screen.update(
            &ctx,
            Message::OtpVerified("123456".into(), Err(SessionError::InvalidOtp)),
        );
        let _ = screen.update(&ctx, Message::View(ViewMessage::Previous));
        assert!(matches!(screen.step, Step::Phone));
        let _ = screen.update(&ctx, Message::OtpVerified("123456".into(), Ok(())));
        assert!(matches!(screen.step, Step::Phone));
    }
}
