use iced::{widget::Space, Alignment, Length, Task};

use fractalis::{Identity, SessionError, BRAND, TAGLINE};
use fractalis_ui::{
    color,
    component::{button, form, notification, text::*},
    widget::*,
};

use super::{Context, Route};

#[derive(Debug, Clone)]
pub enum Message {
    View(ViewMessage),
    LoggedIn(Result<Identity, SessionError>),
    Navigate(Route),
}

#[derive(Debug, Clone)]
pub enum ViewMessage {
    PhoneEdited(String),
    PasswordEdited(String),
    Submit,
    Register,
    ForgotPassword,
}

#[derive(Debug, Default)]
pub struct Login {
    phone: form::Value<String>,
    password: form::Value<String>,
    processing: bool,
    error: Option<&'static str>,
}

impl Login {
    pub fn new() -> Self {
        Self::default()
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
            Message::View(ViewMessage::Submit) => {
                if self.processing {
                    return Task::none();
                }
                self.processing = true;
                self.error = None;
                let session = ctx.session.clone();
                let phone = self.phone.value.clone();
                let password = self.password.value.clone();
                return Task::perform(
                    async move { session.login(&phone, &password).await },
                    Message::LoggedIn,
                );
            }
            Message::View(ViewMessage::Register) => {
                return Task::done(Message::Navigate(Route::Register));
            }
            Message::View(ViewMessage::ForgotPassword) => {
                return Task::done(Message::Navigate(Route::ForgotPassword));
            }
            Message::LoggedIn(res) => {
                self.processing = false;
                match res {
                    Ok(_) => return Task::done(Message::Navigate(Route::Dashboard)),
                    Err(e) => {
                        tracing::warn!("Login failed: {}", e);
                        if e == SessionError::MissingCredentials {
                            self.phone.valid = !self.phone.value.is_empty();
                            self.password.valid = !self.password.value.is_empty();
                        }
                        self.error = Some(e.user_message());
                    }
                }
            }
            // Handled by the router.
            Message::Navigate(_) => {}
        }
        Task::none()
    }

    pub fn view(&self) -> Element<Message> {
        let content = Column::new()
            .spacing(20)
            .align_x(Alignment::Center)
            .push(h2(BRAND).color(color::BLUE))
            .push(p2_regular(TAGLINE).color(color::SLATE_600))
            .push(h4_bold("Connexion"))
            .push_maybe(self.error.map(notification::error))
            .push(
                form::Form::new("07 00 00 00 00", &self.phone, ViewMessage::PhoneEdited)
                    .label("Numéro de téléphone")
                    .warning("Le numéro de téléphone est requis"),
            )
            .push(
                form::Form::new("Votre mot de passe", &self.password, ViewMessage::PasswordEdited)
                    .label("Mot de passe")
                    .secure()
                    .on_submit(ViewMessage::Submit)
                    .warning("Le mot de passe est requis"),
            )
            .push(
                Row::new().push(Space::with_width(Length::Fill)).push(
                    button::link("Mot de passe oublié ?")
                        .on_press(ViewMessage::ForgotPassword),
                ),
            )
            .push(
                button::primary(
                    None,
                    if self.processing {
                        "Connexion..."
                    } else {
                        "Se connecter"
                    },
                )
                .width(Length::Fill)
                .on_press_maybe((!self.processing).then_some(ViewMessage::Submit)),
            )
            .push(
                Row::new()
                    .spacing(5)
                    .align_y(Alignment::Center)
                    .push(p2_regular("Pas encore de compte ?").color(color::SLATE_600))
                    .push(button::link("Créer un compte").on_press(ViewMessage::Register)),
            );

        super::auth_layout(content).map(Message::View)
    }
}
