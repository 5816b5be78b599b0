use iced::{Alignment, Length, Subscription, Task};

use fractalis::{
    otp::OtpInput,
    validation::{check_all, Field, Rule, Values},
    Identity, RegisterData, SessionError, BRAND,
};
use fractalis_ui::{
    color,
    component::{button, form, notification, text::*},
    widget::*,
};

use super::{otp, Context, Route};

const PASSWORD_MISMATCH: &str = "Les mots de passe ne correspondent pas";
const SEND_OTP_FAILED: &str = "Erreur lors de l'envoi du code. Veuillez réessayer.";
const REGISTER_FAILED: &str = "Erreur lors de la création du compte";

const FIELDS: &[Field] = &[
    Field::required("nom", "Nom"),
    Field::required("prenom", "Prénom"),
    Field::new(
        "telephone",
        "Numéro de téléphone",
        &[Rule::Required, Rule::Phone],
    ),
    Field::new("email", "Email", &[Rule::Email]),
    Field::required("password", "Mot de passe"),
];

#[derive(Debug, Clone)]
pub enum Message {
    View(ViewMessage),
    OtpSent(Result<(), SessionError>),
    OtpVerified(Result<(), SessionError>),
    Registered(Result<Identity, SessionError>),
    Navigate(Route),
}

#[derive(Debug, Clone)]
pub enum ViewMessage {
    NomEdited(String),
    PrenomEdited(String),
    PhoneEdited(String),
    EmailEdited(String),
    PasswordEdited(String),
    ConfirmationEdited(String),
    ConditionsToggled(bool),
    Submit,
    Otp(otp::Message),
    BackToForm,
    Login,
}

#[derive(Debug, Default)]
struct RegisterForm {
    nom: form::Value<String>,
    prenom: form::Value<String>,
    telephone: form::Value<String>,
    email: form::Value<String>,
    password: form::Value<String>,
    confirmation: form::Value<String>,
    accept_conditions: bool,
}

impl Values for RegisterForm {
    fn value(&self, field: &str) -> Option<&str> {
        match field {
            "nom" => Some(self.nom.value.as_str()),
            "prenom" => Some(self.prenom.value.as_str()),
            "telephone" => Some(self.telephone.value.as_str()),
            "email" => Some(self.email.value.as_str()),
            "password" => Some(self.password.value.as_str()),
            _ => None,
        }
    }
}

impl RegisterForm {
    /// Flags the invalid inputs and returns the first error to display, if any.
    fn validate(&mut self) -> Option<&'static str> {
        let violations = check_all(FIELDS, self);
        for violation in &violations {
            match violation.field {
                "nom" => self.nom.valid = false,
                "prenom" => self.prenom.valid = false,
                "telephone" => self.telephone.valid = false,
                "email" => self.email.valid = false,
                "password" => self.password.valid = false,
                _ => {}
            }
        }
        if !violations.is_empty() {
            return Some("Veuillez remplir correctement tous les champs obligatoires");
        }
        if self.password.value != self.confirmation.value {
            self.confirmation.valid = false;
            return Some(PASSWORD_MISMATCH);
        }
        if !self.accept_conditions {
            return Some(SessionError::ConditionsNotAccepted.user_message());
        }
        None
    }

    fn data(&self) -> RegisterData {
        let email = self.email.value.trim();
        RegisterData {
            nom: self.nom.value.trim().to_string(),
            prenom: self.prenom.value.trim().to_string(),
            telephone: self.telephone.value.trim().to_string(),
            password: self.password.value.clone(),
            accept_conditions: self.accept_conditions,
            email: (!email.is_empty()).then(|| email.to_string()),
        }
    }
}

#[derive(Debug)]
enum Step {
    Form,
    Otp(OtpInput),
}

#[derive(Debug)]
pub struct Register {
    form: RegisterForm,
    step: Step,
    processing: bool,
    error: Option<&'static str>,
}

impl Default for Register {
    fn default() -> Self {
        Self::new()
    }
}

impl Register {
    pub fn new() -> Self {
        Self {
            form: RegisterForm::default(),
            step: Step::Form,
            processing: false,
            error: None,
        }
    }

    pub fn update(&mut self, ctx: &Context, message: Message) -> Task<Message> {
        match message {
            Message::View(ViewMessage::Submit) => {
                if self.processing {
                    return Task::none();
                }
                self.error = self.form.validate();
                if self.error.is_some() {
                    return Task::none();
                }
                return self.send_otp(ctx);
            }
            Message::OtpSent(res) => {
                self.processing = false;
                match res {
                    Ok(()) => {
                        if let Step::Form = self.step {
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
                let Step::Otp(code) = &mut self.step else {
                    return Task::none();
                };
                let (task, request) = otp::update(code, self.processing, msg);
                return match request {
                    Some(otp::Request::Verify(code)) => {
                        self.processing = true;
                        self.error = None;
                        let session = ctx.session.clone();
                        Task::batch([
                            task,
                            Task::perform(
                                async move { session.verify_otp(&code).await },
                                Message::OtpVerified,
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
            Message::OtpVerified(_) if !matches!(self.step, Step::Otp(_)) => {
                tracing::debug!("Ignoring a verification answered after leaving the code step");
            }
            Message::OtpVerified(res) => match res {
                Ok(()) => {
                    let session = ctx.session.clone();
                    let data = self.form.data();
                    return Task::perform(
                        async move { session.register(data).await },
                        Message::Registered,
                    );
                }
                Err(e) => {
                    tracing::warn!("Otp verification failed: {}", e);
                    self.processing = false;
                    self.error = Some(e.user_message());
                }
            },
            Message::Registered(res) => {
                self.processing = false;
                match res {
                    Ok(_) => {
                        self.interrupt();
                        return Task::done(Message::Navigate(Route::Dashboard));
                    }
                    Err(e) => {
                        tracing::error!("Account creation failed: {}", e);
                        self.error = Some(REGISTER_FAILED);
                    }
                }
            }
            Message::View(ViewMessage::BackToForm) => {
                if self.processing {
                    return Task::none();
                }
                self.interrupt();
                self.step = Step::Form;
                self.error = None;
            }
            Message::View(ViewMessage::Login) => {
                return Task::done(Message::Navigate(Route::Login));
            }
            Message::View(msg) => self.edit(msg),
            // Handled by the router.
            Message::Navigate(_) => {}
        }
        Task::none()
    }

    fn edit(&mut self, message: ViewMessage) {
        let (value, input) = match message {
            ViewMessage::NomEdited(v) => (v, &mut self.form.nom),
            ViewMessage::PrenomEdited(v) => (v, &mut self.form.prenom),
            ViewMessage::PhoneEdited(v) => (v, &mut self.form.telephone),
            ViewMessage::EmailEdited(v) => (v, &mut self.form.email),
            ViewMessage::PasswordEdited(v) => (v, &mut self.form.password),
            ViewMessage::ConfirmationEdited(v) => (v, &mut self.form.confirmation),
            ViewMessage::ConditionsToggled(accepted) => {
                self.form.accept_conditions = accepted;
                return;
            }
            _ => return,
        };
        input.value = value;
        input.valid = true;
    }

    fn send_otp(&mut self, ctx: &Context) -> Task<Message> {
        self.processing = true;
        let session = ctx.session.clone();
        let phone = self.form.telephone.value.trim().to_string();
        Task::perform(
            async move { session.send_otp(&phone).await },
            Message::OtpSent,
        )
    }

    pub fn subscription(&self) -> Subscription<Message> {
        match &self.step {
            Step::Otp(code) => otp::subscription(code)
                .map(|msg| Message::View(ViewMessage::Otp(msg))),
            Step::Form => Subscription::none(),
        }
    }

    /// Stops the resend cooldown when the screen goes away.
    pub fn interrupt(&mut self) {
        if let Step::Otp(code) = &mut self.step {
            code.cancel();
        }
    }

    pub fn view(&self) -> Element<Message> {
        let content: Element<ViewMessage> = match &self.step {
            Step::Form => self.form_view(),
            Step::Otp(code) => Column::new()
                .spacing(20)
                .push(
                    otp::view(
                        code,
                        &self.form.telephone.value,
                        self.processing,
                        self.error,
                    )
                    .map(ViewMessage::Otp),
                )
                .push(
                    button::link("← Retour au formulaire")
                        .on_press_maybe((!self.processing).then_some(ViewMessage::BackToForm)),
                )
                .into(),
        };
        super::auth_layout(content).map(Message::View)
    }

    fn form_view(&self) -> Element<ViewMessage> {
        let f = &self.form;
        Column::new()
            .spacing(15)
            .align_x(Alignment::Center)
            .push(h2(BRAND).color(color::BLUE))
            .push(h4_bold("Créer un compte"))
            .push_maybe(self.error.map(notification::error))
            .push(
                Row::new()
                    .spacing(10)
                    .push(
                        form::Form::new("Votre nom", &f.nom, ViewMessage::NomEdited)
                            .label("Nom")
                            .warning("Le nom est requis"),
                    )
                    .push(
                        form::Form::new("Votre prénom", &f.prenom, ViewMessage::PrenomEdited)
                            .label("Prénom")
                            .warning("Le prénom est requis"),
                    ),
            )
            .push(
                form::Form::new("07 00 00 00 00", &f.telephone, ViewMessage::PhoneEdited)
                    .label("Numéro de téléphone")
                    .warning("Numéro de téléphone invalide"),
            )
            .push(
                form::Form::new_trimmed("exemple@email.com", &f.email, ViewMessage::EmailEdited)
                    .label("Email (optionnel)")
                    .warning("Adresse email invalide"),
            )
            .push(
                form::Form::new("Mot de passe", &f.password, ViewMessage::PasswordEdited)
                    .label("Mot de passe")
                    .secure()
                    .warning("Le mot de passe est requis"),
            )
            .push(
                form::Form::new(
                    "Confirmez le mot de passe",
                    &f.confirmation,
                    ViewMessage::ConfirmationEdited,
                )
                .label("Confirmation")
                .secure()
                .warning(PASSWORD_MISMATCH),
            )
            .push(
                CheckBox::new(
                    "J'accepte les conditions d'utilisation et la politique de confidentialité",
                    f.accept_conditions,
                )
                .on_toggle(ViewMessage::ConditionsToggled)
                .text_size(P2_SIZE)
                .width(Length::Fill),
            )
            .push(
                button::primary(
                    None,
                    if self.processing {
                        "Envoi du code..."
                    } else {
                        "Créer mon compte"
                    },
                )
                .width(Length::Fill)
                .on_press_maybe((!self.processing).then_some(ViewMessage::Submit)),
            )
            .push(
                Row::new()
                    .spacing(5)
                    .align_y(Alignment::Center)
                    .push(p2_regular("Déjà un compte ?").color(color::SLATE_600))
                    .push(button::link("Se connecter").on_press(ViewMessage::Login)),
            )
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::test_context;

    fn edit(screen: &mut Register, ctx: &Context, msg: ViewMessage) {
        let _ = screen.update(ctx, Message::View(msg));
    }

    fn filled() -> Register {
        let ctx = test_context();
        let mut screen = Register::new();
        edit(&mut screen, &ctx, ViewMessage::NomEdited("KOUADIO".into()));
        edit(&mut screen, &ctx, ViewMessage::PrenomEdited("Jean".into()));
        edit(&mut screen, &ctx, ViewMessage::PhoneEdited("07 00 00 00 00".into()));
        edit(&mut screen, &ctx, ViewMessage::PasswordEdited("secret".into()));
        edit(&mut screen, &ctx, ViewMessage::ConfirmationEdited("secret".into()));
        screen
    }

    #[test]
    fn form_is_checked_before_sending_code() {
        let ctx = test_context();
        let mut screen = filled();
        edit(&mut screen, &ctx, ViewMessage::ConfirmationEdited("other".into()));
        edit(&mut screen, &ctx, ViewMessage::Submit);
        assert_eq!(screen.error, Some(PASSWORD_MISMATCH));
        assert!(!screen.processing);

        edit(&mut screen, &ctx, ViewMessage::ConfirmationEdited("secret".into()));
        edit(&mut screen, &ctx, ViewMessage::Submit);
        assert_eq!(
            screen.error,
            Some("Vous devez accepter les conditions d'utilisation")
        );

        edit(&mut screen, &ctx, ViewMessage::ConditionsToggled(true));
        edit(&mut screen, &ctx, ViewMessage::Submit);
        assert_eq!(screen.error, None);
        assert!(screen.processing);
    }

    #[tokio::test]
    async fn otp_step_then_account_creation() {
        let ctx = test_context();
        let mut screen = filled();
        edit(&mut screen, &ctx, ViewMessage::ConditionsToggled(true));
        edit(&mut screen, &ctx, ViewMessage::Submit);
        let _ = screen.update(&ctx, Message::OtpSent(Ok(())));
        assert!(matches!(screen.step, Step::Otp(_)));

        let res = ctx.session.verify_otp("000000").await;
        let _ = screen.update(&ctx, Message::OtpVerified(res));
        assert_eq!(screen.error, Some("Code OTP incorrect"));

        let res = ctx.session.register(screen.form.data()).await;
        let _ = screen.update(&ctx, Message::Registered(res));
        assert_eq!(ctx.session.current().map(|i| i.prenom), Some("Jean".into()));

        edit(&mut screen, &ctx, ViewMessage::BackToForm);
        assert!(matches!(screen.step, Step::Form));
    }

    #[test]
    fn late_verification_is_ignored_on_the_form() {
        let ctx = test_context();
        let mut screen = filled();
        edit(&mut screen, &ctx, ViewMessage::ConditionsToggled(true));
        edit(&mut screen, &ctx, ViewMessage::Submit);
        let _ = screen.update(&ctx, Message::OtpSent(Ok(())));
        screen.processing = true;
        edit(&mut screen, &ctx, ViewMessage::BackToForm);
        assert!(matches!(screen.step, Step::Otp(_)));

        screen.processing = false;
        edit(&mut screen, &ctx, ViewMessage::BackToForm);
        assert!(matches!(screen.step, Step::Form));
        let _ = screen.update(&ctx, Message::OtpVerified(Ok(())));
        assert!(!screen.processing);
        assert_eq!(ctx.session.current(), None);
    }
}
