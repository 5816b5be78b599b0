use iced::{widget::text_editor, Alignment, Length, Task};

use fractalis::{
    contact::OPENING_HOURS,
    lead::{
        self, ComplaintForm, LeadError, Motif, Receipt, DESCRIPTION_MAX_CHARS,
        DESCRIPTION_MIN_CHARS, REDIRECT_DELAY,
    },
};
use fractalis_ui::{
    color,
    component::{button, card, notification, summary_line, text::*},
    widget::*,
};

use super::{choices, editor_text, text_area, text_field, Context, Route};

const SUBMIT_FAILED: &str = "Veuillez remplir correctement tous les champs obligatoires";

const ADVICE: &[&str] = &[
    "Soyez précis dans votre description",
    "Mentionnez votre numéro de contrat si applicable",
    "Joignez des documents si nécessaire",
    "Vérifiez vos coordonnées",
];

#[derive(Debug, Clone)]
pub enum Message {
    View(ViewMessage),
    Submitted(Result<Receipt, LeadError>),
    Navigate(Route),
}

#[derive(Debug, Clone)]
pub enum ViewMessage {
    NomEdited(String),
    PrenomEdited(String),
    PhoneEdited(String),
    MotifSelected(Motif),
    DescriptionEdited(text_editor::Action),
    Submit,
    Cancel,
}

pub struct Complaints {
    form: ComplaintForm,
    description: text_editor::Content,
    processing: bool,
    error: Option<&'static str>,
    receipt: Option<Receipt>,
}

impl Default for Complaints {
    fn default() -> Self {
        Self::new()
    }
}

impl Complaints {
    pub fn new() -> Self {
        Self {
            form: ComplaintForm::default(),
            description: text_editor::Content::new(),
            processing: false,
            error: None,
            receipt: None,
        }
    }

    pub fn update(&mut self, ctx: &Context, message: Message) -> Task<Message> {
        match message {
            Message::View(ViewMessage::Cancel) => {
                if self.cancel().is_some() {
                    return Task::done(Message::Navigate(Route::Dashboard));
                }
            }
            Message::View(ViewMessage::Submit) => {
                if self.processing || self.receipt.is_some() {
                    return Task::none();
                }
                if !self.form.violations().is_empty() {
                    self.error = Some(SUBMIT_FAILED);
                    return Task::none();
                }
                self.processing = true;
                self.error = None;
                return Task::perform(
                    lead::submit_complaint(self.form.clone(), ctx.session.latency()),
                    Message::Submitted,
                );
            }
            Message::Submitted(res) => {
                self.processing = false;
                match res {
                    Ok(receipt) => {
                        self.receipt = Some(receipt);
                        let latency = ctx.session.latency();
                        return Task::perform(
                            async move { latency.wait(REDIRECT_DELAY).await },
                            |_| Message::Navigate(Route::Dashboard),
                        );
                    }
                    Err(e) => {
                        tracing::warn!("Complaint rejected: {}", e);
                        self.error = Some(SUBMIT_FAILED);
                    }
                }
            }
            Message::View(msg) => {
                if self.processing || self.receipt.is_some() {
                    return Task::none();
                }
                match msg {
                    ViewMessage::NomEdited(v) => self.form.nom = v,
                    ViewMessage::PrenomEdited(v) => self.form.prenom = v,
                    ViewMessage::PhoneEdited(v) => self.form.telephone = v,
                    ViewMessage::MotifSelected(m) => self.form.motif = Some(m),
                    ViewMessage::DescriptionEdited(action) => {
                        self.description.perform(action);
                        self.form.description = editor_text(&self.description);
                    }
                    _ => {}
                }
            }
            // Handled by the router.
            Message::Navigate(_) => {}
        }
        Task::none()
    }

    /// Leaving is not offered once the form is sent.
    fn cancel(&self) -> Option<ViewMessage> {
        (!self.processing && self.receipt.is_none()).then_some(ViewMessage::Cancel)
    }

    pub fn view<'a>(&'a self, ctx: &'a Context) -> Element<'a, Message> {
        let content: Element<ViewMessage> = match &self.receipt {
            Some(receipt) => Column::new()
                .spacing(20)
                .push(notification::success(
                    receipt.kind.success_title(),
                    receipt.kind.success_message(),
                ))
                .push(
                    p2_regular("Redirection vers le tableau de bord...").color(color::SLATE_600),
                )
                .into(),
            None => Row::new()
                .spacing(20)
                .push(
                    Container::new(self.form_view())
                        .width(Length::FillPortion(2)),
                )
                .push(
                    Container::new(sidebar(&ctx.contact_phone))
                        .width(Length::FillPortion(1)),
                )
                .into(),
        };
        super::layout(
            super::header(
                ctx,
                "Plaintes et Réclamations",
                self.cancel().map(Message::View),
                None,
            ),
            content.map(Message::View),
        )
    }

    fn form_view(&self) -> Element<ViewMessage> {
        let form = &self.form;
        let violations = form.violations();
        let length = form.description_len();
        let length_valid = length == 0
            || (DESCRIPTION_MIN_CHARS..=DESCRIPTION_MAX_CHARS).contains(&length);

        Column::new()
            .spacing(20)
            .push(
                Column::new()
                    .spacing(5)
                    .align_x(Alignment::Center)
                    .width(Length::Fill)
                    .push(h2("Exprimez vos préoccupations"))
                    .push(
                        p1_regular("Nous sommes à votre écoute pour améliorer nos services")
                            .color(color::SLATE_600),
                    ),
            )
            .push_maybe(self.error.map(notification::error))
            .push(
                card::simple(
                    Column::new()
                        .spacing(15)
                        .push(h4_bold("1. Vos informations"))
                        .push(
                            Row::new()
                                .spacing(10)
                                .push(text_field(
                                    &violations,
                                    "nom",
                                    "Nom",
                                    "Votre nom",
                                    &form.nom,
                                    "Le nom est requis",
                                    ViewMessage::NomEdited,
                                ))
                                .push(text_field(
                                    &violations,
                                    "prenom",
                                    "Prénom",
                                    "Votre prénom",
                                    &form.prenom,
                                    "Le prénom est requis",
                                    ViewMessage::PrenomEdited,
                                )),
                        )
                        .push(text_field(
                            &violations,
                            "telephone",
                            "Numéro de téléphone",
                            "+225 XX XX XX XX XX",
                            &form.telephone,
                            "Numéro de téléphone invalide",
                            ViewMessage::PhoneEdited,
                        ))
                        .push(h4_bold("2. Votre demande"))
                        .push(p2_medium("Type de demande *").color(color::SLATE_600))
                        .push(choices(
                            &Motif::ALL,
                            form.motif,
                            3,
                            |m| p2_medium(m.label()).into(),
                            ViewMessage::MotifSelected,
                        ))
                        .push(text_area(
                            "Description de votre demande *",
                            "Décrivez votre demande en détail. Plus vous serez précis, mieux nous pourrons vous aider...",
                            &self.description,
                            length_valid,
                            ViewMessage::DescriptionEdited,
                        ))
                        .push(
                            caption(format!(
                                "Minimum {} caractères - {}/{}",
                                DESCRIPTION_MIN_CHARS, length, DESCRIPTION_MAX_CHARS
                            ))
                            .color(if length_valid {
                                color::SLATE_600
                            } else {
                                color::RED
                            }),
                        ),
                )
                .padding(25)
                .width(Length::Fill),
            )
            .push(
                Row::new()
                    .push(
                        button::secondary(None, "Annuler")
                            .width(Length::Fixed(200.0))
                            .on_press_maybe(self.cancel()),
                    )
                    .push(iced::widget::Space::with_width(Length::Fill))
                    .push(
                        button::primary(
                            None,
                            if self.processing {
                                "Envoi en cours..."
                            } else {
                                "Envoyer le message"
                            },
                        )
                        .width(Length::Fixed(250.0))
                        .on_press_maybe(
                            (!self.processing && violations.is_empty())
                                .then_some(ViewMessage::Submit),
                        ),
                    ),
            )
            .into()
    }
}

fn sidebar<'a>(phone: &'a str) -> Column<'a, ViewMessage> {
    let response_times = Motif::ALL
        .iter()
        .filter_map(|m| m.response_time().map(|t| (m.label(), t)))
        .fold(Column::new().spacing(8), |col, (motif, time)| {
            col.push(summary_line(motif, time))
        });

    Column::new()
        .spacing(20)
        .push(
            card::info(
                Column::new()
                    .spacing(10)
                    .push(h5_medium("Temps de réponse"))
                    .push(response_times),
            )
            .width(Length::Fill),
        )
        .push(
            card::success(
                Column::new()
                    .spacing(8)
                    .push(h5_medium("Contact direct"))
                    .push(p2_regular("Pour une urgence, contactez-nous directement:"))
                    .push(summary_line("Téléphone", phone))
                    .push_maybe(
                        OPENING_HOURS
                            .first()
                            .map(|(days, hours)| summary_line(days, hours)),
                    ),
            )
            .width(Length::Fill),
        )
        .push(
            card::warning(ADVICE.iter().fold(
                Column::new().spacing(5).push(h5_medium("Conseils")),
                |col, advice| col.push(p2_regular(format!("• {}", advice))),
            ))
            .width(Length::Fill),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::test_context;

    fn send(screen: &mut Complaints, ctx: &Context, msg: ViewMessage) {
        let _ = screen.update(ctx, Message::View(msg));
    }

    #[tokio::test]
    async fn short_description_blocks_submission() {
        let ctx = test_context();
        let mut screen = Complaints::new();
        for msg in [
            ViewMessage::NomEdited("KOUADIO".into()),
            ViewMessage::PrenomEdited("Jean".into()),
            ViewMessage::PhoneEdited("07 00 00 00 00".into()),
            ViewMessage::MotifSelected(Motif::Suggestion),
        ] {
            send(&mut screen, &ctx, msg);
        }
        screen.form.description = "Trop court".into();
        send(&mut screen, &ctx, ViewMessage::Submit);
        assert_eq!(screen.error, Some(SUBMIT_FAILED));
        assert!(!screen.processing);

        screen.form.description = "Merci d'ajouter le paiement par carte bancaire.".into();
        send(&mut screen, &ctx, ViewMessage::Submit);
        assert!(screen.processing);
        assert!(screen.cancel().is_none());

        let res = lead::submit_complaint(screen.form.clone(), ctx.session.latency()).await;
        let _ = screen.update(&ctx, Message::Submitted(res));
        assert_eq!(
            screen.receipt.as_ref().map(|r| r.kind),
            Some(lead::LeadKind::Complaint)
        );
        send(&mut screen, &ctx, ViewMessage::Submit);
        assert!(!screen.processing);
        assert!(screen.cancel().is_none());
    }
}
