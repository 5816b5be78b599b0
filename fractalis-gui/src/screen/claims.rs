use iced::{widget::text_editor, Alignment, Length, Task};

use fractalis::{
    attachment::{Attachment, AttachmentError},
    lead::{self, ClaimForm, LeadError, Receipt, REDIRECT_DELAY},
};
use fractalis_ui::{
    color,
    component::{button, card, notification, text::*},
    widget::*,
};

use super::{attachment_field, editor_text, text_area, text_field, Context, Route};

const SUBMIT_FAILED: &str = "Veuillez remplir correctement tous les champs obligatoires";

/// Documents joined to a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    Assurance,
    Permis,
    CarteGrise,
}

impl Document {
    const ALL: [Document; 3] = [Document::Assurance, Document::Permis, Document::CarteGrise];

    fn label(&self) -> &'static str {
        match self {
            Self::Assurance => "Photo de l'assurance",
            Self::Permis => "Photo du permis de conduire",
            Self::CarteGrise => "Photo de la carte grise",
        }
    }
}

#[derive(Debug, Clone)]
pub enum Message {
    View(ViewMessage),
    Picked(Document, Result<Option<Attachment>, AttachmentError>),
    Submitted(Result<Receipt, LeadError>),
    Navigate(Route),
}

#[derive(Debug, Clone)]
pub enum ViewMessage {
    NomEdited(String),
    PrenomEdited(String),
    PhoneEdited(String),
    DateEdited(String),
    LieuEdited(String),
    CirconstancesEdited(text_editor::Action),
    Pick(Document),
    Submit,
    Cancel,
}

pub struct Claims {
    form: ClaimForm,
    circonstances: text_editor::Content,
    picking: Option<Document>,
    attachment_error: Option<(Document, &'static str)>,
    processing: bool,
    error: Option<&'static str>,
    receipt: Option<Receipt>,
}

impl Default for Claims {
    fn default() -> Self {
        Self::new()
    }
}

impl Claims {
    pub fn new() -> Self {
        Self {
            form: ClaimForm::default(),
            circonstances: text_editor::Content::new(),
            picking: None,
            attachment_error: None,
            processing: false,
            error: None,
            receipt: None,
        }
    }

    fn document(&mut self, document: Document) -> &mut Option<Attachment> {
        match document {
            Document::Assurance => &mut self.form.photo_assurance,
            Document::Permis => &mut self.form.photo_permis,
            Document::CarteGrise => &mut self.form.photo_carte_grise,
        }
    }

    pub fn update(&mut self, ctx: &Context, message: Message) -> Task<Message> {
        match message {
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
                    lead::submit_claim(self.form.clone(), ctx.session.latency()),
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
                        tracing::warn!("Claim rejected: {}", e);
                        self.error = Some(SUBMIT_FAILED);
                    }
                }
            }
            Message::Picked(document, res) => {
                self.picking = None;
                match res {
                    Ok(Some(attachment)) => {
                        *self.document(document) = Some(attachment);
                        self.attachment_error = None;
                    }
                    Ok(None) => {}
                    Err(e) => {
                        tracing::warn!("Rejected {:?}: {}", document, e);
                        self.attachment_error = Some((document, e.user_message()));
                    }
                }
            }
            Message::View(ViewMessage::Pick(document)) => {
                if self.picking.is_none() && !self.processing {
                    self.picking = Some(document);
                    return Task::perform(super::pick_attachment(document.label()), move |res| {
                        Message::Picked(document, res)
                    });
                }
            }
            Message::View(ViewMessage::Cancel) => {
                if self.cancel().is_some() {
                    return Task::done(Message::Navigate(Route::Dashboard));
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
                    ViewMessage::DateEdited(v) => self.form.date_accident = v,
                    ViewMessage::LieuEdited(v) => self.form.lieu_accident = v,
                    ViewMessage::CirconstancesEdited(action) => {
                        self.circonstances.perform(action);
                        self.form.circonstances = editor_text(&self.circonstances);
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
            None => self.form_view(),
        };
        super::layout(
            super::header(
                ctx,
                "Déclarer un Sinistre",
                self.cancel().map(Message::View),
                None,
            ),
            content.map(Message::View),
        )
    }

    fn form_view(&self) -> Element<ViewMessage> {
        let form = &self.form;
        let violations = form.violations();
        let documents = Document::ALL
            .iter()
            .fold(Column::new().spacing(15), |col, document| {
                let attachment = match document {
                    Document::Assurance => form.photo_assurance.as_ref(),
                    Document::Permis => form.photo_permis.as_ref(),
                    Document::CarteGrise => form.photo_carte_grise.as_ref(),
                };
                col.push(attachment_field(
                    document.label(),
                    attachment,
                    self.attachment_error
                        .filter(|(d, _)| d == document)
                        .map(|(_, e)| e),
                    self.picking
                        .is_none()
                        .then_some(ViewMessage::Pick(*document)),
                ))
            });

        Column::new()
            .spacing(20)
            .push(
                Column::new()
                    .spacing(5)
                    .align_x(Alignment::Center)
                    .width(Length::Fill)
                    .push(h2("Déclaration de Sinistre"))
                    .push(
                        p1_regular("Remplissez ce formulaire pour déclarer votre sinistre automobile")
                            .color(color::SLATE_600),
                    ),
            )
            .push_maybe(self.error.map(notification::error))
            .push(
                card::simple(
                    Column::new()
                        .spacing(15)
                        .push(h4_bold("1. Informations personnelles"))
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
                        .push(h4_bold("2. Détails de l'accident"))
                        .push(
                            Row::new()
                                .spacing(10)
                                .push(text_field(
                                    &violations,
                                    "date_accident",
                                    "Date de l'accident",
                                    "AAAA-MM-JJ",
                                    &form.date_accident,
                                    "Date au format AAAA-MM-JJ",
                                    ViewMessage::DateEdited,
                                ))
                                .push(text_field(
                                    &violations,
                                    "lieu_accident",
                                    "Lieu de l'accident",
                                    "Lieu de l'accident",
                                    &form.lieu_accident,
                                    "Le lieu est requis",
                                    ViewMessage::LieuEdited,
                                )),
                        )
                        .push(text_area(
                            "Circonstances de l'accident",
                            "Décrivez les circonstances de l'accident en détail...",
                            &self.circonstances,
                            true,
                            ViewMessage::CirconstancesEdited,
                        ))
                        .push(h4_bold("3. Documents requis"))
                        .push(documents),
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
                                "Envoyer la déclaration"
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::test_context;

    fn send(screen: &mut Claims, ctx: &Context, msg: ViewMessage) {
        let _ = screen.update(ctx, Message::View(msg));
    }

    #[tokio::test]
    async fn claim_is_acknowledged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        std::fs::write(&path, b"jpg").unwrap();

        let ctx = test_context();
        let mut screen = Claims::new();
        for msg in [
            ViewMessage::NomEdited("KOUADIO".into()),
            ViewMessage::PrenomEdited("Jean".into()),
            ViewMessage::PhoneEdited("0700000000".into()),
            ViewMessage::DateEdited("2025-01-15".into()),
            ViewMessage::LieuEdited("Abidjan".into()),
        ] {
            send(&mut screen, &ctx, msg);
        }
        screen.form.circonstances = "Collision à un carrefour".into();

        send(&mut screen, &ctx, ViewMessage::Submit);
        assert_eq!(screen.error, Some(SUBMIT_FAILED));
        assert!(!screen.processing);
        assert!(screen.cancel().is_some());

        for document in Document::ALL {
            let _ = screen.update(
                &ctx,
                Message::Picked(document, Attachment::from_path(&path).map(Some)),
            );
        }
        send(&mut screen, &ctx, ViewMessage::Submit);
        assert!(screen.processing);
        assert_eq!(screen.error, None);
        assert!(screen.cancel().is_none());

        let res = lead::submit_claim(screen.form.clone(), ctx.session.latency()).await;
        let _ = screen.update(&ctx, Message::Submitted(res));
        assert!(!screen.processing);
        assert_eq!(
            screen.receipt.as_ref().map(|r| r.kind),
            Some(lead::LeadKind::Claim)
        );

        assert!(screen.cancel().is_none());

        // The form is frozen once acknowledged.
        send(&mut screen, &ctx, ViewMessage::NomEdited("X".into()));
        assert_eq!(screen.form.nom, "KOUADIO");
    }

    #[test]
    fn picker_errors_stay_on_their_document() {
        let ctx = test_context();
        let mut screen = Claims::new();
        send(&mut screen, &ctx, ViewMessage::Pick(Document::Permis));
        assert_eq!(screen.picking, Some(Document::Permis));
        let _ = screen.update(
            &ctx,
            Message::Picked(
                Document::Permis,
                Err(AttachmentError::UnsupportedFormat("pdf".into())),
            ),
        );
        assert_eq!(screen.picking, None);
        assert_eq!(
            screen.attachment_error,
            Some((Document::Permis, "Format non supporté (JPG, PNG)"))
        );
        assert_eq!(screen.form.photo_permis, None);
    }
}
