use iced::{Alignment, Length, Task};

use fractalis::{
    attachment::{Attachment, AttachmentError},
    lead::REDIRECT_DELAY,
    payment::PaymentMethod,
    product::{
        car::{CarInsurance, CarStep, Company, Driver, Energy, Term, VehicleType, SUCCESS_MESSAGE},
        format_amount, CURRENCY,
    },
    wizard::{Advance, Retreat, Wizard},
};
use fractalis_ui::{
    color,
    component::{button, card, notification, step_indicator, summary_line, text::*},
    widget::*,
};

use super::{choices, text_field, Context, Route};

#[derive(Debug, Clone)]
pub enum Message {
    View(ViewMessage),
    CarteGrisePicked(Result<Option<Attachment>, AttachmentError>),
    Navigate(Route),
}

#[derive(Debug, Clone)]
pub enum ViewMessage {
    VehicleTypeSelected(VehicleType),
    CompanySelected(Company),
    NomEdited(String),
    PrenomEdited(String),
    MarqueEdited(String),
    ModeleEdited(String),
    PuissanceEdited(String),
    PlaqueEdited(String),
    EnergySelected(Energy),
    PlacesEdited(String),
    DriverSelected(Driver),
    TermSelected(Term),
    DateEffetEdited(String),
    PickCarteGrise,
    PaymentSelected(PaymentMethod),
    Next,
    Previous,
    Confirm,
}

pub struct Car {
    wizard: Wizard<CarInsurance>,
    picking: bool,
    attachment_error: Option<&'static str>,
    /// Set once paid, the screen then waits for the redirection.
    confirmed: bool,
}

impl Default for Car {
    fn default() -> Self {
        Self::new()
    }
}

impl Car {
    pub fn new() -> Self {
        Self {
            wizard: Wizard::new(),
            picking: false,
            attachment_error: None,
            confirmed: false,
        }
    }

    pub fn update(&mut self, ctx: &Context, message: Message) -> Task<Message> {
        match message {
            Message::View(msg) => return self.on_view(ctx, msg),
            Message::CarteGrisePicked(res) => {
                self.picking = false;
                match res {
                    Ok(Some(attachment)) => {
                        tracing::info!("Carte grise attached: {}", attachment.file_name());
                        self.wizard.form.carte_grise = Some(attachment);
                        self.attachment_error = None;
                    }
                    Ok(None) => {}
                    Err(e) => {
                        tracing::warn!("Rejected carte grise: {}", e);
                        self.attachment_error = Some(e.user_message());
                    }
                }
            }
            // Handled by the router.
            Message::Navigate(_) => {}
        }
        Task::none()
    }

    fn on_view(&mut self, ctx: &Context, message: ViewMessage) -> Task<Message> {
        if self.confirmed {
            return Task::none();
        }
        let form = &mut self.wizard.form;
        match message {
            ViewMessage::VehicleTypeSelected(v) => form.select_vehicle_type(v),
            ViewMessage::CompanySelected(c) => form.company = Some(c),
            ViewMessage::NomEdited(v) => form.nom = v,
            ViewMessage::PrenomEdited(v) => form.prenom = v,
            ViewMessage::MarqueEdited(v) => form.marque = v,
            ViewMessage::ModeleEdited(v) => form.modele = v,
            ViewMessage::PuissanceEdited(v) => form.puissance = v,
            ViewMessage::PlaqueEdited(v) => form.plaque = v,
            ViewMessage::EnergySelected(e) => form.energie = Some(e),
            ViewMessage::PlacesEdited(v) => form.places = v,
            ViewMessage::DriverSelected(d) => form.securite = Some(d),
            ViewMessage::TermSelected(t) => form.duree = Some(t),
            ViewMessage::DateEffetEdited(v) => form.date_effet = v,
            ViewMessage::PaymentSelected(p) => form.payment = Some(p),
            ViewMessage::PickCarteGrise => {
                if !self.picking {
                    self.picking = true;
                    return Task::perform(
                        super::pick_attachment("Carte grise du véhicule"),
                        Message::CarteGrisePicked,
                    );
                }
            }
            ViewMessage::Next => match self.wizard.advance() {
                Advance::Moved(step) => tracing::debug!("Car subscription at {:?}", step),
                Advance::Blocked(violations) => {
                    tracing::debug!("Car step incomplete: {} violation(s)", violations.len())
                }
                Advance::AtEnd => {}
            },
            ViewMessage::Previous => {
                if let Retreat::Exit = self.wizard.retreat() {
                    return Task::done(Message::Navigate(Route::Dashboard));
                }
            }
            ViewMessage::Confirm => match self.wizard.confirm() {
                Ok(quote) => {
                    tracing::info!(
                        "Car insurance paid: {} {:?} {} {}",
                        quote.company.name(),
                        quote.vehicle_type,
                        quote.premium,
                        CURRENCY
                    );
                    self.confirmed = true;
                    let latency = ctx.session.latency();
                    return Task::perform(
                        async move { latency.wait(REDIRECT_DELAY).await },
                        |_| Message::Navigate(Route::Dashboard),
                    );
                }
                Err(e) => tracing::warn!("Car subscription not confirmed: {}", e),
            },
        }
        Task::none()
    }

    /// Header return, one step at a time like the "Retour" control.
    fn back(&self) -> Option<Message> {
        (!self.confirmed).then_some(Message::View(ViewMessage::Previous))
    }

    pub fn view<'a>(&'a self, ctx: &'a Context) -> Element<'a, Message> {
        let (position, total) = self.wizard.position();
        let content: Element<ViewMessage> = Column::new()
            .spacing(20)
            .push(step_indicator(
                position,
                total,
                self.wizard.descriptor().title,
            ))
            .push(if self.confirmed {
                Column::new()
                    .spacing(10)
                    .push(notification::success("Paiement confirmé", SUCCESS_MESSAGE))
                    .push(
                        p2_regular("Redirection vers le tableau de bord...")
                            .color(color::SLATE_600),
                    )
                    .into()
            } else {
                self.step_view()
            })
            .push_maybe((!self.confirmed).then(|| self.controls()))
            .into();

        super::layout(
            super::header(
                ctx,
                "Assurance Automobile",
                self.back(),
                None,
            ),
            content.map(Message::View),
        )
    }

    fn step_view(&self) -> Element<ViewMessage> {
        let form = &self.wizard.form;
        let hints = self.wizard.hints();
        match self.wizard.step() {
            CarStep::VehicleType => choices(
                &VehicleType::ALL,
                form.vehicle_type,
                3,
                |v| {
                    Column::new()
                        .spacing(5)
                        .align_x(Alignment::Center)
                        .width(Length::Fill)
                        .push(h1(vehicle_icon(v)))
                        .push(p1_bold(v.label()))
                        .push(caption(v.description()).color(color::SLATE_600))
                        .into()
                },
                ViewMessage::VehicleTypeSelected,
            )
            .into(),
            CarStep::Comparison => {
                let Some(vehicle) = form.vehicle_type else {
                    return notification::error("Choisissez d'abord un type de véhicule").into();
                };
                choices(
                    &Company::ALL,
                    form.company,
                    3,
                    move |c| {
                        c.advantages()
                            .iter()
                            .fold(
                                Column::new()
                                    .spacing(8)
                                    .push(h5_medium(c.name()))
                                    .push(
                                        h3(format!("{} {}", format_amount(c.premium(vehicle)), CURRENCY))
                                            .color(color::BLUE),
                                    )
                                    .push(caption("par an").color(color::SLATE_600)),
                                |col, advantage| {
                                    col.push(
                                        Row::new()
                                            .spacing(5)
                                            .push(p2_regular("✓").color(color::GREEN))
                                            .push(p2_regular(*advantage)),
                                    )
                                },
                            )
                            .into()
                    },
                    ViewMessage::CompanySelected,
                )
                .into()
            }
            CarStep::Personal => Row::new()
                .spacing(10)
                .push(text_field(
                    &hints,
                    "nom",
                    "Nom",
                    "Votre nom",
                    &form.nom,
                    "Le nom est requis",
                    ViewMessage::NomEdited,
                ))
                .push(text_field(
                    &hints,
                    "prenom",
                    "Prénom",
                    "Votre prénom",
                    &form.prenom,
                    "Le prénom est requis",
                    ViewMessage::PrenomEdited,
                ))
                .into(),
            CarStep::Vehicle => Column::new()
                .spacing(15)
                .push(
                    Row::new()
                        .spacing(10)
                        .push(text_field(
                            &hints,
                            "marque",
                            "Marque",
                            "Toyota",
                            &form.marque,
                            "La marque est requise",
                            ViewMessage::MarqueEdited,
                        ))
                        .push(text_field(
                            &hints,
                            "modele",
                            "Modèle",
                            "Corolla",
                            &form.modele,
                            "Le modèle est requis",
                            ViewMessage::ModeleEdited,
                        )),
                )
                .push(
                    Row::new()
                        .spacing(10)
                        .push(text_field(
                            &hints,
                            "puissance",
                            "Puissance",
                            "1.6L, 2.0L...",
                            &form.puissance,
                            "La puissance est requise",
                            ViewMessage::PuissanceEdited,
                        ))
                        .push(text_field(
                            &hints,
                            "places",
                            "Nombre de places",
                            "5",
                            &form.places,
                            "Nombre entre 1 et 60",
                            ViewMessage::PlacesEdited,
                        )),
                )
                .push(text_field(
                    &hints,
                    "plaque",
                    "Plaque d'immatriculation",
                    "AB-1234-CI",
                    &form.plaque,
                    "La plaque est requise",
                    ViewMessage::PlaqueEdited,
                ))
                .push(p2_medium("Énergie").color(color::SLATE_600))
                .push(choices(
                    &Energy::ALL,
                    form.energie,
                    4,
                    |e| p2_medium(e).into(),
                    ViewMessage::EnergySelected,
                ))
                .into(),
            CarStep::Insurance => Column::new()
                .spacing(15)
                .push(p2_medium("Sécurité").color(color::SLATE_600))
                .push(choices(
                    &Driver::ALL,
                    form.securite,
                    2,
                    |d| p2_medium(d.label()).into(),
                    ViewMessage::DriverSelected,
                ))
                .push(p2_medium("Durée").color(color::SLATE_600))
                .push(choices(
                    &Term::ALL,
                    form.duree,
                    3,
                    |t| p2_medium(t).into(),
                    ViewMessage::TermSelected,
                ))
                .push(text_field(
                    &hints,
                    "date_effet",
                    "Date d'effet",
                    "AAAA-MM-JJ",
                    &form.date_effet,
                    "Date au format AAAA-MM-JJ",
                    ViewMessage::DateEffetEdited,
                ))
                .push(super::attachment_field(
                    "Carte grise",
                    form.carte_grise.as_ref(),
                    self.attachment_error,
                    (!self.picking).then_some(ViewMessage::PickCarteGrise),
                ))
                .into(),
            CarStep::Summary => self.summary(),
            CarStep::Payment => {
                let premium = self.wizard.quote().map(|q| q.premium).unwrap_or_default();
                Column::new()
                    .spacing(15)
                    .push(
                        card::info(
                            Column::new()
                                .spacing(5)
                                .align_x(Alignment::Center)
                                .width(Length::Fill)
                                .push(p1_medium("Montant à payer"))
                                .push(h2(format!("{} {}", format_amount(premium), CURRENCY))),
                        )
                        .width(Length::Fill),
                    )
                    .push(h5_medium("Modes de paiement disponibles"))
                    .push(choices(
                        &PaymentMethod::ALL,
                        form.payment,
                        2,
                        |p| p2_medium(p).into(),
                        ViewMessage::PaymentSelected,
                    ))
                    .into()
            }
        }
    }

    fn summary(&self) -> Element<ViewMessage> {
        let form = &self.wizard.form;
        let quote = self.wizard.quote();
        let or_dash = |v: Option<&'static str>| v.unwrap_or("-");
        Column::new()
            .spacing(15)
            .push_maybe(quote.map(|q| {
                card::info(
                    Column::new()
                        .spacing(5)
                        .push(p1_bold(format!("Compagnie sélectionnée: {}", q.company.name())))
                        .push(
                            h3(format!("{} {} par an", format_amount(q.premium), CURRENCY))
                                .color(color::BLUE),
                        ),
                )
                .width(Length::Fill)
            }))
            .push(
                card::simple(
                    Column::new()
                        .spacing(8)
                        .push(h5_medium("Informations personnelles"))
                        .push(summary_line("Nom", format!("{} {}", form.prenom, form.nom)))
                        .push(summary_line(
                            "Type de véhicule",
                            or_dash(form.vehicle_type.map(|v| v.label())),
                        ))
                        .push(h5_medium("Véhicule"))
                        .push(summary_line("Véhicule", format!("{} {}", form.marque, form.modele)))
                        .push(summary_line("Plaque", &form.plaque))
                        .push(summary_line("Énergie", or_dash(form.energie.map(|e| e.label()))))
                        .push(summary_line("Puissance", format!("{} CV", form.puissance)))
                        .push(summary_line("Places", &form.places))
                        .push(h5_medium("Contrat"))
                        .push(summary_line("Durée", or_dash(form.duree.map(|t| t.label()))))
                        .push(summary_line("Date d'effet", &form.date_effet))
                        .push(summary_line("Sécurité", or_dash(form.securite.map(|d| d.label()))))
                        .push(summary_line(
                            "Carte grise",
                            form.carte_grise
                                .as_ref()
                                .map(|a| a.file_name())
                                .unwrap_or("-"),
                        )),
                )
                .width(Length::Fill),
            )
            .into()
    }

    fn controls(&self) -> Element<ViewMessage> {
        let forward = if self.wizard.is_last() {
            button::success(None, "Payer maintenant")
                .width(Length::Fixed(200.0))
                .on_press_maybe(self.wizard.can_confirm().then_some(ViewMessage::Confirm))
        } else {
            button::primary(
                None,
                if self.wizard.step() == CarStep::Summary {
                    "Procéder au paiement"
                } else {
                    "Suivant"
                },
            )
            .width(Length::Fixed(200.0))
            .on_press_maybe(self.wizard.can_advance().then_some(ViewMessage::Next))
        };
        Row::new()
            .push(
                button::secondary(None, "Retour")
                    .width(Length::Fixed(200.0))
                    .on_press(ViewMessage::Previous),
            )
            .push(iced::widget::Space::with_width(Length::Fill))
            .push(forward)
            .into()
    }
}

fn vehicle_icon(vehicle: VehicleType) -> &'static str {
    match vehicle {
        VehicleType::Moto => "🏍",
        VehicleType::Voiture => "🚗",
        VehicleType::Utilitaire => "🚚",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::test_context;

    fn send(screen: &mut Car, ctx: &Context, msg: ViewMessage) {
        let _ = screen.update(ctx, Message::View(msg));
    }

    #[test]
    fn comparison_follows_vehicle_type() {
        let ctx = test_context();
        let mut screen = Car::new();
        send(&mut screen, &ctx, ViewMessage::Next);
        assert_eq!(screen.wizard.step(), CarStep::VehicleType);

        send(&mut screen, &ctx, ViewMessage::VehicleTypeSelected(VehicleType::Moto));
        send(&mut screen, &ctx, ViewMessage::Next);
        send(&mut screen, &ctx, ViewMessage::CompanySelected(Company::Sunu));
        assert_eq!(screen.wizard.quote().map(|q| q.premium), Some(22_000));

        send(&mut screen, &ctx, ViewMessage::Previous);
        send(&mut screen, &ctx, ViewMessage::VehicleTypeSelected(VehicleType::Voiture));
        assert_eq!(screen.wizard.form.company, None);
        send(&mut screen, &ctx, ViewMessage::Next);
        send(&mut screen, &ctx, ViewMessage::Next);
        assert_eq!(screen.wizard.step(), CarStep::Comparison);
    }

    #[test]
    fn rejected_document_is_reported() {
        let ctx = test_context();
        let mut screen = Car::new();
        let _ = screen.update(
            &ctx,
            Message::CarteGrisePicked(Err(AttachmentError::TooLarge(6 * 1024 * 1024))),
        );
        assert_eq!(
            screen.attachment_error,
            Some("Fichier trop volumineux (Max: 5MB)")
        );
        assert_eq!(screen.wizard.form.carte_grise, None);
    }

    #[test]
    fn payment_locks_the_screen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("carte.png");
        std::fs::write(&path, b"png").unwrap();

        let ctx = test_context();
        let mut screen = Car::new();
        let steps = [
            ViewMessage::VehicleTypeSelected(VehicleType::Voiture),
            ViewMessage::Next,
            ViewMessage::CompanySelected(Company::Nsia),
            ViewMessage::Next,
            ViewMessage::NomEdited("KOUADIO".into()),
            ViewMessage::PrenomEdited("Jean".into()),
            ViewMessage::Next,
            ViewMessage::MarqueEdited("Toyota".into()),
            ViewMessage::ModeleEdited("Corolla".into()),
            ViewMessage::PuissanceEdited("8".into()),
            ViewMessage::PlaqueEdited("AB-1234-CI".into()),
            ViewMessage::EnergySelected(Energy::Essence),
            ViewMessage::PlacesEdited("5".into()),
            ViewMessage::Next,
            ViewMessage::DriverSelected(Driver::Principal),
            ViewMessage::TermSelected(Term::OneYear),
            ViewMessage::DateEffetEdited("2025-07-01".into()),
        ];
        for msg in steps {
            send(&mut screen, &ctx, msg);
        }
        assert_eq!(screen.wizard.step(), CarStep::Insurance);
        let _ = screen.update(
            &ctx,
            Message::CarteGrisePicked(Attachment::from_path(path).map(Some)),
        );
        send(&mut screen, &ctx, ViewMessage::Next);
        send(&mut screen, &ctx, ViewMessage::Next);
        assert_eq!(screen.wizard.step(), CarStep::Payment);

        send(&mut screen, &ctx, ViewMessage::Confirm);
        assert!(!screen.confirmed);
        send(&mut screen, &ctx, ViewMessage::PaymentSelected(PaymentMethod::Flooz));
        send(&mut screen, &ctx, ViewMessage::Confirm);
        assert!(screen.confirmed);

        send(&mut screen, &ctx, ViewMessage::Previous);
        assert_eq!(screen.wizard.step(), CarStep::Payment);
        assert!(screen.back().is_none());
    }

    #[test]
    fn header_back_walks_one_step() {
        let ctx = test_context();
        let mut screen = Car::new();
        for msg in [
            ViewMessage::VehicleTypeSelected(VehicleType::Utilitaire),
            ViewMessage::Next,
            ViewMessage::CompanySelected(Company::Saham),
            ViewMessage::Next,
            ViewMessage::NomEdited("KOUADIO".into()),
        ] {
            send(&mut screen, &ctx, msg);
        }
        assert_eq!(screen.wizard.step(), CarStep::Personal);

        for expected in [CarStep::Comparison, CarStep::VehicleType] {
            let back = screen.back().unwrap();
            let _ = screen.update(&ctx, back);
            assert_eq!(screen.wizard.step(), expected);
        }
        assert_eq!(screen.wizard.form.nom, "KOUADIO");
        assert_eq!(screen.wizard.form.company, Some(Company::Saham));
    }
}
