use iced::{Alignment, Length, Task};

use fractalis::{
    lead::REDIRECT_DELAY,
    payment::PaymentMethod,
    product::{
        education::{
            monthly_payment, total_price, Duration, EducationInsurance, EducationStep, Formula,
            PaymentMode, SUCCESS_MESSAGE,
        },
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
    Navigate(Route),
}

#[derive(Debug, Clone)]
pub enum ViewMessage {
    NomEdited(String),
    PrenomEdited(String),
    PhoneEdited(String),
    BeneficiaireEdited(String),
    FormulaSelected(Formula),
    DurationSelected(Duration),
    PaymentModeSelected(PaymentMode),
    PaymentSelected(PaymentMethod),
    Next,
    Previous,
    Confirm,
}

pub struct Education {
    wizard: Wizard<EducationInsurance>,
    confirmed: bool,
}

impl Default for Education {
    fn default() -> Self {
        Self::new()
    }
}

impl Education {
    pub fn new() -> Self {
        Self {
            wizard: Wizard::new(),
            confirmed: false,
        }
    }

    pub fn update(&mut self, ctx: &Context, message: Message) -> Task<Message> {
        let Message::View(message) = message else {
            // Navigation is handled by the router.
            return Task::none();
        };
        if self.confirmed {
            return Task::none();
        }
        match message {
            ViewMessage::NomEdited(v) => self.wizard.form.nom = v,
            ViewMessage::PrenomEdited(v) => self.wizard.form.prenom = v,
            ViewMessage::PhoneEdited(v) => self.wizard.form.telephone = v,
            ViewMessage::BeneficiaireEdited(v) => self.wizard.form.beneficiaire = v,
            ViewMessage::FormulaSelected(f) => self.wizard.form.formula = Some(f),
            ViewMessage::DurationSelected(d) => self.wizard.form.duration = Some(d),
            ViewMessage::PaymentModeSelected(m) => self.wizard.form.payment_mode = Some(m),
            ViewMessage::PaymentSelected(p) => self.wizard.form.payment = Some(p),
            ViewMessage::Next => {
                if let Advance::Moved(step) = self.wizard.advance() {
                    tracing::debug!("Education subscription at {:?}", step);
                }
            }
            ViewMessage::Previous => {
                if let Retreat::Exit = self.wizard.retreat() {
                    return Task::done(Message::Navigate(Route::Dashboard));
                }
            }
            ViewMessage::Confirm => match self.wizard.confirm() {
                Ok(quote) => {
                    tracing::info!(
                        "Education contract subscribed: {} over {} years, {} {}",
                        quote.formula.name(),
                        quote.duration.years(),
                        quote.amount_due(self.wizard.form.payment_mode),
                        CURRENCY
                    );
                    self.confirmed = true;
                    let latency = ctx.session.latency();
                    return Task::perform(
                        async move { latency.wait(REDIRECT_DELAY).await },
                        |_| Message::Navigate(Route::Dashboard),
                    );
                }
                Err(e) => tracing::warn!("Education subscription not confirmed: {}", e),
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
                    .push(notification::success("Contrat souscrit", SUCCESS_MESSAGE))
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
                "Assurance Éducation",
                self.back(),
                None,
            ),
            content.map(Message::View),
        )
    }

    fn step_view(&self) -> Element<ViewMessage> {
        let form = &self.wizard.form;
        match self.wizard.step() {
            EducationStep::Subscription => {
                let hints = self.wizard.hints();
                Column::new()
                    .spacing(15)
                    .push(
                        card::info(p2_regular(
                            "Préparez l'avenir de vos enfants: l'assurance éducation garantit \
                             le financement de leurs études quoi qu'il arrive.",
                        ))
                        .width(Length::Fill),
                    )
                    .push(
                        Row::new()
                            .spacing(10)
                            .push(text_field(
                                &hints,
                                "nom",
                                "Nom du souscripteur",
                                "Votre nom",
                                &form.nom,
                                "Le nom est requis",
                                ViewMessage::NomEdited,
                            ))
                            .push(text_field(
                                &hints,
                                "prenom",
                                "Prénom du souscripteur",
                                "Votre prénom",
                                &form.prenom,
                                "Le prénom est requis",
                                ViewMessage::PrenomEdited,
                            )),
                    )
                    .push(text_field(
                        &hints,
                        "telephone",
                        "Numéro de téléphone",
                        "07 00 00 00 00",
                        &form.telephone,
                        "Numéro de téléphone invalide",
                        ViewMessage::PhoneEdited,
                    ))
                    .push(text_field(
                        &hints,
                        "beneficiaire",
                        "Bénéficiaire (enfant)",
                        "Nom de l'enfant",
                        &form.beneficiaire,
                        "Le bénéficiaire est requis",
                        ViewMessage::BeneficiaireEdited,
                    ))
                    .into()
            }
            EducationStep::Formula => choices(
                &Formula::ALL,
                form.formula,
                2,
                |f| {
                    f.benefits()
                        .iter()
                        .fold(
                            Column::new()
                                .spacing(8)
                                .push(
                                    Row::new()
                                        .align_y(Alignment::Center)
                                        .push(h4_bold(f.name()).width(Length::Fill))
                                        .push_maybe(f.is_popular().then(|| {
                                            card::warning(caption("Populaire")).padding(5)
                                        })),
                                )
                                .push(
                                    h3(format!("{} {}", format_amount(f.base_price()), CURRENCY))
                                        .color(color::BLUE),
                                ),
                            |col, benefit| {
                                col.push(
                                    Row::new()
                                        .spacing(5)
                                        .push(p2_regular("✓").color(color::GREEN))
                                        .push(p2_regular(*benefit)),
                                )
                            },
                        )
                        .into()
                },
                ViewMessage::FormulaSelected,
            )
            .into(),
            EducationStep::Duration => {
                let Some(formula) = form.formula else {
                    return notification::error("Choisissez d'abord une formule").into();
                };
                Column::new()
                    .spacing(15)
                    .push(
                        p2_regular("Plus la durée est longue, plus vous économisez")
                            .color(color::SLATE_600),
                    )
                    .push(choices(
                        &Duration::ALL,
                        form.duration,
                        3,
                        move |d| {
                            let total = total_price(formula, d);
                            Column::new()
                                .spacing(8)
                                .align_x(Alignment::Center)
                                .width(Length::Fill)
                                .push(h4_bold(d.label()))
                                .push(
                                    h3(format!("{} {}", format_amount(total), CURRENCY))
                                        .color(color::BLUE),
                                )
                                .push(caption("Total du contrat").color(color::SLATE_600))
                                .push_maybe(d.savings_percent().map(|savings| {
                                    card::success(caption(format!("Économie de {}%", savings)))
                                        .padding(5)
                                }))
                                .push(caption("Paiement mensuel:").color(color::SLATE_600))
                                .push(p2_medium(format!(
                                    "{} {}",
                                    format_amount(monthly_payment(total, d)),
                                    CURRENCY
                                )))
                                .into()
                        },
                        ViewMessage::DurationSelected,
                    ))
                    .into()
            }
            EducationStep::Verification => {
                let quote = self.wizard.quote();
                Column::new()
                    .spacing(15)
                    .push_maybe(quote.map(|q| {
                        card::info(
                            Column::new()
                                .spacing(8)
                                .push(p1_bold(format!(
                                    "Formule {} sur {}",
                                    q.formula.name(),
                                    q.duration.label()
                                )))
                                .push(summary_line(
                                    "Montant total",
                                    format!("{} {}", format_amount(q.total), CURRENCY),
                                ))
                                .push(summary_line(
                                    "Paiement mensuel",
                                    format!("{} {}", format_amount(q.monthly), CURRENCY),
                                )),
                        )
                        .width(Length::Fill)
                    }))
                    .push(
                        card::simple(
                            Column::new()
                                .spacing(8)
                                .push(h5_medium("Souscripteur"))
                                .push(summary_line("Nom", format!("{} {}", form.prenom, form.nom)))
                                .push(summary_line("Téléphone", &form.telephone))
                                .push(summary_line("Bénéficiaire", &form.beneficiaire)),
                        )
                        .width(Length::Fill),
                    )
                    .push(h5_medium("Mode de paiement"))
                    .push(choices(
                        &PaymentMode::ALL,
                        form.payment_mode,
                        2,
                        |m| p2_medium(m.label()).into(),
                        ViewMessage::PaymentModeSelected,
                    ))
                    .into()
            }
            EducationStep::Payment => {
                let quote = self.wizard.quote();
                let deferred = form.payment_mode == Some(PaymentMode::Deferred);
                Column::new()
                    .spacing(15)
                    .push_maybe(quote.map(|q| {
                        card::info(
                            Column::new()
                                .spacing(5)
                                .align_x(Alignment::Center)
                                .width(Length::Fill)
                                .push(p1_medium(if deferred {
                                    "Premier versement"
                                } else {
                                    "Montant à payer"
                                }))
                                .push(h2(format!(
                                    "{} {}",
                                    format_amount(q.amount_due(form.payment_mode)),
                                    CURRENCY
                                )))
                                .push_maybe(deferred.then(|| {
                                    caption(format!(
                                        "Puis {} {}/mois pendant {}",
                                        format_amount(q.monthly),
                                        CURRENCY,
                                        q.duration.label()
                                    ))
                                    .color(color::SLATE_600)
                                })),
                        )
                        .width(Length::Fill)
                    }))
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

    fn controls(&self) -> Element<ViewMessage> {
        let forward = if self.wizard.is_last() {
            button::success(None, "Payer maintenant")
                .on_press_maybe(self.wizard.can_confirm().then_some(ViewMessage::Confirm))
        } else {
            button::primary(None, "Suivant")
                .on_press_maybe(self.wizard.can_advance().then_some(ViewMessage::Next))
        };
        Row::new()
            .push(
                button::secondary(None, "Retour")
                    .width(Length::Fixed(200.0))
                    .on_press(ViewMessage::Previous),
            )
            .push(iced::widget::Space::with_width(Length::Fill))
            .push(forward.width(Length::Fixed(200.0)))
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screen::test_context;

    fn send(screen: &mut Education, ctx: &Context, msg: ViewMessage) {
        let _ = screen.update(ctx, Message::View(msg));
    }

    #[test]
    fn subscription_then_deferred_payment() {
        let ctx = test_context();
        let mut screen = Education::new();
        for msg in [
            ViewMessage::NomEdited("KOUADIO".into()),
            ViewMessage::PrenomEdited("Jean".into()),
            ViewMessage::BeneficiaireEdited("Awa KOUADIO".into()),
            ViewMessage::Next,
        ] {
            send(&mut screen, &ctx, msg);
        }
        assert_eq!(screen.wizard.step(), EducationStep::Subscription);

        for msg in [
            ViewMessage::PhoneEdited("07 00 00 00 00".into()),
            ViewMessage::Next,
            ViewMessage::FormulaSelected(Formula::Argent),
            ViewMessage::Next,
            ViewMessage::DurationSelected(Duration::Ten),
            ViewMessage::Next,
            ViewMessage::PaymentModeSelected(PaymentMode::Deferred),
            ViewMessage::Next,
        ] {
            send(&mut screen, &ctx, msg);
        }
        assert_eq!(screen.wizard.step(), EducationStep::Payment);
        assert_eq!(
            screen
                .wizard
                .quote()
                .map(|q| q.amount_due(screen.wizard.form.payment_mode)),
            Some(1_800)
        );

        send(&mut screen, &ctx, ViewMessage::Confirm);
        assert!(!screen.confirmed);
        send(
            &mut screen,
            &ctx,
            ViewMessage::PaymentSelected(PaymentMethod::AirtelMoney),
        );
        send(&mut screen, &ctx, ViewMessage::Confirm);
        assert!(screen.confirmed);
        assert!(screen.back().is_none());
    }

    #[test]
    fn previous_walks_back_through_steps() {
        let ctx = test_context();
        let mut screen = Education::new();
        send(&mut screen, &ctx, ViewMessage::Previous);
        assert_eq!(screen.wizard.step(), EducationStep::Subscription);

        screen.wizard.form.nom = "N".into();
        screen.wizard.form.prenom = "P".into();
        screen.wizard.form.telephone = "0700000000".into();
        screen.wizard.form.beneficiaire = "B".into();
        send(&mut screen, &ctx, ViewMessage::Next);
        send(&mut screen, &ctx, ViewMessage::FormulaSelected(Formula::Or));
        send(&mut screen, &ctx, ViewMessage::Previous);
        assert_eq!(screen.wizard.step(), EducationStep::Subscription);
        assert_eq!(screen.wizard.form.formula, Some(Formula::Or));
    }

    #[test]
    fn header_back_returns_to_previous_step() {
        let ctx = test_context();
        let mut screen = Education::new();
        for msg in [
            ViewMessage::NomEdited("KOUADIO".into()),
            ViewMessage::PrenomEdited("Jean".into()),
            ViewMessage::PhoneEdited("07 00 00 00 00".into()),
            ViewMessage::BeneficiaireEdited("Awa KOUADIO".into()),
            ViewMessage::Next,
            ViewMessage::FormulaSelected(Formula::Bronze),
            ViewMessage::Next,
        ] {
            send(&mut screen, &ctx, msg);
        }
        assert_eq!(screen.wizard.step(), EducationStep::Duration);

        let back = screen.back().unwrap();
        let _ = screen.update(&ctx, back);
        assert_eq!(screen.wizard.step(), EducationStep::Formula);
        assert_eq!(screen.wizard.form.formula, Some(Formula::Bronze));
    }
}
