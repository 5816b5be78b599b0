use iced::{Alignment, Length, Task};

use fractalis::contact::{
    dial_uri, whatsapp_uri, ProductLine, AVAILABLE_INFORMATION, OPENING_HOURS,
};
use fractalis_ui::{
    color,
    component::{button, card, notification, summary_line, text::*},
    widget::*,
};

use super::{Context, Route};

const OPEN_FAILED: &str = "Impossible d'ouvrir l'application. Veuillez nous appeler directement.";

#[derive(Debug, Clone)]
pub enum Message {
    Call,
    WhatsApp,
    Navigate(Route),
}

#[derive(Debug)]
pub struct Contact {
    line: ProductLine,
    error: Option<&'static str>,
}

impl Contact {
    pub fn new(line: ProductLine) -> Self {
        Self { line, error: None }
    }

    pub fn update(&mut self, ctx: &Context, message: Message) -> Task<Message> {
        match message {
            Message::Call => {
                let uri = dial_uri(&ctx.contact_phone);
                self.error = open_intent(&uri);
            }
            Message::WhatsApp => match whatsapp_uri(&ctx.contact_phone, self.line) {
                Ok(url) => self.error = open_intent(url.as_str()),
                Err(e) => {
                    tracing::error!("Invalid WhatsApp link for {}: {}", ctx.contact_phone, e);
                    self.error = Some(OPEN_FAILED);
                }
            },
            // Handled by the router.
            Message::Navigate(_) => {}
        }
        Task::none()
    }

    pub fn view<'a>(&'a self, ctx: &'a Context) -> Element<'a, Message> {
        let line = self.line;

        let information = AVAILABLE_INFORMATION
            .iter()
            .fold(Column::new().spacing(8), |col, item| {
                col.push(
                    Row::new()
                        .spacing(10)
                        .push(p2_regular("✓").color(color::GREEN))
                        .push(p2_regular(*item)),
                )
            });

        let hours = OPENING_HOURS
            .iter()
            .fold(Column::new().spacing(8), |col, (days, hours)| {
                col.push(summary_line(days, hours))
            });

        let content = Column::new()
            .spacing(20)
            .push(
                card::simple(
                    Column::new()
                        .spacing(10)
                        .align_x(Alignment::Center)
                        .width(Length::Fill)
                        .push(h1(line.icon()))
                        .push(h3(line.title()))
                        .push(p1_regular(line.description()).color(color::SLATE_600)),
                )
                .width(Length::Fill),
            )
            .push(card::info(p1_regular(line.pitch())).width(Length::Fill))
            .push_maybe(self.error.map(notification::error))
            .push(
                Row::new()
                    .spacing(20)
                    .push(
                        button::primary(None, "Appeler l'agence")
                            .width(Length::Fill)
                            .on_press(Message::Call),
                    )
                    .push(
                        button::success(None, "Contacter sur WhatsApp")
                            .width(Length::Fill)
                            .on_press(Message::WhatsApp),
                    ),
            )
            .push(p2_regular(&ctx.contact_phone).color(color::SLATE_600))
            .push(
                Row::new()
                    .spacing(20)
                    .push(
                        card::simple(
                            Column::new()
                                .spacing(15)
                                .push(h5_medium("Informations disponibles"))
                                .push(information),
                        )
                        .width(Length::FillPortion(1)),
                    )
                    .push(
                        card::simple(
                            Column::new()
                                .spacing(15)
                                .push(h5_medium("Horaires d'ouverture"))
                                .push(hours),
                        )
                        .width(Length::FillPortion(1)),
                    ),
            );

        super::layout(
            super::header(
                ctx,
                line.title(),
                Some(Message::Navigate(Route::Dashboard)),
                None,
            ),
            content,
        )
    }
}

/// Hands `uri` over to the system without waiting for it.
fn open_intent(uri: &str) -> Option<&'static str> {
    match open::that_detached(uri) {
        Ok(()) => {
            tracing::info!("Opened '{}'", uri);
            None
        }
        Err(e) => {
            tracing::error!("Error opening '{}': {}", uri, e);
            Some(OPEN_FAILED)
        }
    }
}
