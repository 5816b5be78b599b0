use iced::{Alignment, Length};

use fractalis::{
    catalog::{Tile, QUICK_ACTIONS, TILES},
    BRAND,
};
use fractalis_ui::{
    color,
    component::{card, text::*},
    theme,
    widget::*,
};

use super::{Context, Route};

const TILES_PER_ROW: usize = 3;

#[derive(Debug, Clone)]
pub enum Message {
    Navigate(Route),
}

#[derive(Debug, Default)]
pub struct Dashboard;

impl Dashboard {
    pub fn new() -> Self {
        Self
    }

    pub fn view<'a>(&'a self, ctx: &Context) -> Element<'a, Message> {
        let welcome = ctx
            .session
            .current()
            .map(|identity| format!("Bonjour {}", identity.prenom))
            .unwrap_or_else(|| "Bonjour".to_string());

        let tiles = TILES
            .chunks(TILES_PER_ROW)
            .fold(Column::new().spacing(20), |col, chunk| {
                col.push(
                    chunk
                        .iter()
                        .fold(Row::new().spacing(20), |row, tile| row.push(tile_view(tile))),
                )
            });

        let quick_actions = QUICK_ACTIONS.iter().fold(
            Row::new().spacing(20),
            |row, (title, subtitle)| {
                row.push(
                    card::simple(
                        Column::new()
                            .spacing(5)
                            .push(p1_bold(*title))
                            .push(p2_regular(*subtitle).color(color::SLATE_600)),
                    )
                    .width(Length::Fill),
                )
            },
        );

        let content = Column::new()
            .spacing(30)
            .push(
                Column::new()
                    .spacing(5)
                    .push(h3(welcome))
                    .push(
                        p1_regular(format!("Bienvenue sur {}", BRAND)).color(color::SLATE_600),
                    ),
            )
            .push(h4_bold("Nos produits"))
            .push(tiles)
            .push(h4_bold("Accès rapide"))
            .push(quick_actions);

        super::layout(
            super::header(
                ctx,
                "Tableau de Bord",
                None,
                Some(Message::Navigate(Route::Logout)),
            ),
            content,
        )
    }
}

fn tile_icon(tile: &Tile) -> &'static str {
    match tile.id {
        "auto" => "🚗",
        "travel" => "✈️",
        "home" => "🏠",
        "education" => "🎓",
        "claims" => "📋",
        _ => "💬",
    }
}

fn tile_view<'a>(tile: &'static Tile) -> Element<'a, Message> {
    Button::new(
        Column::new()
            .spacing(10)
            .align_x(Alignment::Start)
            .push(h3(tile_icon(tile)))
            .push(p1_bold(tile.title))
            .push(p2_regular(tile.subtitle).color(color::SLATE_600))
            .padding(10)
            .width(Length::Fill),
    )
    .width(Length::Fill)
    .style(theme::button::tile)
    .on_press(Message::Navigate(tile.destination.into()))
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fractalis::{catalog::Destination, contact::ProductLine};

    #[test]
    fn every_tile_has_a_route() {
        let routes: Vec<Route> = TILES.iter().map(|t| t.destination.into()).collect();
        assert_eq!(
            routes,
            vec![
                Route::Car,
                Route::Contact(ProductLine::Voyage),
                Route::Contact(ProductLine::Habitation),
                Route::Education,
                Route::Claims,
                Route::Complaints,
            ]
        );
        assert_eq!(Route::from(Destination::Claims), Route::Claims);
    }
}
