use crate::contact::ProductLine;

/// Screen a dashboard tile leads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    CarInsurance,
    Contact(ProductLine),
    EducationInsurance,
    Claims,
    Complaints,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub id: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub destination: Destination,
}

pub const TILES: &[Tile] = &[
    Tile {
        id: "auto",
        title: "Assurance Automobile",
        subtitle: "Protection complète pour votre véhicule",
        destination: Destination::CarInsurance,
    },
    Tile {
        id: "travel",
        title: "Assurance Voyage",
        subtitle: "Voyagez en toute sérénité",
        destination: Destination::Contact(ProductLine::Voyage),
    },
    Tile {
        id: "home",
        title: "Assurance Habitation",
        subtitle: "Protégez votre domicile",
        destination: Destination::Contact(ProductLine::Habitation),
    },
    Tile {
        id: "education",
        title: "Assurance Éducation",
        subtitle: "Investissez dans l'avenir",
        destination: Destination::EducationInsurance,
    },
    Tile {
        id: "claims",
        title: "Sinistres",
        subtitle: "Déclarez un sinistre",
        destination: Destination::Claims,
    },
    Tile {
        id: "complaints",
        title: "Plaintes",
        subtitle: "Exprimez vos préoccupations",
        destination: Destination::Complaints,
    },
];

/// Shown on the dashboard, not wired to anything yet.
pub const QUICK_ACTIONS: &[(&str, &str)] = &[
    ("Mes Contrats", "Consultez l'historique de vos souscriptions"),
    ("Support Client", "Besoin d'aide ? Contactez notre équipe"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_product_has_a_tile() {
        assert_eq!(TILES.len(), 6);
        for destination in [
            Destination::CarInsurance,
            Destination::Contact(ProductLine::Voyage),
            Destination::Contact(ProductLine::Habitation),
            Destination::EducationInsurance,
            Destination::Claims,
            Destination::Complaints,
        ] {
            assert_eq!(
                TILES.iter().filter(|t| t.destination == destination).count(),
                1
            );
        }
    }
}
