//! Product lines sold over the phone: the page only hands the customer over to
//! the agency, either by a call or by a pre-filled WhatsApp message.

use url::Url;

pub const DEFAULT_AGENCY_PHONE: &str = "+225 07 00 00 00 00";

pub const OPENING_HOURS: &[(&str, &str)] = &[
    ("Lundi - Vendredi", "8h00 - 18h00"),
    ("Samedi", "8h00 - 13h00"),
];

pub const AVAILABLE_INFORMATION: &[&str] = &[
    "Devis personnalisé gratuit",
    "Conseils d'experts",
    "Souscription simplifiée",
    "Tarifs préférentiels",
    "Couverture complète",
    "Service client dédié",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductLine {
    Voyage,
    Habitation,
}

impl ProductLine {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Voyage => "voyage",
            Self::Habitation => "habitation",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Voyage => "Assurance Voyage",
            Self::Habitation => "Assurance Habitation",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Voyage => "✈️",
            Self::Habitation => "🏠",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Voyage => "Voyagez en toute sérénité avec notre protection complète",
            Self::Habitation => "Protégez votre domicile et vos biens personnels",
        }
    }

    pub fn pitch(&self) -> String {
        format!(
            "Pour souscrire à votre assurance {}, notre équipe d'experts est disponible pour vous accompagner et vous proposer la meilleure offre adaptée à vos besoins.",
            self.kind()
        )
    }

    pub fn whatsapp_message(&self) -> String {
        format!(
            "Bonjour, je suis intéressé(e) par l'assurance {}. Pouvez-vous me donner plus d'informations ?",
            self.kind()
        )
    }
}

/// `tel:` URI of the agency line.
pub fn dial_uri(phone: &str) -> String {
    format!("tel:{}", phone.replace(char::is_whitespace, ""))
}

/// wa.me link opening a conversation with the agency, message pre-filled.
pub fn whatsapp_uri(phone: &str, line: ProductLine) -> Result<Url, url::ParseError> {
    let number: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    Url::parse_with_params(
        &format!("https://wa.me/{}", number),
        &[("text", line.whatsapp_message())],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intents() {
        assert_eq!(dial_uri(DEFAULT_AGENCY_PHONE), "tel:+2250700000000");

        let url = whatsapp_uri(DEFAULT_AGENCY_PHONE, ProductLine::Voyage).unwrap();
        assert_eq!(url.host_str(), Some("wa.me"));
        assert_eq!(url.path(), "/2250700000000");
        let (key, text) = url.query_pairs().next().unwrap();
        assert_eq!(key, "text");
        assert_eq!(
            text,
            "Bonjour, je suis intéressé(e) par l'assurance voyage. Pouvez-vous me donner plus d'informations ?"
        );

        let url = whatsapp_uri("+225 01 02 03 04 05", ProductLine::Habitation).unwrap();
        assert!(url.as_str().starts_with("https://wa.me/2250102030405?text="));
        assert!(url
            .query_pairs()
            .any(|(_, v)| v.contains("l'assurance habitation")));
    }
}
