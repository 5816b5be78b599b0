//! Car insurance subscription.
//!
//! The customer first picks the type of vehicle, then compares the offers of the
//! partner companies for that type. The annual premium of the selected offer is
//! carried through the summary and payment steps.

use crate::attachment::Attachment;
use crate::payment::PaymentMethod;
use crate::validation::{Field, Rule, Values};
use crate::wizard::{Flow, StepDescriptor};

pub const SUCCESS_MESSAGE: &str =
    "Paiement effectué avec succès! Votre contrat sera traité sous 24h.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarStep {
    VehicleType,
    Comparison,
    Personal,
    Vehicle,
    Insurance,
    Summary,
    Payment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VehicleType {
    Moto,
    Voiture,
    Utilitaire,
}

impl VehicleType {
    pub const ALL: [VehicleType; 3] = [
        VehicleType::Moto,
        VehicleType::Voiture,
        VehicleType::Utilitaire,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Moto => "Moto",
            Self::Voiture => "Voiture",
            Self::Utilitaire => "Utilitaire",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Moto => "Deux-roues et tricycles",
            Self::Voiture => "Véhicules particuliers",
            Self::Utilitaire => "Camionnettes et véhicules de transport",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Company {
    Nsia,
    Sunu,
    Saham,
}

impl Company {
    pub const ALL: [Company; 3] = [Company::Nsia, Company::Sunu, Company::Saham];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Nsia => "NSIA Assurances",
            Self::Sunu => "SUNU Assurances",
            Self::Saham => "SAHAM Assurance",
        }
    }

    pub fn advantages(&self) -> &'static [&'static str] {
        match self {
            Self::Nsia => &[
                "Assistance 24h/7j",
                "Réparation express",
                "Véhicule de remplacement",
            ],
            Self::Sunu => &["Bonus fidélité", "Extension famille", "Service digital"],
            Self::Saham => &[
                "Couverture étendue",
                "Expert dédié",
                "Indemnisation rapide",
            ],
        }
    }

    /// Annual premium in FCFA.
    pub fn premium(&self, vehicle: VehicleType) -> u64 {
        match (self, vehicle) {
            (Self::Nsia, VehicleType::Moto) => 25_000,
            (Self::Nsia, VehicleType::Voiture) => 45_000,
            (Self::Nsia, VehicleType::Utilitaire) => 65_000,
            (Self::Sunu, VehicleType::Moto) => 22_000,
            (Self::Sunu, VehicleType::Voiture) => 42_000,
            (Self::Sunu, VehicleType::Utilitaire) => 60_000,
            (Self::Saham, VehicleType::Moto) => 27_000,
            (Self::Saham, VehicleType::Voiture) => 48_000,
            (Self::Saham, VehicleType::Utilitaire) => 70_000,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Energy {
    Essence,
    Diesel,
    Hybride,
    Electrique,
}

impl Energy {
    pub const ALL: [Energy; 4] = [
        Energy::Essence,
        Energy::Diesel,
        Energy::Hybride,
        Energy::Electrique,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Essence => "Essence",
            Self::Diesel => "Diesel",
            Self::Hybride => "Hybride",
            Self::Electrique => "Électrique",
        }
    }
}

impl std::fmt::Display for Energy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Driver {
    Principal,
    Secondaire,
}

impl Driver {
    pub const ALL: [Driver; 2] = [Driver::Principal, Driver::Secondaire];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Principal => "Conducteur principal",
            Self::Secondaire => "Conducteur secondaire",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Term {
    SixMonths,
    OneYear,
    TwoYears,
}

impl Term {
    pub const ALL: [Term; 3] = [Term::SixMonths, Term::OneYear, Term::TwoYears];

    pub fn label(&self) -> &'static str {
        match self {
            Self::SixMonths => "6 mois",
            Self::OneYear => "1 an",
            Self::TwoYears => "2 ans",
        }
    }
}

impl std::fmt::Display for Term {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Default)]
pub struct CarForm {
    pub vehicle_type: Option<VehicleType>,
    pub company: Option<Company>,

    pub nom: String,
    pub prenom: String,

    pub marque: String,
    pub modele: String,
    pub puissance: String,
    pub plaque: String,
    pub energie: Option<Energy>,
    pub places: String,

    pub securite: Option<Driver>,
    pub duree: Option<Term>,
    pub date_effet: String,
    pub carte_grise: Option<Attachment>,

    pub payment: Option<PaymentMethod>,
}

impl CarForm {
    /// Picking another vehicle type invalidates the compared offer.
    pub fn select_vehicle_type(&mut self, vehicle_type: VehicleType) {
        if self.vehicle_type != Some(vehicle_type) {
            self.company = None;
        }
        self.vehicle_type = Some(vehicle_type);
    }
}

impl Values for CarForm {
    fn value(&self, field: &str) -> Option<&str> {
        match field {
            "vehicle_type" => self.vehicle_type.map(|v| v.label()),
            "company" => self.company.map(|c| c.name()),
            "nom" => Some(self.nom.as_str()),
            "prenom" => Some(self.prenom.as_str()),
            "marque" => Some(self.marque.as_str()),
            "modele" => Some(self.modele.as_str()),
            "puissance" => Some(self.puissance.as_str()),
            "plaque" => Some(self.plaque.as_str()),
            "energie" => self.energie.map(|e| e.label()),
            "places" => Some(self.places.as_str()),
            "securite" => self.securite.map(|d| d.label()),
            "duree" => self.duree.map(|t| t.label()),
            "date_effet" => Some(self.date_effet.as_str()),
            "carte_grise" => self.carte_grise.as_ref().map(|a| a.file_name()),
            "payment" => self.payment.map(|p| p.label()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CarQuote {
    pub company: Company,
    pub vehicle_type: VehicleType,
    pub premium: u64,
}

const STEPS: &[StepDescriptor<CarStep>] = &[
    StepDescriptor {
        id: CarStep::VehicleType,
        title: "Quel véhicule souhaitez-vous assurer ?",
        fields: &[Field::required("vehicle_type", "Type de véhicule")],
    },
    StepDescriptor {
        id: CarStep::Comparison,
        title: "Comparez nos offres d'assurance automobile",
        fields: &[Field::required("company", "Compagnie")],
    },
    StepDescriptor {
        id: CarStep::Personal,
        title: "Informations personnelles",
        fields: &[
            Field::required("nom", "Nom"),
            Field::required("prenom", "Prénom"),
        ],
    },
    StepDescriptor {
        id: CarStep::Vehicle,
        title: "Informations du véhicule",
        fields: &[
            Field::required("marque", "Marque"),
            Field::required("modele", "Modèle"),
            Field::required("puissance", "Puissance"),
            Field::required("plaque", "Plaque d'immatriculation"),
            Field::required("energie", "Énergie"),
            Field::hinted(
                "places",
                "Nombre de places",
                &[Rule::Integer { min: 1, max: 60 }],
            ),
        ],
    },
    StepDescriptor {
        id: CarStep::Insurance,
        title: "Détails de l'assurance",
        fields: &[
            Field::required("securite", "Sécurité"),
            Field::required("duree", "Durée"),
            Field::hinted("date_effet", "Date d'effet", &[Rule::Date]),
            Field::required("carte_grise", "Carte grise"),
        ],
    },
    StepDescriptor {
        id: CarStep::Summary,
        title: "Récapitulatif de votre souscription",
        fields: &[],
    },
    StepDescriptor {
        id: CarStep::Payment,
        title: "Choisissez votre mode de paiement",
        fields: &[Field::required("payment", "Mode de paiement")],
    },
];

pub struct CarInsurance;

impl Flow for CarInsurance {
    type Step = CarStep;
    type Form = CarForm;
    type Quote = CarQuote;

    fn steps() -> &'static [StepDescriptor<CarStep>] {
        STEPS
    }

    fn quote(form: &CarForm) -> Option<CarQuote> {
        let vehicle_type = form.vehicle_type?;
        let company = form.company?;
        Some(CarQuote {
            company,
            vehicle_type,
            premium: company.premium(vehicle_type),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{Advance, Retreat, Wizard};

    fn attachment() -> (tempfile::TempDir, Attachment) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("carte_grise.jpg");
        std::fs::write(&path, b"jpg").unwrap();
        let attachment = Attachment::from_path(path).unwrap();
        (dir, attachment)
    }

    #[test]
    fn step_order() {
        let ids: Vec<CarStep> = CarInsurance::steps().iter().map(|s| s.id).collect();
        assert_eq!(
            ids,
            vec![
                CarStep::VehicleType,
                CarStep::Comparison,
                CarStep::Personal,
                CarStep::Vehicle,
                CarStep::Insurance,
                CarStep::Summary,
                CarStep::Payment,
            ]
        );
    }

    #[test]
    fn premium_depends_on_vehicle_type_and_company() {
        let mut form = CarForm::default();
        assert_eq!(CarInsurance::quote(&form), None);
        form.select_vehicle_type(VehicleType::Voiture);
        assert_eq!(CarInsurance::quote(&form), None);
        form.company = Some(Company::Nsia);
        assert_eq!(CarInsurance::quote(&form).map(|q| q.premium), Some(45_000));

        form.select_vehicle_type(VehicleType::Voiture);
        assert_eq!(form.company, Some(Company::Nsia));
        form.select_vehicle_type(VehicleType::Moto);
        assert_eq!(form.company, None);
        form.company = Some(Company::Sunu);
        assert_eq!(CarInsurance::quote(&form).map(|q| q.premium), Some(22_000));

        for company in Company::ALL {
            assert!(company.premium(VehicleType::Moto) < company.premium(VehicleType::Voiture));
            assert!(
                company.premium(VehicleType::Voiture) < company.premium(VehicleType::Utilitaire)
            );
        }
    }

    #[test]
    fn full_flow() {
        let (_dir, carte_grise) = attachment();
        let mut wizard = Wizard::<CarInsurance>::new();
        assert_eq!(wizard.retreat(), Retreat::Exit);

        assert!(!wizard.can_advance());
        wizard.form.select_vehicle_type(VehicleType::Utilitaire);
        assert_eq!(wizard.advance(), Advance::Moved(CarStep::Comparison));

        assert!(!wizard.can_advance());
        wizard.form.company = Some(Company::Saham);
        assert_eq!(wizard.advance(), Advance::Moved(CarStep::Personal));

        wizard.form.nom = "KOUADIO".to_string();
        assert!(!wizard.can_advance());
        wizard.form.prenom = "Jean".to_string();
        assert_eq!(wizard.advance(), Advance::Moved(CarStep::Vehicle));

        wizard.form.marque = "Toyota".to_string();
        wizard.form.modele = "Hilux".to_string();
        wizard.form.puissance = "12".to_string();
        wizard.form.plaque = "AB-1234-CI".to_string();
        wizard.form.energie = Some(Energy::Diesel);
        match wizard.advance() {
            Advance::Blocked(v) => {
                assert_eq!(v.len(), 1);
                assert_eq!(v[0].field, "places");
            }
            other => panic!("unexpected {:?}", other),
        }
        wizard.form.places = "5".to_string();
        assert!(wizard.hints().is_empty());
        assert_eq!(wizard.advance(), Advance::Moved(CarStep::Insurance));

        wizard.form.securite = Some(Driver::Principal);
        wizard.form.duree = Some(Term::OneYear);
        wizard.form.date_effet = "2025-07-01".to_string();
        assert!(!wizard.can_advance());
        wizard.form.carte_grise = Some(carte_grise);
        assert_eq!(wizard.advance(), Advance::Moved(CarStep::Summary));

        assert!(wizard.can_advance());
        assert_eq!(wizard.advance(), Advance::Moved(CarStep::Payment));

        assert!(!wizard.can_confirm());
        wizard.form.payment = Some(PaymentMethod::OrangeMoney);
        assert_eq!(
            wizard.confirm().map(|q| q.premium),
            Ok(Company::Saham.premium(VehicleType::Utilitaire))
        );
        assert_eq!(wizard.advance(), Advance::AtEnd);

        assert_eq!(wizard.retreat(), Retreat::Moved(CarStep::Summary));
    }

    #[test]
    fn formats_are_advised_not_enforced() {
        let mut wizard = Wizard::<CarInsurance>::new();
        wizard.form.select_vehicle_type(VehicleType::Voiture);
        wizard.form.company = Some(Company::Nsia);
        wizard.form.nom = "KOUADIO".to_string();
        wizard.form.prenom = "Jean".to_string();
        wizard.advance();
        wizard.advance();
        assert_eq!(wizard.advance(), Advance::Moved(CarStep::Vehicle));

        wizard.form.marque = "Peugeot".to_string();
        wizard.form.modele = "308".to_string();
        wizard.form.puissance = "1.6L".to_string();
        wizard.form.plaque = "1234 AB 01".to_string();
        wizard.form.energie = Some(Energy::Essence);
        wizard.form.places = "cinq".to_string();
        assert_eq!(
            wizard.hints().iter().map(|v| v.field).collect::<Vec<_>>(),
            vec!["places"]
        );
        assert!(wizard.can_advance());
        assert_eq!(wizard.advance(), Advance::Moved(CarStep::Insurance));

        wizard.form.securite = Some(Driver::Secondaire);
        wizard.form.duree = Some(Term::SixMonths);
        wizard.form.date_effet = "01/07/2025".to_string();
        let (_dir, carte_grise) = attachment();
        wizard.form.carte_grise = Some(carte_grise);
        assert_eq!(wizard.hints()[0].field, "date_effet");
        assert_eq!(wizard.advance(), Advance::Moved(CarStep::Summary));
    }
}
