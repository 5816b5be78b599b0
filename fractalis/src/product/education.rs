//! Education savings contract: a formula tier paid over a number of years.

use crate::payment::PaymentMethod;
use crate::validation::{Field, Rule, Values};
use crate::wizard::{Flow, StepDescriptor};

pub const SUCCESS_MESSAGE: &str =
    "Contrat souscrit avec succès! Vous recevrez vos documents sous 48h.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EducationStep {
    Subscription,
    Formula,
    Duration,
    Verification,
    Payment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Formula {
    Cuivre,
    Bronze,
    Argent,
    Or,
}

impl Formula {
    pub const ALL: [Formula; 4] = [Formula::Cuivre, Formula::Bronze, Formula::Argent, Formula::Or];

    pub fn id(&self) -> &'static str {
        match self {
            Self::Cuivre => "cuivre",
            Self::Bronze => "bronze",
            Self::Argent => "argent",
            Self::Or => "or",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Cuivre => "Cuivre",
            Self::Bronze => "Bronze",
            Self::Argent => "Argent",
            Self::Or => "Or",
        }
    }

    /// Base price in FCFA, paid as is over the shortest duration.
    pub fn base_price(&self) -> u64 {
        match self {
            Self::Cuivre => 35_000,
            Self::Bronze => 65_000,
            Self::Argent => 120_000,
            Self::Or => 200_000,
        }
    }

    pub fn benefits(&self) -> &'static [&'static str] {
        match self {
            Self::Cuivre => &[
                "Frais de scolarité",
                "Fournitures scolaires",
                "Transport scolaire",
            ],
            Self::Bronze => &[
                "Cuivre +",
                "Activités périscolaires",
                "Assurance santé étudiant",
            ],
            Self::Argent => &["Bronze +", "Cours particuliers", "Équipement informatique"],
            Self::Or => &[
                "Argent +",
                "Études supérieures",
                "Séjours linguistiques",
                "Bourse d'excellence",
            ],
        }
    }

    pub fn is_popular(&self) -> bool {
        matches!(self, Self::Argent)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Duration {
    Five,
    Ten,
    Fifteen,
}

impl Duration {
    pub const ALL: [Duration; 3] = [Duration::Five, Duration::Ten, Duration::Fifteen];

    pub fn years(&self) -> u64 {
        match self {
            Self::Five => 5,
            Self::Ten => 10,
            Self::Fifteen => 15,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Five => "5 ans",
            Self::Ten => "10 ans",
            Self::Fifteen => "15 ans",
        }
    }

    /// Price multiplier, in tenths: 10 is ×1, 18 is ×1.8.
    pub fn multiplier_tenths(&self) -> u64 {
        match self {
            Self::Five => 10,
            Self::Ten => 18,
            Self::Fifteen => 25,
        }
    }

    /// Percentage advertised next to the duration, `None` from ×2 upward.
    pub fn savings_percent(&self) -> Option<u64> {
        let tenths = self.multiplier_tenths();
        (tenths < 20).then(|| (20 - tenths) * 10)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentMode {
    Immediate,
    Deferred,
}

impl PaymentMode {
    pub const ALL: [PaymentMode; 2] = [PaymentMode::Immediate, PaymentMode::Deferred];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Immediate => "Paiement immédiat",
            Self::Deferred => "Paiement différé",
        }
    }
}

/// `round(base × multiplier)`, rounding half up.
pub fn total_price(formula: Formula, duration: Duration) -> u64 {
    (formula.base_price() * duration.multiplier_tenths() + 5) / 10
}

/// `round(total / (years × 12))`, rounding half up.
pub fn monthly_payment(total: u64, duration: Duration) -> u64 {
    let months = duration.years() * 12;
    (total + months / 2) / months
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EducationForm {
    pub nom: String,
    pub prenom: String,
    pub telephone: String,
    pub beneficiaire: String,

    pub formula: Option<Formula>,
    pub duration: Option<Duration>,
    pub payment_mode: Option<PaymentMode>,

    pub payment: Option<PaymentMethod>,
}

impl Values for EducationForm {
    fn value(&self, field: &str) -> Option<&str> {
        match field {
            "nom" => Some(self.nom.as_str()),
            "prenom" => Some(self.prenom.as_str()),
            "telephone" => Some(self.telephone.as_str()),
            "beneficiaire" => Some(self.beneficiaire.as_str()),
            "formula" => self.formula.map(|f| f.name()),
            "duration" => self.duration.map(|d| d.label()),
            "payment_mode" => self.payment_mode.map(|m| m.label()),
            "payment" => self.payment.map(|p| p.label()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EducationQuote {
    pub formula: Formula,
    pub duration: Duration,
    pub total: u64,
    pub monthly: u64,
}

impl EducationQuote {
    pub fn new(formula: Formula, duration: Duration) -> Self {
        let total = total_price(formula, duration);
        Self {
            formula,
            duration,
            total,
            monthly: monthly_payment(total, duration),
        }
    }

    /// Amount due at the payment step.
    pub fn amount_due(&self, mode: Option<PaymentMode>) -> u64 {
        match mode {
            Some(PaymentMode::Deferred) => self.monthly,
            _ => self.total,
        }
    }
}

const STEPS: &[StepDescriptor<EducationStep>] = &[
    StepDescriptor {
        id: EducationStep::Subscription,
        title: "Commencer votre souscription",
        fields: &[
            Field::required("nom", "Nom"),
            Field::required("prenom", "Prénom"),
            Field::hinted("telephone", "Téléphone", &[Rule::Phone]),
            Field::required("beneficiaire", "Nom du bénéficiaire"),
        ],
    },
    StepDescriptor {
        id: EducationStep::Formula,
        title: "Choisissez votre formule",
        fields: &[Field::required("formula", "Formule")],
    },
    StepDescriptor {
        id: EducationStep::Duration,
        title: "Durée du contrat",
        fields: &[Field::required("duration", "Durée")],
    },
    StepDescriptor {
        id: EducationStep::Verification,
        title: "Vérification de votre contrat",
        fields: &[Field::required("payment_mode", "Mode de paiement")],
    },
    StepDescriptor {
        id: EducationStep::Payment,
        title: "Paiement",
        fields: &[Field::required("payment", "Moyen de paiement")],
    },
];

pub struct EducationInsurance;

impl Flow for EducationInsurance {
    type Step = EducationStep;
    type Form = EducationForm;
    type Quote = EducationQuote;

    fn steps() -> &'static [StepDescriptor<EducationStep>] {
        STEPS
    }

    fn quote(form: &EducationForm) -> Option<EducationQuote> {
        Some(EducationQuote::new(form.formula?, form.duration?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{Advance, Retreat, Wizard};

    #[test]
    fn pricing() {
        let quote = EducationQuote::new(Formula::Argent, Duration::Ten);
        assert_eq!(quote.total, 216_000);
        assert_eq!(quote.monthly, 1_800);
        assert_eq!(quote.amount_due(Some(PaymentMode::Deferred)), 1_800);
        assert_eq!(quote.amount_due(Some(PaymentMode::Immediate)), 216_000);

        assert_eq!(total_price(Formula::Cuivre, Duration::Five), 35_000);
        assert_eq!(monthly_payment(35_000, Duration::Five), 583);
        assert_eq!(total_price(Formula::Bronze, Duration::Ten), 117_000);
        assert_eq!(monthly_payment(117_000, Duration::Ten), 975);
        assert_eq!(total_price(Formula::Or, Duration::Fifteen), 500_000);
        assert_eq!(monthly_payment(500_000, Duration::Fifteen), 2_778);
        assert_eq!(total_price(Formula::Cuivre, Duration::Fifteen), 87_500);
        assert_eq!(monthly_payment(87_500, Duration::Fifteen), 486);

        assert_eq!(Duration::Five.savings_percent(), Some(100));
        assert_eq!(Duration::Ten.savings_percent(), Some(20));
        assert_eq!(Duration::Fifteen.savings_percent(), None);
    }

    #[test]
    fn full_flow() {
        let mut wizard = Wizard::<EducationInsurance>::new();
        assert_eq!(wizard.step(), EducationStep::Subscription);

        wizard.form.nom = "KOUADIO".to_string();
        wizard.form.prenom = "Jean".to_string();
        wizard.form.beneficiaire = "Awa KOUADIO".to_string();
        assert!(!wizard.can_advance());
        wizard.form.telephone = "07 00".to_string();
        assert_eq!(wizard.hints()[0].field, "telephone");
        wizard.form.telephone = "07 00 00 00 00".to_string();
        assert!(wizard.hints().is_empty());
        assert_eq!(wizard.advance(), Advance::Moved(EducationStep::Formula));

        assert_eq!(wizard.quote(), None);
        wizard.form.formula = Some(Formula::Argent);
        assert_eq!(wizard.advance(), Advance::Moved(EducationStep::Duration));
        assert!(matches!(wizard.advance(), Advance::Blocked(_)));
        wizard.form.duration = Some(Duration::Ten);
        assert_eq!(wizard.quote().map(|q| q.total), Some(216_000));
        assert_eq!(wizard.advance(), Advance::Moved(EducationStep::Verification));

        wizard.form.payment_mode = Some(PaymentMode::Deferred);
        assert_eq!(wizard.advance(), Advance::Moved(EducationStep::Payment));
        assert!(wizard.confirm().is_err());
        wizard.form.payment = Some(PaymentMethod::Flooz);
        assert_eq!(wizard.confirm().map(|q| q.monthly), Ok(1_800));
        assert_eq!(wizard.advance(), Advance::AtEnd);

        for _ in 0..4 {
            assert!(matches!(wizard.retreat(), Retreat::Moved(_)));
        }
        assert_eq!(wizard.retreat(), Retreat::Exit);
    }
}
