//! Claims and complaints forms. Submitting one only waits for the simulated
//! latency and hands back a receipt: nothing leaves the machine.

use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::attachment::Attachment;
use crate::latency::Latency;
use crate::validation::{check_all, Field, Rule, Values, Violation};

pub const CLAIM_SUBMIT_DELAY: Duration = Duration::from_millis(2000);
pub const COMPLAINT_SUBMIT_DELAY: Duration = Duration::from_millis(1500);
/// Time the acknowledgement stays on screen before going back to the dashboard.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(2000);

pub const DESCRIPTION_MIN_CHARS: usize = 20;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeadKind {
    Claim,
    Complaint,
}

impl LeadKind {
    pub fn success_title(&self) -> &'static str {
        match self {
            Self::Claim => "Sinistre déclaré avec succès",
            Self::Complaint => "Message envoyé avec succès",
        }
    }

    pub fn success_message(&self) -> &'static str {
        match self {
            Self::Claim => "Votre déclaration de sinistre a été enregistrée. Notre équipe vous contactera dans les plus brefs délais pour traiter votre dossier.",
            Self::Complaint => "Votre message a été transmis à notre équipe. Nous vous contacterons dans les plus brefs délais pour traiter votre demande.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub reference: Uuid,
    pub kind: LeadKind,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeadError {
    #[error("form has {} invalid field(s)", .0.len())]
    Invalid(Vec<Violation>),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimForm {
    pub nom: String,
    pub prenom: String,
    pub telephone: String,
    pub date_accident: String,
    pub lieu_accident: String,
    pub circonstances: String,
    pub photo_assurance: Option<Attachment>,
    pub photo_permis: Option<Attachment>,
    pub photo_carte_grise: Option<Attachment>,
}

pub const CLAIM_FIELDS: &[Field] = &[
    Field::required("nom", "Nom"),
    Field::required("prenom", "Prénom"),
    Field::new(
        "telephone",
        "Numéro de téléphone",
        &[Rule::Required, Rule::Phone],
    ),
    Field::new(
        "date_accident",
        "Date de l'accident",
        &[Rule::Required, Rule::Date],
    ),
    Field::required("lieu_accident", "Lieu de l'accident"),
    Field::required("circonstances", "Circonstances de l'accident"),
    Field::required("photo_assurance", "Photo de l'assurance"),
    Field::required("photo_permis", "Photo du permis de conduire"),
    Field::required("photo_carte_grise", "Photo de la carte grise"),
];

impl Values for ClaimForm {
    fn value(&self, field: &str) -> Option<&str> {
        match field {
            "nom" => Some(self.nom.as_str()),
            "prenom" => Some(self.prenom.as_str()),
            "telephone" => Some(self.telephone.as_str()),
            "date_accident" => Some(self.date_accident.as_str()),
            "lieu_accident" => Some(self.lieu_accident.as_str()),
            "circonstances" => Some(self.circonstances.as_str()),
            "photo_assurance" => self.photo_assurance.as_ref().map(|a| a.file_name()),
            "photo_permis" => self.photo_permis.as_ref().map(|a| a.file_name()),
            "photo_carte_grise" => self.photo_carte_grise.as_ref().map(|a| a.file_name()),
            _ => None,
        }
    }
}

impl ClaimForm {
    pub fn violations(&self) -> Vec<Violation> {
        check_all(CLAIM_FIELDS, self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motif {
    Plainte,
    Reclamation,
    Suggestion,
    DemandeInformation,
    ProblemeTechnique,
    ServiceClient,
}

impl Motif {
    pub const ALL: [Motif; 6] = [
        Motif::Plainte,
        Motif::Reclamation,
        Motif::Suggestion,
        Motif::DemandeInformation,
        Motif::ProblemeTechnique,
        Motif::ServiceClient,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Plainte => "Plainte",
            Self::Reclamation => "Réclamation",
            Self::Suggestion => "Suggestion",
            Self::DemandeInformation => "Demande d'information",
            Self::ProblemeTechnique => "Problème technique",
            Self::ServiceClient => "Service client",
        }
    }

    /// Expected response time shown beside the form, when one is advertised.
    pub fn response_time(&self) -> Option<&'static str> {
        match self {
            Self::Plainte => Some("24-48h"),
            Self::Reclamation => Some("24h"),
            Self::Suggestion => Some("3-5 jours"),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComplaintForm {
    pub nom: String,
    pub prenom: String,
    pub telephone: String,
    pub motif: Option<Motif>,
    pub description: String,
}

pub const COMPLAINT_FIELDS: &[Field] = &[
    Field::required("nom", "Nom"),
    Field::required("prenom", "Prénom"),
    Field::new(
        "telephone",
        "Numéro de téléphone",
        &[Rule::Required, Rule::Phone],
    ),
    Field::required("motif", "Motif"),
    Field::new(
        "description",
        "Description",
        &[
            Rule::Required,
            Rule::MinChars(DESCRIPTION_MIN_CHARS),
            Rule::MaxChars(DESCRIPTION_MAX_CHARS),
        ],
    ),
];

impl Values for ComplaintForm {
    fn value(&self, field: &str) -> Option<&str> {
        match field {
            "nom" => Some(self.nom.as_str()),
            "prenom" => Some(self.prenom.as_str()),
            "telephone" => Some(self.telephone.as_str()),
            "motif" => self.motif.map(|m| m.label()),
            "description" => Some(self.description.as_str()),
            _ => None,
        }
    }
}

impl ComplaintForm {
    pub fn violations(&self) -> Vec<Violation> {
        check_all(COMPLAINT_FIELDS, self)
    }

    pub fn description_len(&self) -> usize {
        self.description.chars().count()
    }
}

pub async fn submit_claim(form: ClaimForm, latency: Latency) -> Result<Receipt, LeadError> {
    submit(form.violations(), LeadKind::Claim, latency, CLAIM_SUBMIT_DELAY).await
}

pub async fn submit_complaint(
    form: ComplaintForm,
    latency: Latency,
) -> Result<Receipt, LeadError> {
    submit(
        form.violations(),
        LeadKind::Complaint,
        latency,
        COMPLAINT_SUBMIT_DELAY,
    )
    .await
}

async fn submit(
    violations: Vec<Violation>,
    kind: LeadKind,
    latency: Latency,
    delay: Duration,
) -> Result<Receipt, LeadError> {
    if !violations.is_empty() {
        return Err(LeadError::Invalid(violations));
    }
    latency.wait(delay).await;
    let receipt = Receipt {
        reference: Uuid::new_v4(),
        kind,
        submitted_at: Utc::now(),
    };
    tracing::info!(
        "{:?} {} recorded at {}",
        receipt.kind,
        receipt.reference,
        receipt.submitted_at.to_rfc3339()
    );
    Ok(receipt)
}
