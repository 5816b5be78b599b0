use serde::{Deserialize, Serialize};

/// The authenticated customer held by the session service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub nom: String,
    pub prenom: String,
    pub telephone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Identity {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.prenom, self.nom)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterData {
    pub nom: String,
    pub prenom: String,
    pub telephone: String,
    pub password: String,
    pub accept_conditions: bool,
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_is_omitted_when_absent() {
        let identity = Identity {
            id: "1".to_string(),
            nom: "KOUADIO".to_string(),
            prenom: "Jean".to_string(),
            telephone: "0700000000".to_string(),
            email: None,
        };
        let json = serde_json::to_string(&identity).unwrap();
        assert!(!json.contains("email"));
        assert_eq!(identity.display_name(), "Jean KOUADIO");

        let parsed: Identity = serde_json::from_str(
            r#"{"id":"2","nom":"N","prenom":"P","telephone":"01","email":"a@b.ci"}"#,
        )
        .unwrap();
        assert_eq!(parsed.email.as_deref(), Some("a@b.ci"));
    }
}
