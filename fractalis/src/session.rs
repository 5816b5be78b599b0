use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use crate::identity::{Identity, RegisterData};
use crate::latency::Latency;
use crate::storage::{Storage, USER_KEY};

/// Code accepted by the mocked OTP verification.
pub const VALID_OTP: &str = "123456";

pub const LOGIN_DELAY: Duration = Duration::from_millis(1000);
pub const REGISTER_DELAY: Duration = Duration::from_millis(1000);
pub const SEND_OTP_DELAY: Duration = Duration::from_millis(1000);
pub const VERIFY_OTP_DELAY: Duration = Duration::from_millis(800);
pub const RESET_PASSWORD_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("phone number and password are required")]
    MissingCredentials,
    #[error("terms of use were not accepted")]
    ConditionsNotAccepted,
    #[error("otp code was rejected")]
    InvalidOtp,
    #[error("session storage error: {0}")]
    Storage(String),
}

impl SessionError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingCredentials => "Numéro de téléphone ou mot de passe incorrect",
            Self::ConditionsNotAccepted => "Vous devez accepter les conditions d'utilisation",
            Self::InvalidOtp => "Code OTP incorrect",
            Self::Storage(_) => "Erreur de connexion. Veuillez réessayer.",
        }
    }
}

/// Holds at most one authenticated identity and mirrors it into the client storage.
///
/// The handle is cheap to clone: every clone shares the same identity and storage,
/// so screens receive it by value and move it into their tasks.
#[derive(Debug, Clone)]
pub struct SessionService {
    storage: Arc<dyn Storage>,
    current: Arc<Mutex<Option<Identity>>>,
    latency: Latency,
}

impl SessionService {
    /// Restores the persisted identity, if any. A record that cannot be read is
    /// treated as a logged out session.
    pub fn init(storage: Arc<dyn Storage>, latency: Latency) -> Self {
        let current = match restore(storage.as_ref()) {
            Ok(Some(identity)) => {
                tracing::info!("Session restored for user {}", identity.id);
                Some(identity)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("Failed to restore session: {}", e);
                None
            }
        };
        Self {
            storage,
            current: Arc::new(Mutex::new(current)),
            latency,
        }
    }

    pub fn current(&self) -> Option<Identity> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    pub fn latency(&self) -> Latency {
        self.latency
    }

    /// Any non-empty pair of credentials is accepted.
    pub async fn login(&self, phone: &str, password: &str) -> Result<Identity, SessionError> {
        self.latency.wait(LOGIN_DELAY).await;
        if phone.is_empty() || password.is_empty() {
            return Err(SessionError::MissingCredentials);
        }
        let identity = Identity {
            id: "1".to_string(),
            nom: "KOUADIO".to_string(),
            prenom: "Jean".to_string(),
            telephone: phone.to_string(),
            email: None,
        };
        self.set_current(identity.clone());
        tracing::info!("User {} logged in", identity.id);
        Ok(identity)
    }

    pub async fn register(&self, data: RegisterData) -> Result<Identity, SessionError> {
        self.latency.wait(REGISTER_DELAY).await;
        if !data.accept_conditions {
            return Err(SessionError::ConditionsNotAccepted);
        }
        let identity = Identity {
            id: chrono::Utc::now().timestamp_millis().to_string(),
            nom: data.nom,
            prenom: data.prenom,
            telephone: data.telephone,
            email: data.email,
        };
        self.set_current(identity.clone());
        tracing::info!("User {} registered", identity.id);
        Ok(identity)
    }

    pub fn logout(&self) {
        let previous = self
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Err(e) = self.storage.remove(USER_KEY) {
            tracing::warn!("Failed to remove persisted session: {}", e);
        }
        if let Some(identity) = previous {
            tracing::info!("User {} logged out", identity.id);
        }
    }

    pub async fn send_otp(&self, phone: &str) -> Result<(), SessionError> {
        self.latency.wait(SEND_OTP_DELAY).await;
        tracing::debug!("OTP sent to {}", phone);
        Ok(())
    }

    pub async fn verify_otp(&self, code: &str) -> Result<(), SessionError> {
        self.latency.wait(VERIFY_OTP_DELAY).await;
        check_otp(code)
    }

    /// No credential is stored anywhere, only the code is checked.
    pub async fn reset_password(
        &self,
        phone: &str,
        _new_password: &str,
        otp: &str,
    ) -> Result<(), SessionError> {
        self.latency.wait(RESET_PASSWORD_DELAY).await;
        check_otp(otp)?;
        tracing::info!("Password reset for {}", phone);
        Ok(())
    }

    fn set_current(&self, identity: Identity) {
        match serde_json::to_string(&identity) {
            Ok(json) => {
                if let Err(e) = self.storage.set(USER_KEY, json) {
                    tracing::warn!("Failed to persist session: {}", e);
                }
            }
            Err(e) => tracing::warn!("Failed to serialize session: {}", e),
        }
        *self.current.lock().unwrap_or_else(PoisonError::into_inner) = Some(identity);
    }
}

fn check_otp(code: &str) -> Result<(), SessionError> {
    if code == VALID_OTP {
        Ok(())
    } else {
        Err(SessionError::InvalidOtp)
    }
}

fn restore(storage: &dyn Storage) -> Result<Option<Identity>, SessionError> {
    let Some(content) = storage
        .get(USER_KEY)
        .map_err(|e| SessionError::Storage(e.to_string()))?
    else {
        return Ok(None);
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| SessionError::Storage(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{FileStorage, MemoryStorage};

    fn service() -> SessionService {
        SessionService::init(Arc::new(MemoryStorage::default()), Latency::none())
    }

    #[tokio::test]
    async fn login_accepts_any_non_empty_credentials() {
        for (phone, password) in [("0700000000", "secret"), (" ", "x"), ("+225 01", "  ")] {
            let session = service();
            let identity = session.login(phone, password).await.unwrap();
            assert_eq!(identity.telephone, phone);
            assert_eq!(session.current().unwrap().telephone, phone);
        }
    }

    #[tokio::test]
    async fn login_rejects_empty_credentials() {
        let session = service();
        for (phone, password) in [("", "secret"), ("0700000000", ""), ("", "")] {
            assert_eq!(
                session.login(phone, password).await,
                Err(SessionError::MissingCredentials)
            );
            assert!(session.current().is_none());
        }

        session.login("0700000000", "secret").await.unwrap();
        let before = session.current();
        assert!(session.login("", "").await.is_err());
        assert_eq!(session.current(), before);
    }

    #[tokio::test]
    async fn register_depends_only_on_conditions() {
        let session = service();
        let data = RegisterData {
            nom: String::new(),
            prenom: String::new(),
            telephone: String::new(),
            password: "a".to_string(),
            accept_conditions: false,
            email: None,
        };
        assert_eq!(
            session.register(data.clone()).await,
            Err(SessionError::ConditionsNotAccepted)
        );
        assert!(session.current().is_none());

        let identity = session
            .register(RegisterData {
                accept_conditions: true,
                ..data
            })
            .await
            .unwrap();
        assert!(identity.id.parse::<i64>().is_ok());
        assert_eq!(session.current(), Some(identity));
    }

    #[tokio::test]
    async fn otp_checks() {
        let session = service();
        assert!(session.send_otp("0700000000").await.is_ok());
        assert!(session.verify_otp(VALID_OTP).await.is_ok());
        for code in ["123457", "000000", "654321", "12345", ""] {
            assert_eq!(session.verify_otp(code).await, Err(SessionError::InvalidOtp));
            assert_eq!(
                session.reset_password("07", "new", code).await,
                Err(SessionError::InvalidOtp)
            );
        }
        assert!(session.reset_password("07", "new", VALID_OTP).await.is_ok());
    }

    #[tokio::test]
    async fn session_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionService::init(
            Arc::new(FileStorage::in_directory(dir.path())),
            Latency::none(),
        );
        let identity = session.login("0700000000", "secret").await.unwrap();

        let reloaded = SessionService::init(
            Arc::new(FileStorage::in_directory(dir.path())),
            Latency::none(),
        );
        assert_eq!(reloaded.current(), Some(identity));

        reloaded.logout();
        assert!(!reloaded.is_authenticated());
        let reloaded = SessionService::init(
            Arc::new(FileStorage::in_directory(dir.path())),
            Latency::none(),
        );
        assert!(reloaded.current().is_none());
    }

    #[test]
    fn corrupted_record_is_logged_out() {
        let storage = MemoryStorage::default();
        storage.set(USER_KEY, "{not json".to_string()).unwrap();
        let session = SessionService::init(Arc::new(storage), Latency::none());
        assert!(session.current().is_none());
    }

    #[tokio::test]
    async fn clones_share_the_session() {
        let session = service();
        let other = session.clone();
        session.login("07", "pw").await.unwrap();
        assert!(other.is_authenticated());
        other.logout();
        assert!(!session.is_authenticated());
    }
}
