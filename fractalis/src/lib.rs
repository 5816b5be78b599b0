pub mod attachment;
pub mod catalog;
pub mod contact;
pub mod identity;
pub mod latency;
pub mod lead;
pub mod otp;
pub mod payment;
pub mod product;
pub mod session;
pub mod storage;
pub mod validation;
pub mod wizard;

pub use identity::{Identity, RegisterData};
pub use session::{SessionError, SessionService};

pub const BRAND: &str = "FRACTALIS";
pub const BRAND_FULL: &str = "FRACTALIS COURTAGE";
pub const TAGLINE: &str = "Plateforme d'Assurance";
