use crate::domain::{error::DomainError, models::identity::IdentityClaim};

pub type Token = String;

/// Issues a signed, time-limited credential for an identity claim.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, claim: &IdentityClaim) -> Result<Token, DomainError>;
}

/// Validates an inbound credential and extracts the caller's identity.
/// Bad signature and expiry both fail with `Unauthenticated`; a failed
/// verification is terminal for the request.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<IdentityClaim, DomainError>;
}
