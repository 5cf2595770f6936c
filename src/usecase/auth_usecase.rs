use crate::domain::{
    error::DomainError,
    models::identity::IdentityClaim,
    services::token_service::{Token, TokenIssuer, TokenVerifier},
};

/// Credential issuance and verification. Tokens carry the e-mail identity
/// only; roles are always re-read from the store at authorization time.
pub struct AuthUsecase<I: TokenIssuer, V: TokenVerifier> {
    token_issuer: I,
    token_verifier: V,
}

impl<I: TokenIssuer, V: TokenVerifier> AuthUsecase<I, V> {
    pub fn new(token_issuer: I, token_verifier: V) -> Self {
        Self {
            token_issuer,
            token_verifier,
        }
    }

    pub fn issue_token(&self, email: String) -> Result<Token, DomainError> {
        let claim = IdentityClaim::new(email)?;
        self.token_issuer.issue(&claim)
    }

    pub fn authenticate(&self, token: &str) -> Result<IdentityClaim, DomainError> {
        self.token_verifier.verify(token)
    }
}
