use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    models::identity::IdentityClaim,
    services::token_service::{Token, TokenIssuer, TokenVerifier},
};

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // identity email
    exp: i64,    // Expiration time
    iat: i64,    // Issued at
}

#[derive(Clone)]
pub struct JwtTokenService {
    secret: String,
    validity_hours: i64,
}

impl JwtTokenService {
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            validity_hours: 24, // 24h
        }
    }

    pub fn with_validity(secret: String, validity_hours: i64) -> Self {
        Self {
            secret,
            validity_hours,
        }
    }
}

impl TokenIssuer for JwtTokenService {
    fn issue(&self, claim: &IdentityClaim) -> Result<Token, DomainError> {
        let now = Utc::now();
        let exp = now + Duration::hours(self.validity_hours);

        let claims = Claims {
            sub: claim.as_str().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| DomainError::TokenSigning(e.to_string()))
    }
}

impl TokenVerifier for JwtTokenService {
    /// Bad signature and expiry both collapse into `Unauthenticated`;
    /// callers get no further detail.
    fn verify(&self, token: &str) -> Result<IdentityClaim, DomainError> {
        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| DomainError::Unauthenticated)?;
        IdentityClaim::new(data.claims.sub).map_err(|_| DomainError::Unauthenticated)
    }
}
