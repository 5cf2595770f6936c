use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

/// Verified caller identity extracted from a bearer credential.
///
/// Only the credential verifier constructs one from untrusted input;
/// everything downstream treats its presence as proof of authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaim(String);

impl IdentityClaim {
    pub fn new(email: String) -> Result<Self, DomainError> {
        if !email.contains('@') {
            return Err(DomainError::InvalidEmail);
        }
        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
        }
    }

    /// Unknown role strings downgrade to the unprivileged role.
    pub fn parse(value: &str) -> Self {
        if value == "admin" { Self::Admin } else { Self::User }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claim_rejects_bare_string() {
        assert!(matches!(
            IdentityClaim::new("not-an-email".to_string()),
            Err(DomainError::InvalidEmail)
        ));
    }

    #[test]
    fn unknown_role_is_not_admin() {
        assert_eq!(Role::parse("superuser"), Role::User);
        assert_eq!(Role::parse("admin"), Role::Admin);
    }
}
