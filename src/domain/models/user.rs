use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{error::DomainError, models::identity::Role};

#[derive(Debug, Clone)]
pub struct User {
    id: Uuid,
    email: String,
    name: String,
    role: Role,
    image: Option<String>,
    address: Option<String>,
    phone: Option<String>,
    created_at: DateTime<Utc>,
}

impl User {
    /// New users are always created with the unprivileged role; the role is
    /// never taken from caller input.
    pub fn new(
        id: Uuid,
        email: String,
        name: String,
        image: Option<String>,
        address: Option<String>,
        phone: Option<String>,
    ) -> Result<Self, DomainError> {
        if !email.contains('@') {
            return Err(DomainError::InvalidEmail);
        }
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }
        Ok(Self {
            id,
            email,
            name,
            role: Role::User,
            image,
            address,
            phone,
            created_at: Utc::now(),
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub fn reconstruct(
        id: Uuid,
        email: String,
        name: String,
        role: Role,
        image: Option<String>,
        address: Option<String>,
        phone: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            name,
            role,
            image,
            address,
            phone,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn role(&self) -> Role {
        self.role
    }
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Self-service profile update. The role is deliberately absent: it cannot
/// be changed through this path.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub image: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_user_is_never_admin() {
        let user = User::new(
            Uuid::new_v4(),
            "a@example.com".to_string(),
            "A".to_string(),
            None,
            None,
            None,
        )
        .unwrap();
        assert!(!user.is_admin());
        assert_eq!(user.role(), Role::User);
    }

    #[test]
    fn empty_name_is_rejected() {
        let result = User::new(
            Uuid::new_v4(),
            "a@example.com".to_string(),
            String::new(),
            None,
            None,
            None,
        );
        assert!(matches!(result, Err(DomainError::EmptyName)));
    }
}
