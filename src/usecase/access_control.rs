use crate::domain::{
    error::DomainError,
    models::identity::IdentityClaim,
    policy::{self, AccessContext, Operation},
    repositories::user_repository::UserRepository,
};

/// Evaluates the policy table for one operation. The admin capability is
/// always resolved by a store lookup on the verified claim, never from
/// anything the client sent.
#[derive(Clone)]
pub struct AccessControl<U: UserRepository> {
    user_repository: U,
}

impl<U: UserRepository + Send + Sync> AccessControl<U> {
    pub fn new(user_repository: U) -> Self {
        Self { user_repository }
    }

    /// Must only be called with a claim that already passed verification;
    /// the context is therefore authenticated by construction.
    pub async fn authorize(
        &self,
        operation: Operation,
        claim: &IdentityClaim,
        resource_owner: Option<&str>,
    ) -> Result<(), DomainError> {
        let is_admin = if policy::needs_role_lookup(operation) {
            self.is_admin(claim).await?
        } else {
            false
        };
        let context = AccessContext {
            authenticated: true,
            owns_resource: resource_owner.is_some_and(|owner| owner == claim.as_str()),
            is_admin,
        };
        policy::check(operation, &context)
    }

    pub async fn is_admin(&self, claim: &IdentityClaim) -> Result<bool, DomainError> {
        Ok(self
            .user_repository
            .find_by_email(claim.as_str())
            .await?
            .is_some_and(|user| user.is_admin()))
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use uuid::Uuid;

    use super::*;
    use crate::domain::{
        error::RepositoryError,
        models::{
            identity::Role,
            user::{ProfileUpdate, User},
        },
    };

    #[derive(Clone)]
    struct MockUserRepository;

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
            if email == "admin@example.com" {
                Ok(Some(User::reconstruct(
                    Uuid::new_v4(),
                    email.to_string(),
                    "Admin".to_string(),
                    Role::Admin,
                    None,
                    None,
                    None,
                    chrono::Utc::now(),
                )))
            } else if email == "alice@example.com" {
                Ok(Some(User::reconstruct(
                    Uuid::new_v4(),
                    email.to_string(),
                    "Alice".to_string(),
                    Role::User,
                    None,
                    None,
                    None,
                    chrono::Utc::now(),
                )))
            } else {
                Ok(None)
            }
        }

        async fn insert(&self, _user: &User) -> Result<(), RepositoryError> {
            Ok(())
        }

        async fn update_profile(
            &self,
            _email: &str,
            _update: &ProfileUpdate,
        ) -> Result<(), RepositoryError> {
            Ok(())
        }

        async fn count(&self) -> Result<u64, RepositoryError> {
            Ok(2)
        }
    }

    fn claim(email: &str) -> IdentityClaim {
        IdentityClaim::new(email.to_string()).unwrap()
    }

    #[tokio::test]
    async fn admin_operation_requires_stored_admin_role() {
        let access = AccessControl::new(MockUserRepository);
        assert!(
            access
                .authorize(Operation::CreateCamp, &claim("admin@example.com"), None)
                .await
                .is_ok()
        );
        assert!(matches!(
            access
                .authorize(Operation::CreateCamp, &claim("alice@example.com"), None)
                .await,
            Err(DomainError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn unknown_identity_is_forbidden_not_an_error() {
        let access = AccessControl::new(MockUserRepository);
        assert!(matches!(
            access
                .authorize(Operation::ViewAdminStats, &claim("ghost@example.com"), None)
                .await,
            Err(DomainError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn ownership_satisfies_owner_or_admin_operations() {
        let access = AccessControl::new(MockUserRepository);
        assert!(
            access
                .authorize(
                    Operation::CancelRegistration,
                    &claim("alice@example.com"),
                    Some("alice@example.com"),
                )
                .await
                .is_ok()
        );
        assert!(matches!(
            access
                .authorize(
                    Operation::CancelRegistration,
                    &claim("alice@example.com"),
                    Some("bob@example.com"),
                )
                .await,
            Err(DomainError::Forbidden)
        ));
    }
}
