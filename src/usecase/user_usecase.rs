use uuid::Uuid;

use crate::{
    domain::{
        error::{DomainError, RepositoryError},
        models::{
            identity::IdentityClaim,
            user::{ProfileUpdate, User},
        },
        policy::Operation,
        repositories::user_repository::UserRepository,
    },
    usecase::access_control::AccessControl,
};

#[derive(Debug, Clone)]
pub struct UserDraft {
    pub email: String,
    pub name: String,
    pub image: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug)]
pub enum UpsertOutcome {
    Created(User),
    /// A record for this e-mail already exists; nothing was inserted and
    /// no new identifier is reported.
    AlreadyExists,
}

pub struct UserUsecase<U: UserRepository> {
    users: U,
    access: AccessControl<U>,
}

impl<U: UserRepository + Send + Sync> UserUsecase<U> {
    pub fn new(users: U, access: AccessControl<U>) -> Self {
        Self { users, access }
    }

    /// Idempotent on the e-mail identity. The role is server-assigned;
    /// whatever the caller sent for it is ignored by construction.
    pub async fn upsert(&self, draft: UserDraft) -> Result<UpsertOutcome, DomainError> {
        if self.users.find_by_email(&draft.email).await?.is_some() {
            return Ok(UpsertOutcome::AlreadyExists);
        }
        let user = User::new(
            Uuid::new_v4(),
            draft.email,
            draft.name,
            draft.image,
            draft.address,
            draft.phone,
        )?;
        self.users.insert(&user).await?;
        Ok(UpsertOutcome::Created(user))
    }

    pub async fn update_profile(
        &self,
        claim: &IdentityClaim,
        email: &str,
        update: ProfileUpdate,
    ) -> Result<(), DomainError> {
        self.access
            .authorize(Operation::UpdateProfile, claim, Some(email))
            .await?;
        self.users
            .update_profile(email, &update)
            .await
            .map_err(|err| match err {
                RepositoryError::NotFound => DomainError::NotFound("user"),
                other => other.into(),
            })
    }

    pub async fn is_admin(&self, claim: &IdentityClaim, email: &str) -> Result<bool, DomainError> {
        self.access
            .authorize(Operation::CheckRole, claim, Some(email))
            .await?;
        Ok(self
            .users
            .find_by_email(email)
            .await?
            .is_some_and(|user| user.is_admin()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;

    use super::*;

    /// In-memory user store keyed by e-mail.
    #[derive(Clone, Default)]
    struct InMemoryUserRepository {
        users: Arc<Mutex<Vec<User>>>,
    }

    #[async_trait]
    impl UserRepository for InMemoryUserRepository {
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
            Ok(self
                .users
                .lock()
                .unwrap()
                .iter()
                .find(|user| user.email() == email)
                .cloned())
        }

        async fn insert(&self, user: &User) -> Result<(), RepositoryError> {
            self.users.lock().unwrap().push(user.clone());
            Ok(())
        }

        async fn update_profile(
            &self,
            email: &str,
            _update: &ProfileUpdate,
        ) -> Result<(), RepositoryError> {
            if self
                .users
                .lock()
                .unwrap()
                .iter()
                .any(|user| user.email() == email)
            {
                Ok(())
            } else {
                Err(RepositoryError::NotFound)
            }
        }

        async fn count(&self) -> Result<u64, RepositoryError> {
            Ok(self.users.lock().unwrap().len() as u64)
        }
    }

    fn usecase() -> (UserUsecase<InMemoryUserRepository>, InMemoryUserRepository) {
        let repo = InMemoryUserRepository::default();
        (
            UserUsecase::new(repo.clone(), AccessControl::new(repo.clone())),
            repo,
        )
    }

    fn draft(email: &str) -> UserDraft {
        UserDraft {
            email: email.to_string(),
            name: "Alice".to_string(),
            image: None,
            address: None,
            phone: None,
        }
    }

    #[tokio::test]
    async fn second_upsert_with_same_email_inserts_nothing() {
        let (usecase, repo) = usecase();

        let first = usecase.upsert(draft("alice@example.com")).await.unwrap();
        assert!(matches!(first, UpsertOutcome::Created(_)));

        let second = usecase.upsert(draft("alice@example.com")).await.unwrap();
        assert!(matches!(second, UpsertOutcome::AlreadyExists));

        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn upserted_user_is_never_admin() {
        let (usecase, _) = usecase();
        let outcome = usecase.upsert(draft("alice@example.com")).await.unwrap();
        let UpsertOutcome::Created(user) = outcome else {
            panic!("expected a created user");
        };
        assert!(!user.is_admin());
    }

    #[tokio::test]
    async fn profile_update_of_someone_else_is_forbidden() {
        let (usecase, _) = usecase();
        usecase.upsert(draft("bob@example.com")).await.unwrap();

        let claim = IdentityClaim::new("alice@example.com".to_string()).unwrap();
        let result = usecase
            .update_profile(&claim, "bob@example.com", ProfileUpdate::default())
            .await;
        assert!(matches!(result, Err(DomainError::Forbidden)));
    }
}
