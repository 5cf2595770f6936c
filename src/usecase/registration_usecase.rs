use uuid::Uuid;

use crate::{
    domain::{
        error::{DomainError, RepositoryError},
        models::{
            identity::IdentityClaim,
            registration::{Participant, Registration, RegistrationStatus},
        },
        policy::Operation,
        repositories::{
            camp_repository::CampRepository, payment_repository::PaymentRepository,
            registration_repository::RegistrationRepository, user_repository::UserRepository,
        },
    },
    usecase::access_control::AccessControl,
};

/// A caller's registrations, unfiltered and (when a filter was given)
/// narrowed by the substring match.
#[derive(Debug)]
pub struct RegistrationListing {
    pub all: Vec<Registration>,
    pub filtered: Vec<Registration>,
}

pub struct RegistrationUsecase<R, C, P, U>
where
    R: RegistrationRepository,
    C: CampRepository,
    P: PaymentRepository,
    U: UserRepository,
{
    registrations: R,
    camps: C,
    payments: P,
    access: AccessControl<U>,
    decrement_on_cancel: bool,
}

impl<R, C, P, U> RegistrationUsecase<R, C, P, U>
where
    R: RegistrationRepository + Send + Sync,
    C: CampRepository + Send + Sync,
    P: PaymentRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    pub fn new(
        registrations: R,
        camps: C,
        payments: P,
        access: AccessControl<U>,
        decrement_on_cancel: bool,
    ) -> Self {
        Self {
            registrations,
            camps,
            payments,
            access,
            decrement_on_cancel,
        }
    }

    /// Creates a pending registration, then increments the camp's
    /// participant counter. The two writes are independent atomic store
    /// operations with no rollback: when the increment fails after the
    /// insert committed, the divergence is logged with both identifiers
    /// and surfaced as `Inconsistency` — the registration stays.
    pub async fn register(
        &self,
        claim: &IdentityClaim,
        camp_id: Uuid,
        participant_name: String,
    ) -> Result<Registration, DomainError> {
        self.access
            .authorize(Operation::RegisterForCamp, claim, None)
            .await?;
        let camp = self
            .camps
            .find_by_id(camp_id)
            .await?
            .ok_or(DomainError::NotFound("camp"))?;
        let participant = Participant::new(participant_name, claim.as_str().to_string())?;
        let registration = Registration::new(Uuid::new_v4(), &camp, participant);
        self.registrations.insert(&registration).await?;

        if let Err(err) = self.camps.increment_count(camp_id).await {
            tracing::error!(
                registration_id = %registration.id(),
                camp_id = %camp_id,
                error = %err,
                "registration committed but participant counter increment failed",
            );
            return Err(DomainError::Inconsistency {
                committed_id: registration.id(),
                failed_id: camp_id,
            });
        }
        Ok(registration)
    }

    pub async fn list_for_admin(
        &self,
        claim: &IdentityClaim,
        filter: Option<&str>,
    ) -> Result<Vec<Registration>, DomainError> {
        self.access
            .authorize(Operation::ListAllRegistrations, claim, None)
            .await?;
        let registrations = self.registrations.list_all().await?;
        Ok(match filter {
            Some(filter) => registrations
                .into_iter()
                .filter(|registration| registration.matches(filter))
                .collect(),
            None => registrations,
        })
    }

    pub async fn list_for_user(
        &self,
        claim: &IdentityClaim,
        filter: Option<&str>,
    ) -> Result<RegistrationListing, DomainError> {
        self.access
            .authorize(Operation::ListOwnRegistrations, claim, None)
            .await?;
        let all = self.registrations.list_by_participant(claim.as_str()).await?;
        let filtered = match filter {
            Some(filter) => all
                .iter()
                .filter(|registration| registration.matches(filter))
                .cloned()
                .collect(),
            None => all.clone(),
        };
        Ok(RegistrationListing { all, filtered })
    }

    /// Point lookup used to price a pending payment.
    pub async fn get_for_payment(
        &self,
        claim: &IdentityClaim,
        id: Uuid,
    ) -> Result<Registration, DomainError> {
        self.access
            .authorize(Operation::GetRegistration, claim, None)
            .await?;
        self.registrations
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound("registration"))
    }

    /// Confirms the registration, then best-effort marks any linked payment
    /// confirmed. A cross-update failure is logged and does not undo the
    /// registration's own status change.
    pub async fn confirm(&self, claim: &IdentityClaim, id: Uuid) -> Result<(), DomainError> {
        self.access
            .authorize(Operation::ConfirmRegistration, claim, None)
            .await?;
        self.registrations
            .set_status(id, RegistrationStatus::Confirmed)
            .await
            .map_err(|err| match err {
                RepositoryError::NotFound => DomainError::NotFound("registration"),
                other => DomainError::from(other),
            })?;

        if let Err(err) = self.payments.confirm_for_registration(id).await {
            tracing::warn!(
                registration_id = %id,
                error = %err,
                "registration confirmed but linked payment status was not updated",
            );
        }
        Ok(())
    }

    /// Deletion right belongs to the owning participant or an
    /// administrator. The counter decrement is configuration-gated and off
    /// by default, matching the historical behavior of leaving the counter
    /// untouched on cancellation.
    pub async fn cancel(&self, claim: &IdentityClaim, id: Uuid) -> Result<(), DomainError> {
        let registration = self
            .registrations
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound("registration"))?;
        self.access
            .authorize(
                Operation::CancelRegistration,
                claim,
                Some(registration.participant().email()),
            )
            .await?;
        self.registrations.delete(id).await?;

        if self.decrement_on_cancel {
            if let Err(err) = self.camps.decrement_count(registration.camp_id()).await {
                tracing::error!(
                    registration_id = %id,
                    camp_id = %registration.camp_id(),
                    error = %err,
                    "registration deleted but participant counter decrement failed",
                );
                return Err(DomainError::Inconsistency {
                    committed_id: id,
                    failed_id: registration.camp_id(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicU32, Ordering},
    };

    use async_trait::async_trait;
    use uuid::Uuid;

    use super::*;
    use crate::domain::models::{
        camp::{Camp, CampPage, CampSort, PageRequest},
        identity::Role,
        payment::Payment,
        registration::PaymentStatus,
        user::{ProfileUpdate, User},
    };

    #[derive(Clone, Default)]
    struct InMemoryRegistrationRepository {
        rows: Arc<Mutex<Vec<Registration>>>,
    }

    #[async_trait]
    impl RegistrationRepository for InMemoryRegistrationRepository {
        async fn insert(&self, registration: &Registration) -> Result<(), RepositoryError> {
            self.rows.lock().unwrap().push(registration.clone());
            Ok(())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Registration>, RepositoryError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .find(|row| row.id() == id)
                .cloned())
        }

        async fn list_all(&self) -> Result<Vec<Registration>, RepositoryError> {
            Ok(self.rows.lock().unwrap().clone())
        }

        async fn list_by_participant(
            &self,
            email: &str,
        ) -> Result<Vec<Registration>, RepositoryError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|row| row.is_owned_by(email))
                .cloned()
                .collect())
        }

        async fn set_status(
            &self,
            id: Uuid,
            status: RegistrationStatus,
        ) -> Result<(), RepositoryError> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|row| row.id() == id)
                .ok_or(RepositoryError::NotFound)?;
            if status == RegistrationStatus::Confirmed {
                row.confirm();
            }
            Ok(())
        }

        async fn set_payment_status(
            &self,
            id: Uuid,
            status: PaymentStatus,
        ) -> Result<(), RepositoryError> {
            let mut rows = self.rows.lock().unwrap();
            let row = rows
                .iter_mut()
                .find(|row| row.id() == id)
                .ok_or(RepositoryError::NotFound)?;
            if status == PaymentStatus::Paid {
                row.mark_paid();
            }
            Ok(())
        }

        async fn delete(&self, id: Uuid) -> Result<(), RepositoryError> {
            self.rows.lock().unwrap().retain(|row| row.id() != id);
            Ok(())
        }

        async fn count(&self) -> Result<u64, RepositoryError> {
            Ok(self.rows.lock().unwrap().len() as u64)
        }

        async fn count_by_payment_status(
            &self,
            status: PaymentStatus,
        ) -> Result<u64, RepositoryError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .filter(|row| row.payment_status() == status)
                .count() as u64)
        }
    }

    /// Single-camp catalog whose counter increment can be forced to fail.
    #[derive(Clone)]
    struct FlakyCampRepository {
        camp: Camp,
        count: Arc<AtomicU32>,
        fail_increment: Arc<AtomicBool>,
    }

    impl FlakyCampRepository {
        fn new(camp: Camp) -> Self {
            Self {
                camp,
                count: Arc::new(AtomicU32::new(0)),
                fail_increment: Arc::new(AtomicBool::new(false)),
            }
        }
    }

    #[async_trait]
    impl CampRepository for FlakyCampRepository {
        async fn insert(&self, _camp: &Camp) -> Result<(), RepositoryError> {
            Ok(())
        }

        async fn find_by_id(&self, id: Uuid) -> Result<Option<Camp>, RepositoryError> {
            if id == self.camp.id() {
                Ok(Some(self.camp.clone()))
            } else {
                Ok(None)
            }
        }

        async fn search(
            &self,
            _filter: Option<&str>,
            _page: Option<PageRequest>,
            _sort: Option<CampSort>,
        ) -> Result<CampPage, RepositoryError> {
            Ok(CampPage {
                camps: vec![self.camp.clone()],
                total: 1,
            })
        }

        async fn popular(&self, _limit: u64) -> Result<Vec<Camp>, RepositoryError> {
            Ok(vec![self.camp.clone()])
        }

        async fn upsert(&self, _camp: &Camp) -> Result<(), RepositoryError> {
            Ok(())
        }

        async fn delete(&self, _id: Uuid) -> Result<(), RepositoryError> {
            Ok(())
        }

        async fn increment_count(&self, id: Uuid) -> Result<(), RepositoryError> {
            if self.fail_increment.load(Ordering::SeqCst) {
                return Err(RepositoryError::DatabaseError("connection reset".to_string()));
            }
            if id != self.camp.id() {
                return Err(RepositoryError::NotFound);
            }
            self.count.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        async fn decrement_count(&self, id: Uuid) -> Result<(), RepositoryError> {
            if id != self.camp.id() {
                return Err(RepositoryError::NotFound);
            }
            self.count.fetch_sub(1, Ordering::SeqCst);
            Ok(())
        }

        async fn count(&self) -> Result<u64, RepositoryError> {
            Ok(1)
        }
    }

    #[derive(Clone, Default)]
    struct StubPaymentRepository {
        fail_confirm: Arc<AtomicBool>,
        confirmed: Arc<Mutex<Vec<Uuid>>>,
    }

    #[async_trait]
    impl PaymentRepository for StubPaymentRepository {
        async fn insert(&self, _payment: &Payment) -> Result<(), RepositoryError> {
            Ok(())
        }

        async fn list_by_participant(&self, _email: &str) -> Result<Vec<Payment>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn confirm_for_registration(
            &self,
            registration_id: Uuid,
        ) -> Result<(), RepositoryError> {
            if self.fail_confirm.load(Ordering::SeqCst) {
                return Err(RepositoryError::DatabaseError("write failed".to_string()));
            }
            self.confirmed.lock().unwrap().push(registration_id);
            Ok(())
        }

        async fn total_amount(&self) -> Result<f64, RepositoryError> {
            Ok(0.0)
        }
    }

    #[derive(Clone)]
    struct RoleTableUserRepository;

    #[async_trait]
    impl UserRepository for RoleTableUserRepository {
        async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
            let role = if email == "admin@example.com" {
                Role::Admin
            } else {
                Role::User
            };
            Ok(Some(User::reconstruct(
                Uuid::new_v4(),
                email.to_string(),
                "someone".to_string(),
                role,
                None,
                None,
                None,
                chrono::Utc::now(),
            )))
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
            Ok(0)
        }
    }

    type TestUsecase = RegistrationUsecase<
        InMemoryRegistrationRepository,
        FlakyCampRepository,
        StubPaymentRepository,
        RoleTableUserRepository,
    >;

    struct Harness {
        usecase: TestUsecase,
        registrations: InMemoryRegistrationRepository,
        camps: FlakyCampRepository,
        payments: StubPaymentRepository,
        camp_id: Uuid,
    }

    fn harness(decrement_on_cancel: bool) -> Harness {
        let camp = Camp::new(
            Uuid::new_v4(),
            "Health Camp".to_string(),
            "Org".to_string(),
            "Dhaka".to_string(),
            "2026-09-01".to_string(),
            50.0,
            String::new(),
        )
        .unwrap();
        let camp_id = camp.id();
        let registrations = InMemoryRegistrationRepository::default();
        let camps = FlakyCampRepository::new(camp);
        let payments = StubPaymentRepository::default();
        let usecase = RegistrationUsecase::new(
            registrations.clone(),
            camps.clone(),
            payments.clone(),
            AccessControl::new(RoleTableUserRepository),
            decrement_on_cancel,
        );
        Harness {
            usecase,
            registrations,
            camps,
            payments,
            camp_id,
        }
    }

    fn claim(email: &str) -> IdentityClaim {
        IdentityClaim::new(email.to_string()).unwrap()
    }

    #[tokio::test]
    async fn register_inserts_pending_row_and_increments_counter() {
        let h = harness(false);
        let registration = h
            .usecase
            .register(&claim("alice@example.com"), h.camp_id, "Alice".to_string())
            .await
            .unwrap();

        assert_eq!(registration.status(), RegistrationStatus::Pending);
        assert_eq!(registration.payment_status(), PaymentStatus::Pending);
        assert_eq!(h.camps.count.load(Ordering::SeqCst), 1);
        assert_eq!(h.registrations.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn register_against_unknown_camp_is_not_found() {
        let h = harness(false);
        let result = h
            .usecase
            .register(&claim("alice@example.com"), Uuid::new_v4(), "Alice".to_string())
            .await;
        assert!(matches!(result, Err(DomainError::NotFound("camp"))));
        assert_eq!(h.registrations.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn failed_increment_surfaces_inconsistency_and_keeps_registration() {
        let h = harness(false);
        h.camps.fail_increment.store(true, Ordering::SeqCst);

        let result = h
            .usecase
            .register(&claim("alice@example.com"), h.camp_id, "Alice".to_string())
            .await;

        let Err(DomainError::Inconsistency { failed_id, .. }) = result else {
            panic!("expected the inconsistency signal, got {result:?}");
        };
        assert_eq!(failed_id, h.camp_id);
        // the first step is not rolled back
        assert_eq!(h.registrations.count().await.unwrap(), 1);
        assert_eq!(h.camps.count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn admin_listing_rejects_plain_members() {
        let h = harness(false);
        let result = h
            .usecase
            .list_for_admin(&claim("alice@example.com"), None)
            .await;
        assert!(matches!(result, Err(DomainError::Forbidden)));
    }

    #[tokio::test]
    async fn user_listing_is_scoped_to_the_caller() {
        let h = harness(false);
        h.usecase
            .register(&claim("alice@example.com"), h.camp_id, "Alice".to_string())
            .await
            .unwrap();
        h.usecase
            .register(&claim("bob@example.com"), h.camp_id, "Bob".to_string())
            .await
            .unwrap();

        let listing = h
            .usecase
            .list_for_user(&claim("alice@example.com"), Some("health"))
            .await
            .unwrap();
        assert_eq!(listing.all.len(), 1);
        assert_eq!(listing.filtered.len(), 1);
        assert!(listing.all[0].is_owned_by("alice@example.com"));

        let listing = h
            .usecase
            .list_for_user(&claim("alice@example.com"), Some("no-such-camp"))
            .await
            .unwrap();
        assert_eq!(listing.all.len(), 1);
        assert!(listing.filtered.is_empty());
    }

    #[tokio::test]
    async fn confirm_is_admin_only_and_cross_updates_payments() {
        let h = harness(false);
        let registration = h
            .usecase
            .register(&claim("alice@example.com"), h.camp_id, "Alice".to_string())
            .await
            .unwrap();

        let result = h
            .usecase
            .confirm(&claim("alice@example.com"), registration.id())
            .await;
        assert!(matches!(result, Err(DomainError::Forbidden)));

        h.usecase
            .confirm(&claim("admin@example.com"), registration.id())
            .await
            .unwrap();
        let stored = h
            .registrations
            .find_by_id(registration.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status(), RegistrationStatus::Confirmed);
        assert_eq!(*h.payments.confirmed.lock().unwrap(), vec![registration.id()]);
    }

    #[tokio::test]
    async fn confirm_survives_a_failed_payment_cross_update() {
        let h = harness(false);
        let registration = h
            .usecase
            .register(&claim("alice@example.com"), h.camp_id, "Alice".to_string())
            .await
            .unwrap();
        h.payments.fail_confirm.store(true, Ordering::SeqCst);

        h.usecase
            .confirm(&claim("admin@example.com"), registration.id())
            .await
            .unwrap();
        let stored = h
            .registrations
            .find_by_id(registration.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status(), RegistrationStatus::Confirmed);
    }

    #[tokio::test]
    async fn cancel_by_non_owner_is_forbidden() {
        let h = harness(false);
        let registration = h
            .usecase
            .register(&claim("alice@example.com"), h.camp_id, "Alice".to_string())
            .await
            .unwrap();

        let result = h
            .usecase
            .cancel(&claim("mallory@example.com"), registration.id())
            .await;
        assert!(matches!(result, Err(DomainError::Forbidden)));
        assert_eq!(h.registrations.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn cancel_leaves_counter_untouched_by_default() {
        let h = harness(false);
        let registration = h
            .usecase
            .register(&claim("alice@example.com"), h.camp_id, "Alice".to_string())
            .await
            .unwrap();

        h.usecase
            .cancel(&claim("alice@example.com"), registration.id())
            .await
            .unwrap();
        assert_eq!(h.registrations.count().await.unwrap(), 0);
        // documented gap: the counter keeps the historical value
        assert_eq!(h.camps.count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn cancel_decrements_counter_when_configured() {
        let h = harness(true);
        let registration = h
            .usecase
            .register(&claim("alice@example.com"), h.camp_id, "Alice".to_string())
            .await
            .unwrap();

        h.usecase
            .cancel(&claim("alice@example.com"), registration.id())
            .await
            .unwrap();
        assert_eq!(h.camps.count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn admin_may_cancel_someone_elses_registration() {
        let h = harness(false);
        let registration = h
            .usecase
            .register(&claim("alice@example.com"), h.camp_id, "Alice".to_string())
            .await
            .unwrap();

        h.usecase
            .cancel(&claim("admin@example.com"), registration.id())
            .await
            .unwrap();
        assert_eq!(h.registrations.count().await.unwrap(), 0);
    }
}
