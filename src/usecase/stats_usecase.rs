use crate::{
    domain::{
        error::DomainError,
        models::{
            identity::IdentityClaim,
            registration::PaymentStatus,
            stats::{AdminStats, UserStats},
        },
        policy::Operation,
        repositories::{
            camp_repository::CampRepository, payment_repository::PaymentRepository,
            registration_repository::RegistrationRepository, user_repository::UserRepository,
        },
    },
    usecase::access_control::AccessControl,
};

/// Read-only rollups computed on demand; nothing here mutates the ledgers.
pub struct StatsUsecase<R, P, C, U>
where
    R: RegistrationRepository,
    P: PaymentRepository,
    C: CampRepository,
    U: UserRepository,
{
    registrations: R,
    payments: P,
    camps: C,
    users: U,
    access: AccessControl<U>,
}

impl<R, P, C, U> StatsUsecase<R, P, C, U>
where
    R: RegistrationRepository + Send + Sync,
    P: PaymentRepository + Send + Sync,
    C: CampRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    pub fn new(registrations: R, payments: P, camps: C, users: U, access: AccessControl<U>) -> Self {
        Self {
            registrations,
            payments,
            camps,
            users,
            access,
        }
    }

    pub async fn user_stats(&self, claim: &IdentityClaim) -> Result<UserStats, DomainError> {
        self.access
            .authorize(Operation::ViewUserStats, claim, None)
            .await?;
        let registrations = self
            .registrations
            .list_by_participant(claim.as_str())
            .await?;
        Ok(UserStats::from_registrations(&registrations))
    }

    /// Revenue is summed over payment records, not registrations; if a
    /// payment was recorded without its cross-update, revenue and the paid
    /// counter diverge here instead of being papered over.
    pub async fn admin_stats(&self, claim: &IdentityClaim) -> Result<AdminStats, DomainError> {
        self.access
            .authorize(Operation::ViewAdminStats, claim, None)
            .await?;
        Ok(AdminStats {
            total_camps: self.camps.count().await?,
            total_users: self.users.count().await?,
            total_registrations: self.registrations.count().await?,
            paid_registrations: self
                .registrations
                .count_by_payment_status(PaymentStatus::Paid)
                .await?,
            unpaid_registrations: self
                .registrations
                .count_by_payment_status(PaymentStatus::Pending)
                .await?,
            total_revenue: self.payments.total_amount().await?,
        })
    }
}
