use uuid::Uuid;

use crate::{
    domain::{
        error::DomainError,
        models::{
            identity::IdentityClaim,
            payment::Payment,
            registration::PaymentStatus,
        },
        policy::Operation,
        repositories::{
            camp_repository::CampRepository, payment_repository::PaymentRepository,
            registration_repository::RegistrationRepository, user_repository::UserRepository,
        },
        services::payment_gateway::{PaymentGateway, PaymentIntent},
    },
    usecase::access_control::AccessControl,
};

const INTENT_CURRENCY: &str = "usd";

/// Client-supplied payment record, priced by an earlier registration
/// lookup on the caller's side.
#[derive(Debug, Clone)]
pub struct PaymentDraft {
    pub registration_id: Uuid,
    pub camp_name: String,
    pub amount: f64,
}

#[derive(Debug)]
pub struct PaymentHistory {
    pub all: Vec<Payment>,
    pub filtered: Vec<Payment>,
}

pub struct PaymentUsecase<P, R, C, G, U>
where
    P: PaymentRepository,
    R: RegistrationRepository,
    C: CampRepository,
    G: PaymentGateway,
    U: UserRepository,
{
    payments: P,
    registrations: R,
    camps: C,
    gateway: G,
    access: AccessControl<U>,
}

impl<P, R, C, G, U> PaymentUsecase<P, R, C, G, U>
where
    P: PaymentRepository + Send + Sync,
    R: RegistrationRepository + Send + Sync,
    C: CampRepository + Send + Sync,
    G: PaymentGateway + Send + Sync,
    U: UserRepository + Send + Sync,
{
    pub fn new(payments: P, registrations: R, camps: C, gateway: G, access: AccessControl<U>) -> Self {
        Self {
            payments,
            registrations,
            camps,
            gateway,
            access,
        }
    }

    /// Prices the camp in the processor's minor units and delegates to the
    /// external gateway. A missing camp is an explicit `NotFound`.
    pub async fn create_intent(
        &self,
        claim: &IdentityClaim,
        camp_id: Uuid,
    ) -> Result<PaymentIntent, DomainError> {
        self.access
            .authorize(Operation::CreateIntent, claim, None)
            .await?;
        let camp = self
            .camps
            .find_by_id(camp_id)
            .await?
            .ok_or(DomainError::NotFound("camp"))?;
        self.gateway
            .create_intent(camp.price_minor_units(), INTENT_CURRENCY)
            .await
    }

    /// Records the payment, then marks the linked registration paid — the
    /// only writer of that field. When the cross-update fails the payment
    /// stays recorded, the divergence is logged with both identifiers and
    /// surfaced as `Inconsistency`.
    pub async fn record_payment(
        &self,
        claim: &IdentityClaim,
        draft: PaymentDraft,
    ) -> Result<Payment, DomainError> {
        self.access
            .authorize(Operation::RecordPayment, claim, None)
            .await?;
        let payment = Payment::new(
            Uuid::new_v4(),
            draft.registration_id,
            draft.camp_name,
            claim.as_str().to_string(),
            draft.amount,
        )?;
        self.payments.insert(&payment).await?;

        if let Err(err) = self
            .registrations
            .set_payment_status(draft.registration_id, PaymentStatus::Paid)
            .await
        {
            tracing::error!(
                payment_id = %payment.id(),
                registration_id = %draft.registration_id,
                error = %err,
                "payment recorded but registration payment status was not updated",
            );
            return Err(DomainError::Inconsistency {
                committed_id: payment.id(),
                failed_id: draft.registration_id,
            });
        }
        Ok(payment)
    }

    pub async fn history(
        &self,
        claim: &IdentityClaim,
        filter: Option<&str>,
    ) -> Result<PaymentHistory, DomainError> {
        self.access
            .authorize(Operation::ListOwnPayments, claim, None)
            .await?;
        let all = self.payments.list_by_participant(claim.as_str()).await?;
        let filtered = match filter {
            Some(filter) => all
                .iter()
                .filter(|payment| payment.matches(filter))
                .cloned()
                .collect(),
            None => all.clone(),
        };
        Ok(PaymentHistory { all, filtered })
    }
}
