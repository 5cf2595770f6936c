use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::{error::DomainError, models::camp::Camp};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationStatus {
    Pending,
    Confirmed,
}

impl RegistrationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            _ => None,
        }
    }
}

/// Whether the registration has received a linked payment. Orthogonal to
/// [`RegistrationStatus`]; moves pending -> paid once and is never reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "paid" => Some(Self::Paid),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Participant {
    name: String,
    email: String,
}

impl Participant {
    pub fn new(name: String, email: String) -> Result<Self, DomainError> {
        if name.is_empty() {
            return Err(DomainError::EmptyName);
        }
        if !email.contains('@') {
            return Err(DomainError::InvalidEmail);
        }
        Ok(Self { name, email })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn email(&self) -> &str {
        &self.email
    }
}

#[derive(Debug, Clone)]
pub struct Registration {
    id: Uuid,
    camp_id: Uuid,
    camp_name: String,
    camp_fee: f64,
    participant: Participant,
    status: RegistrationStatus,
    payment_status: PaymentStatus,
    created_at: DateTime<Utc>,
}

impl Registration {
    /// Snapshots the camp's name and fee at creation time so listings and
    /// stats need no join back to the catalog.
    pub fn new(id: Uuid, camp: &Camp, participant: Participant) -> Self {
        Self {
            id,
            camp_id: camp.id(),
            camp_name: camp.name().to_string(),
            camp_fee: camp.price(),
            participant,
            status: RegistrationStatus::Pending,
            payment_status: PaymentStatus::Pending,
            created_at: Utc::now(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn reconstruct(
        id: Uuid,
        camp_id: Uuid,
        camp_name: String,
        camp_fee: f64,
        participant: Participant,
        status: RegistrationStatus,
        payment_status: PaymentStatus,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            camp_id,
            camp_name,
            camp_fee,
            participant,
            status,
            payment_status,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
    pub fn camp_id(&self) -> Uuid {
        self.camp_id
    }
    pub fn camp_name(&self) -> &str {
        &self.camp_name
    }
    pub fn camp_fee(&self) -> f64 {
        self.camp_fee
    }
    pub fn participant(&self) -> &Participant {
        &self.participant
    }
    pub fn status(&self) -> RegistrationStatus {
        self.status
    }
    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn confirm(&mut self) {
        self.status = RegistrationStatus::Confirmed;
    }

    pub fn mark_paid(&mut self) {
        self.payment_status = PaymentStatus::Paid;
    }

    pub fn is_owned_by(&self, email: &str) -> bool {
        self.participant.email == email
    }

    /// Substring filter over camp name, both status axes and the
    /// participant's name, matching the admin listing contract.
    pub fn matches(&self, filter: &str) -> bool {
        let needle = filter.to_lowercase();
        self.camp_name.to_lowercase().contains(&needle)
            || self.status.as_str().contains(&needle)
            || self.payment_status.as_str().contains(&needle)
            || self.participant.name.to_lowercase().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camp() -> Camp {
        Camp::new(
            Uuid::new_v4(),
            "Health Camp".to_string(),
            "Org".to_string(),
            "Dhaka".to_string(),
            "2026-09-01".to_string(),
            50.0,
            String::new(),
        )
        .unwrap()
    }

    fn participant() -> Participant {
        Participant::new("Alice".to_string(), "alice@example.com".to_string()).unwrap()
    }

    #[test]
    fn new_registration_starts_pending_on_both_axes() {
        let registration = Registration::new(Uuid::new_v4(), &camp(), participant());
        assert_eq!(registration.status(), RegistrationStatus::Pending);
        assert_eq!(registration.payment_status(), PaymentStatus::Pending);
        assert_eq!(registration.camp_fee(), 50.0);
        assert_eq!(registration.camp_name(), "Health Camp");
    }

    #[test]
    fn confirm_and_mark_paid_move_independent_axes() {
        let mut registration = Registration::new(Uuid::new_v4(), &camp(), participant());
        registration.confirm();
        assert_eq!(registration.status(), RegistrationStatus::Confirmed);
        assert_eq!(registration.payment_status(), PaymentStatus::Pending);
        registration.mark_paid();
        assert_eq!(registration.payment_status(), PaymentStatus::Paid);
    }

    #[test]
    fn ownership_is_matched_by_email() {
        let registration = Registration::new(Uuid::new_v4(), &camp(), participant());
        assert!(registration.is_owned_by("alice@example.com"));
        assert!(!registration.is_owned_by("bob@example.com"));
    }

    #[test]
    fn filter_covers_name_statuses_and_participant() {
        let registration = Registration::new(Uuid::new_v4(), &camp(), participant());
        assert!(registration.matches("health"));
        assert!(registration.matches("pending"));
        assert!(registration.matches("alice"));
        assert!(!registration.matches("confirmed"));
    }
}
