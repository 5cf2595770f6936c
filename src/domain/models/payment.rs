use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::error::DomainError;

/// Lifecycle of a recorded payment. It is inserted as `paid` after a
/// successful charge; `confirmed` is written only by the registration
/// confirmation cross-update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentState {
    Paid,
    Confirmed,
}

impl PaymentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paid => "paid",
            Self::Confirmed => "confirmed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "paid" => Some(Self::Paid),
            "confirmed" => Some(Self::Confirmed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Payment {
    id: Uuid,
    registration_id: Uuid,
    camp_name: String,
    participant_email: String,
    amount: f64,
    state: PaymentState,
    created_at: DateTime<Utc>,
}

impl Payment {
    pub fn new(
        id: Uuid,
        registration_id: Uuid,
        camp_name: String,
        participant_email: String,
        amount: f64,
    ) -> Result<Self, DomainError> {
        if amount < 0.0 {
            return Err(DomainError::NegativePrice);
        }
        Ok(Self {
            id,
            registration_id,
            camp_name,
            participant_email,
            amount,
            state: PaymentState::Paid,
            created_at: Utc::now(),
        })
    }

    pub fn reconstruct(
        id: Uuid,
        registration_id: Uuid,
        camp_name: String,
        participant_email: String,
        amount: f64,
        state: PaymentState,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            registration_id,
            camp_name,
            participant_email,
            amount,
            state,
            created_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }
    pub fn registration_id(&self) -> Uuid {
        self.registration_id
    }
    pub fn camp_name(&self) -> &str {
        &self.camp_name
    }
    pub fn participant_email(&self) -> &str {
        &self.participant_email
    }
    pub fn amount(&self) -> f64 {
        self.amount
    }
    pub fn state(&self) -> PaymentState {
        self.state
    }
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn matches(&self, filter: &str) -> bool {
        let needle = filter.to_lowercase();
        self.camp_name.to_lowercase().contains(&needle)
            || self.state.as_str().contains(&needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_payment_starts_paid() {
        let payment = Payment::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            "Health Camp".to_string(),
            "alice@example.com".to_string(),
            50.0,
        )
        .unwrap();
        assert_eq!(payment.state(), PaymentState::Paid);
    }

    #[test]
    fn negative_amount_is_rejected() {
        let result = Payment::new(
            Uuid::new_v4(),
            Uuid::new_v4(),
            String::new(),
            "a@b.c".to_string(),
            -0.01,
        );
        assert!(matches!(result, Err(DomainError::NegativePrice)));
    }
}
