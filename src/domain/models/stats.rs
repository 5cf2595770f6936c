use serde::Serialize;

use crate::domain::models::registration::{PaymentStatus, Registration, RegistrationStatus};

/// Per-user rollup computed in a single pass over the caller's
/// registrations. The six counters partition the same set along the two
/// orthogonal status axes, so `confirmed + pending == total` and
/// `paid + unpaid == total` hold by construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub total_camps: u64,
    pub total_spent: f64,
    pub confirmed_count: u64,
    pub pending_count: u64,
    pub paid_count: u64,
    pub unpaid_count: u64,
}

impl UserStats {
    pub fn from_registrations(registrations: &[Registration]) -> Self {
        let mut stats = Self {
            total_camps: 0,
            total_spent: 0.0,
            confirmed_count: 0,
            pending_count: 0,
            paid_count: 0,
            unpaid_count: 0,
        };
        for registration in registrations {
            stats.total_camps += 1;
            match registration.status() {
                RegistrationStatus::Confirmed => stats.confirmed_count += 1,
                RegistrationStatus::Pending => stats.pending_count += 1,
            }
            match registration.payment_status() {
                PaymentStatus::Paid => {
                    stats.paid_count += 1;
                    stats.total_spent += registration.camp_fee();
                }
                PaymentStatus::Pending => stats.unpaid_count += 1,
            }
        }
        stats
    }
}

/// Platform-wide rollup. Revenue is summed over payment records, not
/// registrations, so a mislinked payment shows up as drift here rather
/// than being hidden.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdminStats {
    pub total_camps: u64,
    pub total_users: u64,
    pub total_registrations: u64,
    pub paid_registrations: u64,
    pub unpaid_registrations: u64,
    pub total_revenue: f64,
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;
    use crate::domain::models::{camp::Camp, registration::Participant};

    fn registration(fee: f64, confirmed: bool, paid: bool) -> Registration {
        let camp = Camp::new(
            Uuid::new_v4(),
            "Camp".to_string(),
            String::new(),
            String::new(),
            String::new(),
            fee,
            String::new(),
        )
        .unwrap();
        let participant =
            Participant::new("Alice".to_string(), "alice@example.com".to_string()).unwrap();
        let mut registration = Registration::new(Uuid::new_v4(), &camp, participant);
        if confirmed {
            registration.confirm();
        }
        if paid {
            registration.mark_paid();
        }
        registration
    }

    #[test]
    fn counters_partition_along_both_axes() {
        let registrations = vec![
            registration(50.0, false, false),
            registration(30.0, true, true),
            registration(20.0, false, true),
            registration(10.0, true, false),
        ];
        let stats = UserStats::from_registrations(&registrations);
        assert_eq!(stats.total_camps, 4);
        assert_eq!(stats.confirmed_count + stats.pending_count, stats.total_camps);
        assert_eq!(stats.paid_count + stats.unpaid_count, stats.total_camps);
        assert_eq!(stats.confirmed_count, 2);
        assert_eq!(stats.paid_count, 2);
    }

    #[test]
    fn total_spent_only_counts_paid_registrations() {
        let registrations = vec![
            registration(50.0, false, true),
            registration(30.0, false, false),
        ];
        let stats = UserStats::from_registrations(&registrations);
        assert_eq!(stats.total_spent, 50.0);
    }

    #[test]
    fn empty_set_yields_zeroes() {
        let stats = UserStats::from_registrations(&[]);
        assert_eq!(stats.total_camps, 0);
        assert_eq!(stats.total_spent, 0.0);
    }
}
