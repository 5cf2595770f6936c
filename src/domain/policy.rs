//! Capability policy table keyed by operation.
//!
//! Authorization is a check composed from {Authenticated, OwnsResource,
//! Admin} looked up per operation, instead of conditionals scattered
//! through the handlers. An operation is allowed when any one alternative
//! (outer slice) has all of its capabilities (inner slice) satisfied.

use crate::domain::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreateCamp,
    UpdateCamp,
    DeleteCamp,
    RegisterForCamp,
    ListAllRegistrations,
    ListOwnRegistrations,
    GetRegistration,
    ConfirmRegistration,
    CancelRegistration,
    CreateIntent,
    RecordPayment,
    ListOwnPayments,
    UpdateProfile,
    CheckRole,
    CreateReview,
    ViewUserStats,
    ViewAdminStats,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Authenticated,
    OwnsResource,
    Admin,
}

/// What the caller has actually proven, never what the request claims.
#[derive(Debug, Clone, Copy)]
pub struct AccessContext {
    pub authenticated: bool,
    pub owns_resource: bool,
    pub is_admin: bool,
}

pub fn requirements(operation: Operation) -> &'static [&'static [Capability]] {
    use Capability::{Admin, Authenticated, OwnsResource};
    match operation {
        Operation::CreateCamp
        | Operation::UpdateCamp
        | Operation::DeleteCamp
        | Operation::ListAllRegistrations
        | Operation::ConfirmRegistration
        | Operation::ViewAdminStats => &[&[Authenticated, Admin]],
        Operation::CancelRegistration | Operation::UpdateProfile | Operation::CheckRole => {
            &[&[Authenticated, OwnsResource], &[Authenticated, Admin]]
        }
        Operation::RegisterForCamp
        | Operation::ListOwnRegistrations
        | Operation::GetRegistration
        | Operation::CreateIntent
        | Operation::RecordPayment
        | Operation::ListOwnPayments
        | Operation::CreateReview
        | Operation::ViewUserStats => &[&[Authenticated]],
    }
}

/// Whether any alternative for this operation involves the admin role,
/// so callers can skip the role lookup when it cannot matter.
pub fn needs_role_lookup(operation: Operation) -> bool {
    requirements(operation)
        .iter()
        .any(|alternative| alternative.contains(&Capability::Admin))
}

pub fn check(operation: Operation, context: &AccessContext) -> Result<(), DomainError> {
    if !context.authenticated {
        return Err(DomainError::Unauthenticated);
    }
    let satisfied = requirements(operation).iter().any(|alternative| {
        alternative.iter().all(|capability| match capability {
            Capability::Authenticated => context.authenticated,
            Capability::OwnsResource => context.owns_resource,
            Capability::Admin => context.is_admin,
        })
    });
    if satisfied {
        Ok(())
    } else {
        Err(DomainError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const MEMBER: AccessContext = AccessContext {
        authenticated: true,
        owns_resource: false,
        is_admin: false,
    };
    const OWNER: AccessContext = AccessContext {
        authenticated: true,
        owns_resource: true,
        is_admin: false,
    };
    const ADMIN: AccessContext = AccessContext {
        authenticated: true,
        owns_resource: false,
        is_admin: true,
    };
    const ANONYMOUS: AccessContext = AccessContext {
        authenticated: false,
        owns_resource: false,
        is_admin: false,
    };

    #[rstest]
    #[case(Operation::CreateCamp)]
    #[case(Operation::ListAllRegistrations)]
    #[case(Operation::ConfirmRegistration)]
    #[case(Operation::ViewAdminStats)]
    fn admin_operations_reject_plain_members(#[case] operation: Operation) {
        assert!(matches!(
            check(operation, &MEMBER),
            Err(DomainError::Forbidden)
        ));
        assert!(check(operation, &ADMIN).is_ok());
    }

    #[test]
    fn cancellation_allows_owner_or_admin_only() {
        assert!(check(Operation::CancelRegistration, &OWNER).is_ok());
        assert!(check(Operation::CancelRegistration, &ADMIN).is_ok());
        assert!(matches!(
            check(Operation::CancelRegistration, &MEMBER),
            Err(DomainError::Forbidden)
        ));
    }

    #[test]
    fn anonymous_callers_are_unauthenticated_not_forbidden() {
        assert!(matches!(
            check(Operation::RegisterForCamp, &ANONYMOUS),
            Err(DomainError::Unauthenticated)
        ));
    }

    #[test]
    fn role_lookup_is_skipped_where_it_cannot_matter() {
        assert!(!needs_role_lookup(Operation::RegisterForCamp));
        assert!(needs_role_lookup(Operation::CancelRegistration));
        assert!(needs_role_lookup(Operation::CreateCamp));
    }
}
