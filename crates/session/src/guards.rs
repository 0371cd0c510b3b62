//! Pure routing gates over the session phase.
//!
//! These decide what a protected route should do right now; rendering the
//! spinner and performing the redirect stay with the UI layer. They are
//! advisory only, the API re-checks authorization on every request.

use identity::Role;

use crate::controller::SessionPhase;

/// Where unauthenticated visitors are sent.
pub const SIGN_IN_ROUTE: &str = "/login";

/// Where authenticated users land when a role check turns them away.
pub const LANDING_ROUTE: &str = "/dashboard";

#[derive(Debug, Clone, PartialEq)]
pub enum GateDecision {
    /// The session phase is still unresolved; render nothing yet.
    Pending,
    Denied(Denial),
    Allowed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Denial {
    pub redirect: &'static str,
    /// User-facing notice explaining the denial, when one is warranted.
    pub notice: Option<String>,
}

/// Gate a route on being signed in.
#[must_use]
pub fn authentication_gate(phase: &SessionPhase) -> GateDecision {
    match phase {
        SessionPhase::Uninitialized | SessionPhase::Authenticating => GateDecision::Pending,
        SessionPhase::Authenticated(_) => GateDecision::Allowed,
        SessionPhase::Anonymous | SessionPhase::Error(_) => GateDecision::Denied(Denial {
            redirect: SIGN_IN_ROUTE,
            notice: None,
        }),
    }
}

/// Gate a route on holding `required`. A signed-in user with the wrong role
/// is sent back to the landing page with a notice; an anonymous visitor is
/// sent to sign in without one.
#[must_use]
pub fn role_gate(phase: &SessionPhase, required: Role) -> GateDecision {
    match phase {
        SessionPhase::Uninitialized | SessionPhase::Authenticating => GateDecision::Pending,
        SessionPhase::Authenticated(user) if user.role == required => GateDecision::Allowed,
        SessionPhase::Authenticated(_) => GateDecision::Denied(Denial {
            redirect: LANDING_ROUTE,
            notice: Some(format!("Access denied: {required} role required.")),
        }),
        SessionPhase::Anonymous | SessionPhase::Error(_) => GateDecision::Denied(Denial {
            redirect: SIGN_IN_ROUTE,
            notice: None,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::{GateDecision, LANDING_ROUTE, SIGN_IN_ROUTE, authentication_gate, role_gate};
    use crate::controller::SessionPhase;
    use crate::error::SessionError;
    use identity::{Role, User};

    fn user_with(role: Role) -> User {
        User {
            id: "u-7".to_string(),
            name: "Noa Reyes".to_string(),
            email: "noa@example.test".to_string(),
            role,
            avatar: None,
        }
    }

    #[test]
    fn unresolved_phases_hold_both_gates() {
        for phase in [SessionPhase::Uninitialized, SessionPhase::Authenticating] {
            assert_eq!(authentication_gate(&phase), GateDecision::Pending);
            assert_eq!(role_gate(&phase, Role::Admin), GateDecision::Pending);
        }
    }

    #[test]
    fn signed_in_users_pass_the_authentication_gate() {
        let phase = SessionPhase::Authenticated(user_with(Role::User));
        assert_eq!(authentication_gate(&phase), GateDecision::Allowed);
    }

    #[test]
    fn anonymous_and_errored_phases_redirect_to_sign_in() {
        let phases = [
            SessionPhase::Anonymous,
            SessionPhase::Error(SessionError::NotAuthenticated),
        ];

        for phase in phases {
            let GateDecision::Denied(denial) = authentication_gate(&phase) else {
                panic!("expected a denial for {phase:?}");
            };
            assert_eq!(denial.redirect, SIGN_IN_ROUTE);
            assert_eq!(denial.notice, None);
        }
    }

    #[test]
    fn the_role_gate_admits_matching_roles() {
        let admin = SessionPhase::Authenticated(user_with(Role::Admin));
        assert_eq!(role_gate(&admin, Role::Admin), GateDecision::Allowed);

        let user = SessionPhase::Authenticated(user_with(Role::User));
        assert_eq!(role_gate(&user, Role::User), GateDecision::Allowed);
    }

    #[test]
    fn a_role_mismatch_redirects_to_the_landing_page_with_a_notice() {
        let phase = SessionPhase::Authenticated(user_with(Role::User));

        let GateDecision::Denied(denial) = role_gate(&phase, Role::Admin) else {
            panic!("expected a denial");
        };

        assert_eq!(denial.redirect, LANDING_ROUTE);
        let notice = denial.notice.unwrap();
        assert!(notice.contains("ADMIN"), "notice should name the role: {notice}");
    }

    #[test]
    fn the_role_gate_sends_anonymous_visitors_to_sign_in() {
        let GateDecision::Denied(denial) = role_gate(&SessionPhase::Anonymous, Role::Admin) else {
            panic!("expected a denial");
        };

        assert_eq!(denial.redirect, SIGN_IN_ROUTE);
        assert_eq!(denial.notice, None);
    }
}
