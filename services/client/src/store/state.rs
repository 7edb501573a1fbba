//! services/client/src/store/state.rs
//!
//! Defines the published session state and the routing decision derived from it.

use tracker_core::domain::{Role, User};

//=========================================================================================
// Session State
//=========================================================================================

/// Where the session is in its authentication lifecycle.
///
/// `Authenticated` is the only phase that carries a user, so "authenticated"
/// and "has a current user" cannot disagree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthPhase {
    /// Process start, before the first identity check.
    #[default]
    Uninitialized,
    /// An identity check is in flight; identity is unknown.
    CheckingAuth,
    Authenticated(User),
    Unauthenticated,
}

/// The process-wide session record. Only `SessionStore` writes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub phase: AuthPhase,
    /// A login, signup or logout is in flight.
    pub is_loading: bool,
    /// Message of the last failed login or signup.
    pub error: Option<String>,
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match &self.phase {
            AuthPhase::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.phase, AuthPhase::Authenticated(_))
    }

    pub fn is_checking_auth(&self) -> bool {
        matches!(self.phase, AuthPhase::CheckingAuth)
    }

    /// Which surface the UI should render for this state.
    pub fn route(&self) -> Route {
        match &self.phase {
            AuthPhase::Uninitialized | AuthPhase::CheckingAuth => Route::Loading,
            AuthPhase::Unauthenticated => Route::Landing,
            AuthPhase::Authenticated(user) => Route::dashboard_for(user.role),
        }
    }
}

//=========================================================================================
// Routing
//=========================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Neutral loading surface; never a default role.
    Loading,
    Landing,
    StudentDashboard,
    EngineerDashboard,
    AdminDashboard,
}

impl Route {
    pub fn dashboard_for(role: Role) -> Self {
        match role {
            Role::Student => Route::StudentDashboard,
            Role::Engineer => Route::EngineerDashboard,
            Role::Admin => Route::AdminDashboard,
        }
    }
}
