//! Routes and the authentication guard in front of them

use crate::session::AuthContext;
use numis_core::types::{AuthUser, CoinId};
use std::fmt;

/// Every page of the panel
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Dashboard,
    NewCoin,
    EditCoin(CoinId),
}

impl Route {
    /// Resolve a path; anything unknown goes to the dashboard
    pub fn parse(path: &str) -> Self {
        let segments: Vec<&str> = path
            .split('?')
            .next()
            .unwrap_or_default()
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        match segments.as_slice() {
            ["login"] => Route::Login,
            ["coins", "new"] => Route::NewCoin,
            ["coins", id, "edit"] => Route::EditCoin(CoinId::new(*id)),
            _ => Route::Dashboard,
        }
    }

    /// Canonical path
    pub fn path(&self) -> String {
        match self {
            Route::Login => "/login".to_string(),
            Route::Dashboard => "/".to_string(),
            Route::NewCoin => "/coins/new".to_string(),
            Route::EditCoin(id) => format!("/coins/{id}/edit"),
        }
    }

    /// Whether the route needs a signed-in user
    pub fn is_protected(&self) -> bool {
        !matches!(self, Route::Login)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// What to do with a navigation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Render(Route),
    Redirect(Route),
}

/// Gate between navigation and pages
pub struct RouteGuard;

impl RouteGuard {
    /// Decide using the auth context's current user
    pub fn check(auth: &AuthContext, route: Route) -> GuardDecision {
        Self::decide(auth.current_user().as_ref(), route)
    }

    /// Decide for an explicit session state
    pub fn decide(user: Option<&AuthUser>, route: Route) -> GuardDecision {
        match (user, route) {
            (Some(_), Route::Login) => GuardDecision::Redirect(Route::Dashboard),
            (None, route) if route.is_protected() => GuardDecision::Redirect(Route::Login),
            (_, route) => GuardDecision::Render(route),
        }
    }
}
