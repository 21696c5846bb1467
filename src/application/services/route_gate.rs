//! Route gate: decides whether a requested route renders or redirects.

use crate::domain::route::{Access, Route};

/// Outcome of consulting the gate for one navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// The requested route may render.
    Render(Route),
    /// The requested route is not allowed; render this one instead.
    Redirect(Route),
}

impl GateDecision {
    /// Route that ends up rendering.
    #[must_use]
    pub const fn target(self) -> Route {
        match self {
            Self::Render(route) | Self::Redirect(route) => route,
        }
    }

    #[must_use]
    pub const fn is_redirect(self) -> bool {
        matches!(self, Self::Redirect(_))
    }
}

/// Session-based access policy for routes.
///
/// No expiry and no server revalidation: a missing token and an expired
/// token are both "not authenticated".
pub struct RouteGate;

impl RouteGate {
    /// Where anonymous users land when they request a protected route.
    pub const ANONYMOUS_LANDING: Route = Route::Login;
    /// Where authenticated users land when they request an auth page.
    pub const AUTHENTICATED_LANDING: Route = Route::Users;

    /// Resolves a navigation request. Redirect targets always satisfy their
    /// own requirement, so a decision never chains.
    #[must_use]
    pub const fn resolve(route: Route, is_authenticated: bool) -> GateDecision {
        match (route.access(), is_authenticated) {
            (Access::RequiresAuth, false) => GateDecision::Redirect(Self::ANONYMOUS_LANDING),
            (Access::RequiresAnonymous, true) => {
                GateDecision::Redirect(Self::AUTHENTICATED_LANDING)
            }
            _ => GateDecision::Render(route),
        }
    }
}
