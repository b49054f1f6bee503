//! Route table and the authentication guard in front of it.

use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde::Serialize;

use crate::session::SessionStore;

#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Home,
    Employees,
    Attendance,
    Clients,
    Shifts,
}

impl Route {
    /// Pages listed in the navigation bar, in display order.
    pub const NAVIGATION: [Route; 5] = [
        Route::Home,
        Route::Employees,
        Route::Attendance,
        Route::Clients,
        Route::Shifts,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Home => "/",
            Route::Employees => "/employees",
            Route::Attendance => "/attendance",
            Route::Clients => "/clients",
            Route::Shifts => "/shifts",
        }
    }

    /// Resolves a path, ignoring any query string and trailing slash.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let path = match path.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };
        [Route::Login]
            .into_iter()
            .chain(Route::NAVIGATION)
            .find(|route| route.path() == path)
    }

    pub fn is_protected(self) -> bool {
        self != Route::Login
    }

    pub fn label(self) -> &'static str {
        match self {
            Route::Login => "Kirish",
            Route::Home => "Profil",
            Route::Employees => "Xodimlar",
            Route::Attendance => "Davomat",
            Route::Clients => "Mijozlar",
            Route::Shifts => "Smenalar",
        }
    }
}

impl Display for Route {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of a navigation attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Navigation {
    Render(Route),
    Redirect(Route),
}

/// Checks the session before any protected page is rendered.
///
/// Only the presence of a credential is checked; an expired token surfaces
/// later as an `Unauthorized` error from the page's own fetch.
#[derive(Clone)]
pub struct RouteGuard {
    session: Arc<dyn SessionStore>,
}

impl RouteGuard {
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self { session }
    }

    pub fn navigate(&self, route: Route) -> Navigation {
        let authenticated = self.session.is_authenticated();
        match route {
            Route::Login if authenticated => Navigation::Redirect(Route::Home),
            route if route.is_protected() && !authenticated => {
                log::info!("Redirecting unauthenticated visit to {route} to the login page");
                Navigation::Redirect(Route::Login)
            }
            route => Navigation::Render(route),
        }
    }

    /// Same as [`navigate`](Self::navigate) for a raw path; `None` for unknown paths.
    pub fn navigate_path(&self, path: &str) -> Option<Navigation> {
        Route::from_path(path).map(|route| self.navigate(route))
    }
}
