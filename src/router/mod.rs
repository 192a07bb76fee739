//! Page routing table and access guard.
//!
//! Routes are declared statically with their meta. [`Router::resolve`]
//! decides whether a path may be shown for the current [`Rights`] or where
//! to redirect instead.

mod rights;
mod routes;

pub use rights::Rights;
pub use routes::{Route, RouteMeta, ROUTES};

/// Result of resolving a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Allow(&'static Route),
    /// Redirect to the route with this name.
    Redirect(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub struct Router {
    routes: &'static [Route],
}

impl Default for Router {
    fn default() -> Self {
        Self { routes: ROUTES }
    }
}

impl Router {
    pub fn new(routes: &'static [Route]) -> Self {
        Self { routes }
    }

    pub fn routes(&self) -> &'static [Route] {
        self.routes
    }

    /// Look a route up by path or alias.
    pub fn find(&self, path: &str) -> Option<&'static Route> {
        let path = normalize(path);
        self.routes.iter().find(|r| r.matches(&path))
    }

    pub fn by_name(&self, name: &str) -> Option<&'static Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    /// Routes listed in the page index.
    pub fn indexed(&self) -> impl Iterator<Item = &'static Route> {
        self.routes.iter().filter(|r| !r.meta.hide_from_index)
    }

    /// Guard a navigation. First matching rule wins:
    ///
    /// 1. unknown path: `error`
    /// 2. protected route without a session: `notAuthorized`
    /// 3. anonymous-only route with a session: `home`
    /// 4. failing access check: `forbidden`
    pub fn resolve(&self, path: &str, rights: &Rights) -> Navigation {
        let Some(route) = self.find(path) else {
            tracing::debug!(path, "no route matches");
            return Navigation::Redirect(routes::ERROR);
        };

        if !route.meta.anonymous && !rights.is_authenticated() {
            return Navigation::Redirect(routes::NOT_AUTHORIZED);
        }
        if route.meta.only_anonymous && rights.is_authenticated() {
            return Navigation::Redirect(routes::HOME);
        }
        if let Some(access) = route.meta.access {
            if !access(rights) {
                return Navigation::Redirect(routes::FORBIDDEN);
            }
        }
        Navigation::Allow(route)
    }
}

fn normalize(path: &str) -> String {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
