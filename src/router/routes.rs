use super::Rights;

pub const HOME: &str = "home";
pub const ERROR: &str = "error";
pub const FORBIDDEN: &str = "forbidden";
pub const NOT_AUTHORIZED: &str = "notAuthorized";

/// Per-route settings.
#[derive(Debug, Clone, Copy)]
pub struct RouteMeta {
    /// Translation key of the page title.
    pub title: Option<&'static str>,
    pub category: Option<&'static str>,
    /// Reachable without a session.
    pub anonymous: bool,
    /// Reachable only without a session.
    pub only_anonymous: bool,
    pub hide_from_index: bool,
    /// Extra permission check on top of the session check.
    pub access: Option<fn(&Rights) -> bool>,
}

impl RouteMeta {
    pub const fn new() -> Self {
        Self {
            title: None,
            category: None,
            anonymous: false,
            only_anonymous: false,
            hide_from_index: false,
            access: None,
        }
    }
}

impl Default for RouteMeta {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Route {
    pub name: &'static str,
    pub path: &'static str,
    pub alias: Option<&'static str>,
    pub meta: RouteMeta,
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.path == other.path
    }
}

impl Eq for Route {}

impl Route {
    pub(super) fn matches(&self, path: &str) -> bool {
        if self.path == path {
            return true;
        }
        match self.alias {
            Some(alias) => path.strip_prefix('/') == Some(alias),
            None => false,
        }
    }
}

pub const ROUTES: &[Route] = &[
    Route {
        name: HOME,
        path: "/",
        alias: None,
        meta: RouteMeta {
            title: Some("pages.home.title"),
            ..RouteMeta::new()
        },
    },
    Route {
        name: "dashboard",
        path: "/dashboard",
        alias: None,
        meta: RouteMeta {
            title: Some("pages.dashboard.title"),
            category: Some("useful"),
            ..RouteMeta::new()
        },
    },
    Route {
        name: "authDone",
        path: "/auth-done",
        alias: None,
        meta: RouteMeta {
            title: Some("pages.auth.title"),
            category: Some("useful"),
            anonymous: true,
            ..RouteMeta::new()
        },
    },
    Route {
        name: "sessionTimeout",
        path: "/sessionTimeout",
        alias: None,
        meta: RouteMeta {
            title: Some("pages.sessionTimeout.title"),
            category: Some("useful"),
            anonymous: true,
            ..RouteMeta::new()
        },
    },
    Route {
        name: ERROR,
        path: "/error",
        alias: Some("notFound"),
        meta: RouteMeta {
            category: Some("useful"),
            anonymous: true,
            hide_from_index: true,
            ..RouteMeta::new()
        },
    },
    Route {
        name: FORBIDDEN,
        path: "/forbidden",
        alias: None,
        meta: RouteMeta {
            anonymous: true,
            ..RouteMeta::new()
        },
    },
    Route {
        name: NOT_AUTHORIZED,
        path: "/not-authorized",
        alias: None,
        meta: RouteMeta {
            anonymous: true,
            ..RouteMeta::new()
        },
    },
];
