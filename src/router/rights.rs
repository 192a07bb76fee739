use crate::api::SessionInfo;

/// What the current user may see.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rights {
    authenticated: bool,
    session_active: bool,
}

impl Rights {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Rights for the session the auth server reported, if any.
    pub fn from_session(session: Option<&SessionInfo>) -> Self {
        Self {
            authenticated: session.is_some(),
            session_active: session.map(|s| s.active).unwrap_or(false),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn can_view_dashboard(&self) -> bool {
        self.session_active
    }
}
