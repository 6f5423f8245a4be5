use crate::error::MatchError;
use uuid::Uuid;

/// Identity of the caller for a single request.
///
/// Built per request from the bearer token and passed explicitly to every
/// operation that needs to know who is acting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    user_id: Option<Uuid>,
}

impl Session {
    pub fn authenticated(user_id: Uuid) -> Self {
        Self { user_id: Some(user_id) }
    }

    pub fn anonymous() -> Self {
        Self { user_id: None }
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.user_id
    }

    /// The acting user, or [`MatchError::Unauthenticated`]
    pub fn require(&self) -> Result<Uuid, MatchError> {
        self.user_id.ok_or(MatchError::Unauthenticated)
    }
}
