//! Identity adapter returning a fixed session user.

use async_trait::async_trait;

use crate::todo::{
    domain::UserId,
    ports::{IdentityPort, IdentityResult},
};

/// Identity adapter whose session user never changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticIdentity {
    user: Option<UserId>,
}

impl StaticIdentity {
    /// Creates an adapter for a signed-in user.
    #[must_use]
    pub const fn signed_in(user: UserId) -> Self {
        Self { user: Some(user) }
    }

    /// Creates an adapter for an anonymous session.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { user: None }
    }
}

impl From<Option<UserId>> for StaticIdentity {
    fn from(user: Option<UserId>) -> Self {
        Self { user }
    }
}

#[async_trait]
impl IdentityPort for StaticIdentity {
    async fn current_user(&self) -> IdentityResult<Option<UserId>> {
        Ok(self.user.clone())
    }
}
