use crate::port::{IdentityProvider, UserProfile};
use async_trait::async_trait;
use uuid::Uuid;

/// Fixed-user identity provider. Stands in for the external identity system
/// in tests and single-user demo deployments; a real deployment would verify
/// the caller's token against the provider instead.
pub struct StaticIdentity {
    user: Option<UserProfile>,
}

impl StaticIdentity {
    pub fn new(id: Uuid, email: impl Into<String>) -> Self {
        Self {
            user: Some(UserProfile {
                id,
                email: email.into(),
            }),
        }
    }

    /// No authenticated user.
    pub fn anonymous() -> Self {
        Self { user: None }
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentity {
    async fn current_user(&self) -> Option<UserProfile> {
        self.user.clone()
    }
}
