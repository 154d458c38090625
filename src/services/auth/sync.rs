use std::sync::Arc;

use tracing::debug;

use crate::repos::error::RepoError;
use crate::repos::user_repo::{LocalUser, UserStore};
use crate::services::keycloak::UserInfo;

/// Userinfo claims after the completeness check: a stable subject and a
/// non-empty email are required, the display name is whatever the provider
/// reports (possibly nothing).
#[derive(Debug, Clone)]
pub struct VerifiedIdentity {
    pub sub: String,
    pub name: Option<String>,
    pub email: String,
}

impl VerifiedIdentity {
    /// `None` when the userinfo document is too incomplete to key a local
    /// user: a missing/empty `email` or `sub` is treated the same as an
    /// invalid token upstream.
    pub fn from_userinfo(userinfo: UserInfo) -> Option<Self> {
        let sub = userinfo.sub.filter(|s| !s.is_empty())?;
        let email = userinfo.email.filter(|e| !e.is_empty())?;
        Some(Self {
            sub,
            name: userinfo.preferred_username,
            email,
        })
    }
}

/// Keeps local user records consistent with the provider's claims.
///
/// The provider is the source of truth: `name`/`email` are refreshed on
/// every authenticated request. The only latitude taken is skipping the
/// write when the stored claims already match, so steady-state traffic does
/// not pay a storage write per request.
pub struct IdentitySync<S> {
    store: Arc<S>,
}

impl<S: UserStore> IdentitySync<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn resolve_or_create(
        &self,
        identity: &VerifiedIdentity,
    ) -> Result<LocalUser, RepoError> {
        if let Some(existing) = self.store.find_by_sid(&identity.sub).await? {
            if existing.name == identity.name && existing.email == identity.email {
                return Ok(existing);
            }
            debug!(sid = %identity.sub, "provider claims changed, refreshing local user");
        }

        self.store
            .upsert(&identity.sub, identity.name.as_deref(), &identity.email)
            .await
    }
}
