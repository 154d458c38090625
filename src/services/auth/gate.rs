use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::repos::error::RepoError;
use crate::repos::user_repo::{LocalUser, UserStore};
use crate::services::auth::sync::{IdentitySync, VerifiedIdentity};
use crate::services::auth::token::extract_bearer_token;
use crate::services::keycloak::{IdentityProvider, TokenVerifier};

/// The authentication decision for one request.
///
/// `Anonymous` is not an error: a request without credentials (or with bad
/// ones) passes through unauthenticated and downstream code decides whether
/// anonymous access is allowed.
#[derive(Debug)]
pub enum AuthOutcome {
    Authenticated(LocalUser),
    Anonymous,
}

/// Only storage failures escape the gate. A storage outage masked as
/// "unauthenticated" would misattribute an operational problem as a login
/// failure, so it stays a hard error.
#[derive(Debug, Error)]
pub enum GateError {
    #[error("user storage failure: {0}")]
    Storage(#[from] RepoError),
}

/// The single authentication decision per inbound request:
/// extract token → introspect → fetch userinfo → sync local user.
///
/// Every provider-side failure collapses to `Anonymous` (fail-closed), with
/// the distinct cause logged before it disappears into the binary outcome.
pub struct AuthGate<P, S> {
    provider: Arc<P>,
    verifier: TokenVerifier<P>,
    sync: IdentitySync<S>,
}

impl<P: IdentityProvider, S: UserStore> AuthGate<P, S> {
    pub fn new(provider: Arc<P>, store: Arc<S>) -> Self {
        Self {
            verifier: TokenVerifier::new(provider.clone()),
            sync: IdentitySync::new(store),
            provider,
        }
    }

    pub async fn authenticate(
        &self,
        authorization: Option<&str>,
    ) -> Result<AuthOutcome, GateError> {
        let Some(header) = authorization else {
            return Ok(AuthOutcome::Anonymous);
        };
        let Some(token) = extract_bearer_token(header) else {
            return Ok(AuthOutcome::Anonymous);
        };

        if !self.verifier.is_active(token).await {
            return Ok(AuthOutcome::Anonymous);
        }

        let userinfo = match self.provider.userinfo(token).await {
            Ok(userinfo) => userinfo,
            Err(err) => {
                warn!(error = %err, "userinfo fetch failed for an active token, rejecting");
                return Ok(AuthOutcome::Anonymous);
            }
        };

        // A provider-side misconfiguration (active token, incomplete claims)
        // must not produce a partially-authenticated session.
        let Some(identity) = VerifiedIdentity::from_userinfo(userinfo) else {
            warn!("userinfo lacks required claims, rejecting");
            return Ok(AuthOutcome::Anonymous);
        };

        let user = self.sync.resolve_or_create(&identity).await?;
        Ok(AuthOutcome::Authenticated(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::auth::testing::{FailingUserStore, FakeProvider, MemoryUserStore};
    use crate::services::keycloak::UserInfo;

    fn alice() -> UserInfo {
        UserInfo {
            sub: Some("u1".to_string()),
            email: Some("a@b.com".to_string()),
            preferred_username: Some("alice".to_string()),
        }
    }

    fn gate(provider: FakeProvider) -> AuthGate<FakeProvider, MemoryUserStore> {
        AuthGate::new(Arc::new(provider), Arc::new(MemoryUserStore::default()))
    }

    #[tokio::test]
    async fn missing_header_is_anonymous() {
        let gate = gate(FakeProvider::active_with(alice()));
        let outcome = gate.authenticate(None).await.unwrap();
        assert!(matches!(outcome, AuthOutcome::Anonymous));
    }

    #[tokio::test]
    async fn inactive_token_is_anonymous_even_with_good_userinfo() {
        let gate = gate(FakeProvider {
            active: Some(false),
            userinfo: Some(alice()),
        });
        let outcome = gate.authenticate(Some("Bearer abc123")).await.unwrap();
        assert!(matches!(outcome, AuthOutcome::Anonymous));
    }

    #[tokio::test]
    async fn unreachable_provider_is_anonymous() {
        let gate = gate(FakeProvider {
            active: None,
            userinfo: Some(alice()),
        });
        let outcome = gate.authenticate(Some("Bearer abc123")).await.unwrap();
        assert!(matches!(outcome, AuthOutcome::Anonymous));
    }

    #[tokio::test]
    async fn userinfo_without_email_is_anonymous() {
        let gate = gate(FakeProvider::active_with(UserInfo {
            sub: Some("u1".to_string()),
            email: None,
            preferred_username: Some("alice".to_string()),
        }));
        let outcome = gate.authenticate(Some("Bearer abc123")).await.unwrap();
        assert!(matches!(outcome, AuthOutcome::Anonymous));
    }

    #[tokio::test]
    async fn failing_userinfo_endpoint_is_anonymous() {
        let gate = gate(FakeProvider {
            active: Some(true),
            userinfo: None,
        });
        let outcome = gate.authenticate(Some("Bearer abc123")).await.unwrap();
        assert!(matches!(outcome, AuthOutcome::Anonymous));
    }

    #[tokio::test]
    async fn active_token_with_complete_claims_authenticates_and_provisions() {
        let store = Arc::new(MemoryUserStore::default());
        let gate = AuthGate::new(Arc::new(FakeProvider::active_with(alice())), store.clone());

        let outcome = gate.authenticate(Some("Bearer abc123")).await.unwrap();

        let AuthOutcome::Authenticated(user) = outcome else {
            panic!("expected authenticated outcome");
        };
        assert_eq!(user.sid, "u1");
        assert_eq!(user.name.as_deref(), Some("alice"));
        assert_eq!(user.email, "a@b.com");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn bare_token_without_scheme_authenticates_too() {
        let gate = gate(FakeProvider::active_with(alice()));
        let outcome = gate.authenticate(Some("abc123")).await.unwrap();
        assert!(matches!(outcome, AuthOutcome::Authenticated(_)));
    }

    #[tokio::test]
    async fn reauthentication_updates_claims_without_duplicating() {
        let store = Arc::new(MemoryUserStore::default());

        let gate = AuthGate::new(Arc::new(FakeProvider::active_with(alice())), store.clone());
        gate.authenticate(Some("Bearer abc123")).await.unwrap();

        let mut renamed = alice();
        renamed.preferred_username = Some("alice-renamed".to_string());
        let gate = AuthGate::new(Arc::new(FakeProvider::active_with(renamed)), store.clone());
        let outcome = gate.authenticate(Some("Bearer abc123")).await.unwrap();

        let AuthOutcome::Authenticated(user) = outcome else {
            panic!("expected authenticated outcome");
        };
        assert_eq!(user.name.as_deref(), Some("alice-renamed"));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn storage_failure_is_a_hard_error_not_anonymous() {
        let gate = AuthGate::new(
            Arc::new(FakeProvider::active_with(alice())),
            Arc::new(FailingUserStore),
        );
        let err = gate.authenticate(Some("Bearer abc123")).await.unwrap_err();
        assert!(matches!(err, GateError::Storage(_)));
    }
}
