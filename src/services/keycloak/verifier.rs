use std::sync::Arc;

use tracing::{debug, warn};

use crate::services::keycloak::client::IdentityProvider;

/// Decides token liveness from the provider's introspection answer.
///
/// Fail-closed: absence of a definitive `active: true` is always a rejection.
/// A provider outage therefore never lets a token through, it only shows up
/// differently in the logs.
pub struct TokenVerifier<P> {
    provider: Arc<P>,
}

impl<P: IdentityProvider> TokenVerifier<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    pub async fn is_active(&self, token: &str) -> bool {
        match self.provider.introspect(token, None).await {
            Ok(introspection) => {
                if !introspection.active {
                    debug!("introspection reports token inactive");
                }
                introspection.active
            }
            Err(err) if err.is_unreachable() => {
                warn!(error = %err, "identity provider unreachable during introspection, rejecting token");
                false
            }
            Err(err) => {
                warn!(error = %err, "introspection failed, rejecting token");
                false
            }
        }
    }
}
