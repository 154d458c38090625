/*!
 * Keycloak (OIDC) provider integration
 *
 * Responsibility:
 * - typed HTTP adapter over the provider's introspection / userinfo /
 *   well-known / group endpoints (client)
 * - the fail-closed token liveness decision (verifier)
 *
 * Public API:
 * - KeycloakConfig / KeycloakClient / IdentityProvider
 * - TokenVerifier
 * - Introspection / UserInfo
 * - ProviderError
 */

mod client;
mod error;
mod types;
mod verifier;

pub use client::{IdentityProvider, KeycloakClient, KeycloakConfig};
pub use error::ProviderError;
pub use types::{Introspection, UserInfo};
pub use verifier::TokenVerifier;
