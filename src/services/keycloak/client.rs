use std::time::Duration;

use async_trait::async_trait;

use crate::services::keycloak::error::ProviderError;
use crate::services::keycloak::types::{Introspection, UserInfo};

/// Immutable provider settings, built once at startup from `Config` and
/// injected into the client. Nothing here is read from ambient state.
#[derive(Clone, Debug)]
pub struct KeycloakConfig {
    /// Base URL of the Keycloak server, without a trailing slash.
    pub server_url: String,
    pub realm: String,
    pub client_id: String,
    pub client_secret: String,
    /// Claim key under which the provider reports group membership; consumed
    /// by authorization policy layers, not by the gate itself.
    pub group_key: String,
    /// Bound on every outbound provider call.
    pub timeout: Duration,
}

/// The slice of the provider the authentication flow depends on.
///
/// The gate and verifier are generic over this so tests can substitute an
/// in-memory provider; `KeycloakClient` is the production implementation.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn introspect(
        &self,
        token: &str,
        token_type_hint: Option<&str>,
    ) -> Result<Introspection, ProviderError>;

    async fn userinfo(&self, token: &str) -> Result<UserInfo, ProviderError>;
}

/// HTTP adapter over Keycloak's OIDC endpoints.
///
/// Stateless beyond its config: no caching, no retries. Every call carries
/// the configured timeout so a hung provider surfaces as
/// `ProviderError::Timeout` instead of blocking the request forever.
pub struct KeycloakClient {
    http: reqwest::Client,
    config: KeycloakConfig,
    well_known_endpoint: String,
    introspection_endpoint: String,
    userinfo_endpoint: String,
    group_info_endpoint: String,
}

impl KeycloakClient {
    pub fn new(config: KeycloakConfig) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(ProviderError::from_reqwest)?;

        let realm_base = format!("{}/realms/{}", config.server_url, config.realm);

        Ok(Self {
            well_known_endpoint: format!("{}/.well-known/openid-configuration", realm_base),
            introspection_endpoint: format!(
                "{}/protocol/openid-connect/token/introspect",
                realm_base
            ),
            userinfo_endpoint: format!("{}/protocol/openid-connect/userinfo", realm_base),
            group_info_endpoint: format!(
                "{}/admin/master/console/#/realms/{}/groups",
                config.server_url, config.realm
            ),
            http,
            config,
        })
    }

    pub fn group_key(&self) -> &str {
        &self.config.group_key
    }

    /// Fetch the provider's well-known OpenID configuration document.
    ///
    /// Diagnostics / config discovery only; not on the authentication hot
    /// path, so the raw document is returned as-is.
    pub async fn discover(&self) -> Result<serde_json::Value, ProviderError> {
        let response = self
            .http
            .get(&self.well_known_endpoint)
            .send()
            .await
            .map_err(ProviderError::from_reqwest)?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status()));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(ProviderError::from_reqwest)
    }

    /// Fetch group membership for the token's subject.
    ///
    /// `first`/`max` are Keycloak's pagination hints, passed through as
    /// headers. The response schema is console-defined, so it stays untyped;
    /// authorization policy outside this core interprets it.
    pub async fn group_info(
        &self,
        token: &str,
        first: u32,
        max: u32,
    ) -> Result<serde_json::Value, ProviderError> {
        let response = self
            .http
            .get(&self.group_info_endpoint)
            .bearer_auth(token)
            .header("first", first.to_string())
            .header("max", max.to_string())
            .send()
            .await
            .map_err(ProviderError::from_reqwest)?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status()));
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(ProviderError::from_reqwest)
    }
}

#[async_trait]
impl IdentityProvider for KeycloakClient {
    /// RFC 7662 introspection. Confidential-client credentials travel in the
    /// form body alongside the token, as Keycloak expects.
    async fn introspect(
        &self,
        token: &str,
        token_type_hint: Option<&str>,
    ) -> Result<Introspection, ProviderError> {
        let mut form: Vec<(&str, &str)> = vec![
            ("token", token),
            ("client_id", &self.config.client_id),
            ("client_secret", &self.config.client_secret),
        ];
        if let Some(hint) = token_type_hint {
            form.push(("token_type_hint", hint));
        }

        let response = self
            .http
            .post(&self.introspection_endpoint)
            .bearer_auth(token)
            .form(&form)
            .send()
            .await
            .map_err(ProviderError::from_reqwest)?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status()));
        }

        response
            .json::<Introspection>()
            .await
            .map_err(ProviderError::from_reqwest)
    }

    async fn userinfo(&self, token: &str) -> Result<UserInfo, ProviderError> {
        let response = self
            .http
            .get(&self.userinfo_endpoint)
            .bearer_auth(token)
            .send()
            .await
            .map_err(ProviderError::from_reqwest)?;

        if !response.status().is_success() {
            return Err(ProviderError::Status(response.status()));
        }

        response
            .json::<UserInfo>()
            .await
            .map_err(ProviderError::from_reqwest)
    }
}
