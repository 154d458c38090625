pub mod auth;
pub mod keycloak;
