use std::sync::Arc;

use crate::repos::user_repo::PgUserRepo;
use crate::services::auth::gate::AuthGate;
use crate::services::keycloak::KeycloakClient;

pub type Gate = AuthGate<KeycloakClient, PgUserRepo>;

#[derive(Clone)]
pub struct AppState {
    pub gate: Arc<Gate>,
}

impl AppState {
    pub fn new(gate: Arc<Gate>) -> Self {
        Self { gate }
    }
}
