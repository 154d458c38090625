use serde::Serialize;
use uuid::Uuid;

use crate::repos::user_repo::LocalUser;

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: Uuid,
    pub sid: String,
    pub name: Option<String>,
    pub email: String,
}

impl From<LocalUser> for MeResponse {
    fn from(user: LocalUser) -> Self {
        Self {
            id: user.id,
            sid: user.sid,
            name: user.name,
            email: user.email,
        }
    }
}
