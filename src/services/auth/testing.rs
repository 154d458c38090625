//! In-memory stand-ins for the provider and the user store, shared by the
//! auth service tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::user_repo::{LocalUser, UserStore};
use crate::services::keycloak::{IdentityProvider, Introspection, ProviderError, UserInfo};

/// Scripted provider: `active: None` simulates an unreachable introspection
/// endpoint, `userinfo: None` a failing userinfo endpoint.
pub(crate) struct FakeProvider {
    pub active: Option<bool>,
    pub userinfo: Option<UserInfo>,
}

impl FakeProvider {
    pub(crate) fn active_with(userinfo: UserInfo) -> Self {
        Self {
            active: Some(true),
            userinfo: Some(userinfo),
        }
    }
}

#[async_trait]
impl IdentityProvider for FakeProvider {
    async fn introspect(
        &self,
        _token: &str,
        _token_type_hint: Option<&str>,
    ) -> Result<Introspection, ProviderError> {
        match self.active {
            Some(active) => Ok(Introspection { active }),
            None => Err(ProviderError::Timeout),
        }
    }

    async fn userinfo(&self, _token: &str) -> Result<UserInfo, ProviderError> {
        match &self.userinfo {
            Some(userinfo) => Ok(userinfo.clone()),
            None => Err(ProviderError::Status(reqwest::StatusCode::BAD_GATEWAY)),
        }
    }
}

#[derive(Default)]
pub(crate) struct MemoryUserStore {
    users: Mutex<HashMap<String, LocalUser>>,
    writes: AtomicUsize,
}

impl MemoryUserStore {
    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub(crate) fn len(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_sid(&self, sid: &str) -> RepoResult<Option<LocalUser>> {
        Ok(self.users.lock().unwrap().get(sid).cloned())
    }

    async fn upsert(&self, sid: &str, name: Option<&str>, email: &str) -> RepoResult<LocalUser> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        let mut users = self.users.lock().unwrap();
        let now = Utc::now();
        let user = users
            .entry(sid.to_string())
            .and_modify(|u| {
                u.name = name.map(str::to_string);
                u.email = email.to_string();
                u.updated_at = now;
            })
            .or_insert_with(|| LocalUser {
                id: Uuid::new_v4(),
                sid: sid.to_string(),
                name: name.map(str::to_string),
                email: email.to_string(),
                created_at: now,
                updated_at: now,
            });
        Ok(user.clone())
    }
}

/// Store whose every call fails, for the storage-outage path.
pub(crate) struct FailingUserStore;

#[async_trait]
impl UserStore for FailingUserStore {
    async fn find_by_sid(&self, _sid: &str) -> RepoResult<Option<LocalUser>> {
        Err(RepoError::Db(sqlx::Error::PoolClosed))
    }

    async fn upsert(&self, _sid: &str, _name: Option<&str>, _email: &str) -> RepoResult<LocalUser> {
        Err(RepoError::Db(sqlx::Error::PoolClosed))
    }
}
