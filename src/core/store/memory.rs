//! In-process store, used for `--demo` sessions.

use crate::core::store::{CredentialStore, StoreError};
use crate::models::credential::{Credential, CredentialFields};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::sync::Mutex;

#[derive(Debug, Default)]
pub struct MemoryStore {
    // Newest first, same order the hosted table is read in.
    rows: Mutex<Vec<Credential>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store holding two sample credentials.
    pub fn with_demo_data() -> Self {
        let now = Utc::now();
        let rows = vec![
            Credential {
                id: uuid::Uuid::new_v4().to_string(),
                platform: "Facebook".into(),
                domain: Some("facebook.com".into()),
                username: "myuser@email.com".into(),
                password: "MyPassw0rd@456".into(),
                created_at: Some(now),
                updated_at: Some(now),
            },
            Credential {
                id: uuid::Uuid::new_v4().to_string(),
                platform: "Gmail".into(),
                domain: Some("gmail.com".into()),
                username: "user@gmail.com".into(),
                password: "SafePassword123!".into(),
                created_at: Some(now - Duration::minutes(1)),
                updated_at: Some(now - Duration::minutes(1)),
            },
        ];
        Self {
            rows: Mutex::new(rows),
        }
    }

    fn rows(&self) -> Result<std::sync::MutexGuard<'_, Vec<Credential>>, StoreError> {
        self.rows
            .lock()
            .map_err(|_| StoreError::Config("memory store lock poisoned".to_owned()))
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Credential>, StoreError> {
        Ok(self.rows()?.clone())
    }

    async fn insert(&self, fields: &CredentialFields) -> Result<Credential, StoreError> {
        let now = Utc::now();
        let stored = Credential {
            id: uuid::Uuid::new_v4().to_string(),
            platform: fields.platform.clone(),
            domain: fields.domain.clone(),
            username: fields.username.clone(),
            password: fields.password.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.rows()?.insert(0, stored.clone());
        Ok(stored)
    }

    async fn update(&self, id: &str, fields: &CredentialFields) -> Result<(), StoreError> {
        let mut rows = self.rows()?;
        let row = rows
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::NotFound { id: id.to_owned() })?;
        row.platform = fields.platform.clone();
        row.domain = fields.domain.clone();
        row.username = fields.username.clone();
        row.password = fields.password.clone();
        row.updated_at = Some(Utc::now());
        Ok(())
    }
}
