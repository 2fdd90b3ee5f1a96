use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::identity::errors::IdentityError;
use crate::domain::identity::models::IdentityRecord;
use crate::domain::identity::models::Username;
use crate::domain::identity::ports::CredentialRepository;

/// Process-local credential table.
///
/// Inserts take the write lock for the whole check-and-insert, so two
/// concurrent registrations of one username cannot both succeed. Readers
/// only ever see complete records. Contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialRepository {
    records: Arc<RwLock<HashMap<String, IdentityRecord>>>,
}

impl InMemoryCredentialRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialRepository for InMemoryCredentialRepository {
    async fn insert(&self, record: IdentityRecord) -> Result<(), IdentityError> {
        let mut records = self.records.write().await;

        match records.entry(record.username.as_str().to_string()) {
            Entry::Occupied(entry) => Err(IdentityError::DuplicateUser(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(record);
                Ok(())
            }
        }
    }

    async fn find(&self, username: &Username) -> Result<Option<IdentityRecord>, IdentityError> {
        Ok(self.records.read().await.get(username.as_str()).cloned())
    }

    async fn contains(&self, username: &Username) -> Result<bool, IdentityError> {
        Ok(self.records.read().await.contains_key(username.as_str()))
    }

    async fn count(&self) -> Result<usize, IdentityError> {
        Ok(self.records.read().await.len())
    }
}
