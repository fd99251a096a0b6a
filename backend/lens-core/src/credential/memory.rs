use crate::credential::CredentialStore;
use crate::error::CredentialError;

use common::{ErrorLocation, RedactedApiKey};

use std::panic::Location;
use std::sync::Arc;

use tokio::sync::RwLock;

/// In-process credential store.
///
/// All clones share one slot. `failing` builds a store whose every
/// operation reports a storage failure.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    slot: Arc<RwLock<Option<RedactedApiKey>>>,
    failure: Option<Arc<str>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_key(key: impl Into<String>) -> Self {
        Self {
            slot: Arc::new(RwLock::new(Some(RedactedApiKey::new(key.into())))),
            failure: None,
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            slot: Arc::default(),
            failure: Some(Arc::from(reason.into())),
        }
    }

    #[track_caller]
    fn check(&self) -> Result<(), CredentialError> {
        match &self.failure {
            Some(reason) => Err(CredentialError::Unavailable {
                location: ErrorLocation::from(Location::caller()),
                reason: reason.to_string(),
            }),
            None => Ok(()),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    async fn get(&self) -> Result<Option<RedactedApiKey>, CredentialError> {
        self.check()?;
        Ok(self.slot.read().await.clone())
    }

    async fn set(&self, key: &RedactedApiKey) -> Result<(), CredentialError> {
        self.check()?;
        *self.slot.write().await = Some(key.clone());
        Ok(())
    }

    async fn remove(&self) -> Result<(), CredentialError> {
        self.check()?;
        *self.slot.write().await = None;
        Ok(())
    }
}
