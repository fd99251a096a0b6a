//! Credential storage.
//!
//! The credential lives under a single named key in a small key/value store.
//! Absence is a normal state (`Ok(None)`); only storage-layer failures are
//! errors.

mod file;
mod memory;

pub use file::FileCredentialStore;
pub use memory::MemoryCredentialStore;

use crate::error::CredentialError;

use common::RedactedApiKey;

use std::future::Future;

/// Storage key holding the API key.
pub const CREDENTIAL_KEY: &str = "geminiApiKey";

/// Asynchronous get/set/remove on the stored credential.
pub trait CredentialStore: Clone + Send + Sync + 'static {
    fn get(&self) -> impl Future<Output = Result<Option<RedactedApiKey>, CredentialError>> + Send;

    fn set(&self, key: &RedactedApiKey) -> impl Future<Output = Result<(), CredentialError>> + Send;

    fn remove(&self) -> impl Future<Output = Result<(), CredentialError>> + Send;
}
