use crate::credential::{CREDENTIAL_KEY, CredentialStore};
use crate::error::CredentialError;

use common::{ErrorLocation, RedactedApiKey};

use std::io::ErrorKind;
use std::panic::Location;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde_json::{Map, Value};

const STORAGE_FILE_NAME: &str = "storage.json";

/// Key/value JSON file in the config directory.
///
/// Other keys in the file are preserved across writes.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    dir: PathBuf,
}

impl FileCredentialStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(STORAGE_FILE_NAME)
    }

    /// Load the whole map; a missing file is an empty map.
    async fn load(&self) -> Result<Map<String, Value>, CredentialError> {
        let path = self.path();

        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Storage file not found at {}", path.display());
                return Ok(Map::new());
            }
            Err(e) => {
                return Err(CredentialError::ReadError {
                    location: ErrorLocation::from(Location::caller()),
                    path: path.clone(),
                    source: e,
                });
            }
        };

        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&contents).map_err(|e| CredentialError::ParseError {
            location: ErrorLocation::from(Location::caller()),
            path: path.clone(),
            reason: e.to_string(),
        })
    }

    /// Write the map with temp file + rename.
    async fn store(&self, map: &Map<String, Value>) -> Result<(), CredentialError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| CredentialError::WriteError {
                location: ErrorLocation::from(Location::caller()),
                path: self.dir.clone(),
                source: e,
            })?;

        let path = self.path();
        let temp_path = temp_path_for(&path);

        let json =
            serde_json::to_string_pretty(map).map_err(|e| CredentialError::SerializeError {
                location: ErrorLocation::from(Location::caller()),
                reason: e.to_string(),
            })?;

        tokio::fs::write(&temp_path, json)
            .await
            .map_err(|e| CredentialError::WriteError {
                location: ErrorLocation::from(Location::caller()),
                path: temp_path.clone(),
                source: e,
            })?;

        tokio::fs::rename(&temp_path, &path)
            .await
            .map_err(|e| CredentialError::WriteError {
                location: ErrorLocation::from(Location::caller()),
                path: path.clone(),
                source: e,
            })?;

        Ok(())
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

impl CredentialStore for FileCredentialStore {
    async fn get(&self) -> Result<Option<RedactedApiKey>, CredentialError> {
        let map = self.load().await?;

        Ok(map
            .get(CREDENTIAL_KEY)
            .and_then(Value::as_str)
            .filter(|key| !key.is_empty())
            .map(|key| RedactedApiKey::new(key.to_string())))
    }

    async fn set(&self, key: &RedactedApiKey) -> Result<(), CredentialError> {
        let mut map = self.load().await?;
        map.insert(
            CREDENTIAL_KEY.to_string(),
            Value::String(key.as_str().to_string()),
        );
        self.store(&map).await?;

        info!("Credential saved ({} chars)", key.len());
        Ok(())
    }

    async fn remove(&self) -> Result<(), CredentialError> {
        let mut map = self.load().await?;
        if map.remove(CREDENTIAL_KEY).is_none() {
            debug!("Credential already absent");
            return Ok(());
        }
        self.store(&map).await?;

        info!("Credential cleared");
        Ok(())
    }
}
