//! Credential store backends and typed session views.
//!
//! Responsibilities:
//! - Define the [`CredentialStore`] key/value contract used by the session manager.
//! - Provide an in-memory store and a JSON file store.
//! - Convert between [`AuthBundle`] and the six persisted session keys.
//!
//! Does NOT handle:
//! - Deciding when credentials are refreshed or cleared (see `crate::auth`).
//!
//! Invariants:
//! - `set_many` applies all entries in one operation; readers never observe a
//!   new access token paired with a stale expiry.
//! - The file store replaces its file atomically (temp file + rename).
//! - `clear` is idempotent.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, SecondsFormat, Utc};
use maintdesk_config::constants::{
    KEY_ACCESS_TOKEN, KEY_EXPIRY, KEY_NAME, KEY_REFRESH_TOKEN, KEY_ROLE, KEY_USER_ID,
};

use crate::error::StoreError;
use crate::models::{AuthBundle, Role};
use crate::serde_helpers::parse_timestamp;

/// Key/value persistence for session credentials.
pub trait CredentialStore: Send + Sync + fmt::Debug {
    /// Read a value. Missing keys return `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write several values as one operation.
    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StoreError>;

    /// Write a single value.
    fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        self.set_many(&[(key, value)])
    }

    /// Remove every stored value.
    fn clear(&self) -> Result<(), StoreError>;
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Process-local store backed by a `HashMap`.
#[derive(Default)]
pub struct MemoryCredentialStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        lock(&self.values).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for MemoryCredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<String> = lock(&self.values).keys().cloned().collect();
        keys.sort();
        f.debug_struct("MemoryCredentialStore")
            .field("keys", &keys)
            .finish()
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(lock(&self.values).get(key).cloned())
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        let mut values = lock(&self.values);
        for (key, value) in entries {
            values.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        lock(&self.values).clear();
        Ok(())
    }
}

/// Store persisted as a flat JSON object on disk.
///
/// Every read goes to disk so several processes sharing one file see each
/// other's writes. Writes within a process are serialized by an internal lock.
pub struct FileCredentialStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<HashMap<String, String>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if content.trim().is_empty() {
            return Ok(HashMap::new());
        }

        serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })
    }

    fn write_map(&self, map: &HashMap<String, String>) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let content = serde_json::to_string_pretty(map).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: std::io::Error::other(e),
        })?;

        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, content).map_err(write_err)?;
        restrict_permissions(&temp_path).map_err(write_err)?;
        fs::rename(&temp_path, &self.path).map_err(write_err)?;

        tracing::debug!(path = %self.path.display(), "Credential store written");
        Ok(())
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

impl fmt::Debug for FileCredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileCredentialStore")
            .field("path", &self.path)
            .finish()
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_map()?.remove(key))
    }

    fn set_many(&self, entries: &[(&str, String)]) -> Result<(), StoreError> {
        let _guard = lock(&self.write_lock);
        let mut map = self.read_map()?;
        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }
        self.write_map(&map)
    }

    fn clear(&self) -> Result<(), StoreError> {
        let _guard = lock(&self.write_lock);
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Write {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

/// Persist a credential bundle as a single store write.
pub fn persist_bundle(store: &dyn CredentialStore, bundle: &AuthBundle) -> Result<(), StoreError> {
    let role = bundle.roles.first().cloned().unwrap_or_default();
    let entries = [
        (KEY_ACCESS_TOKEN, bundle.token.clone()),
        (
            KEY_EXPIRY,
            bundle
                .access_token_expiry
                .to_rfc3339_opts(SecondsFormat::Millis, true),
        ),
        (KEY_REFRESH_TOKEN, bundle.refresh_token.clone()),
        (KEY_ROLE, role),
        (KEY_USER_ID, bundle.user_id.clone()),
        (KEY_NAME, bundle.name.clone()),
    ];
    store.set_many(&entries)
}

/// Read a key, treating empty values as absent.
pub(crate) fn read_non_empty(
    store: &dyn CredentialStore,
    key: &str,
) -> Result<Option<String>, StoreError> {
    Ok(store.get(key)?.filter(|v| !v.is_empty()))
}

/// Typed view of the persisted session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub role: Option<Role>,
    pub expiry: Option<DateTime<Utc>>,
    pub has_access_token: bool,
    pub has_refresh_token: bool,
}

impl SessionInfo {
    /// Load the session view from a store.
    pub fn load(store: &dyn CredentialStore) -> Result<Self, StoreError> {
        Ok(Self {
            user_id: read_non_empty(store, KEY_USER_ID)?,
            name: read_non_empty(store, KEY_NAME)?,
            role: read_non_empty(store, KEY_ROLE)?.map(|r| Role::from_name(&r)),
            expiry: read_non_empty(store, KEY_EXPIRY)?.and_then(|e| parse_timestamp(&e)),
            has_access_token: read_non_empty(store, KEY_ACCESS_TOKEN)?.is_some(),
            has_refresh_token: read_non_empty(store, KEY_REFRESH_TOKEN)?.is_some(),
        })
    }

    /// True if an access token is stored.
    pub fn is_authenticated(&self) -> bool {
        self.has_access_token
    }
}
