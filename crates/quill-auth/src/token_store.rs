//! Durable storage for the single active access token.
//!
//! Every backend holds at most one token under one fixed key. `store`
//! overwrites unconditionally, `clear` removes the key, and `load` on a
//! missing key is `None`, never an error.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use crate::error::AuthError;

const KEYRING_USER: &str = "access-token";

pub trait TokenStore: Send + Sync {
    /// Short backend name for status display.
    fn name(&self) -> &'static str;

    fn load(&self) -> Option<String>;

    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if the token cannot be persisted.
    fn store(&self, token: &str) -> Result<(), AuthError>;

    /// # Errors
    ///
    /// Returns `AuthError::TokenStoreError` if an existing token cannot be removed.
    fn clear(&self) -> Result<(), AuthError>;

    /// Which tier currently holds the token, if any.
    fn source(&self) -> Option<&'static str> {
        self.load().map(|_| self.name())
    }
}

/// Token kept in a single file, `0600` inside a `0700` directory on unix.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn name(&self) -> &'static str {
        "file"
    }

    fn load(&self) -> Option<String> {
        fs::read_to_string(&self.path)
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn store(&self, token: &str) -> Result<(), AuthError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                AuthError::TokenStoreError(format!("mkdir {}: {e}", parent.display()))
            })?;
            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                    tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
                }
            }
        }
        fs::write(&self.path, token).map_err(|e| {
            AuthError::TokenStoreError(format!("write {}: {e}", self.path.display()))
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&self.path, fs::Permissions::from_mode(0o600)).map_err(|e| {
                AuthError::TokenStoreError(format!("chmod {}: {e}", self.path.display()))
            })?;
        }

        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                AuthError::TokenStoreError(format!(
                    "failed to delete {}: {e}",
                    self.path.display()
                ))
            })?;
        }
        Ok(())
    }
}

/// One secret-service slot holding the token.
trait Keychain: Send + Sync {
    fn get(&self) -> Result<Option<String>, keyring::Error>;
    fn set(&self, token: &str) -> Result<(), keyring::Error>;
    /// Removing an absent entry is not an error.
    fn delete(&self) -> Result<(), keyring::Error>;
}

/// The OS keychain entry `(service, "access-token")`.
struct OsKeychain {
    service: String,
}

impl OsKeychain {
    fn entry(&self) -> Result<keyring::Entry, keyring::Error> {
        keyring::Entry::new(&self.service, KEYRING_USER)
    }
}

impl Keychain for OsKeychain {
    fn get(&self) -> Result<Option<String>, keyring::Error> {
        match self.entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(error),
        }
    }

    fn set(&self, token: &str) -> Result<(), keyring::Error> {
        self.entry()?.set_password(token)
    }

    fn delete(&self) -> Result<(), keyring::Error> {
        match self.entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(error),
        }
    }
}

/// OS keychain entry, falling back to a credentials file when the keychain
/// is unavailable.
///
/// The keychain is read first, so a token left there must never shadow a
/// newer one written to the file.
#[derive(Clone)]
pub struct KeyringTokenStore {
    keychain: Arc<dyn Keychain>,
    fallback: FileTokenStore,
}

impl fmt::Debug for KeyringTokenStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyringTokenStore")
            .field("fallback", &self.fallback)
            .finish_non_exhaustive()
    }
}

impl KeyringTokenStore {
    #[must_use]
    pub fn new(service: impl Into<String>, fallback: FileTokenStore) -> Self {
        Self::with_keychain(
            OsKeychain {
                service: service.into(),
            },
            fallback,
        )
    }

    fn with_keychain(keychain: impl Keychain + 'static, fallback: FileTokenStore) -> Self {
        Self {
            keychain: Arc::new(keychain),
            fallback,
        }
    }

    fn load_keyring(&self) -> Option<String> {
        match self.keychain.get() {
            Ok(token) => token.filter(|token| !token.is_empty()),
            Err(error) => {
                tracing::debug!(%error, "keyring read failed");
                None
            }
        }
    }

    /// Remove the keychain entry; if that fails, it is only acceptable when
    /// the entry cannot be read back either.
    fn evict_keyring(&self, action: &str) -> Result<(), AuthError> {
        let Err(error) = self.keychain.delete() else {
            return Ok(());
        };
        tracing::warn!(%error, "failed to remove keyring entry");
        if self.load_keyring().is_some() {
            return Err(AuthError::TokenStoreError(format!(
                "{action}: keyring entry could not be removed: {error}"
            )));
        }
        Ok(())
    }
}

impl TokenStore for KeyringTokenStore {
    fn name(&self) -> &'static str {
        "keyring"
    }

    fn load(&self) -> Option<String> {
        self.load_keyring().or_else(|| self.fallback.load())
    }

    fn store(&self, token: &str) -> Result<(), AuthError> {
        match self.keychain.set(token) {
            Ok(()) => {
                // Drop any token left in the file by an earlier keyring outage.
                if let Err(error) = self.fallback.clear() {
                    tracing::warn!(%error, "failed to remove stale credentials file");
                }
                Ok(())
            }
            Err(error) => {
                tracing::warn!(%error, "keyring store failed; falling back to file");
                self.evict_keyring("store token")?;
                self.fallback.store(token)
            }
        }
    }

    fn clear(&self) -> Result<(), AuthError> {
        let keyring = self.evict_keyring("clear token");
        self.fallback.clear()?;
        keyring
    }

    fn source(&self) -> Option<&'static str> {
        if self.load_keyring().is_some() {
            return Some("keyring");
        }
        self.fallback.source()
    }
}

/// Process-local store. Nothing survives the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn load(&self) -> Option<String> {
        self.token
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn store(&self, token: &str) -> Result<(), AuthError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), AuthError> {
        *self.token.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

impl<T: TokenStore + ?Sized> TokenStore for Arc<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn load(&self) -> Option<String> {
        (**self).load()
    }

    fn store(&self, token: &str) -> Result<(), AuthError> {
        (**self).store(token)
    }

    fn clear(&self) -> Result<(), AuthError> {
        (**self).clear()
    }

    fn source(&self) -> Option<&'static str> {
        (**self).source()
    }
}
