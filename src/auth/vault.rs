//! Durable storage for the session triple.
//!
//! The backend session survives process restarts as three string entries:
//! access token, refresh token, and the user record as JSON. They are
//! written together and removed together; a reader treating any one of
//! them as missing treats the whole record as absent.

use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use keyring::Entry;
use serde::{Deserialize, Serialize};

use crate::models::User;

/// Keychain service name all three entries live under.
const SERVICE_NAME: &str = "sanad";

const ACCESS_TOKEN_KEY: &str = "access-token";
const REFRESH_TOKEN_KEY: &str = "refresh-token";
const USER_KEY: &str = "user";

/// The session triple as persisted across restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSession {
    pub access_token: String,
    pub refresh_token: String,
    pub user: User,
}

/// A durable key-value home for the session triple.
///
/// `load` returns `Ok(None)` when no complete record exists; `store` and
/// `clear` act on all three keys as a set.
pub trait SessionVault: Send + Sync {
    fn load(&self) -> Result<Option<StoredSession>>;
    fn store(&self, session: &StoredSession) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Production vault backed by the OS keychain.
pub struct KeyringVault {
    service: String,
}

impl KeyringVault {
    pub fn new() -> Self {
        Self::with_service(SERVICE_NAME)
    }

    /// Use a non-default service name (e.g. to isolate test runs).
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<Entry> {
        Entry::new(&self.service, key).context("Failed to create keyring entry")
    }

    fn read(&self, key: &str) -> Result<Option<String>> {
        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {key} from keychain")),
        }
    }

    fn write_all(&self, session: &StoredSession, user_json: &str) -> Result<()> {
        self.entry(ACCESS_TOKEN_KEY)?
            .set_password(&session.access_token)
            .context("Failed to store access token")?;
        self.entry(REFRESH_TOKEN_KEY)?
            .set_password(&session.refresh_token)
            .context("Failed to store refresh token")?;
        self.entry(USER_KEY)?
            .set_password(user_json)
            .context("Failed to store user record")?;
        Ok(())
    }
}

impl Default for KeyringVault {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionVault for KeyringVault {
    fn load(&self) -> Result<Option<StoredSession>> {
        let (Some(access_token), Some(refresh_token), Some(user_json)) = (
            self.read(ACCESS_TOKEN_KEY)?,
            self.read(REFRESH_TOKEN_KEY)?,
            self.read(USER_KEY)?,
        ) else {
            return Ok(None);
        };

        let user: User =
            serde_json::from_str(&user_json).context("Failed to parse stored user record")?;

        Ok(Some(StoredSession {
            access_token,
            refresh_token,
            user,
        }))
    }

    fn store(&self, session: &StoredSession) -> Result<()> {
        let user_json =
            serde_json::to_string(&session.user).context("Failed to serialize user record")?;

        let result = self.write_all(session, &user_json);
        if result.is_err() {
            // A half-written record must not survive; readers require all
            // three keys or none.
            let _ = self.clear();
        }
        result
    }

    fn clear(&self) -> Result<()> {
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
            match self.entry(key)?.delete_credential() {
                Ok(()) | Err(keyring::Error::NoEntry) => {}
                Err(e) => {
                    return Err(e).with_context(|| format!("Failed to remove {key} from keychain"))
                }
            }
        }
        Ok(())
    }
}

/// In-process vault for tests and composition previews.
#[derive(Default)]
pub struct MemoryVault {
    slot: Mutex<Option<StoredSession>>,
}

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a record already present, as if a previous run stored it.
    pub fn seeded(session: StoredSession) -> Self {
        Self {
            slot: Mutex::new(Some(session)),
        }
    }
}

impl SessionVault for MemoryVault {
    fn load(&self) -> Result<Option<StoredSession>> {
        Ok(self
            .slot
            .lock()
            .map_err(|_| anyhow!("vault lock poisoned"))?
            .clone())
    }

    fn store(&self, session: &StoredSession) -> Result<()> {
        *self
            .slot
            .lock()
            .map_err(|_| anyhow!("vault lock poisoned"))? = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self
            .slot
            .lock()
            .map_err(|_| anyhow!("vault lock poisoned"))? = None;
        Ok(())
    }
}
