//! Cookie-style key/value persistence backing the session.
//!
//! - `FileCookieJar` keeps cookies in a JSON file in the user's config directory.
//! - `MemoryCookieJar` lives only as long as the process and backs the tests.

use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{Mutex, MutexGuard, PoisonError},
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use serde::{Deserialize, Serialize};

use crate::util::persistence::{
    default_cookie_file, load_cookie_file, save_cookie_file, PersistSaveError,
};

pub const AUTH_TOKEN_COOKIE: &str = "auth_token";
pub const AUTH_USER_COOKIE: &str = "auth_user";

/// Session cookies expire after 7 days.
pub const SESSION_MAX_AGE: Duration = Duration::from_secs(60 * 60 * 24 * 7);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    #[default]
    Lax,
    Strict,
    None,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CookieOptions {
    pub max_age: Duration,
    pub same_site: SameSite,
}

impl CookieOptions {
    pub const SESSION: CookieOptions = CookieOptions {
        max_age: SESSION_MAX_AGE,
        same_site: SameSite::Lax,
    };
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self::SESSION
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCookie {
    pub value: String,
    /// Unix timestamp (seconds) after which the cookie is gone.
    pub expires_at: u64,
    #[serde(default)]
    pub same_site: SameSite,
}

impl StoredCookie {
    fn new(value: &str, options: &CookieOptions, now: u64) -> Self {
        Self {
            value: value.to_string(),
            expires_at: now.saturating_add(options.max_age.as_secs()),
            same_site: options.same_site,
        }
    }

    pub fn is_expired(&self, now: u64) -> bool {
        self.expires_at <= now
    }
}

/// Persistence backend for named string values with cookie lifetime rules.
pub trait CookieJar: Send + Sync {
    /// Returns the value unless it is absent or expired.
    fn get(&self, name: &str) -> Option<String>;

    fn set(&self, name: &str, value: &str, options: &CookieOptions)
        -> Result<(), PersistSaveError>;

    fn remove(&self, name: &str) -> Result<(), PersistSaveError>;
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
pub struct MemoryCookieJar {
    entries: Mutex<HashMap<String, StoredCookie>>,
}

impl MemoryCookieJar {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CookieJar for MemoryCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        let now = unix_now();
        lock(&self.entries)
            .get(name)
            .filter(|cookie| !cookie.is_expired(now))
            .map(|cookie| cookie.value.clone())
    }

    fn set(
        &self,
        name: &str,
        value: &str,
        options: &CookieOptions,
    ) -> Result<(), PersistSaveError> {
        let cookie = StoredCookie::new(value, options, unix_now());
        lock(&self.entries).insert(name.to_string(), cookie);
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<(), PersistSaveError> {
        lock(&self.entries).remove(name);
        Ok(())
    }
}

/// Cookie jar persisted as JSON on disk. Every write rewrites the file.
#[derive(Debug)]
pub struct FileCookieJar {
    path: PathBuf,
    entries: Mutex<HashMap<String, StoredCookie>>,
}

impl FileCookieJar {
    pub fn open(path: PathBuf) -> Self {
        let entries = load_cookie_file(&path);
        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    /// Opens the jar in the platform config directory.
    pub fn open_default() -> Result<Self, PersistSaveError> {
        let path = default_cookie_file().ok_or(PersistSaveError::StorageUnavailable)?;
        Ok(Self::open(path))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn flush(&self, entries: &mut HashMap<String, StoredCookie>) -> Result<(), PersistSaveError> {
        let now = unix_now();
        entries.retain(|_, cookie| !cookie.is_expired(now));
        save_cookie_file(&self.path, entries)
    }
}

impl CookieJar for FileCookieJar {
    fn get(&self, name: &str) -> Option<String> {
        let now = unix_now();
        lock(&self.entries)
            .get(name)
            .filter(|cookie| !cookie.is_expired(now))
            .map(|cookie| cookie.value.clone())
    }

    fn set(
        &self,
        name: &str,
        value: &str,
        options: &CookieOptions,
    ) -> Result<(), PersistSaveError> {
        let mut entries = lock(&self.entries);
        entries.insert(
            name.to_string(),
            StoredCookie::new(value, options, unix_now()),
        );
        self.flush(&mut entries)
    }

    fn remove(&self, name: &str) -> Result<(), PersistSaveError> {
        let mut entries = lock(&self.entries);
        entries.remove(name);
        self.flush(&mut entries)
    }
}
