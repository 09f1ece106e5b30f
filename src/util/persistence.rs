use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde_json::Error as SerdeError;
use tracing::warn;

use crate::infra::cookies::StoredCookie;

const APP_QUALIFIER: &str = "ug";
const APP_ORG: &str = "EzzyDrive";
const APP_NAME: &str = "EzzyDrive";
const COOKIE_FILE: &str = "cookies.json";

pub fn default_cookie_file() -> Option<PathBuf> {
    ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
        .map(|dirs| dirs.config_dir().join(COOKIE_FILE))
}

/// Reads the cookie jar file. A missing file is an empty jar; a corrupt one is discarded.
pub fn load_cookie_file(path: &Path) -> HashMap<String, StoredCookie> {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return HashMap::new(),
        Err(err) => {
            warn!(path = %path.display(), error = %err, "failed to read cookie jar");
            return HashMap::new();
        }
    };

    match serde_json::from_str(&data) {
        Ok(entries) => entries,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "discarding unreadable cookie jar");
            HashMap::new()
        }
    }
}

pub fn save_cookie_file(
    path: &Path,
    entries: &HashMap<String, StoredCookie>,
) -> Result<(), PersistSaveError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(entries)?;
    fs::write(path, json)?;
    Ok(())
}

#[derive(Debug, thiserror::Error)]
pub enum PersistSaveError {
    #[error("storage directory unavailable")]
    StorageUnavailable,
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] SerdeError),
}
