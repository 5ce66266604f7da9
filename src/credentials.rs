// Credential persistence: a single JSON file holding the API key and the
// user record returned by the service at login time.

use crate::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Shape of the credential file. `user` is kept as opaque JSON so whatever
/// the service returned survives a save/load cycle untouched.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Credentials {
    #[serde(rename = "apiKey")]
    pub api_key: String,
    #[serde(default)]
    pub user: serde_json::Value,
}

#[derive(Serialize)]
struct Record<'a, U> {
    #[serde(rename = "apiKey")]
    api_key: &'a str,
    user: &'a U,
}

pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CredentialStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored credentials. A missing, unreadable or malformed file
    /// all mean the same thing to the caller: the user is not logged in.
    pub fn load(&self) -> CliResult<Credentials> {
        let data = std::fs::read_to_string(&self.path).map_err(|e| {
            tracing::debug!(path = %self.path.display(), error = %e, "credential file unreadable");
            CliError::NotAuthenticated
        })?;
        serde_json::from_str(&data).map_err(|e| {
            tracing::debug!(path = %self.path.display(), error = %e, "credential file malformed");
            CliError::NotAuthenticated
        })
    }

    /// Overwrite the credential file with `api_key` and `user`.
    pub fn save<U: Serialize>(&self, api_key: &str, user: &U) -> CliResult<()> {
        let record = Record { api_key, user };
        let body = serde_json::to_string_pretty(&record)
            .map_err(|e| CliError::io(&self.path, e.into()))?;
        std::fs::write(&self.path, body).map_err(|e| CliError::io(&self.path, e))?;
        tracing::info!(path = %self.path.display(), "credentials saved");
        Ok(())
    }

    /// Remove the credential file. Returns whether a file was removed;
    /// an absent file is not an error.
    pub fn clear(&self) -> CliResult<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::info!(path = %self.path.display(), "credentials removed");
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(CliError::io(&self.path, e)),
        }
    }
}
