// Error types shared by every layer of the CLI.
//
// Each command handles its failure at the top level: `main` prints the
// message once and turns it into a non-zero exit code.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Please login first using: novaenv-cli login")]
    NotAuthenticated,

    #[error("API key is required")]
    MissingApiKey,

    #[error("Login failed: Invalid API key")]
    AuthenticationFailed,

    #[error("{0}")]
    RequestFailed(String),

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid selection: {0:?}")]
    InvalidSelection(String),

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Prompt failed: {0}")]
    Prompt(#[from] std::io::Error),
}

impl CliError {
    /// Attach the file the failing I/O call was working on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
