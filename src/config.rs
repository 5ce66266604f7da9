// Runtime settings. Built once in `main` and handed to the API client and
// the commands, so tests can point everything at a mock server and a
// temporary directory.

use crate::error::{CliError, CliResult};
use std::path::PathBuf;

pub const DEFAULT_API_URL: &str = "http://localhost:5005/api/v1";
const CREDENTIALS_FILE: &str = "novaenv-cli-config.json";
const ENV_FILE: &str = ".env";

#[derive(Debug, Clone)]
pub struct Settings {
    /// Service root; endpoint paths are appended to it.
    pub api_base_url: String,
    pub credentials_path: PathBuf,
    /// Target `.env` file, always inside the working directory.
    pub env_file: PathBuf,
}

impl Settings {
    /// Read overrides from `NOVAENV_API_URL` and `NOVAENV_CONFIG`, falling
    /// back to the local service and `~/novaenv-cli-config.json`.
    pub fn from_env() -> CliResult<Self> {
        let api_base_url =
            std::env::var("NOVAENV_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        let credentials_path = match std::env::var_os("NOVAENV_CONFIG") {
            Some(p) => PathBuf::from(p),
            None => dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(CREDENTIALS_FILE),
        };
        let cwd = std::env::current_dir().map_err(|e| CliError::io(".", e))?;
        Ok(Settings::new(api_base_url, credentials_path, cwd))
    }

    pub fn new(api_base_url: impl Into<String>, credentials_path: PathBuf, work_dir: PathBuf) -> Self {
        Settings {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            credentials_path,
            env_file: work_dir.join(ENV_FILE),
        }
    }
}
