// API client module: a small blocking HTTP client for the NovaEnv CLI
// endpoints. Every call is a single POST with the API key as a bearer
// token and an empty body; there are no retries.

use crate::error::{CliError, CliResult};
use reqwest::blocking::{Client, Response};
use reqwest::header::CONTENT_TYPE;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// The user record returned by the auth endpoint, kept exactly as the
/// service sent it so it is written to the credential file unchanged.
/// Only `name` and `email` are ever read, and only for display.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct UserInfo(serde_json::Map<String, serde_json::Value>);

impl UserInfo {
    pub fn get(&self, field: &str) -> Option<&serde_json::Value> {
        self.0.get(field)
    }

    pub fn display_name(&self) -> &str {
        let text = |field: &str| {
            self.get(field)
                .and_then(serde_json::Value::as_str)
                .filter(|s| !s.is_empty())
        };
        text("name").or_else(|| text("email")).unwrap_or("unknown user")
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Project {
    #[serde(rename = "_id", default)]
    pub internal_id: Option<String>,
    /// Public identifier used to scope environment and variable requests.
    #[serde(rename = "projectId")]
    pub project_id: String,
    pub name: String,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Environment {
    // The service spells this field "enviornmentId".
    #[serde(rename = "enviornmentId", alias = "environmentId")]
    pub environment_id: String,
    pub name: String,
}

/// Successful responses wrap their payload in `data`.
#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// The four remote operations the CLI depends on. `ApiClient` is the real
/// implementation; tests substitute their own.
pub trait ServiceApi {
    fn verify_key(&self, api_key: &str) -> CliResult<UserInfo>;
    fn list_projects(&self, api_key: &str) -> CliResult<Vec<Project>>;
    fn list_environments(&self, api_key: &str, project_id: &str) -> CliResult<Vec<Environment>>;
    fn list_variables(
        &self,
        api_key: &str,
        project_id: &str,
        environment_id: &str,
    ) -> CliResult<Vec<String>>;
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> CliResult<Self> {
        let client = Client::builder().timeout(None::<Duration>).build()?;
        Ok(ApiClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Join path segments onto the base URL, escaping each one.
    fn endpoint(&self, segments: &[&str]) -> CliResult<Url> {
        let invalid = || CliError::RequestFailed(format!("Invalid service URL: {}", self.base_url));
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn post(&self, url: Url, api_key: &str) -> CliResult<Response> {
        tracing::debug!(%url, "POST");
        let res = self
            .client
            .post(url.clone())
            .bearer_auth(api_key)
            .header(CONTENT_TYPE, "application/json")
            .send()?;
        tracing::debug!(%url, status = %res.status(), "response received");
        Ok(res)
    }
}

/// Decode the `data` field of a 200 response.
fn decode<T: DeserializeOwned>(res: Response) -> CliResult<T> {
    let url = res.url().clone();
    let body = res.text()?;
    serde_json::from_str::<Envelope<T>>(&body)
        .map(|env| env.data)
        .map_err(|e| {
            tracing::warn!(%url, error = %e, "response did not match the expected shape");
            CliError::RequestFailed(format!("Unexpected response from {}: {}", url.path(), e))
        })
}

/// Turn a non-200 response into an error, preferring the service's own
/// `error` message.
fn failure(res: Response, what: &str) -> CliError {
    let status = res.status();
    let body = res.text().unwrap_or_default();
    let message = serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.error)
        .or_else(|| (!body.trim().is_empty()).then(|| body.trim().to_string()))
        .unwrap_or_else(|| format!("{} failed with status {}", what, status));
    tracing::debug!(%status, %message, "request rejected");
    CliError::RequestFailed(message)
}

impl ServiceApi for ApiClient {
    fn verify_key(&self, api_key: &str) -> CliResult<UserInfo> {
        let res = self.post(self.endpoint(&["cli", "auth", "login"])?, api_key)?;
        if res.status() != StatusCode::OK {
            tracing::debug!(status = %res.status(), "API key rejected");
            return Err(CliError::AuthenticationFailed);
        }
        decode(res)
    }

    fn list_projects(&self, api_key: &str) -> CliResult<Vec<Project>> {
        let res = self.post(self.endpoint(&["cli", "project", "projects"])?, api_key)?;
        if res.status() != StatusCode::OK {
            return Err(failure(res, "Fetching projects"));
        }
        decode(res)
    }

    fn list_environments(&self, api_key: &str, project_id: &str) -> CliResult<Vec<Environment>> {
        let url = self.endpoint(&["cli", "enviornment", "project", project_id, "enviornments"])?;
        let res = self.post(url, api_key)?;
        if res.status() != StatusCode::OK {
            return Err(failure(res, "Fetching environments"));
        }
        decode(res)
    }

    fn list_variables(
        &self,
        api_key: &str,
        project_id: &str,
        environment_id: &str,
    ) -> CliResult<Vec<String>> {
        let url = self.endpoint(&[
            "cli",
            "variable",
            "project",
            project_id,
            "enviornments",
            environment_id,
            "variables",
        ])?;
        let res = self.post(url, api_key)?;
        if res.status() != StatusCode::OK {
            return Err(failure(res, "Fetching variables"));
        }
        decode(res)
    }
}
