// The `projects` pipeline: check credentials, pick a project, pick an
// environment, fetch its variables and write them to `.env`.
//
// Each stage either hands its result to the next one (`Step::Continue`),
// stops early with a message (`Step::Done`), or aborts with an error.
// Stages never loop back.

use crate::api::{Environment, Project, ServiceApi};
use crate::credentials::{CredentialStore, Credentials};
use crate::error::{CliError, CliResult};
use crate::ui::{select_one, Console};
use std::path::{Path, PathBuf};

#[derive(Debug, PartialEq)]
pub enum Step<T> {
    Continue(T),
    Done(String),
}

/// How a completed pipeline ended.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    Written { count: usize, path: PathBuf },
    /// Nothing to do; carries the message explaining why.
    Nothing(String),
    /// The user declined to overwrite an existing `.env`.
    Cancelled,
}

macro_rules! proceed {
    ($step:expr) => {
        match $step {
            Step::Continue(value) => value,
            Step::Done(message) => return Ok(Outcome::Nothing(message)),
        }
    };
}

pub struct ProjectFlow<'a, S: ?Sized, C: ?Sized> {
    api: &'a S,
    store: &'a CredentialStore,
    console: &'a mut C,
    env_file: &'a Path,
}

impl<'a, S, C> ProjectFlow<'a, S, C>
where
    S: ServiceApi + ?Sized,
    C: Console + ?Sized,
{
    pub fn new(api: &'a S, store: &'a CredentialStore, console: &'a mut C, env_file: &'a Path) -> Self {
        ProjectFlow {
            api,
            store,
            console,
            env_file,
        }
    }

    pub fn run(&mut self) -> CliResult<Outcome> {
        let creds = self.authenticate()?;
        let project = proceed!(self.choose_project(&creds)?);
        let environment = proceed!(self.choose_environment(&creds, &project)?);
        let variables = proceed!(self.fetch_variables(&creds, &project, &environment)?);
        self.write(&variables)
    }

    fn authenticate(&self) -> CliResult<Credentials> {
        self.store.load()
    }

    fn choose_project(&mut self, creds: &Credentials) -> CliResult<Step<Project>> {
        self.console.heading("📂 Your Projects");
        self.console.status("Fetching projects...");
        let mut projects = self.api.list_projects(&creds.api_key)?;
        tracing::info!(count = projects.len(), "projects fetched");
        if projects.is_empty() {
            return Ok(Step::Done("No projects found.".into()));
        }
        let index = select_one(
            &mut *self.console,
            "Select project (enter number)",
            &projects,
            describe_project,
        )?;
        Ok(Step::Continue(projects.swap_remove(index)))
    }

    fn choose_environment(
        &mut self,
        creds: &Credentials,
        project: &Project,
    ) -> CliResult<Step<Environment>> {
        self.console
            .heading(&format!("🌍 Environments for \"{}\"", project.name));
        self.console.status("Fetching environments...");
        let mut environments = self
            .api
            .list_environments(&creds.api_key, &project.project_id)?;
        tracing::info!(project = %project.project_id, count = environments.len(), "environments fetched");
        if environments.is_empty() {
            return Ok(Step::Done("No environments found.".into()));
        }
        let index = select_one(
            &mut *self.console,
            "Select environment (enter number)",
            &environments,
            |env| env.name.clone(),
        )?;
        Ok(Step::Continue(environments.swap_remove(index)))
    }

    fn fetch_variables(
        &mut self,
        creds: &Credentials,
        project: &Project,
        environment: &Environment,
    ) -> CliResult<Step<Vec<String>>> {
        self.console.heading(&format!(
            "📝 Extracting and decrypting variables from \"{}\"",
            environment.name
        ));
        self.console.status("Decrypting variables...");
        let variables = self.api.list_variables(
            &creds.api_key,
            &project.project_id,
            &environment.environment_id,
        )?;
        if variables.is_empty() {
            return Ok(Step::Done("No variables found.".into()));
        }
        Ok(Step::Continue(variables))
    }

    fn write(&mut self, variables: &[String]) -> CliResult<Outcome> {
        if self.env_file.exists()
            && !self.console.confirm(".env file exists. Overwrite? (y/N)")?
        {
            tracing::info!(path = %self.env_file.display(), "overwrite declined");
            return Ok(Outcome::Cancelled);
        }
        let count = write_env_file(self.env_file, variables)?;
        Ok(Outcome::Written {
            count,
            path: self.env_file.to_path_buf(),
        })
    }
}

/// Replace `path` with one line per variable, each terminated by `\n`.
/// Returns the number of lines written.
pub fn write_env_file(path: &Path, variables: &[String]) -> CliResult<usize> {
    let content: String = variables.iter().map(|v| format!("{}\n", v)).collect();
    std::fs::write(path, content).map_err(|e| CliError::io(path, e))?;
    tracing::info!(path = %path.display(), count = variables.len(), ".env written");
    Ok(variables.len())
}

fn describe_project(project: &Project) -> String {
    format!(
        "{}\n   ID: {}\n   Created: {}",
        project.name,
        project.project_id,
        format_date(project.created_at.as_deref())
    )
}

/// Render an RFC 3339 timestamp as a calendar date; anything else is shown
/// as it came.
fn format_date(raw: Option<&str>) -> String {
    match raw {
        Some(s) => chrono::DateTime::parse_from_rfc3339(s)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|_| s.to_string()),
        None => "unknown".to_string(),
    }
}
