//! Shared test doubles: a console that replays scripted answers and a
//! service that serves canned lists and records what was asked of it.

#![allow(dead_code)]

use novaenv_cli::api::{Environment, Project, ServiceApi, UserInfo};
use novaenv_cli::ui::{is_affirmative, Console};
use novaenv_cli::{CliError, CliResult};
use serde_json::json;
use std::cell::RefCell;
use std::collections::VecDeque;

#[derive(Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    pub output: Vec<String>,
    pub prompts: Vec<String>,
    pub statuses: Vec<String>,
    pub errors: Vec<String>,
}

impl ScriptedConsole {
    pub fn with_answers(answers: &[&str]) -> Self {
        ScriptedConsole {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn printed(&self) -> String {
        self.output.join("\n")
    }

    fn next_answer(&mut self, prompt: &str) -> CliResult<String> {
        self.prompts.push(prompt.to_string());
        self.answers.pop_front().ok_or_else(|| {
            CliError::Prompt(std::io::Error::new(
                std::io::ErrorKind::UnexpectedEof,
                format!("no scripted answer for {prompt:?}"),
            ))
        })
    }
}

impl Console for ScriptedConsole {
    fn show(&mut self, text: &str) {
        self.output.push(text.to_string());
    }

    fn status(&mut self, message: &str) {
        self.statuses.push(message.to_string());
    }

    fn read_line(&mut self, prompt: &str) -> CliResult<String> {
        self.next_answer(prompt).map(|a| a.trim().to_string())
    }

    fn read_secret(&mut self, prompt: &str) -> CliResult<String> {
        self.next_answer(prompt).map(|a| a.trim().to_string())
    }

    fn confirm(&mut self, prompt: &str) -> CliResult<bool> {
        self.next_answer(prompt).map(|a| is_affirmative(&a))
    }

    fn error(&mut self, text: &str) {
        self.errors.push(text.to_string());
    }
}

/// Canned service. `Err(message)` entries turn into `RequestFailed`.
pub struct FakeService {
    pub user: Result<UserInfo, ()>,
    pub projects: Result<Vec<Project>, String>,
    pub environments: Result<Vec<Environment>, String>,
    pub variables: Result<Vec<String>, String>,
    /// Name of the call (e.g. "list_environments") that fails at the
    /// transport level instead of answering.
    pub unreachable: Option<&'static str>,
    pub calls: RefCell<Vec<String>>,
}

impl Default for FakeService {
    fn default() -> Self {
        FakeService {
            user: Ok(user(json!({"name": "Ada", "email": "ada@example.com"}))),
            projects: Ok(vec![project("p-1", "Billing"), project("p-2", "Search")]),
            environments: Ok(vec![environment("e-1", "development"), environment("e-2", "production")]),
            variables: Ok(vec!["A=1".into(), "B=2".into()]),
            unreachable: None,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl FakeService {
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Log the call, failing with a real connection error when `name` is
    /// the configured unreachable call.
    fn record(&self, name: &str, call: String) -> CliResult<()> {
        self.calls.borrow_mut().push(call);
        if self.unreachable == Some(name) {
            return Err(connection_refused());
        }
        Ok(())
    }
}

impl ServiceApi for FakeService {
    fn verify_key(&self, api_key: &str) -> CliResult<UserInfo> {
        self.record("verify_key", format!("verify_key {api_key}"))?;
        self.user.clone().map_err(|_| CliError::AuthenticationFailed)
    }

    fn list_projects(&self, api_key: &str) -> CliResult<Vec<Project>> {
        self.record("list_projects", format!("list_projects {api_key}"))?;
        self.projects.clone().map_err(CliError::RequestFailed)
    }

    fn list_environments(&self, api_key: &str, project_id: &str) -> CliResult<Vec<Environment>> {
        self.record(
            "list_environments",
            format!("list_environments {api_key} {project_id}"),
        )?;
        self.environments.clone().map_err(CliError::RequestFailed)
    }

    fn list_variables(
        &self,
        api_key: &str,
        project_id: &str,
        environment_id: &str,
    ) -> CliResult<Vec<String>> {
        self.record(
            "list_variables",
            format!("list_variables {api_key} {project_id} {environment_id}"),
        )?;
        self.variables.clone().map_err(CliError::RequestFailed)
    }
}

/// A genuine transport failure: nothing listens on the discard port.
pub fn connection_refused() -> CliError {
    let err = reqwest::blocking::Client::new()
        .post("http://127.0.0.1:9/")
        .send()
        .expect_err("nothing should be listening on port 9");
    CliError::Transport(err)
}

pub fn user(fields: serde_json::Value) -> UserInfo {
    serde_json::from_value(fields).expect("user fixture must be a JSON object")
}

pub fn project(id: &str, name: &str) -> Project {
    Project {
        internal_id: Some(format!("internal-{id}")),
        project_id: id.to_string(),
        name: name.to_string(),
        created_at: Some("2024-01-15T09:30:00.000Z".to_string()),
    }
}

pub fn environment(id: &str, name: &str) -> Environment {
    Environment {
        environment_id: id.to_string(),
        name: name.to_string(),
    }
}
