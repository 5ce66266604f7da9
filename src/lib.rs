// Library root
// -----------
// The binary (`main.rs`) is a thin wrapper; everything it does lives here
// so it can be exercised from tests.
//
// Module responsibilities:
// - `config`: runtime settings (service URL, credential file, `.env` path).
// - `credentials`: load/save/clear the stored API key.
// - `api`: HTTP calls to the NovaEnv service.
// - `ui`: terminal input/output and the numbered-list selector.
// - `flow`: the project → environment → variables → `.env` pipeline.
// - `commands`: login, projects and logout.
// - `cli`: argument parsing and dispatch to a command.
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;
pub mod flow;
pub mod logging;
pub mod ui;

pub use error::{CliError, CliResult};
