// Entrypoint for the CLI application.
// - Keeps `main` small: parse arguments, print the banner, build settings
//   and hand off to the dispatcher, whose result becomes the exit code.
// - Returns `anyhow::Result` so a broken environment (no working
//   directory) is reported with context instead of a bare I/O error.

use anyhow::Context;
use novaenv_cli::cli::{self, Parsed};
use novaenv_cli::config::Settings;
use novaenv_cli::ui::TerminalConsole;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    novaenv_cli::logging::init();
    let parsed = cli::parse_from(std::env::args());

    println!("🔧 NovaEnv CLI v{}\n", env!("CARGO_PKG_VERSION"));

    let command = match parsed {
        Parsed::Run(command) => command,
        Parsed::Info(info) => {
            info.print().context("Failed to print help")?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    let settings = Settings::from_env().context("Failed to load NovaEnv settings")?;
    let mut console = TerminalConsole::new();
    let code = cli::dispatch(command, &settings, &mut console);
    Ok(ExitCode::from(code))
}
