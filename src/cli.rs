// Command-line surface: one optional command word, no flags besides
// clap's `--help`/`-h` and `--version`. Anything else clap refuses is
// reported as an unknown command.

use crate::api::ApiClient;
use crate::commands;
use crate::config::Settings;
use crate::credentials::CredentialStore;
use crate::error::CliError;
use crate::ui::Console;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};

pub const EXIT_OK: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_USAGE: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "novaenv-cli",
    version,
    about = "🚀 NovaEnv CLI - Environment Variable Manager",
    after_help = "Usage:\n  novaenv-cli login\n  novaenv-cli projects\n  novaenv-cli logout"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Login with your API key
    Login,
    /// List and select projects, then write an environment to .env
    Projects,
    /// Logout and clear credentials
    Logout,
    #[command(external_subcommand)]
    Unknown(Vec<String>),
}

pub fn print_help() {
    if let Err(e) = Cli::command().print_help() {
        tracing::warn!(error = %e, "could not print help");
    }
}

/// Result of reading the command line.
#[derive(Debug)]
pub enum Parsed {
    Run(Option<Command>),
    /// Help or version output requested; print the carried clap message.
    Info(clap::Error),
}

/// Parse `args` (program name first). Anything clap rejects, such as an
/// unknown flag, is treated like an unknown command word.
pub fn parse_from<I, T>(args: I) -> Parsed
where
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    let args: Vec<String> = args.into_iter().map(Into::into).collect();
    match Cli::try_parse_from(args.iter()) {
        Ok(cli) => Parsed::Run(cli.command),
        Err(err)
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp
                    | ErrorKind::DisplayVersion
                    | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
            ) =>
        {
            Parsed::Info(err)
        }
        Err(err) => {
            tracing::debug!(error = %err, "arguments rejected");
            Parsed::Run(Some(Command::Unknown(args.into_iter().skip(1).collect())))
        }
    }
}

/// Run `command` and return the process exit code. Errors are reported
/// here, once, and never propagate further.
pub fn dispatch<C: Console + ?Sized>(command: Option<Command>, settings: &Settings, console: &mut C) -> u8 {
    let store = CredentialStore::new(&settings.credentials_path);
    tracing::debug!(?command, api = %settings.api_base_url, "dispatching");

    let result = match command {
        None => {
            print_help();
            return EXIT_OK;
        }
        Some(Command::Unknown(args)) => {
            let word = args.first().map(String::as_str).unwrap_or_default();
            console.error(&format!("Unknown command: {}", word));
            console.show("Run \"novaenv-cli help\" for available commands");
            return EXIT_USAGE;
        }
        Some(Command::Login) => ApiClient::new(&settings.api_base_url)
            .and_then(|api| commands::login(&api, &store, console).map(drop)),
        Some(Command::Projects) => ApiClient::new(&settings.api_base_url).and_then(|api| {
            commands::projects(&api, &store, console, &settings.env_file).map(drop)
        }),
        Some(Command::Logout) => commands::logout(&store, console),
    };

    match result {
        Ok(()) => EXIT_OK,
        Err(err) => report(&err, console),
    }
}

fn report<C: Console + ?Sized>(err: &CliError, console: &mut C) -> u8 {
    tracing::debug!(error = ?err, "command failed");
    console.error(&err.to_string());
    EXIT_FAILURE
}
