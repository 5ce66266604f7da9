// Top-level operations behind each CLI command. They take their
// collaborators as arguments so the same code runs against the real
// service and terminal or against test doubles.

use crate::api::{ServiceApi, UserInfo};
use crate::credentials::CredentialStore;
use crate::error::{CliError, CliResult};
use crate::flow::{Outcome, ProjectFlow};
use crate::ui::Console;
use std::path::Path;

/// Ask for an API key, verify it and store it with the returned user.
/// Nothing is written unless the service accepts the key.
pub fn login<S, C>(api: &S, store: &CredentialStore, console: &mut C) -> CliResult<UserInfo>
where
    S: ServiceApi + ?Sized,
    C: Console + ?Sized,
{
    console.heading("🔐 Login to NovaEnv CLI");
    let api_key = console.read_secret("Enter your API key")?;
    if api_key.is_empty() {
        return Err(CliError::MissingApiKey);
    }

    console.status("Verifying API key...");
    let user = api.verify_key(&api_key)?;
    store.save(&api_key, &user)?;
    console.show(&format!("✅ Successfully logged in as {}", user.display_name()));
    Ok(user)
}

/// Run the project → environment → variables pipeline and report how it
/// ended.
pub fn projects<S, C>(
    api: &S,
    store: &CredentialStore,
    console: &mut C,
    env_file: &Path,
) -> CliResult<Outcome>
where
    S: ServiceApi + ?Sized,
    C: Console + ?Sized,
{
    let outcome = ProjectFlow::new(api, store, &mut *console, env_file).run()?;
    match &outcome {
        Outcome::Written { count, path } => {
            console.show(&format!(
                "✅ Wohoo, Successfully extracted {} variables to .env",
                count
            ));
            console.show(&format!("📁 File saved at: {}", path.display()));
        }
        Outcome::Nothing(message) => console.show(message),
        Outcome::Cancelled => console.show("❌ Operation cancelled"),
    }
    Ok(outcome)
}

/// Remove stored credentials. Safe to run when already logged out.
pub fn logout<C: Console + ?Sized>(store: &CredentialStore, console: &mut C) -> CliResult<()> {
    if store.clear()? {
        console.show("✅ Successfully logged out");
    } else {
        console.show("ℹ️  Already logged out");
    }
    Ok(())
}
