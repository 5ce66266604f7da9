// UI layer: everything that talks to the terminal goes through `Console`.
// The real implementation uses `dialoguer` for input and an `indicatif`
// spinner while requests are in flight; tests drive the same flows with a
// scripted console.

use crate::error::{CliError, CliResult};
use crossterm::style::Stylize;
use dialoguer::{Confirm, Input, Password};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub trait Console {
    /// Print one (possibly multi-line) message.
    fn show(&mut self, text: &str);

    /// Announce a long-running step. Cleared by the next call on the console.
    fn status(&mut self, message: &str);

    fn read_line(&mut self, prompt: &str) -> CliResult<String>;

    /// Like `read_line` but without echoing the input.
    fn read_secret(&mut self, prompt: &str) -> CliResult<String>;

    /// Yes/no question; anything but an explicit yes is a no.
    fn confirm(&mut self, prompt: &str) -> CliResult<bool>;

    /// Report a failure. Any running status is cleared first.
    fn error(&mut self, text: &str);

    fn heading(&mut self, title: &str) {
        let rule = "═".repeat(title.chars().count().max(15));
        self.show(&format!("\n{}\n{}\n", title, rule));
    }
}

/// Interactive console backed by the real terminal.
#[derive(Default)]
pub struct TerminalConsole {
    spinner: Option<ProgressBar>,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self::default()
    }

    fn clear_status(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl Drop for TerminalConsole {
    fn drop(&mut self) {
        self.clear_status();
    }
}

impl Console for TerminalConsole {
    fn show(&mut self, text: &str) {
        self.clear_status();
        println!("{}", text);
    }

    fn status(&mut self, message: &str) {
        self.clear_status();
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(Duration::from_millis(100));
        self.spinner = Some(spinner);
    }

    fn read_line(&mut self, prompt: &str) -> CliResult<String> {
        self.clear_status();
        let answer: String = Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(answer.trim().to_string())
    }

    fn read_secret(&mut self, prompt: &str) -> CliResult<String> {
        self.clear_status();
        let answer = Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()?;
        Ok(answer.trim().to_string())
    }

    fn confirm(&mut self, prompt: &str) -> CliResult<bool> {
        self.clear_status();
        Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
    }

    fn error(&mut self, text: &str) {
        self.clear_status();
        eprintln!("{} {}", "❌".red(), text);
    }

    fn heading(&mut self, title: &str) {
        self.clear_status();
        let rule = "═".repeat(title.chars().count().max(15));
        println!("\n{}\n{}\n", title.bold(), rule.dark_grey());
    }
}

/// Accepts `y` or `yes` in any case; everything else, including an empty
/// answer, is a refusal.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Parse a 1-based menu answer into a 0-based index into a list of `len`.
pub fn parse_selection(input: &str, len: usize) -> CliResult<usize> {
    match input.trim().parse::<usize>() {
        Ok(n) if n >= 1 && n <= len => Ok(n - 1),
        _ => Err(CliError::InvalidSelection(input.trim().to_string())),
    }
}

/// Print `items` as a numbered list and read a single choice. There is no
/// re-prompt: a bad answer is returned as `InvalidSelection`.
pub fn select_one<C, T, F>(console: &mut C, prompt: &str, items: &[T], display: F) -> CliResult<usize>
where
    C: Console + ?Sized,
    F: Fn(&T) -> String,
{
    for (i, item) in items.iter().enumerate() {
        console.show(&format!("{}. {}\n", i + 1, display(item)));
    }
    let answer = console.read_line(prompt)?;
    parse_selection(&answer, items.len())
}
