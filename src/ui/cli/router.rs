use std::io::{self, Write};
use std::process::ExitStatus;

use crossterm::style::Stylize;
use log::{debug, info};

use crate::connections::Launcher;
use crate::core::config::Config;
use crate::core::errors::TetherError;
use crate::storage::profile::{parse_port, Profile, DEFAULT_PORT};
use crate::storage::store::{ProfileMap, ProfileStore};
use crate::ui::prompt::{is_end_of_input, InputProvider};
use crate::ui::table::{banner, clear_screen, render_profiles};

/// Typing this at any interactive prompt abandons the current operation.
pub const CANCEL_SENTINEL: &str = "exit";

const WELCOME: &str = "Welcome to Tether! A lightweight SSH Profile Manager, directly in your CLI!";
const MENU_CHOICES: [&str; 5] = ["1", "2", "3", "4", "5"];
const REMOVE_TITLE: &str = "Delete a Connection";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    Connect,
    List,
    Add,
    Remove,
    Exit,
}

impl MenuChoice {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "1" => Some(Self::Connect),
            "2" => Some(Self::List),
            "3" => Some(Self::Add),
            "4" => Some(Self::Remove),
            "5" => Some(Self::Exit),
            _ => None,
        }
    }
}

fn is_sentinel(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case(CANCEL_SENTINEL)
}

/// A closed stdin or Ctrl+C in the middle of an operation cancels it.
fn cancel_on_eof(err: io::Error) -> TetherError {
    if is_end_of_input(&err) {
        TetherError::Cancelled
    } else {
        err.into()
    }
}

/// Prints a failure the way the user should see it.
pub fn report<W: Write>(out: &mut W, err: &TetherError) -> io::Result<()> {
    match err {
        TetherError::Cancelled => writeln!(out, "{}", err.to_string().yellow()),
        _ => writeln!(out, "{}", err.to_string().red()),
    }
}

/// Runs tether operations against a store, either one-shot (arguments
/// already known) or through the interactive menu.
pub struct CommandRouter<I, L, W> {
    store: ProfileStore,
    input: I,
    launcher: L,
    out: W,
    clear_screen: bool,
}

impl<I: InputProvider, L: Launcher, W: Write> CommandRouter<I, L, W> {
    pub fn new(config: &Config, input: I, launcher: L, out: W) -> Self {
        Self {
            store: ProfileStore::new(config.store_path.clone()),
            input,
            launcher,
            out,
            clear_screen: config.clear_screen,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    /// Reports into the router's own output, as the menu does.
    pub fn report(&mut self, err: &TetherError) -> io::Result<()> {
        report(&mut self.out, err)
    }

    /// Banner plus the current table; returns what was shown.
    pub fn show_profiles(&mut self, title: &str) -> Result<ProfileMap, TetherError> {
        writeln!(self.out)?;
        banner(&mut self.out, title)?;
        let profiles = self.store.load()?;
        render_profiles(&mut self.out, &profiles)?;
        Ok(profiles)
    }

    // ── one-shot operations ────────────────────────────────────────────

    /// Creates or silently overwrites `name`.
    pub fn add(&mut self, name: &str, profile: Profile) -> Result<(), TetherError> {
        self.store.upsert(name, profile)?;
        info!("Saved profile {name}");
        writeln!(
            self.out,
            "{}",
            format!("Connection profile for {name} added successfully.").green()
        )?;
        Ok(())
    }

    /// Shows every profile, or only `name`.
    pub fn list(&mut self, name: Option<&str>) -> Result<(), TetherError> {
        banner(&mut self.out, "Your Saved Connections")?;
        let mut profiles = self.store.load()?;
        match name {
            Some(name) => {
                let profile = profiles
                    .remove(name)
                    .ok_or_else(|| TetherError::NotFound(name.to_string()))?;
                let single = ProfileMap::from([(name.to_string(), profile)]);
                render_profiles(&mut self.out, &single)?;
            }
            None => render_profiles(&mut self.out, &profiles)?,
        }
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<(), TetherError> {
        if !self.store.remove(name)? {
            return Err(TetherError::NotFound(name.to_string()));
        }
        info!("Removed profile {name}");
        writeln!(self.out, "Profile {name} removed successfully.")?;
        Ok(())
    }

    /// The one-shot remove: shows the current profiles, then deletes `name`.
    pub fn remove_listed(&mut self, name: &str) -> Result<(), TetherError> {
        self.show_profiles(REMOVE_TITLE)?;
        self.remove(name)
    }

    /// Hands `name` to the launcher and waits for the session to end.
    pub fn connect(&mut self, name: &str) -> Result<ExitStatus, TetherError> {
        let profile = self
            .store
            .get(name)?
            .ok_or_else(|| TetherError::NotFound(name.to_string()))?;
        writeln!(
            self.out,
            "{}",
            format!(
                "Connecting to {name} ({} on port {})...",
                profile.destination(),
                profile.port
            )
            .green()
        )?;
        self.out.flush()?;
        self.launcher.launch(name, &profile)
    }

    // ── interactive mode ───────────────────────────────────────────────

    /// The menu loop. Returns when the user picks exit or stdin closes.
    pub fn run_interactive(&mut self) -> Result<(), TetherError> {
        loop {
            if self.clear_screen {
                clear_screen(&mut self.out)?;
            }
            banner(&mut self.out, WELCOME)?;
            writeln!(self.out, "\n[1] Connect to a Profile")?;
            writeln!(self.out, "[2] View Connections")?;
            writeln!(self.out, "[3] Add a Connection")?;
            writeln!(self.out, "[4] Remove a Connection")?;
            writeln!(self.out, "[5] Exit\n")?;

            let Some(choice) = self.read_menu_choice()? else {
                break;
            };
            debug!("Menu choice: {choice:?}");
            let result = match choice {
                MenuChoice::Connect => self.interactive_connect(),
                MenuChoice::List => self.list(None),
                MenuChoice::Add => self.interactive_add(),
                MenuChoice::Remove => self.interactive_remove(),
                MenuChoice::Exit => break,
            };
            if let Err(e) = result {
                self.report(&e)?;
            }
            if !self.pause()? {
                break;
            }
        }
        writeln!(self.out, "{}", "Goodbye!".red().bold())?;
        Ok(())
    }

    /// `None` once stdin is gone.
    fn read_menu_choice(&mut self) -> Result<Option<MenuChoice>, TetherError> {
        loop {
            let raw = match self.input.ask_choice("Select an option", &MENU_CHOICES) {
                Ok(raw) => raw,
                Err(e) if is_end_of_input(&e) => return Ok(None),
                Err(e) => return Err(e.into()),
            };
            match MenuChoice::parse(&raw) {
                Some(choice) => return Ok(Some(choice)),
                None => writeln!(
                    self.out,
                    "{}",
                    "\nInvalid option. Please select again.\n".red().bold()
                )?,
            }
        }
    }

    /// `false` once stdin is gone.
    fn pause(&mut self) -> Result<bool, TetherError> {
        match self.input.ask_text("Press Enter to continue", None) {
            Ok(_) => Ok(true),
            Err(e) if is_end_of_input(&e) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Asks until a non-blank answer arrives; the sentinel cancels.
    fn prompt_required(&mut self, prompt: &str, secret: bool) -> Result<String, TetherError> {
        loop {
            let answer = if secret {
                self.input.ask_secret(prompt)
            } else {
                self.input.ask_text(prompt, None)
            }
            .map_err(cancel_on_eof)?;

            if is_sentinel(&answer) {
                return Err(TetherError::Cancelled);
            }
            if answer.trim().is_empty() {
                continue;
            }
            return Ok(if secret { answer } else { answer.trim().to_string() });
        }
    }

    fn prompt_port(&mut self) -> Result<u16, TetherError> {
        let default = DEFAULT_PORT.to_string();
        loop {
            let answer = self
                .input
                .ask_text("Enter port (or 'exit' to cancel)", Some(default.as_str()))
                .map_err(cancel_on_eof)?;
            if is_sentinel(&answer) {
                return Err(TetherError::Cancelled);
            }
            if answer.trim().is_empty() {
                return Ok(DEFAULT_PORT);
            }
            match parse_port(&answer) {
                Some(port) => return Ok(port),
                None => writeln!(
                    self.out,
                    "{}",
                    "Port must be a number between 1 and 65535.".red()
                )?,
            }
        }
    }

    fn confirm(&mut self, prompt: &str) -> Result<bool, TetherError> {
        let answer = self
            .input
            .ask_choice(prompt, &["y", "N"])
            .map_err(cancel_on_eof)?;
        Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
    }

    fn interactive_add(&mut self) -> Result<(), TetherError> {
        let profiles = self.show_profiles("Add a Connection (type 'exit' to cancel)")?;

        let name = self.prompt_required("Enter profile alias (or 'exit' to cancel)", false)?;
        if profiles.contains_key(&name) {
            writeln!(self.out, "\nYou are about to override the profile {name}.")?;
            if !self.confirm("Is that ok?")? {
                writeln!(self.out, "Aborting...")?;
                return Ok(());
            }
        }

        let user = self.prompt_required("Enter system user (or 'exit' to cancel)", false)?;
        let host = self.prompt_required("Enter system IP (or 'exit' to cancel)", false)?;
        let secret = self.prompt_required("Enter password (or 'exit' to cancel)", true)?;
        let port = self.prompt_port()?;

        self.add(&name, Profile::new(user, host, port, Some(secret)))
    }

    fn interactive_remove(&mut self) -> Result<(), TetherError> {
        let profiles = self.show_profiles(REMOVE_TITLE)?;

        let name = loop {
            let name =
                self.prompt_required("Enter profile alias to remove (or 'exit' to cancel)", false)?;
            if profiles.contains_key(&name) {
                break name;
            }
            writeln!(self.out, "{}", "Profile not found. Try again.".red())?;
        };
        self.remove(&name)
    }

    fn interactive_connect(&mut self) -> Result<(), TetherError> {
        self.show_profiles("What Profile Do You Want To Connect To? (type 'exit' to cancel)")?;

        let name =
            self.prompt_required("Enter profile alias to connect to (or 'exit' to cancel)", false)?;
        let status = self.connect(&name)?;
        if !status.success() {
            writeln!(self.out, "{}", format!("Session ended with {status}.").yellow())?;
        }
        Ok(())
    }
}
