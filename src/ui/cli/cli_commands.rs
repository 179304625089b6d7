use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::debug;

use super::router::{report, CommandRouter};
use crate::connections::{Launcher, SshLauncher};
use crate::core::config::Config;
use crate::core::errors::TetherError;
use crate::storage::profile::{Profile, DEFAULT_PORT};
use crate::ui::prompt::{InputProvider, TerminalInput};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(name = "tether", version, about = "Simple SSH Connection Manager For The CLI")]
pub struct Args {
    /// Profile store file (default: tether/profiles.json in the user config dir)
    #[arg(long, global = true, env = "TETHER_STORE")]
    pub store: Option<PathBuf>,

    /// SSH client executable to launch
    #[arg(long, global = true, env = "TETHER_SSH", default_value = "ssh")]
    pub ssh: PathBuf,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Without a command the interactive menu starts
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Add a new connection (overwrites an existing one)
    Add {
        /// The profile alias
        profile_name: String,
        /// The system user
        user: String,
        /// The system IP or hostname
        #[arg(value_name = "IP")]
        host: String,
        /// The system password (omit it to let ssh ask)
        secret: Option<String>,
        /// The port number
        #[arg(short, long, default_value_t = DEFAULT_PORT, value_parser = clap::value_parser!(u16).range(1..))]
        port: u16,
    },
    /// List saved connections
    List {
        /// The profile alias to list (optional)
        profile_name: Option<String>,
    },
    /// Connect to a profile
    Connect {
        /// The profile alias to connect to
        profile_name: String,
    },
    /// Remove a profile
    Remove {
        /// The profile alias to remove
        profile_name: String,
    },
}

impl Args {
    pub fn config(&self) -> Result<Config, TetherError> {
        let store_path = match &self.store {
            Some(path) => path.clone(),
            None => Config::default_store_path()?,
        };
        Ok(Config::new(store_path).with_ssh_program(self.ssh.clone()))
    }
}

/// Runs one invocation and returns the process exit code.
///
/// Failures of the chosen operation are reported on stderr here and
/// turned into a non-zero code; only setup problems come back as `Err`.
pub fn run_cli(args: Args) -> Result<i32, TetherError> {
    let config = args.config()?;
    debug!("Using store {:?}", config.store_path);
    let launcher = SshLauncher::from_config(&config);
    let mut router = CommandRouter::new(&config, TerminalInput::new(), launcher, io::stdout());

    match args.command {
        None => match router.run_interactive() {
            Ok(()) => Ok(0),
            Err(e) => {
                report(&mut io::stderr(), &e)?;
                Ok(e.exit_code())
            }
        },
        Some(command) => Ok(run_one_shot(&mut router, command, &mut io::stderr())?),
    }
}

/// [`dispatch`] plus reporting: results go to the router's output, failures
/// to `errors`, so piped output only ever carries data.
pub fn run_one_shot<I, L, W, E>(
    router: &mut CommandRouter<I, L, W>,
    command: Command,
    errors: &mut E,
) -> io::Result<i32>
where
    I: InputProvider,
    L: Launcher,
    W: io::Write,
    E: io::Write,
{
    match dispatch(router, command) {
        Ok(code) => Ok(code),
        Err(e) => {
            report(errors, &e)?;
            Ok(e.exit_code())
        }
    }
}

/// Runs a one-shot command. Overwrites on `add` happen without confirmation;
/// `remove` shows the current profiles before deleting.
pub fn dispatch<I, L, W>(router: &mut CommandRouter<I, L, W>, command: Command) -> Result<i32, TetherError>
where
    I: InputProvider,
    L: Launcher,
    W: io::Write,
{
    match command {
        Command::Add {
            profile_name,
            user,
            host,
            secret,
            port,
        } => router
            .add(&profile_name, Profile::new(user, host, port, secret))
            .map(|()| 0),
        Command::List { profile_name } => router.list(profile_name.as_deref()).map(|()| 0),
        Command::Connect { profile_name } => {
            let status = router.connect(&profile_name)?;
            Ok(status.code().unwrap_or(1))
        }
        Command::Remove { profile_name } => router.remove_listed(&profile_name).map(|()| 0),
    }
}
