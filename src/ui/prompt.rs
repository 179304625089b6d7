use std::io::{self, BufRead, IsTerminal, Write};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

/// Where interactive answers come from.
///
/// End of input is reported as `io::ErrorKind::UnexpectedEof`, Ctrl+C
/// during a masked prompt as `io::ErrorKind::Interrupted`.
pub trait InputProvider {
    /// A line of text. An empty answer yields `default` when one is given.
    fn ask_text(&mut self, prompt: &str, default: Option<&str>) -> io::Result<String>;

    /// A line of text that is not echoed.
    fn ask_secret(&mut self, prompt: &str) -> io::Result<String>;

    /// A raw answer to a question with listed choices. Validation is up to the caller.
    fn ask_choice(&mut self, prompt: &str, choices: &[&str]) -> io::Result<String>;
}

impl<T: InputProvider + ?Sized> InputProvider for &mut T {
    fn ask_text(&mut self, prompt: &str, default: Option<&str>) -> io::Result<String> {
        (**self).ask_text(prompt, default)
    }

    fn ask_secret(&mut self, prompt: &str) -> io::Result<String> {
        (**self).ask_secret(prompt)
    }

    fn ask_choice(&mut self, prompt: &str, choices: &[&str]) -> io::Result<String> {
        (**self).ask_choice(prompt, choices)
    }
}

/// True for the errors an [`InputProvider`] uses to say "the user is gone".
pub fn is_end_of_input(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::UnexpectedEof | io::ErrorKind::Interrupted
    )
}

/// Prompts on stdout, reads from stdin.
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }

    fn show(prompt: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        write!(stdout, "{prompt}")?;
        stdout.flush()
    }

    fn read_line() -> io::Result<String> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Reads keys in raw mode until Enter, echoing nothing.
    fn read_masked() -> io::Result<String> {
        let mut secret = String::new();
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
            match key.code {
                KeyCode::Enter => return Ok(secret),
                KeyCode::Char('c') if ctrl => {
                    return Err(io::Error::new(io::ErrorKind::Interrupted, "interrupted"))
                }
                KeyCode::Char('d') if ctrl && secret.is_empty() => {
                    return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "stdin closed"))
                }
                KeyCode::Backspace => {
                    secret.pop();
                }
                KeyCode::Char(c) if !ctrl => secret.push(c),
                _ => {}
            }
        }
    }
}

impl InputProvider for TerminalInput {
    fn ask_text(&mut self, prompt: &str, default: Option<&str>) -> io::Result<String> {
        match default {
            Some(default) => Self::show(&format!("{prompt} ({default}): "))?,
            None => Self::show(&format!("{prompt}: "))?,
        }
        let answer = Self::read_line()?;
        match default {
            Some(default) if answer.trim().is_empty() => Ok(default.to_string()),
            _ => Ok(answer),
        }
    }

    fn ask_secret(&mut self, prompt: &str) -> io::Result<String> {
        Self::show(&format!("{prompt}: "))?;
        if !io::stdin().is_terminal() {
            return Self::read_line();
        }
        enable_raw_mode()?;
        let result = Self::read_masked();
        let _ = disable_raw_mode();
        println!();
        result
    }

    fn ask_choice(&mut self, prompt: &str, choices: &[&str]) -> io::Result<String> {
        Self::show(&format!("{prompt} ({}): ", choices.join("/")))?;
        Ok(Self::read_line()?.trim().to_string())
    }
}
