//! An `InputProvider` that replays canned answers.
//!
//! Answers are consumed in order, whatever kind of prompt asks for them.
//! Once the script runs out every prompt fails with `UnexpectedEof`, which
//! the router treats like a closed stdin.

use std::collections::VecDeque;
use std::io;

use tether::ui::prompt::InputProvider;

#[derive(Debug, Default)]
pub struct ScriptedInput {
    answers: VecDeque<String>,
    /// Every prompt shown, in order.
    pub prompts: Vec<String>,
    /// How many of them were masked.
    pub secret_prompts: usize,
    /// The options offered by each `ask_choice`, in order.
    pub choices: Vec<Vec<String>>,
}

impl ScriptedInput {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    pub fn count_prompts(&self, prefix: &str) -> usize {
        self.prompts.iter().filter(|p| p.starts_with(prefix)).count()
    }

    fn next(&mut self, prompt: &str) -> io::Result<String> {
        self.prompts.push(prompt.to_string());
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }
}

impl InputProvider for ScriptedInput {
    fn ask_text(&mut self, prompt: &str, default: Option<&str>) -> io::Result<String> {
        let answer = self.next(prompt)?;
        match default {
            Some(default) if answer.is_empty() => Ok(default.to_string()),
            _ => Ok(answer),
        }
    }

    fn ask_secret(&mut self, prompt: &str) -> io::Result<String> {
        self.secret_prompts += 1;
        self.next(prompt)
    }

    fn ask_choice(&mut self, prompt: &str, choices: &[&str]) -> io::Result<String> {
        self.choices
            .push(choices.iter().map(|c| c.to_string()).collect());
        self.next(prompt)
    }
}
