// console.rs
//! Everything the game says to, or asks of, the people playing it.
//!
//! The game core only talks to a [`Console`]. Implementors supply raw line
//! reads and writes; the provided methods layer validation and re-prompting
//! on top, so a bad answer never escapes the prompt that asked for it.

use crate::error::GameError;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Typed by a player to back out of a menu that allows it.
pub const DONE: &str = "done";

/// Shared flag an outside caller can set to stop a game at its next prompt.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// One numbered entry in a menu.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuOption<V> {
    /// Typed (case-insensitively) as an alternative to the entry's number.
    pub key: String,
    pub label: String,
    pub value: V,
}

impl<V> MenuOption<V> {
    pub fn new(key: impl Into<String>, label: impl Into<String>, value: V) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            value,
        }
    }
}

pub trait Console {
    /// Shows `prompt` and blocks for one line of input, without its line
    /// terminator. `None` means input is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, GameError>;

    fn write_line(&mut self, text: &str) -> Result<(), GameError>;

    fn is_cancelled(&self) -> bool {
        false
    }

    /// Reads one line, failing if the game was cancelled or input ran out.
    fn prompt_line(&mut self, prompt: &str) -> Result<String, GameError> {
        if self.is_cancelled() {
            return Err(GameError::Cancelled);
        }
        self.read_line(prompt)?.ok_or(GameError::InputClosed)
    }

    /// Asks until an integer in `min..=max` comes back.
    fn prompt_int(&mut self, prompt: &str, min: u32, max: u32) -> Result<u32, GameError> {
        if min > max {
            return Err(GameError::InvalidRange { min, max });
        }
        let full_prompt = format!("{} ({}-{}): ", prompt, min, max);
        loop {
            let line = self.prompt_line(&full_prompt)?;
            match line.trim().parse::<u32>() {
                Ok(value) if (min..=max).contains(&value) => return Ok(value),
                Ok(_) => self.write_line(&format!(
                    "Please enter a number from {} to {}, inclusive...",
                    min, max
                ))?,
                Err(_) => self.write_line("Bad number")?,
            }
        }
    }

    /// Accepts y, yes, n or no in any case.
    fn prompt_yes_no(&mut self, prompt: &str) -> Result<bool, GameError> {
        let full_prompt = format!("{} (y/n): ", prompt);
        loop {
            let line = self.prompt_line(&full_prompt)?;
            match line.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => self.write_line("Please enter a y or n...")?,
            }
        }
    }

    /// Shows a numbered menu and asks until the player picks an entry, by
    /// number or by key. With `allow_cancel` the player may type `done`
    /// instead, which yields `None`.
    fn prompt_option<'a, V>(
        &mut self,
        prompt: &str,
        fail_message: &str,
        options: &'a [MenuOption<V>],
        allow_cancel: bool,
    ) -> Result<Option<&'a V>, GameError> {
        if options.is_empty() && !allow_cancel {
            return Err(GameError::EmptyMenu);
        }
        self.write_menu(options)?;
        loop {
            let line = self.prompt_line(prompt)?;
            let answer = line.trim();
            if allow_cancel && answer.eq_ignore_ascii_case(DONE) {
                return Ok(None);
            }
            if let Some(option) = find_option(options, answer) {
                return Ok(Some(&option.value));
            }
            self.write_line(fail_message)?;
            self.write_menu(options)?;
        }
    }

    /// [`Console::prompt_option`] without the way out.
    fn prompt_choice<'a, V>(
        &mut self,
        prompt: &str,
        fail_message: &str,
        options: &'a [MenuOption<V>],
    ) -> Result<&'a V, GameError> {
        self.prompt_option(prompt, fail_message, options, false)?
            .ok_or(GameError::EmptyMenu)
    }

    fn write_menu<V>(&mut self, options: &[MenuOption<V>]) -> Result<(), GameError> {
        for (index, option) in options.iter().enumerate() {
            self.write_line(&format!("\t{}) {}", index + 1, option.label))?;
        }
        Ok(())
    }
}

fn find_option<'a, V>(options: &'a [MenuOption<V>], answer: &str) -> Option<&'a MenuOption<V>> {
    if let Ok(number) = answer.parse::<usize>() {
        if number >= 1 && number <= options.len() {
            return Some(&options[number - 1]);
        }
    }
    options
        .iter()
        .find(|option| option.key.eq_ignore_ascii_case(answer))
}

/// Plays over stdin and stdout.
#[derive(Debug, Default)]
pub struct TerminalConsole {
    cancel: CancelToken,
}

impl TerminalConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel_token(cancel: CancelToken) -> Self {
        Self { cancel }
    }
}

impl Console for TerminalConsole {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, GameError> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(prompt.as_bytes())?;
        stdout.flush()?;

        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn write_line(&mut self, text: &str) -> Result<(), GameError> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", text)?;
        Ok(())
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

/// Answers prompts from a fixed queue of lines and keeps a transcript of
/// everything shown and typed. Used for replays and tests.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: VecDeque<String>,
    transcript: Vec<String>,
    cancel: CancelToken,
}

impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
            cancel: CancelToken::new(),
        }
    }

    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn remaining_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Written lines, and each prompt with the answer given to it.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    pub fn transcript_contains(&self, text: &str) -> bool {
        self.transcript.iter().any(|line| line.contains(text))
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, GameError> {
        let answer = self.inputs.pop_front();
        self.transcript
            .push(format!("{}{}", prompt, answer.as_deref().unwrap_or("<eof>")));
        Ok(answer)
    }

    fn write_line(&mut self, text: &str) -> Result<(), GameError> {
        self.transcript.push(text.to_string());
        Ok(())
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
