//! Terminal simulator. Type the right command for each task.
//!
//! The trimmed input must equal the expected command, ignoring case. A
//! match earns the task's points and moves on; a miss costs 5 points and
//! the task stays. Autocompletion suggests vocabulary entries by prefix and
//! never affects the score.

use crate::catalog::{CommandTask, COMMAND_VOCABULARY};
use crate::engine::{Challenge, Progression, QuizEngine, QuizRules, Score, Verdict};
use crate::error::GameError;

/// Maximum number of autocompletion suggestions.
pub const MAX_SUGGESTIONS: usize = 5;

impl Challenge for CommandTask {
    type Answer = str;

    fn points(&self) -> u32 {
        self.points
    }

    fn hint(&self) -> &str {
        self.hint
    }

    fn check(&self, answer: &str) -> Result<bool, GameError> {
        Ok(answer.trim().to_lowercase() == self.command.to_lowercase())
    }
}

/// Vocabulary entries starting with `input` (case-insensitive), excluding
/// an exact match, capped at [`MAX_SUGGESTIONS`].
pub fn suggestions(input: &str) -> Vec<&'static str> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    COMMAND_VOCABULARY
        .iter()
        .copied()
        .filter(|cmd| {
            let cmd = cmd.to_lowercase();
            cmd.starts_with(&needle) && cmd != needle
        })
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Suggestion list with a wrapping cursor (arrow keys, Tab to accept).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Autocomplete {
    entries: Vec<&'static str>,
    selected: usize,
}

impl Autocomplete {
    /// Recompute for new input; the cursor goes back to the top.
    pub fn update(&mut self, input: &str) {
        self.entries = suggestions(input);
        self.selected = 0;
    }

    pub fn entries(&self) -> &[&'static str] {
        &self.entries
    }

    pub fn selected(&self) -> Option<&'static str> {
        self.entries.get(self.selected).copied()
    }

    pub fn next(&mut self) {
        if !self.entries.is_empty() {
            self.selected = (self.selected + 1) % self.entries.len();
        }
    }

    pub fn previous(&mut self) {
        if !self.entries.is_empty() {
            self.selected = (self.selected + self.entries.len() - 1) % self.entries.len();
        }
    }

    /// Take the highlighted suggestion and close the list.
    pub fn accept(&mut self) -> Option<&'static str> {
        let choice = self.selected();
        self.dismiss();
        choice
    }

    pub fn dismiss(&mut self) {
        self.entries.clear();
        self.selected = 0;
    }
}

#[derive(Debug, Clone)]
pub struct CommandLineGame {
    engine: QuizEngine<CommandTask>,
    history: Vec<String>,
}

impl CommandLineGame {
    pub fn new(tasks: Vec<CommandTask>, rules: QuizRules) -> Self {
        Self {
            engine: QuizEngine::new(tasks, rules),
            history: Vec::new(),
        }
    }

    pub fn current_task(&self) -> Option<&CommandTask> {
        self.engine.current()
    }

    /// `(current, total)`, one-based, for the "Tâche n / m" header.
    pub fn task_counter(&self) -> (usize, usize) {
        let total = self.engine.len();
        ((self.engine.position() + 1).min(total), total)
    }

    pub fn hint(&self) -> &str {
        self.current_task().map(|t| t.hint).unwrap_or_default()
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn score(&self) -> Score {
        self.engine.score()
    }

    pub fn progression(&self) -> Progression {
        self.engine.progression()
    }

    pub fn submit(&mut self, input: &str) -> Result<Verdict, GameError> {
        if input.trim().is_empty() {
            return Err(GameError::EmptyCommand);
        }
        let verdict = self.engine.answer(input)?;
        self.history.push(input.to_string());
        log::debug!("command `{}` (correct={})", input.trim(), verdict.correct);
        Ok(verdict)
    }

    pub fn reset(&mut self) {
        self.engine.reset_to(Score::default());
        self.history.clear();
    }
}
