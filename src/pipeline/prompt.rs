//! Overwrite confirmation.

use std::io::{self, BufRead, Write};

use crate::error::Result;

/// Asks the user a yes/no question.
pub trait Prompt {
    fn confirm(&self, question: &str) -> Result<bool>;
}

/// Reads the answer from stdin, asking on stderr. Anything but `y`/`yes`
/// (including end of input) counts as no.
pub struct TerminalPrompt;

impl Prompt for TerminalPrompt {
    fn confirm(&self, question: &str) -> Result<bool> {
        let mut stderr = io::stderr().lock();
        write!(stderr, "{} [y/N] ", question)?;
        stderr.flush()?;

        let mut answer = String::new();
        io::stdin().lock().read_line(&mut answer)?;
        Ok(is_yes(&answer))
    }
}

/// Fixed answer, for non-interactive runs.
pub struct FixedPrompt(pub bool);

impl Prompt for FixedPrompt {
    fn confirm(&self, _question: &str) -> Result<bool> {
        Ok(self.0)
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
