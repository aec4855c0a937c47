//! Confirmation providers.
//!
//! Deletion only happens after an explicit yes. The decision is made by a
//! [`Confirm`] implementation handed to the pipeline, so the interactive
//! prompt can be swapped for a fixed answer in tests.

use std::io::{self, BufRead, Write};

/// Asks the operator whether to proceed.
pub trait Confirm {
    /// Show `prompt` and return `true` only for an affirmative answer.
    ///
    /// # Errors
    ///
    /// Returns an error if the prompt cannot be written or the answer
    /// cannot be read.
    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;
}

/// `true` iff `answer` is `y`, ignoring case and surrounding whitespace.
#[must_use]
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Line-based prompt: writes the question, reads exactly one line.
///
/// Any answer other than `y`/`Y` (including end of input) means no.
/// There is no retry on unrecognized input.
#[derive(Debug)]
pub struct LineConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConfirm<R, W> {
    /// Prompt on `output`, read the answer from `input`.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LineConfirm<io::StdinLock<'static>, io::Stdout> {
    /// Prompt on stdout, read from stdin.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Confirm for LineConfirm<R, W> {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = Vec::new();
        let read = self.input.read_until(b'\n', &mut line)?;
        if read == 0 {
            log::debug!("No answer (end of input), treating as no");
            return Ok(false);
        }

        // Bytes that are not UTF-8 can never spell "y".
        let answer = String::from_utf8_lossy(&line);
        let yes = is_affirmative(&answer);
        log::debug!("Confirmation answer {:?} -> {}", answer.trim(), yes);
        Ok(yes)
    }
}

/// Fixed answer, for non-interactive use and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoAnswer(pub bool);

impl Confirm for AutoAnswer {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        log::debug!("Auto-answering {:?} with {}", prompt, self.0);
        Ok(self.0)
    }
}
