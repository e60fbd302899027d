//! Interactive answer collection for `tdc classify`.
//!
//! Observations not answered by flags are read line by line from the
//! answer stream (stdin). When the stream is a terminal the question text
//! is printed to stderr first and unrecognized tokens are re-asked; piped
//! input is consumed silently and a bad token is rejected outright, so
//! scripted sessions fail fast instead of hanging.

use std::io::{BufRead, IsTerminal, Write};

use crate::core::errors::{Result, TdcError};
use crate::core::profile::{Observation, ProfileBuilder, UsageProfile, parse_answer};

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Collects the unanswered observations of a profile from an answer
/// stream, one line per answer.
pub struct AnswerSession<R, W> {
    reader: R,
    prompt_sink: W,
    interactive: bool,
}

impl<R: BufRead, W: Write> AnswerSession<R, W> {
    /// Session over an arbitrary stream. `interactive` controls whether
    /// questions are printed and bad tokens re-asked.
    pub const fn new(reader: R, prompt_sink: W, interactive: bool) -> Self {
        Self {
            reader,
            prompt_sink,
            interactive,
        }
    }

    /// Ask every unanswered observation in data-model order, then build
    /// the completed profile.
    pub fn complete(mut self, mut builder: ProfileBuilder) -> Result<UsageProfile> {
        for observation in Observation::ALL {
            if builder.get(*observation).is_some() {
                continue;
            }
            let value = self.ask(*observation, &builder)?;
            builder.answer(*observation, value);
        }
        builder.build()
    }

    fn ask(&mut self, observation: Observation, builder: &ProfileBuilder) -> Result<bool> {
        loop {
            if self.interactive {
                // Prompt failures are not worth aborting the session over.
                let _ = write!(self.prompt_sink, "{} [y/n]: ", observation.question());
                let _ = self.prompt_sink.flush();
            }

            let mut line = String::new();
            let read = self
                .reader
                .read_line(&mut line)
                .map_err(|source| TdcError::io("<stdin>", source))?;
            if read == 0 {
                return Err(TdcError::AnswerStreamClosed {
                    answered: Observation::COUNT - builder.missing().len(),
                });
            }

            match parse_answer(&line) {
                Ok(value) => return Ok(value),
                Err(_) if self.interactive => {
                    let _ = writeln!(
                        self.prompt_sink,
                        "Please answer yes or no (y/n, true/false, 1/0)."
                    );
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Complete a partially answered profile from stdin, prompting only when
/// stdin is a terminal.
pub fn complete_from_stdin(builder: ProfileBuilder) -> Result<UsageProfile> {
    let interactive = std::io::stdin().is_terminal();
    let session = AnswerSession::new(std::io::stdin().lock(), std::io::stderr(), interactive);
    session.complete(builder)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
