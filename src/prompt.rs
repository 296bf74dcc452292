//! Interactive conflict resolution.
//!
//! [`interpret_response`] is pure; [`ask_decision`] is the blocking loop
//! that drives it over a [`Prompter`], which is the only place terminal I/O
//! happens.
use std::fmt;
use std::io::{self, BufRead as _, Write as _};
use std::path::Path;

use crate::error::{InvalidResponse, PromptError};
use crate::logging::Log;

/// What to do with a destination that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictDecision {
    /// Remove the existing destination and link in its place.
    Overwrite,
    /// Leave the destination untouched.
    Skip,
    /// Rename the destination to `<destination>.bak`, then link.
    Backup,
}

impl fmt::Display for ConflictDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overwrite => write!(f, "overwrite"),
            Self::Skip => write!(f, "skip"),
            Self::Backup => write!(f, "backup"),
        }
    }
}

/// Map one line of operator input to a decision.
///
/// Case is ignored but whitespace is not; anything other than `o`, `s`,
/// or `b` is invalid.
///
/// # Errors
///
/// Returns [`InvalidResponse`] carrying the raw input when it is not one of
/// the three options.
pub fn interpret_response(input: &str) -> Result<ConflictDecision, InvalidResponse> {
    match input.to_lowercase().as_str() {
        "o" => Ok(ConflictDecision::Overwrite),
        "s" => Ok(ConflictDecision::Skip),
        "b" => Ok(ConflictDecision::Backup),
        _ => Err(InvalidResponse {
            input: input.to_string(),
        }),
    }
}

/// Source of operator answers.
pub trait Prompter {
    /// Show `question` and read one line of input.
    ///
    /// Returns `Ok(None)` at end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be written to or read from.
    fn read_line(&self, question: &str) -> io::Result<Option<String>>;
}

/// Production [`Prompter`] on standard output and standard input.
#[derive(Debug, Default)]
pub struct StdinPrompter;

impl Prompter for StdinPrompter {
    fn read_line(&self, question: &str) -> io::Result<Option<String>> {
        {
            let mut out = io::stdout().lock();
            write!(out, "{question}")?;
            out.flush()?;
        }
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Ask the operator what to do with `destination` until a valid answer
/// arrives.
///
/// Invalid answers are reported and the question repeated; there is no
/// retry limit and no default.
///
/// # Errors
///
/// Returns [`PromptError::InputClosed`] if input ends first, or
/// [`PromptError::Io`] if the prompter fails.
pub fn ask_decision(
    prompter: &dyn Prompter,
    log: &dyn Log,
    destination: &Path,
) -> Result<ConflictDecision, PromptError> {
    let question = format!(
        "Do you want to overwrite (o), skip (s), or backup (b) {}? ",
        destination.display()
    );
    loop {
        let Some(answer) = prompter.read_line(&question)? else {
            return Err(PromptError::InputClosed);
        };
        match interpret_response(&answer) {
            Ok(decision) => {
                log.debug(&format!("{}: {decision}", destination.display()));
                return Ok(decision);
            }
            Err(invalid) => {
                log.debug(&format!("rejected answer {:?}", invalid.input));
                log.info(&invalid.to_string());
            }
        }
    }
}


#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::test_helpers::ScriptedPrompter;
    use super::*;
    use crate::logging::test_helpers::CaptureLog;

    #[test]
    fn interpret_accepts_the_three_letters() {
        assert_eq!(interpret_response("o"), Ok(ConflictDecision::Overwrite));
        assert_eq!(interpret_response("s"), Ok(ConflictDecision::Skip));
        assert_eq!(interpret_response("b"), Ok(ConflictDecision::Backup));
    }

    #[test]
    fn interpret_ignores_case() {
        assert_eq!(interpret_response("O"), Ok(ConflictDecision::Overwrite));
        assert_eq!(interpret_response("B"), Ok(ConflictDecision::Backup));
    }

    #[test]
    fn interpret_rejects_padded_input() {
        for input in [" o", "b ", "\ts\t", " O "] {
            assert!(interpret_response(input).is_err(), "{input:?} accepted");
        }
    }

    #[test]
    fn interpret_rejects_everything_else() {
        for input in ["", "x", "overwrite", "yes", "ob", "0"] {
            let err = interpret_response(input).unwrap_err();
            assert_eq!(err.input, input);
        }
    }

    #[test]
    fn ask_reprompts_after_invalid_input() {
        let prompter = ScriptedPrompter::new(&["x", "b"]);
        let log = CaptureLog::default();
        let decision = ask_decision(&prompter, &log, Path::new("/home/u/.bashrc")).unwrap();

        assert_eq!(decision, ConflictDecision::Backup);
        let questions = prompter.questions();
        assert_eq!(questions.len(), 2);
        assert_eq!(
            questions[0],
            "Do you want to overwrite (o), skip (s), or backup (b) /home/u/.bashrc? "
        );
        assert_eq!(questions[0], questions[1]);
        assert!(log.contains("Invalid input. Please enter 'o', 's', or 'b'."));
    }

    #[test]
    fn ask_keeps_asking_through_many_invalid_answers() {
        let prompter = ScriptedPrompter::new(&["", "?", "no", "q", "S"]);
        let log = CaptureLog::default();
        let decision = ask_decision(&prompter, &log, Path::new("dst")).unwrap();
        assert_eq!(decision, ConflictDecision::Skip);
        assert_eq!(prompter.questions().len(), 5);
    }

    #[test]
    fn ask_fails_when_input_ends() {
        let prompter = ScriptedPrompter::new(&["x"]);
        let log = CaptureLog::default();
        let err = ask_decision(&prompter, &log, Path::new("dst")).unwrap_err();
        assert!(matches!(err, PromptError::InputClosed));
    }

    #[test]
    fn decision_display() {
        assert_eq!(ConflictDecision::Overwrite.to_string(), "overwrite");
        assert_eq!(ConflictDecision::Skip.to_string(), "skip");
        assert_eq!(ConflictDecision::Backup.to_string(), "backup");
    }
}
