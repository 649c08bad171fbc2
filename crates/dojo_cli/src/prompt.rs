//! Terminal presentation of notices and confirmations.

use dojo_admin::{Confirmation, Notice, Notifier};
use std::io::{self, BufRead, Write};
use tracing::warn;

/// Answers accepted as "yes" at a confirmation prompt.
const AFFIRMATIVE: &[&str] = &["s", "si", "sí", "y", "yes"];

pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    AFFIRMATIVE.iter().any(|candidate| *candidate == answer)
}

/// Writes notices to the terminal and asks confirmations on it.
pub struct TerminalNotifier {
    assume_yes: bool,
    input: Box<dyn BufRead>,
    output: Box<dyn Write>,
}

impl TerminalNotifier {
    /// Notifier over stdin/stderr. With `assume_yes` every confirmation is
    /// accepted without prompting.
    pub fn stdio(assume_yes: bool) -> Self {
        Self::new(
            assume_yes,
            Box::new(io::BufReader::new(io::stdin())),
            Box::new(io::stderr()),
        )
    }

    pub fn new(assume_yes: bool, input: Box<dyn BufRead>, output: Box<dyn Write>) -> Self {
        Self {
            assume_yes,
            input,
            output,
        }
    }

    fn ask(&mut self, request: &Confirmation) -> io::Result<bool> {
        writeln!(self.output, "{}", request.title)?;
        write!(
            self.output,
            "{} [{} = s / {} = N] ",
            request.text, request.confirm_label, request.cancel_label
        )?;
        self.output.flush()?;
        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(is_affirmative(&answer))
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&mut self, notice: Notice) {
        if let Err(err) = writeln!(
            self.output,
            "[{}] {}: {}",
            notice.level, notice.title, notice.text
        ) {
            warn!(error = %err, "failed to write notice");
        }
    }

    fn confirm(&mut self, request: &Confirmation) -> bool {
        if self.assume_yes {
            return true;
        }
        match self.ask(request) {
            Ok(accepted) => accepted,
            Err(err) => {
                warn!(error = %err, "confirmation prompt failed; declining");
                false
            }
        }
    }
}
