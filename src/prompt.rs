use std::io::{self, BufRead, Write};

/// Asks the user whether to go ahead with a run that modifies files.
///
/// Any `FnMut(&str) -> bool` is a `Confirm`, which keeps tests free of stdin.
pub trait Confirm {
    /// Returns `true` only for an explicit yes.
    fn confirm(&mut self, question: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, question: &str) -> bool {
        self(question)
    }
}

/// Prompts on a writer and reads one line of answer from a reader.
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl PromptConfirm<io::StdinLock<'static>, io::Stderr> {
    /// Prompts on stderr so stdout stays clean for the report.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, question: &str) -> bool {
        if write!(self.output, "{question} [y/N]: ")
            .and_then(|_| self.output.flush())
            .is_err()
        {
            return false;
        }

        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(_) => is_affirmative(&answer),
            Err(_) => false,
        }
    }
}

/// `y` or `yes` in any case, surrounding whitespace ignored.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(answer: &str) -> (bool, String) {
        let mut output = Vec::new();
        let confirmed =
            PromptConfirm::new(Cursor::new(answer.as_bytes()), &mut output).confirm("Proceed?");
        (confirmed, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_only_yes_confirms() {
        assert!(ask("y\n").0);
        assert!(ask("  YES \n").0);
        assert!(!ask("n\n").0);
        assert!(!ask("\n").0);
        assert!(!ask("yep\n").0);
    }

    #[test]
    fn test_end_of_input_declines() {
        assert!(!ask("").0);
    }

    #[test]
    fn test_question_is_shown() {
        let (_, shown) = ask("n\n");
        assert_eq!(shown, "Proceed? [y/N]: ");
    }

    #[test]
    fn test_closures_are_confirmers() {
        let mut asked = Vec::new();
        let mut stub = |q: &str| {
            asked.push(q.to_string());
            true
        };
        assert!(stub.confirm("go?"));
        assert_eq!(asked, vec!["go?"]);
    }
}
