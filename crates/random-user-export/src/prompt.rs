//! Line-based terminal prompts for the export inputs.
//!
//! The prompter owns a line source and a message sink so the re-prompt loops
//! can be driven from in-memory buffers in tests. Malformed answers are
//! recovered locally by asking again; only a closed or failing terminal
//! surfaces as [`PromptError`].

use std::io::{BufRead, Write};

use crate::error::PromptError;

const COUNT_QUESTION: &str = "How many users would you like to collect?";
const COUNT_INVALID: &str = "Please enter a valid integer number.";
const SEED_QUESTION: &str = "Which seed do you want to use?";
const SEED_INVALID: &str = "Please enter a seed. The seed cannot be empty.";
const PARAMETERS_QUESTION: &str =
    "Would you like to select the parameters that are taken from the API? (yes/no)";
const PARAMETER_QUESTION: &str = "Which parameter would you like to add?";
const PARAMETER_INVALID: &str = "Parameter cannot be empty. Please enter a valid parameter.";
const ANOTHER_PARAMETER_QUESTION: &str = "Would you like to add another parameter? (yes/no)";
const YES_NO_INVALID: &str = "Please provide a yes or no answer.";

/// Asks the export questions over a pair of line streams.
///
/// # Example
///
/// ```
/// use random_user_export::Prompter;
///
/// let input = b"0\nabc\n12\n" as &[u8];
/// let mut output = Vec::new();
/// let mut prompter = Prompter::new(input, &mut output);
///
/// assert_eq!(prompter.collect_count().expect("count"), 12);
/// drop(prompter);
/// let transcript = String::from_utf8(output).expect("utf-8");
/// assert_eq!(transcript.matches("Please enter a valid integer number.").count(), 2);
/// ```
#[derive(Debug)]
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Creates a prompter reading answers from `input` and writing questions
    /// to `output`.
    #[must_use]
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Asks for the number of users until a positive integer is given.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError`] when the input ends or terminal I/O fails.
    pub fn collect_count(&mut self) -> Result<u32, PromptError> {
        self.say(COUNT_QUESTION)?;
        let count = loop {
            let line = self.read_line()?;
            match line.trim().parse::<u32>() {
                Ok(value) if value > 0 => break value,
                _ => self.say(COUNT_INVALID)?,
            }
        };
        self.say(&format!("You have chosen {count} users."))?;
        Ok(count)
    }

    /// Asks for the seed until a non-blank line is given.
    ///
    /// The accepted line is returned as typed; the API decides what it makes
    /// of unusual seeds.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError`] when the input ends or terminal I/O fails.
    pub fn collect_seed(&mut self) -> Result<String, PromptError> {
        self.say(SEED_QUESTION)?;
        let seed = self.read_non_blank(SEED_INVALID)?;
        self.say(&format!("You have chosen the {seed} seed."))?;
        Ok(seed)
    }

    /// Asks whether to restrict the returned fields and collects the field
    /// names in the order given.
    ///
    /// Duplicates and names the API does not know are kept.
    ///
    /// # Errors
    ///
    /// Returns [`PromptError`] when the input ends or terminal I/O fails.
    pub fn collect_parameters(&mut self) -> Result<Vec<String>, PromptError> {
        self.say(PARAMETERS_QUESTION)?;
        if !self.read_yes_no()? {
            self.say("No parameters selected.")?;
            return Ok(Vec::new());
        }

        let mut parameters = Vec::new();
        loop {
            self.say(PARAMETER_QUESTION)?;
            parameters.push(self.read_non_blank(PARAMETER_INVALID)?);
            self.say(ANOTHER_PARAMETER_QUESTION)?;
            if !self.read_yes_no()? {
                break;
            }
        }

        self.say("You have chosen the following parameters:")?;
        for parameter in &parameters {
            self.say(parameter)?;
        }
        Ok(parameters)
    }

    fn read_yes_no(&mut self) -> Result<bool, PromptError> {
        loop {
            let line = self.read_line()?;
            match line.trim().to_lowercase().as_str() {
                "yes" => return Ok(true),
                "no" => return Ok(false),
                _ => self.say(YES_NO_INVALID)?,
            }
        }
    }

    fn read_non_blank(&mut self, complaint: &str) -> Result<String, PromptError> {
        loop {
            let line = self.read_line()?;
            if !line.trim().is_empty() {
                return Ok(line);
            }
            self.say(complaint)?;
        }
    }

    /// Reads one line without its terminator.
    fn read_line(&mut self) -> Result<String, PromptError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::InputClosed);
        }
        let trimmed_len = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed_len);
        Ok(line)
    }

    fn say(&mut self, message: &str) -> Result<(), PromptError> {
        writeln!(self.output, "{message}")?;
        self.output.flush()?;
        Ok(())
    }
}
