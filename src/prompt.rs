//! Interactive questions asked while processing a repository
use std::{
    collections::VecDeque,
    io::{stdin, stdout, BufRead, StdinLock, Stdout, Write},
};

use crate::errors::{ToghError, ToghErrorKind};

/// Source of the answers needed to process a repository
pub trait UserPrompt {
    /// Ask a yes/no question
    /// # Errors
    /// Error if the answer can't be read
    fn confirm(&mut self, question: &str) -> Result<bool, ToghError>;

    /// Ask for a free-form answer, `default` being used for an empty answer
    /// # Errors
    /// Error if the answer can't be read
    fn ask(&mut self, question: &str, default: &str) -> Result<String, ToghError>;
}

/// Prompt reading answers line by line from a terminal
#[derive(Debug)]
pub struct TerminalPrompt<R, W> {
    /// Where answers are read from
    reader: R,

    /// Where questions are written to
    writer: W,
}

impl TerminalPrompt<StdinLock<'static>, Stdout> {
    /// Prompt on stdin/stdout
    pub fn stdio() -> Self {
        Self::new(stdin().lock(), stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    /// Create a prompt over any reader/writer pair
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    /// Print `text` and read one line, without its line ending
    fn input(&mut self, text: &str) -> Result<String, ToghError> {
        let prompt_error = |e: std::io::Error| ToghError::wrap(ToghErrorKind::Prompt, e);
        write!(self.writer, "{text}").map_err(prompt_error)?;
        self.writer.flush().map_err(prompt_error)?;
        let mut s = String::new();
        let read = self.reader.read_line(&mut s).map_err(prompt_error)?;
        if read == 0 {
            return Err(ToghError::new(ToghErrorKind::Prompt).with_text("end of input"));
        }
        if let Some('\n') = s.chars().next_back() {
            s.pop();
        }
        if let Some('\r') = s.chars().next_back() {
            s.pop();
        }
        Ok(s)
    }
}

impl<R: BufRead, W: Write> UserPrompt for TerminalPrompt<R, W> {
    fn confirm(&mut self, question: &str) -> Result<bool, ToghError> {
        loop {
            let answer = self.input(&format!("{question} (y/n) "))?;
            match answer.trim().to_lowercase().as_str() {
                "yes" | "y" => return Ok(true),
                "no" | "n" => return Ok(false),
                _ => writeln!(self.writer, "Invalid input")
                    .map_err(|e| ToghError::wrap(ToghErrorKind::Prompt, e))?,
            }
        }
    }

    fn ask(&mut self, question: &str, default: &str) -> Result<String, ToghError> {
        let answer = self.input(&format!("{question} [{default}]: "))?;
        let answer = answer.trim();
        if answer.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(answer.to_string())
        }
    }
}

/// One scripted answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// Answer to [`UserPrompt::confirm`]
    Confirm(bool),

    /// Answer to [`UserPrompt::ask`]; `None` accepts the default
    Text(Option<String>),
}

/// Prompt replaying a fixed list of answers, for non-interactive runs
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    /// Answers left to give
    answers: VecDeque<Answer>,

    /// Every question asked so far
    pub questions: Vec<String>,
}

impl ScriptedPrompt {
    /// Create a prompt giving `answers` in order
    pub fn new(answers: impl IntoIterator<Item = Answer>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            questions: vec![],
        }
    }

    /// Next answer, failing when the script is exhausted or out of order
    fn next_answer(&mut self, question: &str) -> Result<Answer, ToghError> {
        self.questions.push(question.to_string());
        self.answers.pop_front().ok_or_else(|| {
            ToghError::new(ToghErrorKind::Prompt)
                .with_text(&format!("no scripted answer for '{question}'"))
        })
    }
}

impl UserPrompt for ScriptedPrompt {
    fn confirm(&mut self, question: &str) -> Result<bool, ToghError> {
        match self.next_answer(question)? {
            Answer::Confirm(answer) => Ok(answer),
            Answer::Text(_) => Err(ToghError::new(ToghErrorKind::Prompt)
                .with_text(&format!("expected a yes/no answer for '{question}'"))),
        }
    }

    fn ask(&mut self, question: &str, default: &str) -> Result<String, ToghError> {
        match self.next_answer(question)? {
            Answer::Text(answer) => Ok(answer.unwrap_or_else(|| default.to_string())),
            Answer::Confirm(_) => Err(ToghError::new(ToghErrorKind::Prompt)
                .with_text(&format!("expected a text answer for '{question}'"))),
        }
    }
}
