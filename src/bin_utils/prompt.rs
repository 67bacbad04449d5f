use std::{
    fmt::Display,
    io::{self, BufRead, Write},
    str::FromStr,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input closed")]
    Closed,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Line oriented question/answer over a pair of streams.
pub struct Prompt<'w, R, W: 'w> {
    input: R,
    output: &'w mut W,
}

impl<'w, R, W> Prompt<'w, R, W>
where
    R: BufRead,
    W: Write + 'w,
{
    pub fn new(input: R, output: &'w mut W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: impl Display) -> Result<(), PromptError> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    /// Prints `label` and returns the next line with surrounding whitespace
    /// removed.
    pub fn ask_line(&mut self, label: &str) -> Result<String, PromptError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(PromptError::Closed);
        }
        Ok(line.trim().to_owned())
    }

    /// Asks until the answer parses as `T`.
    pub fn ask<T: FromStr>(&mut self, label: &str) -> Result<T, PromptError> {
        loop {
            let line = self.ask_line(label)?;
            match line.parse() {
                Ok(value) => return Ok(value),
                Err(_) => self.say("Invalid input, please try again.")?,
            }
        }
    }
}
