//! Line-oriented terminal I/O.

use std::io::{BufRead, Write};

use anyhow::Result;

use cyberquiz_core::QuizError;

const RULE: &str = "========================================";

/// Prompt/response console over any reader and writer.
pub struct Console<R, W> {
    input: R,
    output: W,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, clear_screen: bool) -> Self {
        Self {
            input,
            output,
            clear_screen,
        }
    }

    /// Read one line with surrounding whitespace trimmed.
    pub fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(QuizError::InputClosed.into());
        }
        Ok(line.trim().to_string())
    }

    /// Print `text` without a newline and read the reply.
    pub fn prompt(&mut self, text: &str) -> Result<String> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Prompt for a number; `None` if the reply does not parse.
    pub fn prompt_number(&mut self, text: &str) -> Result<Option<usize>> {
        Ok(self.prompt(text)?.parse().ok())
    }

    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    pub fn blank(&mut self) -> Result<()> {
        writeln!(self.output)?;
        Ok(())
    }

    /// Start a new screen with a boxed title.
    pub fn header(&mut self, title: &str) -> Result<()> {
        if self.clear_screen {
            write!(self.output, "\x1b[H\x1b[2J")?;
        }
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output, "  {title}")?;
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output)?;
        Ok(())
    }

    pub fn pause(&mut self) -> Result<()> {
        self.prompt("\nPress Enter to continue...")?;
        Ok(())
    }

    /// Show an error line, then wait for Enter.
    pub fn fail(&mut self, text: &str) -> Result<()> {
        self.say(text)?;
        self.pause()
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
