use std::borrow::Cow;
use std::io::{self, Write};

use super::command::Command;
use super::Token;

/// Write g-code tokens to an [std::io::Write] one line at a time.
///
/// Tokens passed to a single [LineSink::line] call become one
/// space-separated, newline-terminated line. The sink counts every line it
/// writes, including comments and blank separators.
#[derive(Debug)]
pub struct LineSink<W> {
    writer: W,
    lines: usize,
}

impl<W> LineSink<W>
where
    W: Write,
{
    pub fn new(writer: W) -> Self {
        Self { writer, lines: 0 }
    }

    /// Write one space-separated line of tokens.
    pub fn line<'a: 'b, 'b>(
        &mut self,
        tokens: impl IntoIterator<Item = &'b Token<'a>>,
    ) -> io::Result<()> {
        for (position, token) in tokens.into_iter().enumerate() {
            if position > 0 {
                write!(self.writer, " ")?;
            }
            write!(self.writer, "{token}")?;
        }
        writeln!(self.writer)?;
        self.lines += 1;
        Ok(())
    }

    /// Write a command as one line.
    pub fn command(&mut self, command: Command<'_>) -> io::Result<()> {
        self.line(&command.into_token_vec())
    }

    /// Write a command followed by a trailing `; comment`.
    pub fn commented<'a>(&mut self, command: Command<'a>, comment: &'a str) -> io::Result<()> {
        let mut tokens = command.into_token_vec();
        tokens.push(Token::Comment(Cow::Borrowed(comment)));
        self.line(&tokens)
    }

    /// Write a standalone comment line, or a bare `;` when `text` is empty.
    pub fn comment(&mut self, text: &str) -> io::Result<()> {
        if text.is_empty() {
            writeln!(self.writer, ";")?;
        } else {
            writeln!(self.writer, "; {text}")?;
        }
        self.lines += 1;
        Ok(())
    }

    /// Write an empty separator line.
    pub fn blank(&mut self) -> io::Result<()> {
        writeln!(self.writer)?;
        self.lines += 1;
        Ok(())
    }

    /// Number of lines written so far.
    pub fn lines_written(&self) -> usize {
        self.lines
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
