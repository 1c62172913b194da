//! Utility functions and errors for parsing input.

use std::iter::{Enumerate, Peekable};
use std::str::{FromStr, Lines};

use thiserror::Error;

use crate::DynamicError;

/// A string parsing error with context of the string that was being parsed.
#[derive(Error, Debug)]
#[error("failed to parse string: {string:?}")]
pub struct ParseContextError<E>
where
    E: std::error::Error,
{
    /// The string that was being parsed.
    string: String,
    source: E,
}

/// Parse a string slice into another type.
///
/// This wraps [`str::parse`] and maps errors to [`ParseContextError`].
///
/// # Errors
///
/// Will return a [`ParseContextError`] with the given string as context and
/// [`F::Err`][FromStr::Err] as the source if it's not possible to parse the string into the desired
/// type.
pub fn parse_with_context<F>(string: &str) -> Result<F, ParseContextError<F::Err>>
where
    F: FromStr,
    F::Err: std::error::Error,
{
    string.parse::<F>().map_err(|source| ParseContextError {
        string: string.to_string(),
        source,
    })
}

/// A line in an input string caused a parsing error.
#[derive(Error, Debug)]
#[error("failure parsing line {}", .line_index.saturating_add(1))]
pub struct InvalidLine {
    /// The line index, zero based.
    /// This will be formatted to a one-based number for display.
    line_index: usize,
    source: DynamicError,
}

impl InvalidLine {
    /// The one-based number of the line that failed to parse.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.line_index.saturating_add(1)
    }
}

/// A cursor over the lines of an input string, for input made of blocks of lines separated by blank
/// lines.
///
/// Parsing closures are passed the zero-based line index and the line, and any error they return is
/// wrapped in an [`InvalidLine`] locating the line.
pub struct InputScanner<'a> {
    lines: Peekable<Enumerate<Lines<'a>>>,
}

impl<'a> InputScanner<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines().enumerate().peekable(),
        }
    }

    /// Consume blank lines up to the next line with content, or the end of input.
    fn skip_blank_lines(&mut self) {
        while self
            .lines
            .next_if(|(_, line)| line.trim().is_empty())
            .is_some()
        {}
    }

    /// Whether the input has no more lines with content.
    pub fn is_exhausted(&mut self) -> bool {
        self.skip_blank_lines();
        self.lines.peek().is_none()
    }

    /// Parse the next line with content, skipping any blank lines before it.
    ///
    /// Use this to start a new block.
    ///
    /// # Errors
    ///
    /// If the parser fails, an [`InvalidLine`] error is returned, sourcing the parser's error.
    ///
    /// # Returns
    ///
    /// The parsed line, or `None` if the input is exhausted.
    pub fn next_item<T, E, F>(&mut self, parser: F) -> Result<Option<T>, InvalidLine>
    where
        F: FnOnce(usize, &str) -> Result<T, E>,
        E: Into<DynamicError>,
    {
        self.skip_blank_lines();
        self.next_in_sequence(parser)
    }

    /// Parse the next line of the current block.
    ///
    /// # Errors
    ///
    /// If the parser fails, an [`InvalidLine`] error is returned, sourcing the parser's error.
    ///
    /// # Returns
    ///
    /// The parsed line, or `None` if the block has ended at a blank line or the end of input. A
    /// blank line ending the block is not consumed.
    pub fn next_in_sequence<T, E, F>(&mut self, parser: F) -> Result<Option<T>, InvalidLine>
    where
        F: FnOnce(usize, &str) -> Result<T, E>,
        E: Into<DynamicError>,
    {
        let Some((line_index, line)) = self.lines.next_if(|(_, line)| !line.trim().is_empty())
        else {
            return Ok(None);
        };

        parser(line_index, line)
            .map(Some)
            .map_err(|source| InvalidLine {
                line_index,
                source: source.into(),
            })
    }

    /// Parse the remaining lines of the current block.
    ///
    /// # Errors
    ///
    /// If parsing a line fails, an [`InvalidLine`] error is returned, sourcing the parser's error.
    pub fn collect_sequence<T, E, F>(&mut self, mut parser: F) -> Result<Vec<T>, InvalidLine>
    where
        F: FnMut(usize, &str) -> Result<T, E>,
        E: Into<DynamicError>,
    {
        let mut items = Vec::new();
        while let Some(item) = self.next_in_sequence(&mut parser)? {
            items.push(item);
        }
        Ok(items)
    }
}
