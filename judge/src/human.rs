use std::io::{BufRead, Write};

use anyhow::bail;
use shapegrid::{Grid, Mark};

/// The error type for [`parse_move()`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseMoveError {
    WrongNumberOfValues { found: usize },
    NotANumber,
}

impl std::error::Error for ParseMoveError {}

impl std::fmt::Display for ParseMoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseMoveError::WrongNumberOfValues { found } => {
                write!(f, "Expected a row and a column, got {} values", found)
            }
            ParseMoveError::NotANumber => write!(f, "Row and column must be non-negative numbers"),
        }
    }
}

/// Parses a move typed as "row col", e.g. "1 1".
pub fn parse_move(s: &str) -> Result<(usize, usize), ParseMoveError> {
    let values: Vec<&str> = s.split_whitespace().collect();
    let [row, col] = values[..] else {
        return Err(ParseMoveError::WrongNumberOfValues {
            found: values.len(),
        });
    };
    let row = row.parse().map_err(|_| ParseMoveError::NotANumber)?;
    let col = col.parse().map_err(|_| ParseMoveError::NotANumber)?;
    Ok((row, col))
}

/// Asks a person for moves through a line-based text interface.
pub struct HumanInput {
    reader: Box<dyn BufRead>,
    writer: Box<dyn Write>,
    // Re-used for every line that is read
    buf: String,
}

impl HumanInput {
    pub fn new(reader: Box<dyn BufRead>, writer: Box<dyn Write>) -> Self {
        Self {
            reader,
            writer,
            buf: String::new(),
        }
    }

    /// Talks to the terminal.
    pub fn stdio() -> Self {
        Self::new(Box::new(std::io::stdin().lock()), Box::new(std::io::stdout()))
    }

    /// Keeps asking until the person names an empty cell of the grid.
    ///
    /// Fails if the input ends.
    pub fn ask_move(&mut self, grid: &Grid, mark: Mark) -> anyhow::Result<(usize, usize)> {
        writeln!(self.writer, "{}'s turn.", mark)?;
        loop {
            write!(self.writer, "Enter row and column (e.g., 1 1): ")?;
            self.writer.flush()?;

            self.buf.clear(); // because read_line() appends to the buffer
            if self.reader.read_line(&mut self.buf)? == 0 {
                bail!("Input ended while waiting for {}'s move", mark);
            }

            let (row, col) = match parse_move(&self.buf) {
                Ok(mv) => mv,
                Err(_) => {
                    writeln!(
                        self.writer,
                        "Invalid input. Please enter two numbers separated by a space, e.g., '1 1'."
                    )?;
                    continue;
                }
            };
            match grid.is_empty(row, col) {
                Ok(true) => return Ok((row, col)),
                Ok(false) => writeln!(self.writer, "That spot is already taken. Try again.")?,
                Err(err) => writeln!(self.writer, "{}. Try again.", err)?,
            }
        }
    }

    /// Shows a line of text to the person.
    pub fn announce(&mut self, message: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", message)?;
        Ok(())
    }
}
