//! Ordered output lines produced by a demo.
//!
//! Pattern code returns values; demos collect what they want to show into a
//! `Transcript` and only the binary decides where it gets printed.

use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    lines: Vec<String>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&mut self, line: impl Into<String>) -> &mut Self {
        self.lines.push(line.into());
        self
    }

    pub fn lines<I, S>(&mut self, lines: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lines.extend(lines.into_iter().map(Into::into));
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    /// Starts a titled block, separated from whatever came before it.
    pub fn section(&mut self, title: impl Into<String>) -> &mut Self {
        if !self.lines.is_empty() {
            self.blank();
        }
        self.lines.push(title.into());
        self
    }

    pub fn append(&mut self, other: Transcript) -> &mut Self {
        self.lines.extend(other.lines);
        self
    }

    pub fn as_slice(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|line| line.contains(needle))
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", line)?;
        }
        Ok(())
    }
}

impl From<Vec<String>> for Transcript {
    fn from(lines: Vec<String>) -> Self {
        Self { lines }
    }
}
