#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core data structures shared by the Meo parser crates.
//!
//! - [`Position`]: a point in the input (byte offset plus 1-based line/column)
//! - [`Span`]: a half-open range between two positions
//! - [`Colors`]: ANSI palette for CLI and trace output

use std::fmt;
use std::ops::Range;

use serde::Serialize;

mod colors;
pub mod utils;

pub use colors::Colors;

#[cfg(test)]
mod lib_tests;
#[cfg(test)]
mod utils_tests;

/// A point in the input.
///
/// `offset` is a byte offset into the source string. `line` and `column` are
/// 1-based; the column counts characters, not bytes. Lines only advance when
/// the grammar says so (see the `nl` combinator), so a grammar that never
/// marks newlines reports every position on line 1.
///
/// Ordering and equality are driven by `offset` first, which is what error
/// reporting uses to pick the furthest failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Position {
    pub offset: usize,
    pub line: u32,
    pub column: u32,
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl Position {
    /// Beginning of the input.
    pub const START: Self = Self {
        offset: 0,
        line: 1,
        column: 1,
    };

    pub fn new(offset: usize, line: u32, column: u32) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }

    /// Step over one character on the current line.
    pub fn advance(&mut self, ch: char) {
        self.offset += ch.len_utf8();
        self.column += 1;
    }

    /// Step over every character of `text` on the current line.
    pub fn advance_str(&mut self, text: &str) {
        for ch in text.chars() {
            self.advance(ch);
        }
    }

    /// Move to the first column of the next line without consuming input.
    pub fn newline(&mut self) {
        self.line += 1;
        self.column = 1;
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source range `[begin, end)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Span {
    pub begin: Position,
    pub end: Position,
}

impl Span {
    pub fn new(begin: Position, end: Position) -> Self {
        Self { begin, end }
    }

    /// Zero-width span at `at`.
    pub fn empty(at: Position) -> Self {
        Self { begin: at, end: at }
    }

    /// Byte range into the source.
    pub fn range(&self) -> Range<usize> {
        self.begin.offset..self.end.offset
    }

    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.begin.offset)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Slice of `source` covered by this span, or `""` if it does not fit.
    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.range()).unwrap_or("")
    }

    /// Whether `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Span) -> bool {
        self.begin.offset <= other.begin.offset && other.end.offset <= self.end.offset
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.begin, self.end)
    }
}
