//! Log of successful bound-rule matches.

use crate::{Rule, Span};

/// A successful match of a bound rule.
///
/// Logged when the match completes, so every entry follows the entries of
/// the matches nested inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    pub rule: Rule,
    pub span: Span,
    /// Number of entries logged while this match was in progress.
    pub descendants: usize,
}

#[derive(Debug, Default)]
pub(crate) struct MatchLog {
    entries: Vec<Match>,
}

impl MatchLog {
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn push(&mut self, entry: Match) {
        self.entries.push(entry);
    }

    pub(crate) fn truncate(&mut self, len: usize) {
        self.entries.truncate(len);
    }

    pub(crate) fn extend_from_slice(&mut self, entries: &[Match]) {
        self.entries.extend_from_slice(entries);
    }

    /// Entries from `watermark` to the end.
    pub(crate) fn since(&self, watermark: usize) -> &[Match] {
        self.entries.get(watermark..).unwrap_or(&[])
    }

    pub(crate) fn as_slice(&self) -> &[Match] {
        &self.entries
    }
}
