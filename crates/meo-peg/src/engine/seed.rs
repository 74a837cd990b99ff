//! Parse-scoped left-recursion and memo state.

use std::collections::HashMap;
use std::rc::Rc;

use super::Match;
use crate::{Position, Rule};

/// A rule invoked at a byte offset.
pub(crate) type SeedKey = (Rule, usize);

#[derive(Clone, Debug)]
pub(crate) enum SeedState {
    /// Invocation in progress; re-entry means left recursion.
    Parsing,
    /// Invoked between a left-recursive rule and its re-entry. Re-evaluated
    /// freshly while that rule grows.
    Involved,
    /// Growing, no seed yet: the recursive reference fails.
    Rejected,
    /// Growing: the recursive reference replays the previous iteration.
    Accepted(Rc<Seed>),
}

/// Result of one growth iteration.
#[derive(Debug)]
pub(crate) struct Seed {
    pub(crate) end: Position,
    pub(crate) matches: Vec<Match>,
}

#[derive(Debug, Default)]
pub(crate) struct SeedTable {
    states: HashMap<SeedKey, SeedState>,
}

impl SeedTable {
    pub(crate) fn get(&self, key: &SeedKey) -> Option<&SeedState> {
        self.states.get(key)
    }

    /// Returns the replaced state.
    pub(crate) fn set(&mut self, key: SeedKey, state: SeedState) -> Option<SeedState> {
        self.states.insert(key, state)
    }

    /// Put back a state returned by [`set`](Self::set).
    pub(crate) fn restore(&mut self, key: SeedKey, previous: Option<SeedState>) {
        match previous {
            Some(state) => {
                self.states.insert(key, state);
            }
            None => {
                self.states.remove(&key);
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

/// Finished invocation whose outcome did not depend on any seed outside it.
#[derive(Debug)]
pub(crate) struct Memo {
    /// Position the invocation started at. A hit requires the same line and
    /// column, not only the same offset.
    pub(crate) begin: Position,
    /// `None` when the rule failed.
    pub(crate) result: Option<Rc<Seed>>,
}

/// Results of finished rule invocations, keyed like the seed table.
#[derive(Debug, Default)]
pub(crate) struct MemoTable {
    entries: HashMap<SeedKey, Memo>,
}

impl MemoTable {
    pub(crate) fn get(&self, key: &SeedKey, begin: Position) -> Option<&Memo> {
        self.entries.get(key).filter(|memo| memo.begin == begin)
    }

    pub(crate) fn insert(&mut self, key: SeedKey, memo: Memo) {
        self.entries.insert(key, memo);
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}
