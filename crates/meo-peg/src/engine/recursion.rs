//! Rule invocation with left recursion by seed growing.
//!
//! State is kept per `(rule, offset)` in the context's seed table:
//!
//! | State      | On reference                                         |
//! |------------|------------------------------------------------------|
//! | (none)     | fresh invocation, key becomes `Parsing`              |
//! | `Involved` | fresh invocation                                     |
//! | `Parsing`  | left recursion: grow a seed for the key              |
//! | `Rejected` | fail                                                 |
//! | `Accepted` | succeed by replaying the previous growth iteration   |
//!
//! Growing re-evaluates the rule body from the offset of its outermost
//! invocation until an iteration stops getting strictly longer, then unwinds
//! to that invocation with the longest match in place.
//!
//! A finished invocation is memoized unless it observed the seed state of an
//! invocation still running outside it: such a result only holds for the
//! current growth iteration.

use std::rc::Rc;

use super::checkpoint::Checkpoint;
use super::context::Frame;
use super::seed::{Memo, Seed, SeedKey, SeedState};
use super::trace::Tracer;
use super::{Context, Eval, Interrupt, Match, RuntimeError};
use crate::{Rule, Span};

impl Context<'_> {
    pub(super) fn eval_rule_ref<T: Tracer>(&mut self, rule: Rule, tracer: &mut T) -> Eval {
        let key = (rule, self.position.offset);
        match self.seeds.get(&key) {
            None => match self.replay_memo(key, tracer) {
                Some(matched) => Ok(matched),
                None => self.invoke(key, tracer),
            },
            Some(SeedState::Involved) => self.invoke(key, tracer),
            Some(SeedState::Parsing) => self.grow_seed(key, tracer),
            Some(SeedState::Rejected) => {
                self.depend_on(key);
                Ok(false)
            }
            Some(SeedState::Accepted(seed)) => {
                let seed = Rc::clone(seed);
                self.depend_on(key);
                self.position = seed.end;
                self.matches.extend_from_slice(&seed.matches);
                Ok(true)
            }
        }
    }

    fn invoke<T: Tracer>(&mut self, key: SeedKey, tracer: &mut T) -> Eval {
        let (rule, _) = key;
        let grammar = self.grammar;
        let name = grammar.name(rule);
        let frame = self.frames.len();
        self.enter_frame(key)?;
        tracer.trace_enter(name, self.position);

        let start = self.checkpoint();
        let outer_dependency = std::mem::replace(&mut self.dependency, usize::MAX);
        let previous = self.seeds.set(key, SeedState::Parsing);
        let result = match self.apply(rule, tracer) {
            Err(Interrupt::Grown(grown)) if grown == key => Ok(true),
            other => other,
        };
        self.seeds.restore(key, previous);
        self.frames.pop();

        let independent = self.dependency >= frame;
        self.dependency = self.dependency.min(outer_dependency);
        if let Ok(matched) = result
            && independent
        {
            self.memoize(key, start, matched);
        }

        match result {
            Ok(true) => tracer.trace_exit(name, Some(Span::new(start.position, self.position))),
            Ok(false) => tracer.trace_exit(name, None),
            Err(_) => tracer.trace_unwind(name),
        }
        result
    }

    fn memoize(&mut self, key: SeedKey, start: Checkpoint, matched: bool) {
        if self.skipping {
            return;
        }
        let result = matched.then(|| {
            Rc::new(Seed {
                end: self.position,
                matches: self.matches.since(start.match_watermark).to_vec(),
            })
        });
        let memo = Memo {
            begin: start.position,
            result,
        };
        self.memo.insert(key, memo);
    }

    /// Replay a memoized invocation of `key`. `None` when there is none.
    fn replay_memo<T: Tracer>(&mut self, key: SeedKey, tracer: &mut T) -> Option<bool> {
        if self.skipping {
            return None;
        }
        let grammar = self.grammar;
        let name = grammar.name(key.0);
        let memo = self.memo.get(&key, self.position)?;
        let Some(seed) = memo.result.clone() else {
            tracer.trace_memo(name, None);
            return Some(false);
        };
        let begin = self.position;
        self.position = seed.end;
        self.matches.extend_from_slice(&seed.matches);
        tracer.trace_memo(name, Some(Span::new(begin, seed.end)));
        Some(true)
    }

    /// Record that the running evaluation read the seed state of `key`.
    fn depend_on(&mut self, key: SeedKey) {
        let (frame, _) = self.ensure_frame(key);
        self.dependency = self.dependency.min(frame);
    }

    fn enter_frame(&mut self, key: SeedKey) -> Result<(), Interrupt> {
        let limit = self.limits.recursion_limit;
        if self.frames.len() >= limit as usize {
            return Err(Interrupt::Fatal(RuntimeError::RecursionLimitExceeded(limit)));
        }
        let start = self.checkpoint();
        self.frames.push(Frame { key, start });
        Ok(())
    }

    /// Evaluate the body of `rule` once and log the match if it is bound.
    fn apply<T: Tracer>(&mut self, rule: Rule, tracer: &mut T) -> Eval {
        let grammar = self.grammar;
        let expr = grammar.ensure_defined(rule);
        let start = self.checkpoint();
        if !self.eval_expr(expr, tracer)? {
            return Ok(false);
        }
        if grammar.is_bound(rule) {
            self.matches.push(Match {
                rule,
                span: Span::new(start.position, self.position),
                descendants: self.matches.len() - start.match_watermark,
            });
        }
        Ok(true)
    }

    /// Handle a re-entry of `key` while its invocation is still running.
    fn grow_seed<T: Tracer>(&mut self, key: SeedKey, tracer: &mut T) -> Eval {
        let here = self.checkpoint();
        let (frame, start) = self.ensure_frame(key);
        self.dependency = self.dependency.min(frame);
        let involved = self.mark_involved(frame);
        tracer.trace_seed(self.grammar.name(key.0), self.position);

        self.restore(start);
        self.seeds.set(key, SeedState::Rejected);
        let outcome = self.grow(key, start, tracer);
        self.seeds.set(key, SeedState::Parsing);
        for other in involved {
            self.seeds.set(other, SeedState::Parsing);
        }

        match outcome {
            Ok(true) => Err(Interrupt::Grown(key)),
            Ok(false) => {
                self.restore(here);
                Ok(false)
            }
            Err(interrupt) => Err(interrupt),
        }
    }

    /// Mark the invocations above `frame` at the same offset as involved.
    fn mark_involved(&mut self, frame: usize) -> Vec<SeedKey> {
        let offset = self.frames[frame].key.1;
        let mut involved = Vec::new();
        for above in &self.frames[frame + 1..] {
            if above.key.1 != offset {
                continue;
            }
            if matches!(self.seeds.get(&above.key), Some(SeedState::Parsing)) {
                involved.push(above.key);
            }
        }
        for &key in &involved {
            self.seeds.set(key, SeedState::Involved);
        }
        involved
    }

    fn grow<T: Tracer>(
        &mut self,
        key: SeedKey,
        start: Checkpoint,
        tracer: &mut T,
    ) -> Eval {
        let (rule, _) = key;
        if !self.apply(rule, tracer)? {
            return Ok(false);
        }

        loop {
            let seed = Rc::new(Seed {
                end: self.position,
                matches: self.matches.since(start.match_watermark).to_vec(),
            });
            self.seeds.set(key, SeedState::Accepted(Rc::clone(&seed)));
            self.restore(start);

            let matched = self.apply(rule, tracer)?;
            if matched && self.position.offset > seed.end.offset {
                tracer.trace_grow(
                    self.grammar.name(rule),
                    Span::new(start.position, self.position),
                );
                continue;
            }

            self.restore(start);
            self.position = seed.end;
            self.matches.extend_from_slice(&seed.matches);
            return Ok(true);
        }
    }
}
