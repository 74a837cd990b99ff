//! Grammar evaluation.
//!
//! A [`Context`] runs one parse: it walks expressions over the input,
//! resolves left recursion by seed growing, records candidate errors and
//! logs the matches of bound rules for later AST construction.

pub(crate) mod checkpoint;
mod context;
mod error;
mod eval;
mod matches;
mod recursion;
pub(crate) mod seed;
mod trace;
mod user;


pub use context::{Context, ParseLimits};
pub use error::RuntimeError;
pub use matches::Match;
pub use trace::{NoopTracer, PrintTracer, PrintTracerBuilder, Tracer, Verbosity};
pub use user::UserItem;

pub(crate) use eval::{Eval, Interrupt};
