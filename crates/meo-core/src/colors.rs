//! Terminal palette shared by tree dumps, traces and the CLI.

/// ANSI escapes keyed by what they highlight. Every field is empty when
/// colors are off, so callers can interpolate unconditionally.
#[derive(Clone, Copy, Debug)]
pub struct Colors {
    /// Rule and node names.
    pub name: &'static str,
    /// Quoted source text.
    pub text: &'static str,
    pub failure: &'static str,
    /// Spans, positions and separators.
    pub meta: &'static str,
    pub reset: &'static str,
}

impl Colors {
    pub const ON: Self = Self {
        name: "\x1b[34m",
        text: "\x1b[32m",
        failure: "\x1b[31m",
        meta: "\x1b[2m",
        reset: "\x1b[0m",
    };

    pub const OFF: Self = Self {
        name: "",
        text: "",
        failure: "",
        meta: "",
        reset: "",
    };

    pub fn new(enabled: bool) -> Self {
        if enabled { Self::ON } else { Self::OFF }
    }
}
