//! Validate a source.

use std::path::PathBuf;

use super::input::{self, exit_with};

pub struct CheckArgs {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub rule: Option<String>,
    pub all: bool,
    pub color: bool,
}

pub fn run(args: CheckArgs) {
    let source = input::load_source(args.source_text.as_deref(), args.source_path.as_deref())
        .unwrap_or_else(|e| exit_with(e));
    let lang = meo_expr::language();
    let rule = input::resolve_rule(lang, args.rule.as_deref()).unwrap_or_else(|e| exit_with(e));

    // Full parse, so node construction problems are caught too.
    if let Err(e) = lang.parser().parse(&source.text, rule) {
        std::process::exit(input::report(&e, &source, args.all, args.color));
    }

    // Silent on success (like cargo check)
}
