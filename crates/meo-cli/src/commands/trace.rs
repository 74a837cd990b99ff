//! Trace rule evaluation for debugging.

use std::path::PathBuf;

use meo_core::Colors;
use meo_peg::ast::Printer;
use meo_peg::engine::{PrintTracer, Verbosity};

use super::input::{self, exit_with};

pub struct TraceArgs {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub rule: Option<String>,
    pub verbosity: Verbosity,
    pub no_result: bool,
    pub fuel: u32,
    pub color: bool,
}

pub fn run(args: TraceArgs) {
    let source = input::load_source(args.source_text.as_deref(), args.source_path.as_deref())
        .unwrap_or_else(|e| exit_with(e));
    let lang = meo_expr::language();
    let rule = input::resolve_rule(lang, args.rule.as_deref()).unwrap_or_else(|e| exit_with(e));

    let colors = Colors::new(args.color);
    let mut tracer = PrintTracer::builder(&source.text)
        .verbosity(args.verbosity)
        .colored(args.color)
        .build();

    let result = lang
        .parser()
        .exec_fuel(args.fuel)
        .parse_traced(&source.text, rule, None, &mut tracer);
    tracer.print();

    let tree = match result {
        Ok(tree) => tree,
        Err(e) => std::process::exit(input::report(&e, &source, false, args.color)),
    };

    if args.no_result {
        return;
    }

    println!("{}---{}", colors.meta, colors.reset);
    let output = Printer::new(&*tree, &source.text)
        .colored(args.color)
        .dump();
    println!("{output}");
}
