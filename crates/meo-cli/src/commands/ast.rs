//! Show the typed AST of a source.

use std::path::PathBuf;

use meo_peg::ast::{NodeView, Printer};

use super::input::{self, exit_with};

pub struct AstArgs {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub rule: Option<String>,
    pub spans: bool,
    pub json: bool,
    pub color: bool,
}

pub fn run(args: AstArgs) {
    let source = input::load_source(args.source_text.as_deref(), args.source_path.as_deref())
        .unwrap_or_else(|e| exit_with(e));
    let lang = meo_expr::language();
    let rule = input::resolve_rule(lang, args.rule.as_deref()).unwrap_or_else(|e| exit_with(e));

    let tree = match lang.parser().parse(&source.text, rule) {
        Ok(tree) => tree,
        Err(e) => std::process::exit(input::report(&e, &source, false, args.color)),
    };

    if args.json {
        let view = NodeView::new(&*tree, &source.text);
        match serde_json::to_string_pretty(&view) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("error: {e}");
                std::process::exit(2);
            }
        }
        return;
    }

    let output = Printer::new(&*tree, &source.text)
        .spans(args.spans)
        .colored(args.color)
        .dump();
    println!("{output}");
}
