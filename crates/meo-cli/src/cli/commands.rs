//! Command builders for the CLI.
//!
//! ast/check/trace share their inputs and accept each other's flags; flags a
//! command does not use are hidden from its `--help`.

use clap::Command;

use super::args::*;

/// Source, rule and color args every parsing command takes.
fn with_input_args(cmd: Command) -> Command {
    cmd.arg(source_path_arg())
        .arg(source_text_arg())
        .arg(rule_arg())
        .arg(color_arg())
}

/// Add hidden tree output args (for commands that don't print a tree).
fn with_hidden_ast_args(cmd: Command) -> Command {
    cmd.arg(spans_arg().hide(true)).arg(json_arg().hide(true))
}

/// Add hidden trace args (for commands that don't trace).
fn with_hidden_trace_args(cmd: Command) -> Command {
    cmd.arg(verbose_arg().hide(true))
        .arg(no_result_arg().hide(true))
        .arg(fuel_arg().hide(true))
}

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("meo")
        .about("Parse, check and trace Meo sources")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(ast_command())
        .subcommand(check_command())
        .subcommand(trace_command())
        .subcommand(grammar_command())
}

/// Show the typed AST of a source.
pub fn ast_command() -> Command {
    let cmd = Command::new("ast")
        .about("Show the AST of a source")
        .override_usage(
            "\
  meo ast <FILE>
  meo ast -s <TEXT> [--rule <NAME>]",
        )
        .after_help(
            r#"EXAMPLES:
  meo ast main.meo                    # whole file
  meo ast -s 'x = 1 + 2' --spans      # inline source with positions
  meo ast -s 'f(x)' --rule expression # single expression
  meo ast main.meo --json             # JSON tree"#,
        )
        .arg(spans_arg())
        .arg(json_arg());

    with_hidden_trace_args(with_input_args(cmd).arg(all_errors_arg().hide(true)))
}

/// Validate a source.
pub fn check_command() -> Command {
    let cmd = Command::new("check")
        .about("Validate a source")
        .override_usage(
            "\
  meo check <FILE>
  meo check -s <TEXT> [--rule <NAME>]",
        )
        .after_help(
            r#"EXAMPLES:
  meo check main.meo                  # silent when valid
  meo check -s 'x = (1' --all         # every candidate error"#,
        )
        .arg(all_errors_arg());

    with_hidden_ast_args(with_hidden_trace_args(with_input_args(cmd)))
}

/// Trace rule evaluation.
pub fn trace_command() -> Command {
    let cmd = Command::new("trace")
        .about("Trace rule evaluation for debugging")
        .override_usage(
            "\
  meo trace <FILE>
  meo trace -s <TEXT> [--rule <NAME>] [-v|-vv]",
        )
        .after_help(
            r#"EXAMPLES:
  meo trace -s 'a - b - c'            # rule entry/exit and seed growing
  meo trace -s 'x = 1' -vv            # plus backtracking and failures
  meo trace main.meo --no-result      # trace only"#,
        )
        .arg(verbose_arg())
        .arg(no_result_arg())
        .arg(fuel_arg());

    with_hidden_ast_args(with_input_args(cmd).arg(all_errors_arg().hide(true)))
}

/// Print the grammar rules.
pub fn grammar_command() -> Command {
    Command::new("grammar").about("Print the grammar rules")
}
