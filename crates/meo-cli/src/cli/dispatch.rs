//! Dispatch logic: extract params from ArgMatches and convert to command args.
//!
//! `*Params` structs mirror the command `*Args` but are populated from clap,
//! pulling only the fields the command uses (hidden unified flags are parsed
//! and dropped here).

use std::path::PathBuf;

use clap::ArgMatches;
use meo_peg::engine::Verbosity;

use super::ColorChoice;
use crate::commands::ast::AstArgs;
use crate::commands::check::CheckArgs;
use crate::commands::trace::TraceArgs;

pub struct AstParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub rule: Option<String>,
    pub spans: bool,
    pub json: bool,
    pub color: ColorChoice,
}

impl AstParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            rule: m.get_one::<String>("rule").cloned(),
            spans: m.get_flag("spans"),
            json: m.get_flag("json"),
            color: parse_color(m),
        }
    }
}

impl From<AstParams> for AstArgs {
    fn from(p: AstParams) -> Self {
        Self {
            source_path: p.source_path,
            source_text: p.source_text,
            rule: p.rule,
            spans: p.spans,
            json: p.json,
            color: p.color.should_colorize(),
        }
    }
}

pub struct CheckParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub rule: Option<String>,
    pub all: bool,
    pub color: ColorChoice,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            rule: m.get_one::<String>("rule").cloned(),
            all: m.get_flag("all"),
            color: parse_color(m),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            source_path: p.source_path,
            source_text: p.source_text,
            rule: p.rule,
            all: p.all,
            color: p.color.should_colorize(),
        }
    }
}

pub struct TraceParams {
    pub source_path: Option<PathBuf>,
    pub source_text: Option<String>,
    pub rule: Option<String>,
    pub verbose: u8,
    pub no_result: bool,
    pub fuel: u32,
    pub color: ColorChoice,
}

impl TraceParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            source_path: m.get_one::<PathBuf>("source_path").cloned(),
            source_text: m.get_one::<String>("source_text").cloned(),
            rule: m.get_one::<String>("rule").cloned(),
            verbose: m.get_count("verbose"),
            no_result: m.get_flag("no_result"),
            fuel: m.get_one::<u32>("fuel").copied().unwrap_or(1_000_000),
            color: parse_color(m),
        }
    }
}

impl From<TraceParams> for TraceArgs {
    fn from(p: TraceParams) -> Self {
        Self {
            source_path: p.source_path,
            source_text: p.source_text,
            rule: p.rule,
            verbosity: verbosity(p.verbose),
            no_result: p.no_result,
            fuel: p.fuel,
            color: p.color.should_colorize(),
        }
    }
}

fn verbosity(count: u8) -> Verbosity {
    match count {
        0 => Verbosity::Default,
        1 => Verbosity::Verbose,
        _ => Verbosity::VeryVerbose,
    }
}

fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
