//! Source loading and start rule resolution shared by the commands.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use meo_expr::ExprLanguage;
use meo_peg::{Error, Rule};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("source required: pass a FILE or -s <TEXT>")]
    MissingSource,

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unknown rule `{0}`")]
    UnknownRule(String),
}

/// Source text and a display name for diagnostics.
#[derive(Debug)]
pub struct Source {
    pub text: String,
    pub name: Option<String>,
}

pub fn load_source(text: Option<&str>, path: Option<&Path>) -> Result<Source, InputError> {
    if let Some(text) = text {
        return Ok(Source {
            text: text.to_owned(),
            name: None,
        });
    }
    let Some(path) = path else {
        return Err(InputError::MissingSource);
    };

    let read_error = |source| InputError::Read {
        path: path.to_owned(),
        source,
    };
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin().read_to_string(&mut text).map_err(read_error)?;
        return Ok(Source {
            text,
            name: Some("<stdin>".to_owned()),
        });
    }
    let text = fs::read_to_string(path).map_err(read_error)?;
    Ok(Source {
        text,
        name: Some(path.display().to_string()),
    })
}

pub fn resolve_rule(lang: &ExprLanguage, name: Option<&str>) -> Result<Rule, InputError> {
    match name {
        None => Ok(lang.block_rule()),
        Some(name) => lang
            .rule(name)
            .ok_or_else(|| InputError::UnknownRule(name.to_owned())),
    }
}

/// Print a failed parse to stderr. Returns the process exit code.
pub fn report(error: &Error, source: &Source, all: bool, color: bool) -> i32 {
    match error {
        Error::Syntax(errors) => {
            let mut printer = errors
                .printer()
                .source(&source.text)
                .colored(color)
                .all(all);
            if let Some(name) = &source.name {
                printer = printer.path(name);
            }
            eprintln!("{}", printer.render());
            1
        }
        Error::Construct(err) => {
            eprintln!("error: {err}");
            2
        }
        Error::Runtime(err) => {
            eprintln!("runtime error: {err}");
            2
        }
    }
}

/// Print an input error and exit.
pub fn exit_with(error: InputError) -> ! {
    eprintln!("error: {error}");
    std::process::exit(1);
}
