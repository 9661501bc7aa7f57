//! Driver commands.
//!
//! Each command takes the raw source text and returns either the text to
//! print or the diagnostic to report. Warnings ride along with a
//! successful result.

use tracing::debug;

use crate::calc::{self, CalcError};
use crate::config::CliConfig;
use crate::diagnostic::Diagnostic;
use crate::list::{self, ListError};

/// Output of a successful command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Output {
    pub text: String,
    pub warnings: Vec<Diagnostic>,
}

impl Output {
    fn new(text: impl Into<String>) -> Self {
        Output {
            text: text.into(),
            warnings: Vec::new(),
        }
    }
}

/// The built-in grammars `check` can run.
pub const GRAMMARS: &[&str] = &["calc", "list"];

fn calc_diagnostic(source: &str, err: &CalcError) -> Diagnostic {
    match err {
        CalcError::Grammar(err) => Diagnostic::from_grammar_error(err),
        CalcError::Parse(err) => Diagnostic::from_parse_error(source, err),
        CalcError::Eval(err) => Diagnostic::error(err.to_string()),
        CalcError::NoValue => Diagnostic::error(err.to_string()),
    }
}

fn list_diagnostic(source: &str, err: &ListError) -> Diagnostic {
    match err {
        ListError::Grammar(err) => Diagnostic::from_grammar_error(err),
        ListError::Parse(err) => Diagnostic::from_parse_error(source, err),
        ListError::InvalidNumber(_) => Diagnostic::error(err.to_string()),
    }
}

/// `knot calc <expr>`: evaluate an arithmetic expression.
pub fn calc(source: &str, config: &CliConfig) -> Result<Output, Diagnostic> {
    debug!(len = source.len(), "calc");
    let value = calc::evaluate(source, config.parse_config())
        .map_err(|err| calc_diagnostic(source, &err))?;

    let mut output = Output::new(value.to_string());
    if !value.is_finite() {
        output
            .warnings
            .push(Diagnostic::warning("result is not a finite number"));
    }
    Ok(output)
}

/// `knot list <text>`: read a comma-separated number list, one number per
/// output line.
pub fn list(source: &str, config: &CliConfig) -> Result<Output, Diagnostic> {
    debug!(len = source.len(), "list");
    let numbers =
        list::parse(source, config.parse_config()).map_err(|err| list_diagnostic(source, &err))?;

    let text = numbers
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n");
    let mut output = Output::new(text);
    if numbers.is_empty() {
        output.warnings.push(Diagnostic::warning("the list is empty"));
    }
    Ok(output)
}

/// `knot check <grammar> <text>`: report whether `source` matches a
/// built-in grammar.
pub fn check(grammar: &str, source: &str, config: &CliConfig) -> Result<Output, Diagnostic> {
    debug!(grammar, len = source.len(), "check");
    let parse_config = config.parse_config();
    let matched = match grammar {
        "calc" => calc::parse(source, parse_config)
            .map(|_| ())
            .map_err(|err| calc_diagnostic(source, &err)),
        "list" => list::parse(source, parse_config)
            .map(|_| ())
            .map_err(|err| list_diagnostic(source, &err)),
        other => {
            return Err(Diagnostic::error(format!("unknown grammar `{other}`"))
                .with_note(format!("available grammars: {}", GRAMMARS.join(", "))));
        }
    };
    matched.map(|()| Output::new(format!("ok: input matches `{grammar}`")))
}
