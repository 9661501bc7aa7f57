//! Rendering parse errors against the source text.
//!
//! Engine positions are token indices. The demo grammars run over `char`
//! tokens, so a position is a character offset and maps to a 1-based line
//! and column by counting characters.
//!
//! ```text
//! error: expected number
//!   --> 1:5
//!   |
//! 1 | 1 + * 2
//!   |     ^
//! ```

use std::fmt;

use knot_parse::{EngineError, FailureKind, GrammarError, ParseError};

use crate::config::{MAX_DEPTH_VAR, MAX_REPETITIONS_VAR};

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A location in the source text, 1-based.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct LineCol {
    pub line: usize,
    pub column: usize,
}

/// Map a character offset to its line and column.
///
/// An offset past the end points just after the last character.
pub fn line_col(source: &str, offset: usize) -> LineCol {
    let mut line = 1;
    let mut column = 1;
    for c in source.chars().take(offset) {
        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    LineCol { line, column }
}

/// A source snippet with a caret under one column.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Snippet {
    location: LineCol,
    text: String,
}

impl Snippet {
    fn at(source: &str, offset: usize) -> Self {
        let location = line_col(source, offset);
        let text = source
            .lines()
            .nth(location.line - 1)
            .unwrap_or_default()
            .to_string();
        Snippet { location, text }
    }
}

/// A message about the input, optionally pointing into it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    snippet: Option<Snippet>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Diagnostic {
            severity,
            message: message.into(),
            snippet: None,
            notes: Vec::new(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Point the diagnostic at a character offset of `source`.
    #[must_use]
    pub fn at(mut self, source: &str, offset: usize) -> Self {
        self.snippet = Some(Snippet::at(source, offset));
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Where the diagnostic points, if anywhere.
    pub fn location(&self) -> Option<LineCol> {
        self.snippet.as_ref().map(|s| s.location)
    }

    /// Describe a rejected parse of `source`.
    pub fn from_parse_error(source: &str, err: &ParseError) -> Self {
        let len = source.chars().count();
        match err {
            ParseError::NoMatch { position, failure } => {
                let message = match failure {
                    Some(failure) => failure.kind.to_string(),
                    None if *position >= len => FailureKind::Exhausted.to_string(),
                    None => "input does not match".to_string(),
                };
                Diagnostic::error(message).at(source, *position)
            }
            ParseError::TrailingInput {
                position, failure, ..
            } => {
                let diagnostic =
                    Diagnostic::error("unexpected trailing input").at(source, *position);
                match failure {
                    Some(failure) => diagnostic.with_note(failure.kind.to_string()),
                    None => diagnostic,
                }
            }
            ParseError::Engine(engine) => Self::from_engine_error(source, engine),
        }
    }

    fn from_engine_error(source: &str, err: &EngineError) -> Self {
        let diagnostic = Diagnostic::error(format!("parse stopped: {err}"));
        match err {
            EngineError::RepetitionLimit { position, .. } => diagnostic
                .at(source, *position)
                .with_note(format!(
                    "raise the limit with --max-repetitions or {MAX_REPETITIONS_VAR}"
                )),
            EngineError::RecursionLimit { position, .. } => diagnostic
                .at(source, *position)
                .with_note(format!("raise the limit with --max-depth or {MAX_DEPTH_VAR}")),
            EngineError::UndefinedRule { .. } => diagnostic,
        }
    }

    /// A built-in grammar failed to construct.
    pub fn from_grammar_error(err: &GrammarError) -> Self {
        Diagnostic::error(format!("invalid grammar: {err}"))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)?;

        if let Some(snippet) = &self.snippet {
            let LineCol { line, column } = snippet.location;
            let gutter = line.to_string().len();
            write!(f, "\n{:gutter$} --> {line}:{column}", "")?;
            write!(f, "\n{:gutter$} |", "")?;
            write!(f, "\n{line} | {}", snippet.text)?;
            write!(f, "\n{:gutter$} | {:>column$}", "", "^")?;
        }

        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }

        Ok(())
    }
}
