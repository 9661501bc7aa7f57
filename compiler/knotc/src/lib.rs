//! Command-line driver for the knot parser-combinator engine.
//!
//! Hosts two demo grammars built on `knot_parse` and renders parse errors
//! as located diagnostics.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`calc`] | arithmetic expressions, parsed to a tree and evaluated |
//! | [`list`] | comma-separated number lists |
//! | [`commands`] | `calc`, `list` and `check` as run by the `knot` binary |
//! | [`config`] | engine limits from the environment and arguments |
//! | [`diagnostic`] | line/column mapping and caret rendering |

use std::sync::Once;

pub mod calc;
pub mod commands;
pub mod config;
pub mod diagnostic;
pub mod list;

pub use config::{CliConfig, ConfigError};
pub use diagnostic::{Diagnostic, Severity};

static TRACING_INIT: Once = Once::new();

/// Install a `fmt` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset or unparsable. Events go to stderr
/// because stdout carries command results (`knot calc` prints only the
/// value), so tracing a run never changes what a script reads from it.
/// Safe to call more than once.
///
/// Enable with `RUST_LOG=knot_parse=trace` or `RUST_LOG=knotc=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Ok(filter) = EnvFilter::try_from_default_env() else {
            return;
        };
        let events = fmt::layer().with_target(true).with_writer(std::io::stderr);
        tracing_subscriber::registry().with(events).with(filter).init();
    });
}
