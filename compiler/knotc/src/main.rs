//! Knot CLI
//!
//! Runs the demo grammars over text given on the command line.

use knotc::commands::{self, Output};
use knotc::{init_tracing, CliConfig, Diagnostic};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let mut config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };
    let positional = match config.apply_args(&args[2..]) {
        Ok(positional) => positional,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(2);
        }
    };

    let command = &args[1];

    let result = match command.as_str() {
        "calc" => {
            let [source] = positional[..] else {
                eprintln!("Usage: knot calc <expr>");
                std::process::exit(1);
            };
            commands::calc(source, &config)
        }
        "list" => {
            let [source] = positional[..] else {
                eprintln!("Usage: knot list <text>");
                std::process::exit(1);
            };
            commands::list(source, &config)
        }
        "check" => {
            let [grammar, source] = positional[..] else {
                eprintln!("Usage: knot check <grammar> <text>");
                eprintln!();
                eprintln!("Grammars: {}", commands::GRAMMARS.join(", "));
                std::process::exit(1);
            };
            commands::check(grammar, source, &config)
        }
        "help" | "--help" | "-h" => {
            print_usage();
            return;
        }
        "version" | "--version" | "-V" => {
            println!("knot {}", env!("CARGO_PKG_VERSION"));
            return;
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    std::process::exit(report(result));
}

/// Print a command's result and return the exit status.
fn report(result: Result<Output, Diagnostic>) -> i32 {
    match result {
        Ok(output) => {
            for warning in &output.warnings {
                eprintln!("{warning}");
            }
            if !output.text.is_empty() {
                println!("{}", output.text);
            }
            0
        }
        Err(diagnostic) => {
            eprintln!("{diagnostic}");
            1
        }
    }
}

fn print_usage() {
    println!("Knot parser-combinator demos");
    println!();
    println!("Usage: knot <command> [options] <args>");
    println!();
    println!("Commands:");
    println!("  calc <expr>              Evaluate an arithmetic expression");
    println!("  list <text>              Read a comma-separated number list");
    println!("  check <grammar> <text>   Check text against a built-in grammar");
    println!("  help                     Show this help message");
    println!("  version                  Show version information");
    println!();
    println!("Options:");
    println!("  --max-depth=<n>          Rule nesting limit (env: KNOT_MAX_DEPTH)");
    println!("  --max-repetitions=<n>    Repetition limit (env: KNOT_MAX_REPETITIONS)");
    println!();
    println!("Set RUST_LOG=knot_parse=trace to trace parser decisions.");
}
