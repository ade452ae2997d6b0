//! CLI tool to tokenize source files with a lexer configuration.

use std::process::ExitCode;

use lexconf::{LexerConfig, Source, Vocabulary, tokenize};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn usage() -> ExitCode {
    eprintln!("Usage: lexconf <command> [--config FILE] [files...]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  tokens     Print every token of each file");
    eprintln!("  check      Check that each file tokenizes");
    eprintln!("  constants  Print the configuration's constants as Rust");
    eprintln!();
    eprintln!("Without --config the bundled minilang configuration is used.");
    eprintln!("Set RUST_LOG=debug for diagnostics.");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  lexconf tokens main.ml");
    eprintln!("  lexconf check --config lang.json src/*.ml");
    eprintln!("  lexconf constants --config lang.json > src/constants.rs");
    ExitCode::from(2)
}

// Only log when RUST_LOG is set; stdout stays reserved for output.
fn init_tracing() {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true),
            )
            .with(EnvFilter::from_default_env())
            .init();
    }
}

/// Blanks up to `column`, with the line's own tabs kept so the caret
/// lines up under any tab width.
fn caret_padding(line: &str, column: usize) -> String {
    line.chars()
        .take(column.saturating_sub(1))
        .map(|c| if c == '\t' { '\t' } else { ' ' })
        .collect()
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        return usage();
    }

    let command = args[1].as_str();
    let mut config_path = None;
    let mut files = Vec::new();
    let mut rest = args[2..].iter();
    while let Some(arg) = rest.next() {
        if arg == "--config" {
            let Some(path) = rest.next() else {
                eprintln!("Error: --config needs a file");
                return ExitCode::from(2);
            };
            config_path = Some(path.as_str());
        } else {
            files.push(arg.as_str());
        }
    }

    let config = config_path.map_or_else(LexerConfig::minilang, LexerConfig::from_path);
    let config = match config {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}: {e}", config_path.unwrap_or("minilang"));
            return ExitCode::from(2);
        }
    };

    match command {
        "constants" => {
            print!("{}", Vocabulary::from_config(&config));
            return ExitCode::SUCCESS;
        }
        "tokens" | "check" => {}
        _ => {
            eprintln!("Unknown command: {command}");
            return ExitCode::from(2);
        }
    }

    if files.is_empty() {
        eprintln!("Error: no files specified");
        return ExitCode::from(2);
    }

    let delimiter = config.subkind_delimiter.as_deref();
    let mut had_error = false;

    for path in files {
        let source = match Source::load(path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{e}");
                had_error = true;
                continue;
            }
        };

        match tokenize(&config, &source) {
            Ok(tokens) if command == "tokens" => {
                for token in &tokens {
                    println!(
                        "{}\t{}\t{:?}",
                        token.location,
                        token.display_kind(delimiter),
                        token.value()
                    );
                }
            }
            Ok(tokens) => {
                eprintln!("{path}: ok ({} token(s))", tokens.len());
            }
            Err(e) => {
                eprintln!("{path}: {e}");
                if let Some(line) = e.position.source_line(&source) {
                    eprintln!("    {line}");
                    eprintln!("    {}^", caret_padding(line, e.position.column));
                }
                had_error = true;
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
