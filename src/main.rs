//! Cobalt token dumper
//!
//! Command-line tool that prints the token stream of a Cobalt source file.

use std::env;
use std::fs;
use std::path::Path;
use std::process;
use std::sync::Once;

use cobalt_lexer::{CobaltError, CobaltResult, Diagnostic, LexError, Lexer, LexerOptions, VERSION};

static TRACING_INIT: Once = Once::new();

/// Install a log subscriber when `RUST_LOG` is set, e.g.
/// `RUST_LOG=cobalt_lexer=trace`.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true).with_writer(std::io::stderr))
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut options = LexerOptions::default();
    let mut filename: Option<&String> = None;

    for arg in &args[1..] {
        match arg.as_str() {
            "--help" | "-h" => {
                print_help();
                return;
            }
            "--version" | "-V" => {
                println!("cobalt-lex {}", VERSION);
                return;
            }
            "--strict-floats" => options = options.with_trailing_dot_float(false),
            "--silent-comments" => options = options.with_unterminated_comment_reports(false),
            _ if arg.starts_with('-') => {
                eprintln!("Unknown flag: {}", arg);
                print_usage();
                process::exit(2);
            }
            _ => filename = Some(arg),
        }
    }

    let Some(file) = filename else {
        eprintln!("Error: No input file specified");
        print_usage();
        process::exit(2);
    };

    match show_file_tokens(file, options) {
        Ok(0) => {}
        Ok(_) => process::exit(1),
        Err(e) => {
            eprintln!("{}", e);
            process::exit(2);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: cobalt-lex [OPTIONS] <file>");
    eprintln!("       cobalt-lex --help");
}

fn print_help() {
    println!("cobalt-lex v{} - Cobalt token dumper", VERSION);
    println!();
    println!("USAGE:");
    println!("    cobalt-lex [OPTIONS] <file>");
    println!();
    println!("OPTIONS:");
    println!("    --strict-floats     Reject floats with an empty fraction (\"3.\")");
    println!("    --silent-comments   Let an unterminated /* run to end of file unreported");
    println!("    -V, --version       Show version");
    println!("    -h, --help          Show this help message");
    println!();
    println!("Set RUST_LOG=cobalt_lexer=trace to log every token.");
}

/// Print the tokens of a file; returns how many error tokens were seen
fn show_file_tokens(filename: &str, options: LexerOptions) -> CobaltResult<usize> {
    let source = fs::read_to_string(filename).map_err(|source| CobaltError::Io {
        path: Path::new(filename).to_path_buf(),
        source,
    })?;

    let mut lexer = Lexer::with_options(&source, options);
    let mut errors = Vec::new();

    println!("Tokens for '{}':", filename);
    println!("{}", "=".repeat(60));

    let mut count = 0;
    loop {
        let token = lexer.next_token();
        count += 1;

        if token.is_eof() {
            println!("{:4}: {:24} | {}", count - 1, format!("{:?}", token.kind), token.span);
            break;
        }

        let value = lexer.current_value();
        if !token.kind.carries_value() {
            println!(
                "{:4}: {:24} | {:10} | {:?}",
                count - 1,
                format!("{:?}", token.kind),
                token.span.to_string(),
                token.text
            );
        } else {
            println!(
                "{:4}: {:24} | {:10} | {:?} = {}",
                count - 1,
                format!("{:?}", token.kind),
                token.span.to_string(),
                token.text,
                value
            );
        }

        if let Some(error) = LexError::from_token(&token, &source, Some(filename)) {
            errors.push(error);
        }
    }

    println!("{}", "=".repeat(60));
    println!("Total tokens: {}", count);

    for error in &errors {
        eprint!("{}", Diagnostic::with_source(error, &source));
    }

    Ok(errors.len())
}
