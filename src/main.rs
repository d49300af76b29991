use std::{fs, path::PathBuf, process};

use clap::Parser;
use jis::{interpreter::lexer::tokenize, run};
use tracing_subscriber::EnvFilter;

/// jis runs programs written in a tiny imperative scripting language with
/// numeric variables, conditionals, loops and tasks.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Print every token of the program before running it.
    #[arg(short, long)]
    tokens: bool,

    /// Log what the interpreter does (task registration, task calls) to
    /// stderr. `RUST_LOG` takes precedence when set.
    #[arg(short, long)]
    verbose: bool,

    /// The program to run.
    path: PathBuf,
}

fn main() {
    let args = Args::parse();

    init_tracing(args.verbose);

    let source = fs::read_to_string(&args.path).unwrap_or_else(|_| {
                                                   eprintln!("Unable to read file '{}'.",
                                                             args.path.display());
                                                   process::exit(1);
                                               });

    if args.tokens {
        dump_tokens(&source);
    }

    if let Err(e) = run(&source) {
        eprintln!("{e}");
        process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt().with_env_filter(filter)
                             .with_writer(std::io::stderr)
                             .with_target(false)
                             .init();
}

/// Lexical errors are left for `run` to report.
fn dump_tokens(source: &str) {
    if let Ok(tokens) = tokenize(source) {
        println!("TOKENS:");
        for token in &tokens {
            println!("{token}");
        }
    }
}
