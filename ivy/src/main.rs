use anyhow::{Context, Result};
use clap::Parser as _;
use console::style;
use ivy::{input, Outcome, RunOptions};
use ivy_parser::lexer::tokenize;
use ivy_source::Source;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser, Debug)]
#[command(name = "ivy")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Interpreter for the Ivy teaching language", long_about = None)]
struct Args {
    /// Program to run. Reads from stdin until a line containing `end` if omitted.
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Abort after executing this many statements and loop iterations.
    #[arg(long = "max-steps", value_name = "N")]
    max_steps: Option<u64>,

    /// Print the token stream instead of running the program.
    #[arg(long = "tokens")]
    tokens: bool,

    /// Print the parsed program to stderr before running it.
    #[arg(long = "ast")]
    ast: bool,

    #[arg(long = "color", value_name = "WHEN", default_value = "auto")]
    color: ColorChoice,

    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

#[derive(Debug, Clone, Copy)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!(
                "Invalid color choice: {}. Must be 'auto', 'always', or 'never'",
                s
            )),
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn read_source(args: &Args) -> Result<String> {
    match &args.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let stdin = io::stdin();
            let content = input::read_until_sentinel(stdin.lock(), io::stdout())
                .context("failed to read program from stdin")?;
            Ok(content)
        }
    }
}

/// Prints every token with its position, followed by lexical errors.
fn print_tokens(content: &str) -> Result<Outcome> {
    let source = Source::new(content);
    let mut stdout = io::stdout();
    for lexeme in tokenize(&source) {
        writeln!(
            stdout,
            "{:>4}:{:<4} {:?} '{}'",
            lexeme.position.line, lexeme.position.column, lexeme.token, lexeme.slice
        )?;
    }
    write!(stdout, "{}", source.errors)?;
    Ok(if source.has_no_errors() {
        Outcome::Success
    } else {
        Outcome::ParseFailed
    })
}

fn print_status(outcome: Outcome) {
    let status = match outcome {
        Outcome::Empty => return,
        Outcome::Success => style(outcome).green(),
        Outcome::CompletedWithErrors => style(outcome).yellow(),
        Outcome::ParseFailed => style(outcome).red(),
    };
    println!("{}", status.bold());
}

fn run(args: &Args) -> Result<Outcome> {
    let content = read_source(args)?;
    tracing::debug!(bytes = content.len(), "read program");
    if args.tokens {
        return print_tokens(&content);
    }

    let options = RunOptions {
        step_limit: args.max_steps,
        dump_ast: args.ast,
    };
    let stdout = io::stdout();
    let outcome = ivy::run_with(&content, &options, stdout.lock())?;
    print_status(outcome);
    Ok(outcome)
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    match args.color {
        ColorChoice::Auto => {}
        ColorChoice::Always => console::set_colors_enabled(true),
        ColorChoice::Never => console::set_colors_enabled(false),
    }

    let code = match run(&args) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            eprintln!("{} {:#}", style("error:").red().bold(), err);
            2
        }
    };
    process::exit(code);
}
