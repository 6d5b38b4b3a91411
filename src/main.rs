use std::{
    fs,
    io::{self, BufRead, IsTerminal, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use reckon::{
    config::{Config, DEFAULT_ARENA_CAPACITY, DEFAULT_LOG_PATH},
    interpreter::{
        environment::DEFAULT_CAPACITY,
        parser::core::{Evaluation, Parser as Evaluator},
    },
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// reckon is an interactive calculator for numbers, strings and booleans.
///
/// Without arguments it reads expressions from standard input, one per line.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells reckon to evaluate the lines of a file instead of an expression.
    #[arg(short, long)]
    file: bool,

    /// Bytes available for strings while evaluating one line.
    #[arg(long, default_value_t = DEFAULT_ARENA_CAPACITY)]
    arena_capacity: usize,

    /// Maximum number of variables.
    #[arg(long, default_value_t = DEFAULT_CAPACITY)]
    variables: usize,

    /// File that diagnostics are appended to.
    #[arg(long, default_value = DEFAULT_LOG_PATH)]
    log_file: PathBuf,

    /// Disables the diagnostics file.
    #[arg(long)]
    no_log: bool,

    /// Flush the diagnostics file after this many records.
    #[arg(long, default_value_t = 1)]
    flush_every: usize,

    /// An expression to evaluate, or a file path with `--file`.
    contents: Option<String>,
}

impl Args {
    fn config(&self) -> Config {
        Config { arena_capacity: self.arena_capacity,
                 env_capacity: self.variables,
                 log_path: (!self.no_log).then(|| self.log_file.clone()),
                 flush_every: self.flush_every,
                 ..Config::default() }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env())
                             .with_writer(io::stderr)
                             .init();

    let args = Args::parse();
    let mut evaluator = Evaluator::from_config(&args.config());
    info!(arena = args.arena_capacity, variables = args.variables, "session started");

    match (&args.contents, args.file) {
        (Some(path), true) => match fs::read_to_string(path) {
            Ok(script) => run(&mut evaluator, script.lines().map(|line| Ok(line.to_string())), false),
            Err(_) => {
                eprintln!("Failed to read the input file '{path}'. Perhaps this file does not exist?");
                ExitCode::FAILURE
            },
        },
        (Some(expression), false) => run(&mut evaluator, std::iter::once(Ok(expression.clone())), false),
        (None, _) => {
            let stdin = io::stdin();
            let interactive = stdin.is_terminal();
            run(&mut evaluator, stdin.lock().lines(), interactive)
        },
    }
}

/// Evaluates `lines` until they run out, one cannot be read, or a line
/// requests exit.
fn run(evaluator: &mut Evaluator,
       lines: impl IntoIterator<Item = io::Result<String>>,
       interactive: bool)
       -> ExitCode {
    let mut lines = lines.into_iter();

    loop {
        if interactive {
            print!("> ");
            if let Err(e) = io::stdout().flush() {
                warn!(error = %e, "cannot flush the prompt");
            }
        }
        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("error: cannot read input: {e}");
                return ExitCode::FAILURE;
            },
            None => return ExitCode::SUCCESS,
        };
        if line.trim().is_empty() {
            continue;
        }

        match evaluator.evaluate(&line) {
            Ok(Evaluation::Value(value)) => println!("{}", evaluator.render(&value)),
            Ok(Evaluation::Failed(error)) => eprintln!("error: {error}"),
            Ok(Evaluation::Exit { status }) => {
                return ExitCode::from(u8::try_from(status).unwrap_or(1));
            },
            Err(error) => {
                eprintln!("error: {error}");
                return ExitCode::FAILURE;
            },
        }
    }
}
