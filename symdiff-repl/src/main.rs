mod error;
mod session;

use clap::Parser;
use rustyline::{error::ReadlineError, DefaultEditor};
use session::Session;
use std::{fs, io::{self, IsTerminal, Read}, path::PathBuf, process::ExitCode};
use tracing::{debug, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Parse expressions built from numbers, variables, `+`, `*`, and parentheses, and differentiate
/// them symbolically.
///
/// Every line is either an expression, which becomes the current expression, or a command. The
/// command `!d/d<variable>` replaces the current expression with its derivative.
#[derive(Parser)]
#[command(name = "symdiff")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Run each line of this file instead of starting the interactive shell
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
}

/// Runs a single line of input, printing the result to stdout or the error to stderr.
fn execute(input: &str, session: &mut Session) {
    match session.execute(input) {
        Ok(output) => println!("{}", output),
        Err(err) => err.report_to_stderr(input),
    }
}

/// Runs every nonblank line of the given source, in order.
fn execute_batch(source: &str, session: &mut Session) {
    for line in source.lines().filter(|line| !line.trim().is_empty()) {
        execute(line, session);
    }
}

/// Runs the interactive shell until Ctrl-C or Ctrl-D.
fn interactive(session: &mut Session) -> Result<(), ReadlineError> {
    let mut rl = DefaultEditor::new()?;

    fn process_line(rl: &mut DefaultEditor, session: &mut Session) -> Result<(), ReadlineError> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(());
        }

        rl.add_history_entry(&input)?;

        execute(&input, session);
        Ok(())
    }

    loop {
        match process_line(&mut rl, session) {
            Ok(()) => (),
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => return Ok(()),
            Err(err) => return Err(err),
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let mut session = Session::default();

    if let Some(path) = args.file {
        // run source file
        info!(path = %path.display(), "running file");
        match fs::read_to_string(&path) {
            Ok(source) => execute_batch(&source, &mut session),
            Err(err) => {
                eprintln!("Error: could not read `{}`: {}", path.display(), err);
                return ExitCode::FAILURE;
            },
        }
    } else if !io::stdin().is_terminal() {
        // read source from stdin
        debug!("reading from stdin");
        let mut source = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut source) {
            eprintln!("Error: could not read stdin: {}", err);
            return ExitCode::FAILURE;
        }
        execute_batch(&source, &mut session);
    } else if let Err(err) = interactive(&mut session) {
        // run the repl / interactive mode
        eprintln!("Error: {}", err);
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
