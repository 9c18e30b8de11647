use ariadne::Source;
use std::fmt;
use symdiff_compute::symbolic::error::InvariantError;
use symdiff_error::Error as ParseError;

/// Utility enum to package errors that can occur while running a line of input.
#[derive(Debug)]
pub enum Error {
    /// The line was an expression that could not be parsed.
    ParseError(ParseError),

    /// The line started with `!`, but is not a known command.
    UnknownCommand(String),

    /// A command needs an expression to work on, but none has been entered yet.
    NoCurrentExpression,

    /// `!d/d` was given something that can't name a variable.
    InvalidVariable(InvariantError),
}

impl Error {
    /// Report this error to stderr. `input` is the line that produced the error.
    ///
    /// The `ariadne` crate's [`Report`](ariadne::Report) type actually does not have a `Display`
    /// implementation, so we can only use its `eprint` method to print to stderr.
    pub fn report_to_stderr(&self, input: &str) {
        match self {
            Self::ParseError(err) => {
                let report = err.build_report("input");
                if let Err(io_err) = report.eprint(("input", Source::from(input))) {
                    eprintln!("Error: {}", io_err);
                }
            },
            other => eprintln!("Error: {}", other),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseError(err) => write!(f, "{}", err),
            Self::UnknownCommand(command) => {
                write!(f, "unknown command `!{}`; the only command is `!d/d<variable>`", command)
            },
            Self::NoCurrentExpression => write!(f, "there is no expression to differentiate yet"),
            Self::InvalidVariable(err) => write!(f, "{}", err),
        }
    }
}

impl From<ParseError> for Error {
    fn from(err: ParseError) -> Self {
        Self::ParseError(err)
    }
}

impl From<InvariantError> for Error {
    fn from(err: InvariantError) -> Self {
        Self::InvalidVariable(err)
    }
}
