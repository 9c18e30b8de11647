use crate::error::Error;
use symdiff_compute::{parse, symbolic::expr::Variable, Expr};
use tracing::debug;

/// The state kept between lines of input: the expression that commands act on.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<Expr>,
}

impl Session {
    /// Runs one line of input, returning the text to print.
    ///
    /// A line starting with `!` is a command; any other line is an expression, which becomes the
    /// current expression if it parses. On error, the current expression is left unchanged.
    pub fn execute(&mut self, line: &str) -> Result<String, Error> {
        let line = line.trim();
        let expr = match line.strip_prefix('!') {
            Some(command) => self.command(command.trim())?,
            None => parse(line)?,
        };

        let output = expr.to_string();
        self.current = Some(expr);
        Ok(output)
    }

    /// Runs a command (the text after `!`).
    fn command(&self, command: &str) -> Result<Expr, Error> {
        let Some(name) = command.strip_prefix("d/d") else {
            return Err(Error::UnknownCommand(command.to_owned()));
        };
        let variable = Variable::new(name.trim())?;
        let current = self.current.as_ref().ok_or(Error::NoCurrentExpression)?;

        debug!(%variable, "differentiating current expression");
        Ok(current.derivative(variable.name()))
    }
}
