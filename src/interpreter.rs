use crate::environment::Environment;
use crate::expr::EvalErr;
use crate::parser::{ParseErr, Parser};
use crate::scanner::{scan, SyntaxErr};
use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq)]
pub enum InterpretErr {
    SyntaxErr(SyntaxErr),
    ParseErr(ParseErr),
    EvalErr(EvalErr),
}

impl fmt::Display for InterpretErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SyntaxErr(e) => write!(f, "{e}"),
            Self::ParseErr(e) => write!(f, "{e}"),
            Self::EvalErr(e) => write!(f, "{e}"),
        }
    }
}

impl Error for InterpretErr {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::SyntaxErr(e) => Some(e),
            Self::ParseErr(e) => Some(e),
            Self::EvalErr(e) => Some(e),
        }
    }
}

impl From<SyntaxErr> for InterpretErr {
    fn from(value: SyntaxErr) -> Self {
        Self::SyntaxErr(value)
    }
}

impl From<ParseErr> for InterpretErr {
    fn from(value: ParseErr) -> Self {
        Self::ParseErr(value)
    }
}

impl From<EvalErr> for InterpretErr {
    fn from(value: EvalErr) -> Self {
        Self::EvalErr(value)
    }
}

/// One calculator session. Variables, `$` included, live as long as it does.
#[derive(Debug, Default)]
pub struct Interpreter {
    env: Environment,
}

impl Interpreter {
    pub fn new() -> Interpreter {
        Interpreter {
            env: Environment::new(),
        }
    }

    /// Scans, parses and evaluates one line.
    ///
    /// On success the value also becomes the new `$`. On failure `$` keeps its
    /// old value, but assignments that already ran stay in effect.
    pub fn run(&mut self, line: &str) -> Result<f64, InterpretErr> {
        log::trace!("scanning {line:?}");
        let tokens = scan(line)?;
        log::debug!("tokens: {tokens:?}");

        log::trace!("parsing");
        let expr = Parser::new(&tokens).parse()?;
        log::debug!("tree: {expr}");

        log::trace!("evaluating");
        let val = expr.eval(&mut self.env)?;
        self.env.set_last_result(val);

        Ok(val)
    }

    pub fn get_global(&self, id: &str) -> Option<f64> {
        self.env.get(id)
    }

    pub fn last_result(&self) -> f64 {
        self.env.last_result()
    }
}
