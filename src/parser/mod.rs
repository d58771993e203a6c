use crate::expr::Expr;

pub use coord::*;
pub use error::*;
pub use token::*;

use parser::Parser;

mod coord;
mod error;
mod token;

mod lexer;
mod parser;

/// Parses a delimited query of the form `$$ <formula> $$`. `Ok(None)` means
/// the input between the delimiters was empty, which the driver treats as a
/// vacuously satisfiable formula.
pub fn parse(input: &str) -> Result<Option<Expr>, Error> {
    Parser::new(input.chars()).formula()
}
