use crate::expr::Expr;

use super::error::Error;
use super::lexer::Lexer;
use super::token::{TKind, Token};

/// A parser
pub struct Parser<I>
where
    I: Iterator<Item = char>,
{
    /// The lexical analyzer that provides tokens
    lexer: Lexer<I>,

    /// The [TKind] of the lookahead token
    la: Option<TKind>,

    /// The full lookahead token
    token: Option<Token>,
}

impl<I> Parser<I>
where
    I: Iterator<Item = char>,
{
    /// Creates a new [Parser]
    pub fn new(iter: I) -> Self {
        let lexer = Lexer::new(iter);

        let mut parser = Self {
            lexer,
            la: None,
            token: None,
        };

        // Shift first token into lookahead
        parser.shift();

        parser
    }

    /// Shifts to the next token
    fn shift(&mut self) {
        let tok = self.lexer.token();
        self.la = tok.as_ref().map(|e| e.kind);
        self.token = tok;
    }

    /// Creates an error at the next token. If no next token is present, it
    /// selects the 0-length range after the very last character.
    fn error<T, S>(&self, msg: S) -> Result<T, Error>
    where
        S: Into<String>,
    {
        let (from, to) = match &self.token {
            Some(tok) => (tok.from, tok.to),
            None => (self.lexer.pos(), self.lexer.pos()),
        };

        Err(Error {
            msg: msg.into(),
            from,
            to,
        })
    }

    /// Consumes the lookahead token if it has the given [TKind].
    fn eat(&mut self, kind: TKind) -> bool {
        if self.la == Some(kind) {
            self.shift();
            return true;
        }

        false
    }

    /// Expects the end of the stream.
    fn eof(&mut self) -> Result<(), Error> {
        match self.la {
            None => Ok(()),
            Some(_) => self.error("Unexpected input after closing delimiter ($$)"),
        }
    }

    /// Reads an expression
    /// ```text
    /// exp = implies_exp
    /// ```
    fn exp(&mut self) -> Result<Expr, Error> {
        self.implies_exp()
    }

    /// Reads an implication, which associates to the right:
    /// ```text
    /// implies_exp = or_exp ('IMPLIES' implies_exp)?
    /// ```
    fn implies_exp(&mut self) -> Result<Expr, Error> {
        let lhs = self.or_exp()?;

        if self.eat(TKind::Implies) {
            let rhs = self.implies_exp()?;
            return Ok(Expr::implies(lhs, rhs));
        }

        Ok(lhs)
    }

    /// Reads a disjunction, which associates to the left:
    /// ```text
    /// or_exp = and_exp ('OR' and_exp)*
    /// ```
    fn or_exp(&mut self) -> Result<Expr, Error> {
        let mut lhs = self.and_exp()?;

        while self.eat(TKind::Or) {
            let rhs = self.and_exp()?;
            lhs = lhs | rhs;
        }

        Ok(lhs)
    }

    /// Reads a conjunction, which associates to the left:
    /// ```text
    /// and_exp = not_exp ('AND' not_exp)*
    /// ```
    fn and_exp(&mut self) -> Result<Expr, Error> {
        let mut lhs = self.not_exp()?;

        while self.eat(TKind::And) {
            let rhs = self.not_exp()?;
            lhs = lhs & rhs;
        }

        Ok(lhs)
    }

    /// Reads a negation or a base expression:
    /// ```text
    /// not_exp
    ///   = 'NOT' not_exp
    ///   | Ident
    ///   | '(' exp ')'
    /// ```
    fn not_exp(&mut self) -> Result<Expr, Error> {
        if self.eat(TKind::Not) {
            let rhs = self.not_exp()?;
            return Ok(!rhs);
        }

        if self.la == Some(TKind::Ident) {
            let tok = self.token.take().expect("lookahead token is present");
            self.shift();
            return Ok(Expr::var(tok.text));
        }

        if self.eat(TKind::LPar) {
            let inner = self.exp()?;

            if !self.eat(TKind::RPar) {
                return self.error("Expected closing parenthesis");
            }

            return Ok(Expr::paren(inner));
        }

        self.error("Unexpected token in expression")
    }

    /// Reads a whole delimited query. [None] means the input between the
    /// delimiters was empty.
    /// ```text
    /// formula = '$$' exp? '$$'
    /// ```
    pub fn formula(&mut self) -> Result<Option<Expr>, Error> {
        if !self.eat(TKind::Delim) {
            return self.error("Expected opening delimiter ($$)");
        }

        if self.eat(TKind::Delim) {
            self.eof()?;
            return Ok(None);
        }

        let exp = self.exp()?;

        if !self.eat(TKind::Delim) {
            return self.error("Expected closing delimiter ($$)");
        }

        self.eof()?;

        Ok(Some(exp))
    }
}
