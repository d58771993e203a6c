use std::fmt::Display;

use super::Expr;

// Two diagnostic renderers: the plain-text form spells the operators out the
// way the surface syntax does, the LaTeX form uses the usual connective
// symbols. Both parenthesise every binary node, so precedence never has to be
// reconstructed by the reader.

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Var(name) => write!(f, "{name}"),
            Expr::Not(rhs) => write!(f, "(NOT {rhs})"),
            Expr::And(lhs, rhs) => write!(f, "({lhs} AND {rhs})"),
            Expr::Or(lhs, rhs) => write!(f, "({lhs} OR {rhs})"),
            Expr::Implies(lhs, rhs) => write!(f, "({lhs} IMPLIES {rhs})"),
            Expr::Paren(rhs) => write!(f, "({rhs})"),
        }
    }
}

/// Adapter that renders a formula in mathematical-typesetting form, using
/// `\neg`, `\wedge`, `\vee` and `\rightarrow`. Obtained via [Expr::latex].
pub struct Latex<'e>(&'e Expr);

impl Expr {
    /// Borrows this formula as a LaTeX-renderable value.
    pub fn latex(&self) -> Latex<'_> {
        Latex(self)
    }
}

impl Display for Latex<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            Expr::Var(name) => write!(f, "{name}"),
            Expr::Not(rhs) => write!(f, "\\neg {}", rhs.latex()),
            Expr::And(lhs, rhs) => write!(f, "({} \\wedge {})", lhs.latex(), rhs.latex()),
            Expr::Or(lhs, rhs) => write!(f, "({} \\vee {})", lhs.latex(), rhs.latex()),
            Expr::Implies(lhs, rhs) => write!(f, "({} \\rightarrow {})", lhs.latex(), rhs.latex()),
            Expr::Paren(rhs) => write!(f, "({})", rhs.latex()),
        }
    }
}
