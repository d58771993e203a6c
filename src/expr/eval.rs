use crate::assign::{Assignment, Truth};

use super::Expr;

impl Expr {
    /// Evaluates this formula under a partial assignment. Connectives follow
    /// the usual three-valued reading: a conjunction with a false side is
    /// false no matter what the other side is, a disjunction with a true side
    /// is true, and anything that still depends on an unassigned variable is
    /// [Truth::Unknown].
    pub fn eval(&self, assn: &Assignment) -> Truth {
        match self {
            Expr::Var(name) => assn.get(name),

            Expr::Not(rhs) => rhs.eval(assn).negate(),

            Expr::And(lhs, rhs) => match (lhs.eval(assn), rhs.eval(assn)) {
                (Truth::False, _) | (_, Truth::False) => Truth::False,
                (Truth::True, Truth::True) => Truth::True,
                _ => Truth::Unknown,
            },

            Expr::Or(lhs, rhs) => match (lhs.eval(assn), rhs.eval(assn)) {
                (Truth::True, _) | (_, Truth::True) => Truth::True,
                (Truth::False, Truth::False) => Truth::False,
                _ => Truth::Unknown,
            },

            Expr::Implies(lhs, rhs) => match (lhs.eval(assn), rhs.eval(assn)) {
                (Truth::False, _) | (_, Truth::True) => Truth::True,
                (Truth::True, Truth::False) => Truth::False,
                _ => Truth::Unknown,
            },

            Expr::Paren(rhs) => rhs.eval(assn),
        }
    }
}
