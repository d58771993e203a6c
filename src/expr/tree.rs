use std::collections::BTreeSet;
use std::ops::BitAnd;
use std::ops::BitOr;
use std::ops::Not;

/// A propositional formula, i.e. any expression that evaluates to true or
/// false once its variables are given values.
///
/// A formula is a fully owned tree: every node owns its children and a
/// [Expr::Var] owns its identifier. [Clone] performs the deep copy that the
/// normalizer relies on when distribution needs the same subformula on both
/// sides of a fresh conjunction.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone)]
pub enum Expr {
    /// A propositional variable, carrying the identifier the parser read.
    Var(String),

    /// The negation of a subformula. The negation is true if and only if its
    /// subformula is false.
    Not(Box<Expr>),

    /// A conjunction of two subformulas. A conjunction is true if and only if
    /// both of its subformulas are true.
    And(Box<Expr>, Box<Expr>),

    /// A disjunction of two subformulas. A disjunction is true if and only if
    /// at least one of its subformulas is true.
    Or(Box<Expr>, Box<Expr>),

    /// A material implication. An implication is true unless its left
    /// subformula is true and its right subformula is false.
    Implies(Box<Expr>, Box<Expr>),

    /// A parenthesised subformula, kept as the parser saw it. Semantically
    /// transparent; normalization and DAG lowering erase it.
    Paren(Box<Expr>),
}

impl Expr {
    pub fn var<S>(name: S) -> Expr
    where
        S: Into<String>,
    {
        Expr::Var(name.into())
    }

    pub fn and(lhs: Expr, rhs: Expr) -> Expr {
        lhs & rhs
    }

    pub fn or(lhs: Expr, rhs: Expr) -> Expr {
        lhs | rhs
    }

    pub fn not(rhs: Expr) -> Expr {
        !rhs
    }

    pub fn implies(lhs: Expr, rhs: Expr) -> Expr {
        Expr::Implies(Box::new(lhs), Box::new(rhs))
    }

    pub fn paren(rhs: Expr) -> Expr {
        Expr::Paren(Box::new(rhs))
    }

    /// Collects the set of variable names occurring in this formula.
    pub fn vars(&self) -> BTreeSet<&str> {
        let mut out = BTreeSet::new();
        self.collect_vars(&mut out);
        out
    }

    fn collect_vars<'e>(&'e self, out: &mut BTreeSet<&'e str>) {
        match self {
            Expr::Var(name) => {
                out.insert(name);
            }
            Expr::Not(rhs) | Expr::Paren(rhs) => rhs.collect_vars(out),
            Expr::And(lhs, rhs) | Expr::Or(lhs, rhs) | Expr::Implies(lhs, rhs) => {
                lhs.collect_vars(out);
                rhs.collect_vars(out);
            }
        }
    }
}

impl BitAnd for Expr {
    type Output = Expr;

    fn bitand(self, rhs: Self) -> Self::Output {
        Expr::And(Box::new(self), Box::new(rhs))
    }
}

impl BitOr for Expr {
    type Output = Expr;

    fn bitor(self, rhs: Self) -> Self::Output {
        Expr::Or(Box::new(self), Box::new(rhs))
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Self::Output {
        Expr::Not(Box::new(self))
    }
}
