use std::fmt::Display;

use crate::assign::{Assignment, Truth};
use crate::expr::Expr;

/// A variable or its negation, the atoms a clause is made of.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Debug)]
pub struct Literal {
    /// The variable name.
    pub var: String,

    /// Whether the literal is the negation of the variable.
    pub negated: bool,
}

/// A disjunction of literals, kept in the order normalization produced them.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct Clause {
    pub literals: Vec<Literal>,
}

/// A conjunction of clauses. An empty [Cnf] is the tautology; a [Cnf]
/// containing an empty clause is contradictory.
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct Cnf {
    pub clauses: Vec<Clause>,
}

/// Error produced when flattening an expression that is not in conjunctive
/// normal form, carrying a rendering of the offending subexpression.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct ShapeError {
    pub found: String,
}

impl ShapeError {
    fn new(e: &Expr) -> Self {
        Self {
            found: e.to_string(),
        }
    }
}

impl Display for ShapeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "not in conjunctive normal form: {}", self.found)
    }
}

impl std::error::Error for ShapeError {}

impl Literal {
    /// A positive literal over `var`.
    pub fn pos<S>(var: S) -> Literal
    where
        S: Into<String>,
    {
        Literal {
            var: var.into(),
            negated: false,
        }
    }

    /// A negative literal over `var`.
    pub fn neg<S>(var: S) -> Literal
    where
        S: Into<String>,
    {
        Literal {
            var: var.into(),
            negated: true,
        }
    }

    /// Reads a literal from an atomic expression: a variable or a negated
    /// variable. Anything else is a shape violation.
    fn from_expr(e: &Expr) -> Result<Literal, ShapeError> {
        match e {
            Expr::Var(name) => Ok(Literal::pos(name.clone())),
            Expr::Not(rhs) => match rhs.as_ref() {
                Expr::Var(name) => Ok(Literal::neg(name.clone())),
                other => Err(ShapeError::new(other)),
            },
            other => Err(ShapeError::new(other)),
        }
    }

    /// The truth of this literal under `assn`.
    pub fn eval(&self, assn: &Assignment) -> Truth {
        let value = assn.get(&self.var);

        if self.negated { value.negate() } else { value }
    }
}

impl Clause {
    /// Flattens an OR-spine into a single clause, left branch first, so the
    /// literal order matches a left-to-right reading of the expression.
    fn from_expr(e: &Expr) -> Result<Clause, ShapeError> {
        let mut literals = Vec::new();
        Self::flatten(e, &mut literals)?;

        Ok(Clause { literals })
    }

    fn flatten(e: &Expr, out: &mut Vec<Literal>) -> Result<(), ShapeError> {
        match e {
            Expr::Or(lhs, rhs) => {
                Self::flatten(lhs, out)?;
                Self::flatten(rhs, out)
            }
            e => {
                out.push(Literal::from_expr(e)?);
                Ok(())
            }
        }
    }

    /// Evaluates the clause under a partial assignment: satisfied as soon as
    /// one literal is true, falsified only when every literal is assigned and
    /// false, undetermined otherwise.
    pub fn eval(&self, assn: &Assignment) -> Truth {
        let mut unknown = false;

        for lit in &self.literals {
            match lit.eval(assn) {
                Truth::True => return Truth::True,
                Truth::Unknown => unknown = true,
                Truth::False => {}
            }
        }

        if unknown { Truth::Unknown } else { Truth::False }
    }
}

impl Cnf {
    /// The empty conjunction, i.e. the tautology.
    pub fn empty() -> Cnf {
        Cnf {
            clauses: Vec::new(),
        }
    }

    /// Flattens a CNF-shaped expression (see [crate::nf::normalize]) into a
    /// clause list: each AND-connected subtree contributes its clauses in
    /// order, each OR-spine becomes one flat clause.
    pub fn from_expr(e: &Expr) -> Result<Cnf, ShapeError> {
        let mut clauses = Vec::new();
        Self::collect(e, &mut clauses)?;

        Ok(Cnf { clauses })
    }

    fn collect(e: &Expr, out: &mut Vec<Clause>) -> Result<(), ShapeError> {
        match e {
            Expr::And(lhs, rhs) => {
                Self::collect(lhs, out)?;
                Self::collect(rhs, out)
            }
            e => {
                out.push(Clause::from_expr(e)?);
                Ok(())
            }
        }
    }

    /// Evaluates the conjunction under a partial assignment: falsified if any
    /// clause is falsified, satisfied if every clause is satisfied,
    /// undetermined otherwise.
    pub fn eval(&self, assn: &Assignment) -> Truth {
        let mut unknown = false;

        for clause in &self.clauses {
            match clause.eval(assn) {
                Truth::False => return Truth::False,
                Truth::Unknown => unknown = true,
                Truth::True => {}
            }
        }

        if unknown { Truth::Unknown } else { Truth::True }
    }
}

// Diagnostic formatting, one clause per line.

impl Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.negated {
            write!(f, "¬")?;
        }

        write!(f, "{}", self.var)
    }
}

impl Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for lit in &self.literals {
            if first {
                first = false;
            } else {
                write!(f, " ")?;
            }

            write!(f, "{lit}")?;
        }

        Ok(())
    }
}

impl Display for Cnf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "CNF has {} clauses:", self.clauses.len())?;

        for (i, clause) in self.clauses.iter().enumerate() {
            writeln!(f, "Clause {}: {clause}", i + 1)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::expr::Expr;

    fn var(name: &str) -> Expr {
        Expr::var(name)
    }

    #[test]
    fn flatten_single_literal() {
        let cnf = Cnf::from_expr(&var("a")).unwrap();
        assert_eq!(cnf.clauses, vec![Clause { literals: vec![Literal::pos("a")] }]);
    }

    #[test]
    fn flatten_nested_ors_left_first() {
        // ((a OR ¬b) OR c) and (a OR (¬b OR c)) flatten to the same clause.
        let left = (var("a") | !var("b")) | var("c");
        let right = var("a") | (!var("b") | var("c"));

        let expected = vec![Literal::pos("a"), Literal::neg("b"), Literal::pos("c")];

        assert_eq!(Cnf::from_expr(&left).unwrap().clauses[0].literals, expected);
        assert_eq!(Cnf::from_expr(&right).unwrap().clauses[0].literals, expected);
    }

    #[test]
    fn flatten_and_spine_in_order() {
        let e = (var("a") & (var("b") | var("c"))) & !var("d");
        let cnf = Cnf::from_expr(&e).unwrap();

        assert_eq!(cnf.clauses.len(), 3);
        assert_eq!(cnf.clauses[0].literals, vec![Literal::pos("a")]);
        assert_eq!(
            cnf.clauses[1].literals,
            vec![Literal::pos("b"), Literal::pos("c")]
        );
        assert_eq!(cnf.clauses[2].literals, vec![Literal::neg("d")]);
    }

    #[test]
    fn flatten_rejects_non_cnf() {
        assert!(Cnf::from_expr(&!(var("a") | var("b"))).is_err());
        assert!(Cnf::from_expr(&Expr::implies(var("a"), var("b"))).is_err());
        assert!(Cnf::from_expr(&(var("a") | (var("b") & var("c")))).is_err());
    }

    #[test]
    fn clause_evaluation() {
        let clause = Clause {
            literals: vec![Literal::pos("a"), Literal::neg("b")],
        };

        let mut assn = Assignment::new();
        assert_eq!(clause.eval(&assn), Truth::Unknown);

        assn.set("a", false);
        assert_eq!(clause.eval(&assn), Truth::Unknown);

        assn.set("b", true);
        assert_eq!(clause.eval(&assn), Truth::False);

        assn.set("b", false);
        assert_eq!(clause.eval(&assn), Truth::True);
    }

    #[test]
    fn empty_clause_is_falsified() {
        let clause = Clause::default();
        assert_eq!(clause.eval(&Assignment::new()), Truth::False);
    }

    #[test]
    fn cnf_evaluation() {
        let cnf = Cnf {
            clauses: vec![
                Clause { literals: vec![Literal::pos("a")] },
                Clause { literals: vec![Literal::neg("b")] },
            ],
        };

        let mut assn = Assignment::new();
        assert_eq!(cnf.eval(&assn), Truth::Unknown);

        assn.set("a", true);
        assn.set("b", false);
        assert_eq!(cnf.eval(&assn), Truth::True);

        assn.set("b", true);
        assert_eq!(cnf.eval(&assn), Truth::False);
    }

    #[test]
    fn empty_cnf_is_satisfied() {
        assert_eq!(Cnf::empty().eval(&Assignment::new()), Truth::True);
    }

    #[test]
    fn falsified_clause_dominates_unknown() {
        // An undetermined clause before a falsified one must not hide the
        // falsification.
        let cnf = Cnf {
            clauses: vec![
                Clause { literals: vec![Literal::pos("u")] },
                Clause { literals: vec![Literal::pos("a")] },
            ],
        };

        let mut assn = Assignment::new();
        assn.set("a", false);
        assert_eq!(cnf.eval(&assn), Truth::False);
    }
}
