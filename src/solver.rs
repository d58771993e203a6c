use std::fmt::Display;

use crate::assign::{Assignment, Truth};
use crate::cnf::{Cnf, Literal};

/// The outcome of a satisfiability search.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Verdict {
    /// A satisfying assignment exists.
    Sat,

    /// No assignment satisfies the formula.
    Unsat,
}

impl Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Sat => write!(f, "SATISFACIBLE"),
            Verdict::Unsat => write!(f, "NO-SATISFACIBLE"),
        }
    }
}

/// Collects the assignments forced by unit clauses: for every clause that
/// `assn` does not already satisfy and that has exactly one unassigned
/// literal left, that literal must come out true.
///
/// Returns [None] when a clause has no unassigned literal left but is still
/// unsatisfied, or when two unit clauses force opposite values onto the same
/// variable.
fn forced_assignments(cnf: &Cnf, assn: &Assignment) -> Option<Assignment> {
    let mut forced = Assignment::new();

    for clause in &cnf.clauses {
        let mut unassigned = 0;
        let mut unit: Option<&Literal> = None;
        let mut satisfied = false;

        for lit in &clause.literals {
            match lit.eval(assn) {
                Truth::True => {
                    satisfied = true;
                    break;
                }
                Truth::Unknown => {
                    unassigned += 1;
                    unit = Some(lit);
                }
                Truth::False => {}
            }
        }

        if satisfied {
            continue;
        }

        match (unassigned, unit) {
            // Every literal assigned and none of them true.
            (0, _) => return None,

            (1, Some(lit)) => {
                let required = !lit.negated;

                match forced.get(&lit.var) {
                    Truth::Unknown => forced.set(&lit.var, required),

                    // Two unit clauses disagree on the variable.
                    value => {
                        if value != Truth::of(required) {
                            return None;
                        }
                    }
                }
            }

            _ => {}
        }
    }

    Some(forced)
}

/// Picks the first variable, in clause and literal order, that `assn` leaves
/// unassigned. The fixed order keeps the search, and thus the witness,
/// deterministic for a given clause list.
fn pick_unassigned<'c>(cnf: &'c Cnf, assn: &Assignment) -> Option<&'c str> {
    for clause in &cnf.clauses {
        for lit in &clause.literals {
            if assn.get(&lit.var) == Truth::Unknown {
                return Some(&lit.var);
            }
        }
    }

    None
}

/// The DPLL procedure: unit propagation interleaved with two-way branching
/// and chronological backtracking.
///
/// On [Verdict::Sat], `assn` has been extended into a witness; every clause
/// evaluates to true under it (variables it leaves unassigned are free). On
/// [Verdict::Unsat], `assn` may carry assignments propagated before the
/// contradiction surfaced.
pub fn dpll(cnf: &Cnf, assn: &mut Assignment) -> Verdict {
    if cnf.clauses.is_empty() {
        return Verdict::Sat;
    }

    match cnf.eval(assn) {
        Truth::True => return Verdict::Sat,
        Truth::False => return Verdict::Unsat,
        Truth::Unknown => {}
    }

    // Unit propagation.
    let Some(forced) = forced_assignments(cnf, assn) else {
        return Verdict::Unsat;
    };

    if !forced.is_empty() {
        for (var, value) in forced.iter() {
            assn.set(var, value);
        }

        // Folding the forced values can settle the formula either way, e.g.
        // units can falsify a clause that still had two open literals when
        // the forced set was computed.
        match cnf.eval(assn) {
            Truth::True => return Verdict::Sat,
            Truth::False => return Verdict::Unsat,
            Truth::Unknown => {}
        }
    }

    let Some(var) = pick_unassigned(cnf, assn) else {
        return Verdict::Sat;
    };

    // Branch, trying true before false. The branch works on a clone so a
    // failed attempt leaves `assn` exactly as propagation left it.
    for value in [true, false] {
        let mut attempt = assn.clone();
        attempt.set(var, value);

        if dpll(cnf, &mut attempt) == Verdict::Sat {
            for (var, value) in attempt.iter() {
                assn.set(var, value);
            }
            return Verdict::Sat;
        }
    }

    Verdict::Unsat
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::cnf::Clause;

    fn clause<const N: usize>(literals: [Literal; N]) -> Clause {
        Clause {
            literals: literals.into(),
        }
    }

    #[test]
    fn empty_cnf_is_sat() {
        let mut assn = Assignment::new();
        assert_eq!(dpll(&Cnf::empty(), &mut assn), Verdict::Sat);
    }

    #[test]
    fn empty_clause_is_unsat() {
        let cnf = Cnf {
            clauses: vec![Clause::default()],
        };

        let mut assn = Assignment::new();
        assert_eq!(dpll(&cnf, &mut assn), Verdict::Unsat);
    }

    #[test]
    fn unit_clauses_force_values() {
        // (a) AND (¬b)
        let cnf = Cnf {
            clauses: vec![clause([Literal::pos("a")]), clause([Literal::neg("b")])],
        };

        let mut assn = Assignment::new();
        assert_eq!(dpll(&cnf, &mut assn), Verdict::Sat);
        assert_eq!(assn.get("a"), Truth::True);
        assert_eq!(assn.get("b"), Truth::False);
    }

    #[test]
    fn contradicting_units_are_unsat() {
        // (a) AND (¬a)
        let cnf = Cnf {
            clauses: vec![clause([Literal::pos("a")]), clause([Literal::neg("a")])],
        };

        let mut assn = Assignment::new();
        assert_eq!(dpll(&cnf, &mut assn), Verdict::Unsat);
    }

    #[test]
    fn propagation_chains() {
        // (a) AND (¬a OR b) AND (¬b OR c)
        let cnf = Cnf {
            clauses: vec![
                clause([Literal::pos("a")]),
                clause([Literal::neg("a"), Literal::pos("b")]),
                clause([Literal::neg("b"), Literal::pos("c")]),
            ],
        };

        let mut assn = Assignment::new();
        assert_eq!(dpll(&cnf, &mut assn), Verdict::Sat);
        assert_eq!(assn.get("a"), Truth::True);
        assert_eq!(assn.get("b"), Truth::True);
        assert_eq!(assn.get("c"), Truth::True);
    }

    #[test]
    fn branching_backtracks() {
        // (a OR b) AND (¬a) forces the second branch on a.
        let cnf = Cnf {
            clauses: vec![
                clause([Literal::pos("a"), Literal::pos("b")]),
                clause([Literal::neg("a")]),
            ],
        };

        let mut assn = Assignment::new();
        assert_eq!(dpll(&cnf, &mut assn), Verdict::Sat);
        assert_eq!(assn.get("a"), Truth::False);
        assert_eq!(assn.get("b"), Truth::True);
    }

    #[test]
    fn tries_true_first() {
        // (a OR b) is satisfied by the very first branch: a = true.
        let cnf = Cnf {
            clauses: vec![clause([Literal::pos("a"), Literal::pos("b")])],
        };

        let mut assn = Assignment::new();
        assert_eq!(dpll(&cnf, &mut assn), Verdict::Sat);
        assert_eq!(assn.get("a"), Truth::True);
        assert_eq!(assn.get("b"), Truth::Unknown);
    }

    #[test]
    fn units_falsifying_a_third_clause() {
        // (a OR b) AND (¬a) AND (¬b): the two units leave no variable
        // unassigned, and the first clause comes out false only after they
        // are folded in.
        let cnf = Cnf {
            clauses: vec![
                clause([Literal::pos("a"), Literal::pos("b")]),
                clause([Literal::neg("a")]),
                clause([Literal::neg("b")]),
            ],
        };

        let mut assn = Assignment::new();
        assert_eq!(dpll(&cnf, &mut assn), Verdict::Unsat);
    }

    #[test]
    fn small_unsat_needs_search() {
        // (a OR b) AND (¬a OR c) AND (¬b OR c) AND (¬c)
        let cnf = Cnf {
            clauses: vec![
                clause([Literal::pos("a"), Literal::pos("b")]),
                clause([Literal::neg("a"), Literal::pos("c")]),
                clause([Literal::neg("b"), Literal::pos("c")]),
                clause([Literal::neg("c")]),
            ],
        };

        let mut assn = Assignment::new();
        assert_eq!(dpll(&cnf, &mut assn), Verdict::Unsat);
    }
}
