use crate::assign::Assignment;
use crate::cnf::{Cnf, ShapeError};
use crate::dag::{self, NodeTable, Propagation};
use crate::expr::Expr;
use crate::nf;
use crate::solver::{self, Verdict};

/// Which decision engine answers a query.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum Pipeline {
    /// Normalize to CNF, then run the DPLL search. Complete.
    #[default]
    Dpll,

    /// Linear constraint propagation over the shared formula DAG. Falls back
    /// to the DPLL pipeline whenever propagation cannot decide the formula
    /// on its own.
    Linear,
}

/// A decided query: the verdict, the witness assignment backing a
/// satisfiable verdict, and the clause form when the DPLL pipeline produced
/// one (kept for diagnostics).
#[derive(Debug)]
pub struct Outcome {
    pub verdict: Verdict,
    pub witness: Assignment,
    pub cnf: Option<Cnf>,
}

/// Decides a parsed formula. `None` stands for empty input between the
/// delimiters, which is vacuously satisfiable.
pub fn decide(formula: Option<&Expr>, pipeline: Pipeline) -> Result<Outcome, ShapeError> {
    let Some(expr) = formula else {
        return Ok(Outcome {
            verdict: Verdict::Sat,
            witness: Assignment::new(),
            cnf: None,
        });
    };

    match pipeline {
        Pipeline::Dpll => decide_dpll(expr),
        Pipeline::Linear => decide_linear(expr),
    }
}

fn decide_dpll(expr: &Expr) -> Result<Outcome, ShapeError> {
    let cnf = Cnf::from_expr(&nf::normalize(expr))?;

    let mut witness = Assignment::new();
    let verdict = solver::dpll(&cnf, &mut witness);

    Ok(Outcome {
        verdict,
        witness,
        cnf: Some(cnf),
    })
}

fn decide_linear(expr: &Expr) -> Result<Outcome, ShapeError> {
    let mut table = NodeTable::new();
    let root = table.lower(expr);

    match dag::propagate(&mut table, root) {
        Propagation::Unsat => Ok(Outcome {
            verdict: Verdict::Unsat,
            witness: Assignment::new(),
            cnf: None,
        }),

        Propagation::Sat => {
            let mut witness = Assignment::new();
            dag::extract(&table, &mut witness);

            Ok(Outcome {
                verdict: Verdict::Sat,
                witness,
                cnf: None,
            })
        }

        // Propagation left a nondeterministic constraint unresolved, so its
        // drain says nothing about satisfiability. Decide with the complete
        // engine instead.
        Propagation::Incomplete => decide_dpll(expr),
    }
}
