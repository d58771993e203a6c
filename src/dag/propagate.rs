use crate::assign::Assignment;

use super::{Constraint, NodeId, NodeKind, NodeTable};

/// The three-way outcome of constraint propagation.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Propagation {
    /// The worklist drained and every constraint was resolved
    /// deterministically; the formula is satisfiable and a witness can be
    /// read off the variable nodes.
    Sat,

    /// Some node fused to [Constraint::Conflict]; the formula is
    /// unsatisfiable.
    Unsat,

    /// The worklist drained, but a conjunction forced false (or a
    /// disjunction forced true) never had a side to pin down. Propagation
    /// alone cannot decide the formula; the verdict must come from the
    /// complete search engine.
    Incomplete,
}

/// Sets `value` on a node, enqueueing it when it was unconstrained. Forcing
/// a definite node to the opposite value turns it into
/// [Constraint::Conflict] and returns false.
fn constrain(table: &mut NodeTable, id: NodeId, value: Constraint, work: &mut Vec<NodeId>) -> bool {
    let node = table.node_mut(id);

    if node.constraint == value {
        return true;
    }

    match node.constraint {
        Constraint::Unconstrained => {
            node.constraint = value;
            work.push(id);
            true
        }
        _ => {
            node.constraint = Constraint::Conflict;
            false
        }
    }
}

/// Decides the formula rooted at `root` by two-valued constraint fusion: the
/// root is forced true and constraints flow down through the connectives
/// until the worklist drains or a conflict surfaces.
///
/// `And` forced false and `Or` forced true are nondeterministic: they only
/// propagate once one side is already constrained the deciding way. If any
/// such node is still unwitnessed when the worklist drains, the result is
/// [Propagation::Incomplete] rather than a satisfiability claim.
pub fn propagate(table: &mut NodeTable, root: NodeId) -> Propagation {
    let mut work = Vec::new();

    if !constrain(table, root, Constraint::True, &mut work) {
        return Propagation::Unsat;
    }

    while let Some(id) = work.pop() {
        let node = table.node(id);
        if node.constraint == Constraint::Conflict {
            return Propagation::Unsat;
        }

        let constraint = node.constraint;

        match node.kind.clone() {
            // Variables have no children; propagation stops here.
            NodeKind::Var(_) => {}

            NodeKind::Not(child) => {
                let flipped = match constraint {
                    Constraint::True => Constraint::False,
                    Constraint::False => Constraint::True,
                    _ => continue,
                };

                if !constrain(table, child, flipped, &mut work) {
                    return Propagation::Unsat;
                }
            }

            NodeKind::And(left, right) => match constraint {
                // A true conjunction forces both sides.
                Constraint::True => {
                    if !constrain(table, left, Constraint::True, &mut work)
                        || !constrain(table, right, Constraint::True, &mut work)
                    {
                        return Propagation::Unsat;
                    }
                }

                // A false conjunction only decides once one side is already
                // known true; then the other side carries the falsehood.
                Constraint::False => {
                    if table.node(left).constraint == Constraint::True {
                        if !constrain(table, right, Constraint::False, &mut work) {
                            return Propagation::Unsat;
                        }
                    } else if table.node(right).constraint == Constraint::True {
                        if !constrain(table, left, Constraint::False, &mut work) {
                            return Propagation::Unsat;
                        }
                    }
                }

                _ => {}
            },

            NodeKind::Or(left, right) => match constraint {
                // A false disjunction forces both sides.
                Constraint::False => {
                    if !constrain(table, left, Constraint::False, &mut work)
                        || !constrain(table, right, Constraint::False, &mut work)
                    {
                        return Propagation::Unsat;
                    }
                }

                // A true disjunction only decides once one side is already
                // known false.
                Constraint::True => {
                    if table.node(left).constraint == Constraint::False {
                        if !constrain(table, right, Constraint::True, &mut work) {
                            return Propagation::Unsat;
                        }
                    } else if table.node(right).constraint == Constraint::False {
                        if !constrain(table, left, Constraint::True, &mut work) {
                            return Propagation::Unsat;
                        }
                    }
                }

                _ => {}
            },
        }
    }

    if undecided(table) {
        Propagation::Incomplete
    } else {
        Propagation::Sat
    }
}

/// Tests whether a nondeterministic constraint was left unwitnessed: an
/// `And` forced false with neither side false, or an `Or` forced true with
/// neither side true. Such a node's constraint is not backed by its
/// children, so the default-true extraction below would not be sound.
fn undecided(table: &NodeTable) -> bool {
    table.iter().any(|(_, node)| match &node.kind {
        NodeKind::And(left, right) => {
            node.constraint == Constraint::False
                && table.node(*left).constraint != Constraint::False
                && table.node(*right).constraint != Constraint::False
        }
        NodeKind::Or(left, right) => {
            node.constraint == Constraint::True
                && table.node(*left).constraint != Constraint::True
                && table.node(*right).constraint != Constraint::True
        }
        _ => false,
    })
}

/// Reads a witness off a successfully propagated DAG: every variable node
/// takes its constrained value, and variables propagation never reached
/// default to true. The default is sound because after a
/// [Propagation::Sat] drain the formula is satisfied whichever way the
/// unconstrained variables go.
pub fn extract(table: &NodeTable, assn: &mut Assignment) {
    for (_, node) in table.iter() {
        if let NodeKind::Var(name) = &node.kind {
            let value = match node.constraint {
                Constraint::False => false,
                _ => true,
            };

            assn.set(name, value);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::assign::Truth;
    use crate::expr::Expr;

    fn run(e: &Expr) -> (NodeTable, Propagation) {
        let mut table = NodeTable::new();
        let root = table.lower(e);
        let result = propagate(&mut table, root);
        (table, result)
    }

    #[test]
    fn single_variable() {
        let (table, result) = run(&Expr::var("a"));
        assert_eq!(result, Propagation::Sat);

        let mut assn = Assignment::new();
        extract(&table, &mut assn);
        assert_eq!(assn.get("a"), Truth::True);
    }

    #[test]
    fn negation_flips() {
        let (table, result) = run(&!Expr::var("a"));
        assert_eq!(result, Propagation::Sat);

        let mut assn = Assignment::new();
        extract(&table, &mut assn);
        assert_eq!(assn.get("a"), Truth::False);
    }

    #[test]
    fn conjunction_forces_both() {
        let (table, result) = run(&(Expr::var("a") & !Expr::var("b")));
        assert_eq!(result, Propagation::Sat);

        let mut assn = Assignment::new();
        extract(&table, &mut assn);
        assert_eq!(assn.get("a"), Truth::True);
        assert_eq!(assn.get("b"), Truth::False);
    }

    #[test]
    fn contradiction_conflicts() {
        let (_, result) = run(&(Expr::var("a") & !Expr::var("a")));
        assert_eq!(result, Propagation::Unsat);
    }

    #[test]
    fn implication_chain_conflicts() {
        // ((a IMPLIES b) AND a) AND (NOT b)
        let e = (Expr::implies(Expr::var("a"), Expr::var("b")) & Expr::var("a")) & !Expr::var("b");
        let (_, result) = run(&e);
        assert_eq!(result, Propagation::Unsat);
    }

    #[test]
    fn bare_disjunction_is_incomplete() {
        let (_, result) = run(&(Expr::var("a") | Expr::var("b")));
        assert_eq!(result, Propagation::Incomplete);
    }

    #[test]
    fn pushed_negation_resolves_disjunction() {
        // NOT (a OR b) forces both disjuncts false.
        let (table, result) = run(&!(Expr::var("a") | Expr::var("b")));
        assert_eq!(result, Propagation::Sat);

        let mut assn = Assignment::new();
        extract(&table, &mut assn);
        assert_eq!(assn.get("a"), Truth::False);
        assert_eq!(assn.get("b"), Truth::False);
    }

    #[test]
    fn constraints_stay_definite() {
        let e = (Expr::var("a") & !Expr::var("b")) & Expr::var("c");
        let (table, result) = run(&e);
        assert_eq!(result, Propagation::Sat);

        // A second sweep over the table must find every node settled; no
        // definite node ever returns to Unconstrained.
        for (_, node) in table.iter() {
            assert_ne!(node.constraint, Constraint::Unconstrained);
            assert_ne!(node.constraint, Constraint::Conflict);
        }
    }
}
