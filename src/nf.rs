use crate::expr::Expr;

// Conversion to conjunctive normal form in two passes: push negations down to
// the variables (rewriting implications and dropping parentheses on the way),
// then distribute disjunctions over conjunctions until the tree is an AND of
// ORs of literals.

/// Tests if the expression is a literal: a variable or a negated variable.
pub fn is_literal(e: &Expr) -> bool {
    match e {
        Expr::Var(_) => true,
        Expr::Not(rhs) => matches!(rhs.as_ref(), Expr::Var(_)),
        _ => false,
    }
}

/// Tests if the expression is a clause, that is, a disjunction of literals.
/// `a` and `a OR (NOT b OR c)` are clauses, but `NOT (a OR b)` is not.
pub fn is_clause(e: &Expr) -> bool {
    match e {
        Expr::Or(lhs, rhs) => is_clause(lhs) && is_clause(rhs),
        e => is_literal(e),
    }
}

/// Tests if the expression is in conjunctive normal form, that is, a
/// conjunction of clauses. See [is_clause].
pub fn is_cnf(e: &Expr) -> bool {
    match e {
        Expr::And(lhs, rhs) => is_cnf(lhs) && is_cnf(rhs),
        e => is_clause(e),
    }
}

/// Rewrites the formula so that negations apply only to variables. The
/// result is a fresh tree in negation normal form: implications are replaced
/// by `NOT lhs OR rhs`, parentheses disappear, double negations cancel, and
/// De Morgan's laws carry negations past conjunctions and disjunctions.
fn nnf(e: &Expr) -> Expr {
    match e {
        Expr::Var(name) => Expr::var(name.clone()),
        Expr::Not(rhs) => nnf_neg(rhs),
        Expr::And(lhs, rhs) => nnf(lhs) & nnf(rhs),
        Expr::Or(lhs, rhs) => nnf(lhs) | nnf(rhs),
        Expr::Implies(lhs, rhs) => nnf_neg(lhs) | nnf(rhs),
        Expr::Paren(rhs) => nnf(rhs),
    }
}

/// Like [nnf], but for a formula under an odd number of negations. This is
/// where the actual rewriting happens: `NOT NOT e` comes back positive and
/// `NOT (lhs AND rhs)` becomes `NOT lhs OR NOT rhs` (dually for OR).
fn nnf_neg(e: &Expr) -> Expr {
    match e {
        Expr::Var(name) => !Expr::var(name.clone()),
        Expr::Not(rhs) => nnf(rhs),
        Expr::And(lhs, rhs) => nnf_neg(lhs) | nnf_neg(rhs),
        Expr::Or(lhs, rhs) => nnf_neg(lhs) & nnf_neg(rhs),
        Expr::Implies(lhs, rhs) => nnf(lhs) & nnf_neg(rhs),
        Expr::Paren(rhs) => nnf_neg(rhs),
    }
}

/// Builds the disjunction of two subformulas in negation normal form,
/// distributing over any conjunction on either side: `(l AND r) OR rhs`
/// becomes `(l OR rhs) AND (r OR rhs)`, and symmetrically.
///
/// The side that gets duplicated is deep-cloned, so the two branches of the
/// new conjunction never share a subtree.
fn distribute_or(lhs: Expr, rhs: Expr) -> Expr {
    match (lhs, rhs) {
        (Expr::And(l, r), rhs) => distribute_or(*l, rhs.clone()) & distribute_or(*r, rhs),
        (lhs, Expr::And(l, r)) => distribute_or(lhs.clone(), *l) & distribute_or(lhs, *r),
        (lhs, rhs) => lhs | rhs,
    }
}

/// Applies [distribute_or] bottom-up over the whole tree. With children
/// already distributed, every disjunction node ends up distributed over
/// whatever conjunctions its sides contain.
fn distribute(e: Expr) -> Expr {
    match e {
        Expr::Not(rhs) => !distribute(*rhs),
        Expr::And(lhs, rhs) => distribute(*lhs) & distribute(*rhs),
        Expr::Or(lhs, rhs) => distribute_or(distribute(*lhs), distribute(*rhs)),
        e => e,
    }
}

/// Converts a formula into an equivalent conjunctive normal form: an AND of
/// ORs of literals. The input is left untouched; the result is a fresh tree.
///
/// Finding an equivalent CNF is intrinsically exponential in the worst case,
/// since distribution can square the formula at every conjunction it meets.
pub fn normalize(e: &Expr) -> Expr {
    let mut out = nnf(e);

    while !is_cnf(&out) {
        out = distribute(out);
    }

    out
}
