use crate::expr::Expr;

const HASH_MULTIPLIER: u64 = 31;

/// Handle to a node in its [NodeTable]. Handles are table indices; a child
/// handle is always smaller than the handle of any node referring to it,
/// because nodes are interned bottom-up.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug, Hash)]
pub struct NodeId(usize);

/// The constraint state of a DAG node. States move monotonically:
/// [Constraint::Unconstrained] can become [Constraint::True] or
/// [Constraint::False], and forcing a definite node to the opposite definite
/// value yields [Constraint::Conflict], which is terminal.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Constraint {
    /// Propagation has not reached this node.
    Unconstrained,

    /// The node must evaluate to true.
    True,

    /// The node must evaluate to false.
    False,

    /// The node was forced to both values; the formula is unsatisfiable.
    Conflict,
}

/// The connective or variable a DAG node stands for. Implication is not a
/// primitive here: lowering rewrites `lhs IMPLIES rhs` into `¬lhs ∨ rhs`,
/// and parentheses disappear entirely.
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum NodeKind {
    Var(String),
    Not(NodeId),
    And(NodeId, NodeId),
    Or(NodeId, NodeId),
}

/// A node of the shared formula DAG.
#[derive(Debug)]
pub struct DagNode {
    /// What the node stands for.
    pub kind: NodeKind,

    /// The node's current constraint, mutated only by propagation.
    pub constraint: Constraint,

    /// Structural hash, fixed at interning time.
    hash: u64,

    /// Back-edges to every node that has this node as a child.
    parents: Vec<NodeId>,
}

impl DagNode {
    /// The nodes that refer to this node as a child.
    pub fn parents(&self) -> &[NodeId] {
        &self.parents
    }
}

/// Arena that owns every DAG node and enforces maximal sharing: two interned
/// kinds that compare equal always yield the same handle. Dropping the table
/// drops the whole DAG at once, so parents and children never disagree about
/// node lifetime.
#[derive(Debug, Default)]
pub struct NodeTable {
    nodes: Vec<DagNode>,
}

fn hash_name(name: &str) -> u64 {
    name.bytes()
        .fold(0, |h, b| h.wrapping_mul(HASH_MULTIPLIER).wrapping_add(b as u64))
}

impl NodeTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    /// Borrows the node behind a handle.
    pub fn node(&self, id: NodeId) -> &DagNode {
        &self.nodes[id.0]
    }

    pub(super) fn node_mut(&mut self, id: NodeId) -> &mut DagNode {
        &mut self.nodes[id.0]
    }

    /// The number of distinct nodes interned so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates all nodes in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &DagNode)> {
        self.nodes.iter().enumerate().map(|(i, node)| (NodeId(i), node))
    }

    /// Combines the type tag with the children's stored hashes. Children are
    /// hashed by their interned hash value, not their handle, so the hash of
    /// a kind is stable across tables.
    fn hash_kind(&self, kind: &NodeKind) -> u64 {
        match kind {
            NodeKind::Var(name) => hash_name(name),
            NodeKind::Not(child) => HASH_MULTIPLIER.wrapping_add(self.node(*child).hash),
            NodeKind::And(left, right) => (2 * HASH_MULTIPLIER)
                .wrapping_add(self.node(*left).hash.wrapping_mul(17))
                .wrapping_add(self.node(*right).hash),
            NodeKind::Or(left, right) => (3 * HASH_MULTIPLIER)
                .wrapping_add(self.node(*left).hash.wrapping_mul(17))
                .wrapping_add(self.node(*right).hash),
        }
    }

    /// Returns the existing handle for `kind`, or inserts a new node and
    /// records back-edges into its children. Children are compared by handle:
    /// since the walk interns bottom-up they are already canonical, so handle
    /// equality is structural equality.
    pub fn intern(&mut self, kind: NodeKind) -> NodeId {
        let hash = self.hash_kind(&kind);

        for (i, node) in self.nodes.iter().enumerate() {
            if node.hash == hash && node.kind == kind {
                return NodeId(i);
            }
        }

        let children: Vec<NodeId> = match &kind {
            NodeKind::Var(_) => vec![],
            NodeKind::Not(child) => vec![*child],
            NodeKind::And(left, right) | NodeKind::Or(left, right) => vec![*left, *right],
        };

        let id = NodeId(self.nodes.len());
        self.nodes.push(DagNode {
            kind,
            constraint: Constraint::Unconstrained,
            hash,
            parents: Vec::new(),
        });

        for child in children {
            self.nodes[child.0].parents.push(id);
        }

        id
    }

    /// Lowers a formula tree into the DAG, returning the handle of its root.
    /// Equal subtrees collapse onto one node, `Implies` is rewritten to
    /// `¬lhs ∨ rhs` and `Paren` is skipped.
    pub fn lower(&mut self, e: &Expr) -> NodeId {
        match e {
            Expr::Var(name) => self.intern(NodeKind::Var(name.clone())),

            Expr::Not(rhs) => {
                let child = self.lower(rhs);
                self.intern(NodeKind::Not(child))
            }

            Expr::And(lhs, rhs) => {
                let left = self.lower(lhs);
                let right = self.lower(rhs);
                self.intern(NodeKind::And(left, right))
            }

            Expr::Or(lhs, rhs) => {
                let left = self.lower(lhs);
                let right = self.lower(rhs);
                self.intern(NodeKind::Or(left, right))
            }

            Expr::Implies(lhs, rhs) => {
                let left = self.lower(lhs);
                let not_left = self.intern(NodeKind::Not(left));
                let right = self.lower(rhs);
                self.intern(NodeKind::Or(not_left, right))
            }

            Expr::Paren(rhs) => self.lower(rhs),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn interning_deduplicates() {
        let mut table = NodeTable::new();

        let a1 = table.intern(NodeKind::Var("a".to_string()));
        let a2 = table.intern(NodeKind::Var("a".to_string()));
        let b = table.intern(NodeKind::Var("b".to_string()));

        assert_eq!(a1, a2);
        assert_ne!(a1, b);
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn equal_subtrees_share_a_node() {
        let mut table = NodeTable::new();

        // (a AND b) OR (a AND b)
        let e = (Expr::var("a") & Expr::var("b")) | (Expr::var("a") & Expr::var("b"));
        let root = table.lower(&e);

        // a, b, a AND b, and the OR over the shared conjunction.
        assert_eq!(table.len(), 4);

        match table.node(root).kind {
            NodeKind::Or(left, right) => assert_eq!(left, right),
            ref kind => panic!("unexpected root {kind:?}"),
        }
    }

    #[test]
    fn implication_lowers_to_or_not() {
        let mut table = NodeTable::new();

        let root = table.lower(&Expr::implies(Expr::var("a"), Expr::var("b")));

        let NodeKind::Or(left, right) = table.node(root).kind else {
            panic!("root is not a disjunction");
        };
        assert!(matches!(table.node(left).kind, NodeKind::Not(_)));
        assert_eq!(table.node(right).kind, NodeKind::Var("b".to_string()));
    }

    #[test]
    fn paren_is_transparent() {
        let mut table = NodeTable::new();

        let plain = table.lower(&Expr::var("a"));
        let wrapped = table.lower(&Expr::paren(Expr::var("a")));

        assert_eq!(plain, wrapped);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn parents_are_complete() {
        let mut table = NodeTable::new();

        let root = table.lower(&(Expr::var("a") & !Expr::var("a")));

        for (id, node) in table.iter() {
            let children: Vec<NodeId> = match node.kind {
                NodeKind::Var(_) => vec![],
                NodeKind::Not(child) => vec![child],
                NodeKind::And(left, right) | NodeKind::Or(left, right) => vec![left, right],
            };

            for child in children {
                assert!(
                    table.node(child).parents().contains(&id),
                    "missing back-edge {child:?} -> {id:?}"
                );
            }
        }

        assert!(table.node(root).parents().is_empty());
    }

    #[test]
    fn children_precede_parents() {
        let mut table = NodeTable::new();

        table.lower(&Expr::implies(
            Expr::var("a") & Expr::var("b"),
            !Expr::var("c"),
        ));

        for (id, node) in table.iter() {
            match node.kind {
                NodeKind::Var(_) => {}
                NodeKind::Not(child) => assert!(child < id),
                NodeKind::And(left, right) | NodeKind::Or(left, right) => {
                    assert!(left < id);
                    assert!(right < id);
                }
            }
        }
    }
}
