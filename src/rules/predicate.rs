//! Composite predicate trees.
//!
//! `PredicateNode<L>` is either a leaf or an AND/OR node over children.
//! Combining flattens same-operator chains, so `(a & b) & c` is stored as
//! one AND node with three children and a combined node never holds a
//! direct child of its own kind. Evaluation walks children in order and
//! short-circuits.

use std::ops::{BitAnd, BitOr};

use serde::{Deserialize, Serialize};

/// How a combined node joins its children.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Op {
    And,
    Or,
}

/// A leaf or a flattened AND/OR node.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PredicateNode<L> {
    Leaf(L),
    Combine(Op, Vec<PredicateNode<L>>),
}

impl<L> PredicateNode<L> {
    /// Wrap a leaf.
    #[must_use]
    pub fn leaf(leaf: L) -> Self {
        Self::Leaf(leaf)
    }

    /// Join two trees with `op`, flattening same-operator nodes.
    #[must_use]
    pub fn combine(self, op: Op, other: Self) -> Self {
        let mut items = match self {
            Self::Combine(own, items) if own == op => items,
            node => vec![node],
        };
        match other {
            Self::Combine(own, more) if own == op => items.extend(more),
            node => items.push(node),
        }
        Self::Combine(op, items)
    }

    /// AND with another tree.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        self.combine(Op::And, other)
    }

    /// OR with another tree.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        self.combine(Op::Or, other)
    }

    /// AND together every tree; `None` if there are none.
    pub fn all(nodes: impl IntoIterator<Item = Self>) -> Option<Self> {
        nodes.into_iter().reduce(Self::and)
    }

    /// OR together every tree; `None` if there are none.
    pub fn any(nodes: impl IntoIterator<Item = Self>) -> Option<Self> {
        nodes.into_iter().reduce(Self::or)
    }

    /// The operator of a combined node, `None` at a leaf.
    #[must_use]
    pub fn op(&self) -> Option<Op> {
        match self {
            Self::Leaf(_) => None,
            Self::Combine(op, _) => Some(*op),
        }
    }

    /// Direct children of a combined node; empty at a leaf.
    #[must_use]
    pub fn items(&self) -> &[PredicateNode<L>] {
        match self {
            Self::Leaf(_) => &[],
            Self::Combine(_, items) => items,
        }
    }

    /// Evaluate with `check` at every visited leaf, short-circuiting.
    pub fn evaluate<F>(&self, check: &F) -> bool
    where
        F: Fn(&L) -> bool,
    {
        match self {
            Self::Leaf(leaf) => check(leaf),
            Self::Combine(Op::And, items) => items.iter().all(|item| item.evaluate(check)),
            Self::Combine(Op::Or, items) => items.iter().any(|item| item.evaluate(check)),
        }
    }

    /// Indices in `0..len` kept by the tree.
    ///
    /// A leaf keeps the indices `keep` accepts. AND intersects its
    /// children, preserving the first child's order; OR unions them,
    /// dropping duplicates.
    pub fn filter_indices<F>(&self, len: usize, keep: &F) -> Vec<usize>
    where
        F: Fn(&L, usize) -> bool,
    {
        match self {
            Self::Leaf(leaf) => (0..len).filter(|&i| keep(leaf, i)).collect(),
            Self::Combine(Op::And, items) => {
                let mut iter = items.iter();
                let Some(first) = iter.next() else {
                    return Vec::new();
                };
                let mut kept = first.filter_indices(len, keep);
                for item in iter {
                    if kept.is_empty() {
                        break;
                    }
                    let other = item.filter_indices(len, keep);
                    kept.retain(|i| other.contains(i));
                }
                kept
            }
            Self::Combine(Op::Or, items) => {
                let mut kept: Vec<usize> = Vec::new();
                for item in items {
                    for i in item.filter_indices(len, keep) {
                        if !kept.contains(&i) {
                            kept.push(i);
                        }
                    }
                }
                kept
            }
        }
    }

    /// Every leaf, depth first.
    #[must_use]
    pub fn leaves(&self) -> Vec<&L> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a L>) {
        match self {
            Self::Leaf(leaf) => out.push(leaf),
            Self::Combine(_, items) => items.iter().for_each(|item| item.collect_leaves(out)),
        }
    }

    /// Render the tree, describing leaves with `describe`.
    pub fn describe<F>(&self, describe: &F) -> String
    where
        F: Fn(&L) -> String,
    {
        match self {
            Self::Leaf(leaf) => describe(leaf),
            Self::Combine(op, items) => {
                let joiner = match op {
                    Op::And => " and ",
                    Op::Or => " or ",
                };
                items
                    .iter()
                    .map(|item| match item {
                        Self::Leaf(_) => item.describe(describe),
                        Self::Combine(..) => format!("({})", item.describe(describe)),
                    })
                    .collect::<Vec<_>>()
                    .join(joiner)
            }
        }
    }
}

impl<L> BitAnd for PredicateNode<L> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.and(rhs)
    }
}

impl<L> BitOr for PredicateNode<L> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.or(rhs)
    }
}
