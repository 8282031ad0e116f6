//! The threshold tree.
//!
//! Nodes live in a flat arena in depth-first order (parent, then the whole left
//! subtree, then the whole right subtree) and refer to their children by index.
//! The root is always node 0.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Index of a node in [`ExplanationTree::nodes`].
pub type NodeId = usize;

/// An axis-aligned split: `x[feature] <= threshold` goes left.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Split {
    /// Feature index.
    pub feature: usize,
    /// Threshold value.
    pub threshold: f32,
}

impl Split {
    /// Whether `point` is routed to the left child.
    #[inline]
    pub fn goes_left(&self, point: &[f32]) -> bool {
        point[self.feature] <= self.threshold
    }
}

/// Why a branch stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LeafKind {
    /// Every remaining point has the same label.
    Pure,
    /// No point survived to this branch.
    Empty,
    /// Several labels remain but no feature has a candidate threshold.
    Forced,
}

/// Leaf or internal node payload.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Terminal node.
    Leaf(LeafKind),
    /// Split node with exactly two children.
    Internal {
        /// The chosen split.
        split: Split,
        /// Mistakes the split made when it was chosen.
        mistakes: usize,
        /// Child for `x[feature] <= threshold`.
        left: NodeId,
        /// Child for `x[feature] > threshold`.
        right: NodeId,
    },
}

/// One region of feature space.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TreeNode {
    /// Position in the arena.
    pub id: NodeId,
    /// Distance from the root.
    pub depth: usize,
    /// Leaf or split.
    pub kind: NodeKind,
    /// Indices of the input points kept at this node.
    ///
    /// For internal nodes this is the set left after dropping the split's mistakes.
    pub members: Vec<usize>,
    /// Labels of `members`, in the same order.
    pub labels: Vec<usize>,
}

impl TreeNode {
    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    /// The leaf kind, for leaves.
    pub fn leaf_kind(&self) -> Option<LeafKind> {
        match self.kind {
            NodeKind::Leaf(kind) => Some(kind),
            NodeKind::Internal { .. } => None,
        }
    }

    /// The split, for internal nodes.
    pub fn split(&self) -> Option<Split> {
        match self.kind {
            NodeKind::Internal { split, .. } => Some(split),
            NodeKind::Leaf(_) => None,
        }
    }

    /// Mistakes recorded when the split was chosen, for internal nodes.
    pub fn mistakes(&self) -> Option<usize> {
        match self.kind {
            NodeKind::Internal { mistakes, .. } => Some(mistakes),
            NodeKind::Leaf(_) => None,
        }
    }

    /// `(left, right)` child ids, for internal nodes.
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        match self.kind {
            NodeKind::Internal { left, right, .. } => Some((left, right)),
            NodeKind::Leaf(_) => None,
        }
    }

    /// Most frequent label at this node (see [`majority_label`]).
    pub fn majority_label(&self) -> Option<usize> {
        majority_label(&self.labels)
    }

    /// Move the node (and its child links) `by` slots down the arena.
    pub(crate) fn shifted(mut self, by: usize) -> Self {
        self.id += by;
        if let NodeKind::Internal { left, right, .. } = &mut self.kind {
            *left += by;
            *right += by;
        }
        self
    }
}

/// Most frequent label; ties go to the smallest label. `None` for no labels.
pub fn majority_label(labels: &[usize]) -> Option<usize> {
    let mut counts: BTreeMap<usize, usize> = BTreeMap::new();
    for &label in labels {
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .fold(None, |best, (label, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((label, count)),
        })
        .map(|(label, _)| label)
}

/// A finished threshold tree.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExplanationTree {
    nodes: Vec<TreeNode>,
    dim: usize,
}

impl ExplanationTree {
    pub(crate) fn from_nodes(nodes: Vec<TreeNode>, dim: usize) -> Self {
        debug_assert!(!nodes.is_empty());
        Self { nodes, dim }
    }

    /// The root node.
    pub fn root(&self) -> &TreeNode {
        &self.nodes[0]
    }

    /// All nodes, depth-first.
    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`: a built tree has at least a root.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Feature dimensionality the tree was built on.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Leaves, depth-first (left to right).
    pub fn leaves(&self) -> impl Iterator<Item = &TreeNode> + '_ {
        self.nodes.iter().filter(|n| n.is_leaf())
    }

    /// Number of leaves.
    pub fn n_leaves(&self) -> usize {
        self.leaves().count()
    }

    /// Depth of the deepest node (a lone root has depth 0).
    pub fn depth(&self) -> usize {
        self.nodes.iter().map(|n| n.depth).max().unwrap_or(0)
    }

    /// Sum of the mistake counts recorded at internal nodes.
    pub fn total_mistakes(&self) -> usize {
        self.nodes.iter().filter_map(TreeNode::mistakes).sum()
    }

    fn check_dim(&self, point: &[f32]) -> Result<()> {
        if point.len() != self.dim {
            return Err(Error::DimensionMismatch {
                expected: self.dim,
                found: point.len(),
            });
        }
        Ok(())
    }

    /// Node ids visited when routing `point` from the root to a leaf.
    pub fn decision_path(&self, point: &[f32]) -> Result<Vec<NodeId>> {
        self.check_dim(point)?;
        let mut path = Vec::with_capacity(self.depth() + 1);
        let mut id = 0;
        loop {
            path.push(id);
            match self.nodes[id].kind {
                NodeKind::Leaf(_) => return Ok(path),
                NodeKind::Internal {
                    split, left, right, ..
                } => {
                    id = if split.goes_left(point) { left } else { right };
                }
            }
        }
    }

    /// The leaf `point` ends up in.
    pub fn leaf_for(&self, point: &[f32]) -> Result<&TreeNode> {
        let path = self.decision_path(point)?;
        let last = path.last().copied().unwrap_or(0);
        Ok(&self.nodes[last])
    }

    /// Cluster the tree assigns to `point`: the majority label of its leaf.
    ///
    /// `None` when the point lands in an empty leaf.
    pub fn predict(&self, point: &[f32]) -> Result<Option<usize>> {
        Ok(self.leaf_for(point)?.majority_label())
    }

    /// [`predict`](Self::predict) for every point.
    pub fn predict_many(&self, points: &[Vec<f32>]) -> Result<Vec<Option<usize>>> {
        points.iter().map(|p| self.predict(p)).collect()
    }

    /// Fraction of `points` whose predicted cluster equals their label.
    pub fn agreement(&self, points: &[Vec<f32>], labels: &[usize]) -> Result<f32> {
        if points.is_empty() {
            return Err(Error::EmptyInput);
        }
        if points.len() != labels.len() {
            return Err(Error::LengthMismatch {
                points: points.len(),
                labels: labels.len(),
            });
        }
        let mut hits = 0usize;
        for (point, &label) in points.iter().zip(labels) {
            if self.predict(point)? == Some(label) {
                hits += 1;
            }
        }
        Ok(hits as f32 / points.len() as f32)
    }
}
