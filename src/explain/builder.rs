//! Greedy threshold-tree construction.
//!
//! # Algorithm
//!
//! Starting from every point, each node:
//!
//! 1. Stops as a leaf if all remaining points share one label.
//! 2. Otherwise computes, per feature, the range of center coordinates over the
//!    labels still present, and asks the [`SplitSearch`] for the split with the
//!    fewest mistakes inside those ranges.
//! 3. Drops every point the split puts on the other side from its own center.
//! 4. Sends the survivors left (`<=`) or right (`>`) and recurses on both sides.
//!
//! A node whose split range holds no observed value becomes a *forced* leaf, and a
//! side that receives no points becomes an *empty* leaf. Neither is an error.
//!
//! The chosen threshold always lies strictly between two present centers, so the
//! smallest-coordinate center's label can only survive on the left and the
//! largest-coordinate center's label only on the right. Every child therefore
//! holds strictly fewer labels than its parent and the recursion is at most
//! `k - 1` levels deep.
//!
//! This is a greedy heuristic. It does not look for the tree with the fewest
//! total mistakes or the smallest depth.

use tracing::{debug, trace, warn};

use super::partition;
use super::split::{ExhaustiveSearch, NodeSamples};
use super::traits::SplitSearch;
use super::tree::{ExplanationTree, LeafKind, NodeKind, Split, TreeNode};
use super::util;
use crate::error::{Error, Result};

/// Builds an [`ExplanationTree`] for a fixed clustering.
///
/// ```rust
/// use thresh::ThresholdTree;
///
/// let data = vec![vec![1.0], vec![2.0], vec![8.0], vec![9.0]];
/// let labels = vec![0, 0, 1, 1];
/// let centers = vec![vec![1.5], vec![8.5]];
///
/// let tree = ThresholdTree::new().fit(&data, &labels, &centers).unwrap();
/// let split = tree.root().split().unwrap();
/// assert_eq!((split.feature, split.threshold), (0, 2.0));
/// assert_eq!(tree.n_leaves(), 2);
/// ```
#[derive(Clone, Debug)]
pub struct ThresholdTree<S = ExhaustiveSearch> {
    search: S,
    parallel: bool,
}

impl ThresholdTree<ExhaustiveSearch> {
    /// Exhaustive split search, built on the calling thread.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for ThresholdTree<ExhaustiveSearch> {
    fn default() -> Self {
        Self {
            search: ExhaustiveSearch,
            parallel: false,
        }
    }
}

impl<S: SplitSearch> ThresholdTree<S> {
    /// Use a different split search strategy.
    pub fn with_search<T: SplitSearch>(self, search: T) -> ThresholdTree<T> {
        ThresholdTree {
            search,
            parallel: self.parallel,
        }
    }

    /// Build the two subtrees of each split concurrently.
    ///
    /// The resulting tree is identical to a serial build.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// The configured split search.
    pub fn search(&self) -> &S {
        &self.search
    }

    /// Build the tree explaining `labels` (with cluster `centers`) over `data`.
    ///
    /// # Errors
    ///
    /// - [`Error::EmptyInput`] if `data` or `centers` is empty.
    /// - [`Error::LengthMismatch`] if there is not one label per point.
    /// - [`Error::InvalidParameter`] if points have zero features.
    /// - [`Error::DimensionMismatch`] if any point or center differs in length
    ///   from the first point.
    /// - [`Error::InvalidLabel`] if a label does not index `centers`.
    /// - [`Error::NonFinite`] if a point or center holds NaN or an infinity.
    pub fn fit(
        &self,
        data: &[Vec<f32>],
        labels: &[usize],
        centers: &[Vec<f32>],
    ) -> Result<ExplanationTree> {
        let dim = validate(data, labels, centers)?;

        let grower = Grower {
            data,
            labels,
            centers,
            dim,
            search: &self.search,
            parallel: self.parallel,
        };
        let nodes = grower.grow((0..data.len()).collect(), 0);
        let tree = ExplanationTree::from_nodes(nodes, dim);

        debug!(
            points = data.len(),
            clusters = centers.len(),
            nodes = tree.len(),
            leaves = tree.n_leaves(),
            depth = tree.depth(),
            total_mistakes = tree.total_mistakes(),
            "threshold tree built"
        );
        Ok(tree)
    }
}

fn validate(data: &[Vec<f32>], labels: &[usize], centers: &[Vec<f32>]) -> Result<usize> {
    if data.is_empty() || centers.is_empty() {
        return Err(Error::EmptyInput);
    }
    if labels.len() != data.len() {
        return Err(Error::LengthMismatch {
            points: data.len(),
            labels: labels.len(),
        });
    }

    let dim = data[0].len();
    if dim == 0 {
        return Err(Error::InvalidParameter {
            name: "dimension",
            message: "must be at least 1",
        });
    }

    for (what, rows) in [("point", data), ("center", centers)] {
        for (index, row) in rows.iter().enumerate() {
            if row.len() != dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    found: row.len(),
                });
            }
            if row.iter().any(|v| !v.is_finite()) {
                return Err(Error::NonFinite { what, index });
            }
        }
    }

    if let Some((index, &label)) = labels
        .iter()
        .enumerate()
        .find(|&(_, &label)| label >= centers.len())
    {
        return Err(Error::InvalidLabel {
            index,
            label,
            n_centers: centers.len(),
        });
    }

    Ok(dim)
}

/// Recursive driver. Every call returns its subtree as a local arena rooted at 0.
struct Grower<'a, S> {
    data: &'a [Vec<f32>],
    labels: &'a [usize],
    centers: &'a [Vec<f32>],
    dim: usize,
    search: &'a S,
    parallel: bool,
}

impl<S: SplitSearch> Grower<'_, S> {
    fn leaf(&self, kind: LeafKind, members: Vec<usize>, depth: usize) -> Vec<TreeNode> {
        let labels = members.iter().map(|&i| self.labels[i]).collect();
        vec![TreeNode {
            id: 0,
            depth,
            kind: NodeKind::Leaf(kind),
            members,
            labels,
        }]
    }

    /// Grow a child, short-circuiting sides that received no points.
    fn child(&self, members: Vec<usize>, depth: usize) -> Vec<TreeNode> {
        if members.is_empty() {
            warn!(depth, "no points reached this branch; emitting empty leaf");
            return self.leaf(LeafKind::Empty, members, depth);
        }
        self.grow(members, depth)
    }

    fn grow(&self, members: Vec<usize>, depth: usize) -> Vec<TreeNode> {
        let present = util::present_labels(self.labels, &members);
        if present.len() <= 1 {
            trace!(depth, points = members.len(), "pure leaf");
            return self.leaf(LeafKind::Pure, members, depth);
        }

        let bounds = util::all_bounds(self.dim, &present, self.centers);
        let node = NodeSamples::new(self.data, self.labels, self.centers, &members);
        let Some(best) = self.search.best_split(&node, &bounds) else {
            warn!(
                depth,
                points = members.len(),
                labels = present.len(),
                "no candidate threshold between centers; emitting forced leaf"
            );
            return self.leaf(LeafKind::Forced, members, depth);
        };

        let kept = partition::filter_mistakes(&node, best.feature, best.threshold);
        let (left, right) = partition::partition(self.data, &kept, best.feature, best.threshold);

        debug!(
            depth,
            feature = best.feature,
            threshold = best.threshold,
            mistakes = best.mistakes,
            points = members.len(),
            kept = kept.len(),
            left = left.len(),
            right = right.len(),
            "split chosen"
        );

        let (left_nodes, right_nodes) = if self.parallel {
            rayon::join(
                || self.child(left, depth + 1),
                || self.child(right, depth + 1),
            )
        } else {
            (self.child(left, depth + 1), self.child(right, depth + 1))
        };

        let left_id = 1;
        let right_id = 1 + left_nodes.len();
        let kept_labels = kept.iter().map(|&i| self.labels[i]).collect();

        let mut nodes = Vec::with_capacity(1 + left_nodes.len() + right_nodes.len());
        nodes.push(TreeNode {
            id: 0,
            depth,
            kind: NodeKind::Internal {
                split: Split {
                    feature: best.feature,
                    threshold: best.threshold,
                },
                mistakes: best.mistakes,
                left: left_id,
                right: right_id,
            },
            members: kept,
            labels: kept_labels,
        });
        nodes.extend(left_nodes.into_iter().map(|n| n.shifted(left_id)));
        nodes.extend(right_nodes.into_iter().map(|n| n.shifted(right_id)));
        nodes
    }
}
