//! Threshold trees that explain a clustering.
//!
//! A clustering (k-means, say) assigns every point to its nearest center, which is
//! hard to explain feature by feature. A threshold tree approximates the same
//! assignment with a few axis-aligned questions like `income <= 69`.
//!
//! ## Mistakes
//!
//! For a split `x[i] <= t`, a point is a *mistake* when it and its own cluster
//! center fall on different sides of `t`. The builder picks, at every node, the
//! split with the fewest mistakes, removes the mistaken points from the subtree,
//! and recurses until every branch holds a single cluster.
//!
//! Only thresholds strictly between the smallest and largest center coordinate of
//! the clusters present at a node are considered; anything outside that range
//! leaves every center on one side and separates nothing.
//!
//! ## What this is not
//!
//! The search is greedy, so the tree is not guaranteed to have the fewest possible
//! mistakes or the smallest depth. Splits are binary and axis-aligned, and there is
//! no pruning.
//!
//! ## Usage
//!
//! ```rust
//! use thresh::explain::{FeatureNames, SweepSearch, ThresholdTree};
//!
//! // Output of some clustering step.
//! let data = vec![
//!     vec![1.0, 40.0],
//!     vec![2.0, 42.0],
//!     vec![8.0, 41.0],
//!     vec![9.0, 39.0],
//! ];
//! let labels = vec![0, 0, 1, 1];
//! let centers = vec![vec![1.5, 41.0], vec![8.5, 40.0]];
//!
//! let tree = ThresholdTree::new()
//!     .with_search(SweepSearch)
//!     .fit(&data, &labels, &centers)
//!     .unwrap();
//!
//! assert_eq!(tree.predict(&[1.2, 45.0]).unwrap(), Some(0));
//! assert_eq!(tree.agreement(&data, &labels).unwrap(), 1.0);
//!
//! let names = FeatureNames::new(["spend", "age"]);
//! assert!(tree.to_text(&names).starts_with("|--- spend <= 2"));
//! ```

mod builder;
mod export;
mod partition;
mod split;
mod traits;
mod tree;
mod util;

pub use builder::ThresholdTree;
pub use export::{ConditionView, FeatureNames, NodeView};
pub use partition::{filter_mistakes, partition};
pub use split::{Candidate, ExhaustiveSearch, NodeSamples, SweepSearch};
pub use traits::SplitSearch;
pub use tree::{majority_label, ExplanationTree, LeafKind, NodeId, NodeKind, Split, TreeNode};
pub use util::{all_bounds, center_bounds, is_mistake, mistake, Bounds};
