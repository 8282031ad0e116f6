//! Explainable clustering with threshold trees.
//!
//! `thresh` takes the output of a clustering step (points, one label per point and
//! the cluster centers) and builds a small axis-aligned decision tree whose leaves
//! reproduce that assignment as closely as a greedy search can.
//!
//! The primary public API is under [`explain`], which provides:
//! - [`ThresholdTree`], the tree builder, with exhaustive or sorted-sweep split search
//! - [`ExplanationTree`], the result, with routing, agreement and DOT/text listings
//!
//! Computing the clustering itself, loading tabular data and rendering the tree
//! are left to other crates.

#![forbid(unsafe_code)]

pub mod error;
pub mod explain;

pub use error::{Error, Result};
pub use explain::{
    ExhaustiveSearch, ExplanationTree, FeatureNames, LeafKind, NodeView, Split, SplitSearch,
    SweepSearch, ThresholdTree, TreeNode,
};
