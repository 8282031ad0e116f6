//! Presentation hand-off.
//!
//! Nothing here takes part in building the tree. Feature names only annotate
//! splits, and the DOT output is plain text for an external Graphviz renderer.

use std::fmt::Write as _;

use super::tree::{ExplanationTree, NodeId, NodeKind, TreeNode};

/// Human-readable names for feature indices.
///
/// Indices without a name render as `x{index}`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureNames {
    names: Vec<String>,
}

impl FeatureNames {
    /// Names in column order.
    pub fn new<I, T>(names: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Name of `feature`.
    pub fn name(&self, feature: usize) -> String {
        self.names
            .get(feature)
            .cloned()
            .unwrap_or_else(|| format!("x{feature}"))
    }

    /// Number of named features.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no feature is named.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// A split as shown to a reader.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConditionView {
    /// Feature name.
    pub feature: String,
    /// Points with `feature <= threshold` go left.
    pub threshold: f32,
    /// Mistakes recorded when the split was chosen.
    pub mistakes: usize,
}

/// Everything a renderer needs about one node.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeView {
    /// Node id.
    pub id: NodeId,
    /// Whether the node is a leaf.
    pub is_leaf: bool,
    /// Split description, for internal nodes.
    pub condition: Option<ConditionView>,
    /// `(left, right)` child ids, for internal nodes.
    pub children: Option<(NodeId, NodeId)>,
    /// Majority label, for non-empty leaves.
    pub label: Option<usize>,
}

impl NodeView {
    fn of(node: &TreeNode, names: &FeatureNames) -> Self {
        match node.kind {
            NodeKind::Internal {
                split,
                mistakes,
                left,
                right,
            } => Self {
                id: node.id,
                is_leaf: false,
                condition: Some(ConditionView {
                    feature: names.name(split.feature),
                    threshold: split.threshold,
                    mistakes,
                }),
                children: Some((left, right)),
                label: None,
            },
            NodeKind::Leaf(_) => Self {
                id: node.id,
                is_leaf: true,
                condition: None,
                children: None,
                label: node.majority_label(),
            },
        }
    }
}

impl ExplanationTree {
    /// One view per node, in arena order.
    pub fn views(&self, names: &FeatureNames) -> Vec<NodeView> {
        self.nodes()
            .iter()
            .map(|n| NodeView::of(n, names))
            .collect()
    }

    /// Indented rule listing, one line per node.
    ///
    /// ```text
    /// |--- income <= 69
    /// |   |--- cluster 0
    /// |--- income > 69
    /// |   |--- cluster 1
    /// ```
    pub fn to_text(&self, names: &FeatureNames) -> String {
        let mut out = String::new();
        self.write_text(0, 0, names, &mut out);
        out
    }

    fn write_text(&self, id: NodeId, indent: usize, names: &FeatureNames, out: &mut String) {
        let node = &self.nodes()[id];
        let pad = "|   ".repeat(indent);
        match node.kind {
            NodeKind::Internal {
                split, left, right, ..
            } => {
                let name = names.name(split.feature);
                let _ = writeln!(out, "{pad}|--- {name} <= {}", split.threshold);
                self.write_text(left, indent + 1, names, out);
                let _ = writeln!(out, "{pad}|--- {name} > {}", split.threshold);
                self.write_text(right, indent + 1, names, out);
            }
            NodeKind::Leaf(_) => {
                let _ = match node.majority_label() {
                    Some(label) => writeln!(out, "{pad}|--- cluster {label}"),
                    None => writeln!(out, "{pad}|--- (empty)"),
                };
            }
        }
    }

    /// Graphviz DOT source for the tree.
    ///
    /// Internal nodes read `"<name> <= <threshold>\nmistakes: <m>"`, leaves show
    /// their majority cluster, and edges are labelled `True` (left) / `False` (right).
    pub fn to_dot(&self, names: &FeatureNames) -> String {
        let mut out = String::from("digraph {\n    node [shape=circle];\n");
        for view in self.views(names) {
            let label = match (&view.condition, view.label) {
                (Some(c), _) => format!(
                    "{} <= {}\\nmistakes: {}",
                    escape(&c.feature),
                    c.threshold,
                    c.mistakes
                ),
                (None, Some(label)) => label.to_string(),
                (None, None) => "empty".to_string(),
            };
            let _ = writeln!(out, "    {} [label=\"{}\"];", view.id, label);
            if let Some((left, right)) = view.children {
                let _ = writeln!(out, "    {} -> {} [label=\"True\"];", view.id, left);
                let _ = writeln!(out, "    {} -> {} [label=\"False\"];", view.id, right);
            }
        }
        out.push_str("}\n");
        out
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
