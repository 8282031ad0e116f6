use super::split::NodeSamples;
use super::util;

/// Drop every member that `feature <= threshold` puts on the other side from its
/// own center.
///
/// Survivors keep their original order. Dropped points are gone for the whole
/// subtree.
pub fn filter_mistakes(node: &NodeSamples<'_>, feature: usize, threshold: f32) -> Vec<usize> {
    node.members
        .iter()
        .copied()
        .filter(|&i| !util::is_mistake(&node.data[i], node.center_of(i), feature, threshold))
        .collect()
}

/// Split `members` into `(left, right)` by `x[feature] <= threshold`.
pub fn partition(
    data: &[Vec<f32>],
    members: &[usize],
    feature: usize,
    threshold: f32,
) -> (Vec<usize>, Vec<usize>) {
    members
        .iter()
        .copied()
        .partition(|&i| data[i][feature] <= threshold)
}
