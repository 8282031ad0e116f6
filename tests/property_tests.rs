use std::collections::BTreeSet;

use proptest::prelude::*;
use thresh::explain::{
    center_bounds, mistake, ExplanationTree, LeafKind, NodeSamples, SweepSearch, ThresholdTree,
};

type Clustering = (Vec<Vec<f32>>, Vec<usize>, Vec<Vec<f32>>);

/// Small integer-valued coordinates so that ties between candidates are common.
fn coord() -> impl Strategy<Value = f32> {
    (-8i32..8).prop_map(|v| v as f32)
}

fn clustering() -> impl Strategy<Value = Clustering> {
    (1usize..4, 1usize..5).prop_flat_map(|(dim, k)| {
        let centers = prop::collection::vec(prop::collection::vec(coord(), dim), k);
        let points = prop::collection::vec(
            (prop::collection::vec(coord(), dim), 0..k),
            1..30,
        );
        (centers, points).prop_map(|(centers, points)| {
            let (data, labels): (Vec<Vec<f32>>, Vec<usize>) = points.into_iter().unzip();
            (data, labels, centers)
        })
    })
}

/// Points that reached each node before its split dropped anything.
fn incoming(tree: &ExplanationTree, data: &[Vec<f32>]) -> Vec<Vec<usize>> {
    let mut out = vec![Vec::new(); tree.len()];
    out[0] = (0..data.len()).collect();
    for node in tree.nodes() {
        if let (Some(split), Some((l, r))) = (node.split(), node.children()) {
            let (left, right): (Vec<usize>, Vec<usize>) = node
                .members
                .iter()
                .copied()
                .partition(|&i| split.goes_left(&data[i]));
            out[l] = left;
            out[r] = right;
        }
    }
    out
}

proptest! {
    #[test]
    fn prop_leaves_are_pure_or_flagged((data, labels, centers) in clustering()) {
        let tree = ThresholdTree::new().fit(&data, &labels, &centers).unwrap();
        for leaf in tree.leaves() {
            let distinct: BTreeSet<usize> = leaf.labels.iter().copied().collect();
            match leaf.leaf_kind().unwrap() {
                LeafKind::Pure => prop_assert_eq!(distinct.len(), 1),
                LeafKind::Empty => prop_assert!(leaf.labels.is_empty()),
                LeafKind::Forced => prop_assert!(distinct.len() > 1),
            }
        }
    }

    #[test]
    fn prop_data_only_shrinks((data, labels, centers) in clustering()) {
        let tree = ThresholdTree::new().fit(&data, &labels, &centers).unwrap();
        let incoming = incoming(&tree, &data);
        for node in tree.nodes() {
            let Some((l, r)) = node.children() else { continue };
            let before = incoming[node.id].len();
            let mistakes = node.mistakes().unwrap();

            prop_assert_eq!(node.members.len(), before - mistakes);
            prop_assert_eq!(incoming[l].len() + incoming[r].len(), node.members.len());

            let after = tree.node(l).unwrap().labels.len() + tree.node(r).unwrap().labels.len();
            prop_assert!(after <= before);
            if mistakes > 0 {
                prop_assert!(after < before);
            }
        }
    }

    #[test]
    fn prop_thresholds_lie_between_centers((data, labels, centers) in clustering()) {
        let tree = ThresholdTree::new().fit(&data, &labels, &centers).unwrap();
        let incoming = incoming(&tree, &data);
        for node in tree.nodes() {
            let Some(split) = node.split() else { continue };
            let present: BTreeSet<usize> = incoming[node.id].iter().map(|&i| labels[i]).collect();
            let b = center_bounds(split.feature, &present, &centers);
            prop_assert!(b.lower < split.threshold && split.threshold < b.upper);
        }
    }

    #[test]
    fn prop_chosen_split_has_fewest_mistakes((data, labels, centers) in clustering()) {
        let tree = ThresholdTree::new().fit(&data, &labels, &centers).unwrap();
        let incoming = incoming(&tree, &data);
        for node in tree.nodes() {
            let Some(best) = node.mistakes() else { continue };
            let members = &incoming[node.id];
            let present: BTreeSet<usize> = members.iter().map(|&i| labels[i]).collect();
            let samples = NodeSamples::new(&data, &labels, &centers, members);
            for feature in 0..tree.dim() {
                let b = center_bounds(feature, &present, &centers);
                for t in samples.candidate_thresholds(feature, b) {
                    prop_assert!(best <= samples.mistakes(feature, t));
                }
            }
        }
    }

    #[test]
    fn prop_survivors_agree_with_their_split((data, labels, centers) in clustering()) {
        let tree = ThresholdTree::new().fit(&data, &labels, &centers).unwrap();
        for node in tree.nodes() {
            let Some(split) = node.split() else { continue };
            for &i in &node.members {
                let m = mistake(&data[i], &centers[labels[i]], split.feature, split.threshold);
                prop_assert_eq!(m, 0);
            }
        }
    }

    #[test]
    fn prop_leaf_members_route_to_their_leaf((data, labels, centers) in clustering()) {
        let tree = ThresholdTree::new().fit(&data, &labels, &centers).unwrap();
        for leaf in tree.leaves() {
            for &i in &leaf.members {
                prop_assert_eq!(tree.leaf_for(&data[i]).unwrap().id, leaf.id);
            }
        }
    }

    #[test]
    fn prop_builds_are_deterministic((data, labels, centers) in clustering()) {
        let a = ThresholdTree::new().fit(&data, &labels, &centers).unwrap();
        let b = ThresholdTree::new().fit(&data, &labels, &centers).unwrap();
        prop_assert_eq!(&a, &b);

        let sweep = ThresholdTree::new()
            .with_search(SweepSearch)
            .fit(&data, &labels, &centers)
            .unwrap();
        prop_assert_eq!(&a, &sweep);

        let parallel = ThresholdTree::new()
            .with_search(SweepSearch)
            .with_parallel(true)
            .fit(&data, &labels, &centers)
            .unwrap();
        prop_assert_eq!(&a, &parallel);
    }
}

#[cfg(feature = "serde")]
#[test]
fn tree_survives_json() {
    let data = vec![vec![1.0, 0.0], vec![2.0, 1.0], vec![8.0, 0.0], vec![9.0, 1.0]];
    let labels = vec![0, 0, 1, 1];
    let centers = vec![vec![1.5, 0.5], vec![8.5, 0.5]];
    let tree = ThresholdTree::new().fit(&data, &labels, &centers).unwrap();

    let json = serde_json::to_string(&tree).unwrap();
    let back: ExplanationTree = serde_json::from_str(&json).unwrap();
    assert_eq!(tree, back);
}
