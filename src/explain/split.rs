//! Split search.
//!
//! At every internal node we look for the axis-aligned split `x[feature] <= threshold`
//! that disagrees with the clustering the least. A point counts as a *mistake* when
//! it lands on the other side of the threshold from its own cluster center.
//!
//! Candidate thresholds are the observed point values on each feature that lie
//! strictly between the smallest and largest center coordinate of the labels still
//! present at the node. Features are scanned in ascending order and values in
//! ascending order; the first candidate with the minimum mistake count wins.
//!
//! Two strategies are provided:
//!
//! - [`ExhaustiveSearch`] re-counts mistakes over every point for every candidate,
//!   `O(D · N²)` per node.
//! - [`SweepSearch`] sorts once per feature and answers each candidate with three
//!   binary searches, `O(D · N log N)` per node. It selects the same split.

use super::traits::SplitSearch;
use super::util::{self, Bounds};

/// The points that reached one node, viewed through the full dataset.
#[derive(Clone, Copy, Debug)]
pub struct NodeSamples<'a> {
    /// All points.
    pub data: &'a [Vec<f32>],
    /// Cluster label of every point.
    pub labels: &'a [usize],
    /// Cluster centers, indexed by label.
    pub centers: &'a [Vec<f32>],
    /// Indices into `data` of the points at this node.
    pub members: &'a [usize],
}

impl<'a> NodeSamples<'a> {
    /// View `members` of a dataset.
    pub fn new(
        data: &'a [Vec<f32>],
        labels: &'a [usize],
        centers: &'a [Vec<f32>],
        members: &'a [usize],
    ) -> Self {
        Self {
            data,
            labels,
            centers,
            members,
        }
    }

    /// Number of points at the node.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Whether no point reached the node.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Center of the cluster point `i` belongs to.
    #[inline]
    pub fn center_of(&self, i: usize) -> &'a [f32] {
        &self.centers[self.labels[i]]
    }

    /// Mistakes the split makes at this node, by a full re-scan.
    pub fn mistakes(&self, feature: usize, threshold: f32) -> usize {
        util::count_mistakes(
            self.data,
            self.labels,
            self.centers,
            self.members,
            feature,
            threshold,
        )
    }

    /// Distinct observed values of `feature` strictly inside `bounds`, ascending.
    pub fn candidate_thresholds(&self, feature: usize, bounds: Bounds) -> Vec<f32> {
        let mut values: Vec<f32> = self
            .members
            .iter()
            .map(|&i| self.data[i][feature])
            .filter(|&v| bounds.contains_strict(v))
            .collect();
        values.sort_by(|a, b| a.total_cmp(b));
        // Equal values always score the same, so only the first copy matters.
        values.dedup();
        values
    }
}

/// A scored split.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Candidate {
    /// Feature index.
    pub feature: usize,
    /// Points with `x[feature] <= threshold` go left.
    pub threshold: f32,
    /// Number of points on the other side from their center.
    pub mistakes: usize,
}

/// Keep the incumbent unless the challenger is strictly better.
fn keep_first_min(best: Option<Candidate>, challenger: Candidate) -> Option<Candidate> {
    match best {
        Some(b) if b.mistakes <= challenger.mistakes => Some(b),
        _ => Some(challenger),
    }
}

/// Naive search: a full mistake re-count for every candidate threshold.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExhaustiveSearch;

impl SplitSearch for ExhaustiveSearch {
    fn best_split(&self, node: &NodeSamples<'_>, bounds: &[Bounds]) -> Option<Candidate> {
        bounds
            .iter()
            .enumerate()
            .flat_map(|(feature, &b)| {
                node.candidate_thresholds(feature, b)
                    .into_iter()
                    .map(move |threshold| (feature, threshold))
            })
            .map(|(feature, threshold)| Candidate {
                feature,
                threshold,
                mistakes: node.mistakes(feature, threshold),
            })
            .fold(None, keep_first_min)
    }
}

/// Sorted-sweep search.
///
/// For a threshold `t`, with `X = #{x <= t}`, `C = #{c <= t}` and
/// `M = #{max(x, c) <= t}` over the node's points and their centers, the
/// mistake count is `(X - M) + (C - M)`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SweepSearch;

impl SweepSearch {
    fn best_on_feature(
        node: &NodeSamples<'_>,
        feature: usize,
        bounds: Bounds,
    ) -> Option<Candidate> {
        let candidates = node.candidate_thresholds(feature, bounds);
        if candidates.is_empty() {
            return None;
        }

        let n = node.len();
        let mut xs = Vec::with_capacity(n);
        let mut cs = Vec::with_capacity(n);
        let mut ms = Vec::with_capacity(n);
        for &i in node.members {
            let x = node.data[i][feature];
            let c = node.center_of(i)[feature];
            xs.push(x);
            cs.push(c);
            ms.push(x.max(c));
        }
        xs.sort_by(|a, b| a.total_cmp(b));
        cs.sort_by(|a, b| a.total_cmp(b));
        ms.sort_by(|a, b| a.total_cmp(b));

        candidates
            .into_iter()
            .map(|t| {
                let x_le = xs.partition_point(|&v| v <= t);
                let c_le = cs.partition_point(|&v| v <= t);
                let both_le = ms.partition_point(|&v| v <= t);
                Candidate {
                    feature,
                    threshold: t,
                    mistakes: x_le + c_le - 2 * both_le,
                }
            })
            .fold(None, keep_first_min)
    }
}

impl SplitSearch for SweepSearch {
    fn best_split(&self, node: &NodeSamples<'_>, bounds: &[Bounds]) -> Option<Candidate> {
        bounds
            .iter()
            .enumerate()
            .filter_map(|(feature, &b)| Self::best_on_feature(node, feature, b))
            .fold(None, keep_first_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds_1d(lower: f32, upper: f32) -> Vec<Bounds> {
        vec![Bounds { lower, upper }]
    }

    #[test]
    fn candidates_are_strictly_inside_and_sorted() {
        let data = vec![vec![9.0], vec![1.0], vec![8.0], vec![2.0], vec![2.0]];
        let labels = vec![1, 0, 1, 0, 0];
        let centers = vec![vec![1.5], vec![8.5]];
        let members: Vec<usize> = (0..data.len()).collect();
        let node = NodeSamples::new(&data, &labels, &centers, &members);

        let c = node.candidate_thresholds(0, Bounds { lower: 1.5, upper: 8.5 });
        assert_eq!(c, vec![2.0, 8.0]);

        let c = node.candidate_thresholds(0, Bounds { lower: 2.0, upper: 8.0 });
        assert!(c.is_empty());
    }

    #[test]
    fn first_minimum_wins_on_ties() {
        // Both 2 and 8 separate perfectly; 2 comes first.
        let data = vec![vec![1.0], vec![2.0], vec![8.0], vec![9.0]];
        let labels = vec![0, 0, 1, 1];
        let centers = vec![vec![1.5], vec![8.5]];
        let members = [0, 1, 2, 3];
        let node = NodeSamples::new(&data, &labels, &centers, &members);

        for best in [
            ExhaustiveSearch.best_split(&node, &bounds_1d(1.5, 8.5)),
            SweepSearch.best_split(&node, &bounds_1d(1.5, 8.5)),
        ] {
            assert_eq!(
                best,
                Some(Candidate {
                    feature: 0,
                    threshold: 2.0,
                    mistakes: 0
                })
            );
        }
    }

    #[test]
    fn lower_feature_wins_ties_across_features() {
        // Both features separate the two clusters perfectly.
        let data = vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![10.0, 10.0], vec![11.0, 11.0]];
        let labels = vec![0, 0, 1, 1];
        let centers = vec![vec![0.5, 0.5], vec![10.5, 10.5]];
        let members = [0, 1, 2, 3];
        let node = NodeSamples::new(&data, &labels, &centers, &members);
        let bounds = vec![
            Bounds { lower: 0.5, upper: 10.5 },
            Bounds { lower: 0.5, upper: 10.5 },
        ];

        let best = ExhaustiveSearch.best_split(&node, &bounds).unwrap();
        assert_eq!(best.feature, 0);
        assert_eq!(best.threshold, 1.0);
        assert_eq!(SweepSearch.best_split(&node, &bounds), Some(best));
    }

    #[test]
    fn picks_the_feature_with_fewer_mistakes() {
        // No feature-0 value lies between the centers; feature 1 separates cleanly.
        let data = vec![
            vec![0.0, 0.0],
            vec![9.0, 1.0],
            vec![1.0, 10.0],
            vec![10.0, 11.0],
        ];
        let labels = vec![0, 0, 1, 1];
        let centers = vec![vec![4.5, 0.5], vec![5.5, 10.5]];
        let members = [0, 1, 2, 3];
        let node = NodeSamples::new(&data, &labels, &centers, &members);
        let bounds = vec![
            Bounds { lower: 4.5, upper: 5.5 },
            Bounds { lower: 0.5, upper: 10.5 },
        ];

        let best = ExhaustiveSearch.best_split(&node, &bounds).unwrap();
        assert_eq!(best.feature, 1);
        assert_eq!(best.threshold, 1.0);
        assert_eq!(best.mistakes, 0);
        assert_eq!(SweepSearch.best_split(&node, &bounds), Some(best));
    }

    #[test]
    fn reports_minimum_mistakes_when_no_clean_split_exists() {
        // Point 1 sits deep inside cluster 1's side.
        let data = vec![vec![0.0], vec![9.0], vec![5.0], vec![10.0]];
        let labels = vec![0, 0, 1, 1];
        let centers = vec![vec![2.0], vec![8.0]];
        let members = [0, 1, 2, 3];
        let node = NodeSamples::new(&data, &labels, &centers, &members);

        // Only candidate inside (2, 8) is 5: point 1 is wrong, point 2 (5 <= 5) is wrong.
        let best = ExhaustiveSearch.best_split(&node, &bounds_1d(2.0, 8.0)).unwrap();
        assert_eq!(best.threshold, 5.0);
        assert_eq!(best.mistakes, 2);
        assert_eq!(SweepSearch.best_split(&node, &bounds_1d(2.0, 8.0)), Some(best));
    }

    #[test]
    fn no_candidate_yields_none() {
        let data = vec![vec![0.0], vec![10.0]];
        let labels = vec![0, 1];
        let centers = vec![vec![3.0], vec![7.0]];
        let members = [0, 1];
        let node = NodeSamples::new(&data, &labels, &centers, &members);

        assert_eq!(ExhaustiveSearch.best_split(&node, &bounds_1d(3.0, 7.0)), None);
        assert_eq!(SweepSearch.best_split(&node, &bounds_1d(3.0, 7.0)), None);
    }
}
