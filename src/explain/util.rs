use std::collections::BTreeSet;

/// Range of cluster-center coordinates on one feature.
///
/// Thresholds outside `(lower, upper)` put every present center on the same
/// side, so they can never separate anything.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Smallest center coordinate among present labels.
    pub lower: f32,
    /// Largest center coordinate among present labels.
    pub upper: f32,
}

impl Bounds {
    /// Whether `value` lies strictly inside the range.
    #[inline]
    pub fn contains_strict(&self, value: f32) -> bool {
        self.lower < value && value < self.upper
    }
}

/// Min/max of `centers[label][feature]` over `present`.
///
/// `present` must be non-empty; an empty set yields the inverted range
/// `(+inf, -inf)`, which contains nothing.
pub fn center_bounds(feature: usize, present: &BTreeSet<usize>, centers: &[Vec<f32>]) -> Bounds {
    debug_assert!(!present.is_empty());
    present.iter().fold(
        Bounds {
            lower: f32::INFINITY,
            upper: f32::NEG_INFINITY,
        },
        |b, &label| {
            let c = centers[label][feature];
            Bounds {
                lower: b.lower.min(c),
                upper: b.upper.max(c),
            }
        },
    )
}

/// Bounds for every feature.
pub fn all_bounds(dim: usize, present: &BTreeSet<usize>, centers: &[Vec<f32>]) -> Vec<Bounds> {
    (0..dim)
        .map(|feature| center_bounds(feature, present, centers))
        .collect()
}

/// Whether `point` and `center` fall on different sides of `threshold` on `feature`.
#[inline]
pub fn is_mistake(point: &[f32], center: &[f32], feature: usize, threshold: f32) -> bool {
    (point[feature] <= threshold) != (center[feature] <= threshold)
}

/// The 0/1 form of [`is_mistake`].
#[inline]
pub fn mistake(point: &[f32], center: &[f32], feature: usize, threshold: f32) -> usize {
    usize::from(is_mistake(point, center, feature, threshold))
}

/// Full re-scan of the mistakes a split makes over `members`.
pub(crate) fn count_mistakes(
    data: &[Vec<f32>],
    labels: &[usize],
    centers: &[Vec<f32>],
    members: &[usize],
    feature: usize,
    threshold: f32,
) -> usize {
    members
        .iter()
        .map(|&i| mistake(&data[i], &centers[labels[i]], feature, threshold))
        .sum()
}

/// Distinct labels among `members`, in ascending order.
pub(crate) fn present_labels(labels: &[usize], members: &[usize]) -> BTreeSet<usize> {
    members.iter().map(|&i| labels[i]).collect()
}
