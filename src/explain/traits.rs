use super::split::{Candidate, NodeSamples};
use super::util::Bounds;

/// Strategy for picking the split at one node.
///
/// Implementations must return the candidate with the fewest mistakes, taking
/// the first one in (ascending feature, ascending value) order on ties, and must
/// only consider observed values strictly inside each feature's [`Bounds`].
/// `None` means no feature has any candidate threshold.
pub trait SplitSearch: Send + Sync {
    /// Find the best `(feature, threshold, mistakes)` for `node`.
    fn best_split(&self, node: &NodeSamples<'_>, bounds: &[Bounds]) -> Option<Candidate>;
}
