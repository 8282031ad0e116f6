use thiserror::Error;

/// Errors returned while building a threshold tree.
///
/// All of these are caller precondition violations and are reported before any
/// split is evaluated. Degenerate inputs that only show up mid-build (an empty
/// partition, a node with no candidate threshold) are not errors; they end the
/// branch in a leaf instead.
#[derive(Debug, Error)]
pub enum Error {
    /// No points or no cluster centers were supplied.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// The label slice does not have one entry per point.
    #[error("length mismatch: {points} points but {labels} labels")]
    LengthMismatch {
        /// Number of points.
        points: usize,
        /// Number of labels.
        labels: usize,
    },

    /// Points or centers have inconsistent dimensionality.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality.
        expected: usize,
        /// Found dimensionality.
        found: usize,
    },

    /// A point's label does not index the center array.
    #[error("point {index} has label {label}, but only {n_centers} centers were given")]
    InvalidLabel {
        /// Index of the offending point.
        index: usize,
        /// The out-of-range label.
        label: usize,
        /// Number of centers.
        n_centers: usize,
    },

    /// A point or center contains NaN or an infinity.
    #[error("non-finite value in {what} {index}")]
    NonFinite {
        /// `"point"` or `"center"`.
        what: &'static str,
        /// Row index of the offending vector.
        index: usize,
    },
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
