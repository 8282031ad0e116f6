//! Explain a customer segmentation with a threshold tree.
//!
//! Run with `RUST_LOG=thresh=debug` to see every split decision.

use thresh::{FeatureNames, SweepSearch, ThresholdTree};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // (genre, age, annual income k$, spending score) and a segment from some clustering run.
    let rows: Vec<(Vec<f32>, usize)> = vec![
        (vec![0.0, 19.0, 15.0, 39.0], 0),
        (vec![0.0, 21.0, 15.0, 81.0], 1),
        (vec![1.0, 20.0, 16.0, 6.0], 0),
        (vec![1.0, 23.0, 16.0, 77.0], 1),
        (vec![1.0, 31.0, 17.0, 40.0], 0),
        (vec![1.0, 22.0, 17.0, 76.0], 1),
        (vec![1.0, 35.0, 18.0, 6.0], 0),
        (vec![1.0, 23.0, 18.0, 94.0], 1),
        (vec![0.0, 40.0, 60.0, 50.0], 2),
        (vec![1.0, 47.0, 60.0, 47.0], 2),
        (vec![0.0, 53.0, 61.0, 55.0], 2),
        (vec![1.0, 50.0, 62.0, 46.0], 2),
        (vec![1.0, 30.0, 78.0, 73.0], 3),
        (vec![0.0, 32.0, 78.0, 90.0], 3),
        (vec![1.0, 35.0, 79.0, 83.0], 3),
        (vec![0.0, 29.0, 81.0, 88.0], 3),
        (vec![0.0, 41.0, 79.0, 17.0], 4),
        (vec![1.0, 38.0, 81.0, 5.0], 4),
        (vec![0.0, 47.0, 85.0, 26.0], 4),
        (vec![1.0, 36.0, 87.0, 27.0], 4),
    ];
    let (data, labels): (Vec<Vec<f32>>, Vec<usize>) = rows.into_iter().unzip();

    // k-means centers are the per-segment means.
    let k = 5;
    let dim = data[0].len();
    let mut centers = vec![vec![0.0f32; dim]; k];
    let mut sizes = vec![0usize; k];
    for (point, &label) in data.iter().zip(&labels) {
        sizes[label] += 1;
        for (c, x) in centers[label].iter_mut().zip(point) {
            *c += x;
        }
    }
    for (center, &size) in centers.iter_mut().zip(&sizes) {
        for c in center.iter_mut() {
            *c /= size as f32;
        }
    }

    let tree = match ThresholdTree::new()
        .with_search(SweepSearch)
        .fit(&data, &labels, &centers)
    {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("failed to build tree: {e}");
            std::process::exit(1);
        }
    };

    let names = FeatureNames::new(["Genre", "Age", "Annual Income (k$)", "Spending Score (1-100)"]);

    println!("=== Threshold tree ({} leaves, depth {}) ===", tree.n_leaves(), tree.depth());
    print!("{}", tree.to_text(&names));
    println!("total mistakes: {}", tree.total_mistakes());
    if let Ok(score) = tree.agreement(&data, &labels) {
        println!("agreement with clustering: {:.1}%", score * 100.0);
    }

    println!("\n=== Graphviz ===");
    print!("{}", tree.to_dot(&names));
}
