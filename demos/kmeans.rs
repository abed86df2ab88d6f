use lloyd::prelude::*;
use lloyd::{generate_blobs, KMeans, TracingCallback};
use ndarray::{array, Axis};
use ndarray_rand::rand::SeedableRng;
use rand_isaac::Isaac64Rng;
use tracing_subscriber::EnvFilter;

// A routine K-means task: build a synthetic dataset, fit the algorithm on it
// and print what was found. Run with `RUST_LOG=lloyd=debug` to follow every iteration.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Our random number generator, seeded for reproducibility
    let mut rng = Isaac64Rng::seed_from_u64(42);

    // For each our expected centroids, generate `n` data points around it (a "blob")
    let expected_centroids = array![[10., 10.], [1., 12.], [20., 30.], [-20., 30.],];
    let n = 10000;
    let observations = generate_blobs(n, &expected_centroids, &mut rng);

    // Configure our training algorithm, progress is reported every 5 iterations
    let n_clusters = expected_centroids.len_of(Axis(0));
    let model = KMeans::params_with_rng(rng)
        .cluster_count(n_clusters)
        .random_init_count(5)
        .max_iterations(200)
        .notify_count(5)
        .iteration_callback(TracingCallback)
        .tolerance(1e-5)
        .fit(&observations)
        .expect("KMeans fitted");

    println!(
        "{:?} after {} iterations, inertia {:.3}",
        model.termination(),
        model.iteration(),
        model.inertia()
    );
    for (centroid, size) in model.centroids().rows().into_iter().zip(model.cluster_sizes()) {
        println!("{:>6} observations around {}", size, centroid);
    }
}
