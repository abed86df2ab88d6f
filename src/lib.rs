//! `lloyd` partitions a set of observations into `k` groups with Lloyd's k-means algorithm.
//!
//! Observations are the rows of a 2-dimensional [`ndarray`] matrix. The algorithm is
//! configured through [`KMeansParams`], a builder checked into [`KMeansValidParams`] before
//! any work is done, and fitting returns a [`KMeans`] model holding the centroids, the
//! memberships of the training observations and a few statistics about the run.
//!
//! ## Current state
//!
//! We provide:
//! * random initialisation from distinct observations, or user provided centroids;
//! * the standard assignment/update loop with squared euclidean distances;
//! * several restarts, keeping the one with the lowest inertia;
//! * progress reporting through an [iteration callback](IterationCallback), either
//!   synchronously with [`Fit::fit`] or as an already resolved future with [`Fit::run`].
//!
//! Progress and warnings are emitted as [`tracing`] events, install a subscriber to see them.
//!
//! ```
//! use lloyd::prelude::*;
//! use lloyd::{KMeans, TracingCallback};
//! use ndarray::array;
//!
//! let observations = array![[0., 0.], [0., 1.], [10., 0.], [10., 1.]];
//! let model = KMeans::params()
//!     .cluster_count(2)
//!     .random_init_count(10)
//!     .max_iterations(100)
//!     .notify_count(10)
//!     .iteration_callback(TracingCallback)
//!     .fit(&observations)
//!     .expect("KMeans fitted");
//!
//! assert_eq!(model.centroids().nrows(), 2);
//! assert_eq!(model.inertia(), 1.0);
//! ```

mod dataset;
pub mod error;
mod k_means;
mod param_guard;
pub mod prelude;
mod utils;

pub use dataset::{records_from_rows, validate_records, Float};
pub use k_means::*;
pub use param_guard::{Fit, ParamGuard};
pub use utils::{generate_blob, generate_blobs};
