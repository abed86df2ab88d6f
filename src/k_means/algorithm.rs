use super::assignment::{assign_clusters, closest_centroid, Clusters};
use super::callback::{CallbackFn, IterationCallback, IterationReport};
use super::errors::{KMeansError, KMeansParamsError};
use super::hyperparams::{KMeansParams, KMeansValidParams};
use super::update::update_centroids;
use crate::dataset::validate_records;
use crate::param_guard::Fit;
use crate::Float;
use ndarray::{Array1, Array2, ArrayBase, ArrayView2, Axis, Data, Ix1, Ix2};
use ndarray_rand::rand::{Rng, SeedableRng};
use rand_isaac::Isaac64Rng;
use tracing::{debug, info, warn};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// Phases of a single k-means run.
///
/// A run starts `Initializing`, moves to `Iterating` once its centroids have been drawn and
/// stays there until it either `Converged` or reached `MaxIterationsReached`. The last two
/// states are terminal.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KMeansState {
    Initializing,
    Iterating,
    Converged,
    MaxIterationsReached,
}

#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Debug, PartialEq)]
/// K-means clustering aims to partition a set of unlabeled observations into clusters,
/// where each observation belongs to the cluster with the nearest mean.
///
/// The mean of the points within a cluster is called *centroid*.
///
/// Given the set of centroids, you can assign an observation to a cluster
/// choosing the nearest centroid.
///
/// We provide an implementation of the _standard algorithm_, also known as
/// Lloyd's algorithm or naive K-means, with several random restarts.
///
/// ## The algorithm
///
/// K-means is an iterative algorithm: it progressively refines the choice of centroids.
///
/// It's guaranteed to converge, even though it might not find the optimal set of centroids
/// (unfortunately it can get stuck in a local minimum, finding the optimal minimum if NP-hard!).
///
/// There are three steps in the standard algorithm:
/// - initialisation step: pick `cluster_count` distinct observations at random;
/// - assignment step: assign each observation to the nearest cluster
///                    (minimum squared euclidean distance between the observation and the
///                    cluster's centroid, ties go to the lowest cluster index);
/// - update step: recompute the centroid of each cluster as the mean of its observations.
///
/// The initialisation step is a one-off, done at the very beginning.
/// Assignment and update are repeated in a loop until convergence is reached (the summed
/// absolute movement of the centroids drops to `tolerance`, zero by default) or
/// we hit `max_iterations`.
///
/// Since the outcome depends on the initial centroids, the whole procedure is repeated
/// `random_init_count` times and the run with the lowest inertia is kept.
///
/// ## Progress reporting
///
/// The iteration callback is invoked inline every `notify_count` iterations of every run
/// and once more, with `clustering_complete` set, for the retained run. The final
/// partition is also available on the fitted model through [`memberships`](KMeans::memberships).
///
/// ## Tutorial
///
/// ```
/// use lloyd::prelude::*;
/// use lloyd::{generate_blobs, IterationReport, KMeans};
/// use ndarray::{array, Axis};
/// use ndarray_rand::rand::SeedableRng;
/// use rand_isaac::Isaac64Rng;
/// use approx::assert_abs_diff_eq;
///
/// // Our random number generator, seeded for reproducibility
/// let mut rng = Isaac64Rng::seed_from_u64(42);
///
/// // `expected_centroids` has shape `(n_centroids, n_features)`
/// // i.e. three points in the 2-dimensional plane
/// let expected_centroids = array![[0., 1.], [-10., 20.], [-1., 10.]];
/// // Let's generate a synthetic dataset: three blobs of observations
/// // (100 points each) centered around our `expected_centroids`
/// let observations = generate_blobs(100, &expected_centroids, &mut rng);
///
/// // Every parameter except `tolerance`, `init_method` and `empty_cluster_strategy`
/// // is mandatory
/// let model = KMeans::params_with_rng(rng)
///     .cluster_count(3)
///     .random_init_count(10)
///     .max_iterations(300)
///     .notify_count(50)
///     .iteration_callback(|report: IterationReport<f64>| {
///         if report.clustering_complete {
///             println!("done after {} iterations", report.iteration);
///         }
///     })
///     .fit(&observations)
///     .expect("KMeans fitted");
/// assert!(model.clustering_complete());
///
/// // Once we found our set of centroids, we can also assign new points to the nearest cluster
/// let new_observation = array![[-9., 20.5]];
/// // Predict returns the **index** of the nearest cluster
/// let memberships = model.predict(&new_observation);
/// // We can retrieve the actual centroid of the closest cluster using `.centroids()`
/// let closest_centroid = &model.centroids().index_axis(Axis(0), memberships[0]);
/// assert_abs_diff_eq!(closest_centroid.to_owned(), &array![-10., 20.], epsilon = 0.5);
/// ```
pub struct KMeans<F: Float> {
    centroids: Array2<F>,
    iteration: u64,
    termination: KMeansState,
    inertia: F,
    memberships: Array1<usize>,
    cluster_sizes: Array1<usize>,
}

impl<F: Float> KMeans<F> {
    pub fn params() -> KMeansParams<F, Isaac64Rng, CallbackFn<F>> {
        KMeansParams::new(Isaac64Rng::seed_from_u64(42))
    }

    pub fn params_with_rng<R: Rng>(rng: R) -> KMeansParams<F, R, CallbackFn<F>> {
        KMeansParams::new(rng)
    }

    /// Return the set of centroids as a 2-dimensional matrix with shape
    /// `(n_centroids, n_features)`.
    pub fn centroids(&self) -> &Array2<F> {
        &self.centroids
    }

    /// Number of iterations performed by the retained run
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    /// Always `true` for a fitted model
    pub fn clustering_complete(&self) -> bool {
        true
    }

    /// Either `Converged` or `MaxIterationsReached`
    pub fn termination(&self) -> KMeansState {
        self.termination
    }

    pub fn has_converged(&self) -> bool {
        self.termination == KMeansState::Converged
    }

    /// Return the sum of squared distances between each training point and the centroid of
    /// its cluster.
    pub fn inertia(&self) -> F {
        self.inertia
    }

    /// Cluster index of every training point, as computed by the last assignment step
    pub fn memberships(&self) -> &Array1<usize> {
        &self.memberships
    }

    /// Return the number of training points belonging to each cluster
    pub fn cluster_sizes(&self) -> &Array1<usize> {
        &self.cluster_sizes
    }

    pub fn n_clusters(&self) -> usize {
        self.centroids.nrows()
    }

    /// Given an input matrix `observations`, with shape `(n_observations, n_features)`,
    /// `predict` returns, for each observation, the index of the closest cluster/centroid.
    ///
    /// You can retrieve the centroid associated to an index using the
    /// [`centroids` method](#method.centroids).
    pub fn predict<D: Data<Elem = F>>(&self, observations: &ArrayBase<D, Ix2>) -> Array1<usize> {
        observations.map_axis(Axis(1), |observation| {
            closest_centroid(&self.centroids, &observation).0
        })
    }

    /// Given one input observation, return the index of its closest cluster
    pub fn predict_one<D: Data<Elem = F>>(&self, observation: &ArrayBase<D, Ix1>) -> usize {
        closest_centroid(&self.centroids, observation).0
    }

    /// Given an input matrix `observations`, with shape `(n_observations, n_features)`,
    /// `transform` returns, for each observation, its squared distance to its centroid.
    pub fn transform<D: Data<Elem = F>>(&self, observations: &ArrayBase<D, Ix2>) -> Array1<F> {
        observations.map_axis(Axis(1), |observation| {
            closest_centroid(&self.centroids, &observation).1
        })
    }
}

/// Working state of one restart, owned by the run and dropped once it is scored.
struct RunState<F> {
    run: usize,
    state: KMeansState,
    iteration: u64,
    centroids: Array2<F>,
    clusters: Clusters,
    centroids_changed: F,
}

impl<F: Float> RunState<F> {
    fn new(run: usize, n_features: usize) -> Self {
        RunState {
            run,
            state: KMeansState::Initializing,
            iteration: 0,
            centroids: Array2::zeros((0, n_features)),
            clusters: Clusters::default(),
            // Anything but zero, nothing has been compared yet
            centroids_changed: F::infinity(),
        }
    }

    fn report(&self, clustering_complete: bool) -> IterationReport<'_, F> {
        IterationReport {
            run: self.run,
            iteration: self.iteration,
            clusters: &self.clusters,
            centroids: self.centroids.view(),
            clustering_complete,
        }
    }
}

impl<F: Float, R: Rng + Clone, C: IterationCallback<F>> KMeansValidParams<F, R, C> {
    fn lloyd_run(
        &self,
        run: usize,
        observations: &ArrayView2<F>,
        rng: &mut R,
    ) -> Result<RunState<F>, KMeansError> {
        let mut run_state = RunState::new(run, observations.ncols());

        loop {
            run_state.state = match run_state.state {
                KMeansState::Initializing => {
                    run_state.centroids =
                        self.init_method()
                            .run(self.cluster_count(), observations, rng)?;
                    KMeansState::Iterating
                }
                KMeansState::Iterating => {
                    let clusters = assign_clusters(observations, &run_state.centroids);
                    let update = update_centroids(
                        observations,
                        &clusters,
                        &run_state.centroids,
                        self.empty_cluster_strategy(),
                        rng,
                    )?;
                    run_state.clusters = clusters;
                    run_state.centroids = update.centroids;
                    run_state.centroids_changed = update.centroids_changed;
                    run_state.iteration += 1;

                    debug!(
                        run,
                        iteration = run_state.iteration,
                        centroids_changed = %run_state.centroids_changed,
                        "k-means iteration complete"
                    );
                    if run_state.iteration % self.notify_count() == 0 {
                        self.iteration_callback()
                            .on_iteration(run_state.report(false));
                    }

                    if run_state.centroids_changed <= self.tolerance() {
                        KMeansState::Converged
                    } else if run_state.iteration >= self.max_iterations() {
                        warn!(
                            run,
                            max_iterations = self.max_iterations(),
                            centroids_changed = %run_state.centroids_changed,
                            "k-means did not converge within iteration limit"
                        );
                        KMeansState::MaxIterationsReached
                    } else {
                        KMeansState::Iterating
                    }
                }
                KMeansState::Converged | KMeansState::MaxIterationsReached => break,
            };
        }

        Ok(run_state)
    }
}

impl<F: Float, R: Rng + Clone, C: IterationCallback<F>, D: Data<Elem = F>>
    Fit<ArrayBase<D, Ix2>, KMeansError> for KMeansValidParams<F, R, C>
{
    type Object = KMeans<F>;

    /// Given an input matrix `observations`, with shape `(n_observations, n_features)`,
    /// `fit` identifies `cluster_count` centroids based on the training data distribution.
    ///
    /// An instance of `KMeans` is returned.
    ///
    fn fit(&self, observations: &ArrayBase<D, Ix2>) -> Result<Self::Object, KMeansError> {
        validate_records(observations)?;
        let observations = observations.view();
        let (n_samples, n_features) = observations.dim();
        if self.cluster_count() > n_samples {
            return Err(KMeansError::NotEnoughSamples {
                n_samples,
                n_clusters: self.cluster_count(),
            });
        }

        info!(
            n_samples,
            n_features,
            cluster_count = self.cluster_count(),
            random_init_count = self.random_init_count(),
            "starting k-means"
        );

        let mut rng = self.rng().clone();
        let mut best: Option<(F, RunState<F>)> = None;

        // We keep the run which minimizes the inertia (defined as the sum of
        // the squared distances of the closest centroid for all observations).
        for run in 0..self.random_init_count() {
            let run_state = self.lloyd_run(run, &observations, &mut rng)?;
            let inertia = run_state
                .clusters
                .inertia(&observations, &run_state.centroids);
            debug!(run, inertia = %inertia, state = ?run_state.state, "k-means run finished");

            let is_better = match &best {
                Some((min_inertia, _)) => inertia < *min_inertia,
                None => true,
            };
            if is_better {
                best = Some((inertia, run_state));
            }
        }

        let (inertia, run_state) =
            best.ok_or(KMeansError::InvalidParams(KMeansParamsError::NRuns))?;

        self.iteration_callback()
            .on_iteration(run_state.report(true));

        info!(
            run = run_state.run,
            iteration = run_state.iteration,
            inertia = %inertia,
            state = ?run_state.state,
            "k-means finished"
        );

        let RunState {
            state,
            iteration,
            centroids,
            clusters,
            ..
        } = run_state;
        Ok(KMeans {
            cluster_sizes: clusters.sizes(),
            memberships: clusters.memberships().to_owned(),
            centroids,
            iteration,
            termination: state,
            inertia,
        })
    }
}
