use super::callback::IterationCallback;
use super::errors::KMeansParamsError;
use super::init::KMeansInit;
use super::update::EmptyClusterStrategy;
use crate::param_guard::ParamGuard;
use crate::Float;
use ndarray_rand::rand::Rng;
use std::fmt;

#[derive(Clone)]
/// The set of hyperparameters that can be specified for the execution of
/// the [K-means algorithm](crate::KMeans).
pub struct KMeansValidParams<F: Float, R: Rng, C> {
    /// The number of clusters we will be looking for in the training dataset.
    cluster_count: usize,
    /// Number of times the k-means algorithm will be run with different centroid seeds.
    random_init_count: usize,
    /// We exit the training loop after `max_iterations` iterations even if the
    /// centroids are still moving.
    max_iterations: u64,
    /// The iteration callback is invoked every `notify_count` iterations.
    notify_count: u64,
    /// Observer notified of the progress of the fit.
    iteration_callback: C,
    /// The training is considered complete once the summed absolute movement of the
    /// centroids during an iteration is lower or equal than `tolerance`.
    tolerance: F,
    /// What happens to clusters left without members.
    empty_cluster: EmptyClusterStrategy,
    /// The initialization strategy used to initialize the centroids.
    init: KMeansInit<F>,
    /// The random number generator
    rng: R,
}

#[derive(Clone)]
/// An helper struct used to construct a set of [valid hyperparameters](KMeansValidParams) for
/// the [K-means algorithm](crate::KMeans) (using the builder pattern).
///
/// `cluster_count`, `random_init_count`, `max_iterations`, `notify_count` and
/// `iteration_callback` are mandatory, checking fails if any of them is left unset.
pub struct KMeansParams<F: Float, R: Rng, C> {
    cluster_count: Option<usize>,
    random_init_count: Option<usize>,
    max_iterations: Option<u64>,
    notify_count: Option<u64>,
    iteration_callback: Option<C>,
    tolerance: F,
    empty_cluster: EmptyClusterStrategy,
    init: KMeansInit<F>,
    rng: R,
}

impl<F: Float, R: Rng, C> KMeansParams<F, R, C> {
    /// `new` lets us configure our training algorithm parameters. Mandatory parameters start
    /// unset, the optional ones default to:
    /// * `tolerance = 0`, i.e. the centroids have to stop moving entirely;
    /// * `empty_cluster = KeepPrevious`;
    /// * `init = Random`.
    pub fn new(rng: R) -> Self {
        Self {
            cluster_count: None,
            random_init_count: None,
            max_iterations: None,
            notify_count: None,
            iteration_callback: None,
            tolerance: F::zero(),
            empty_cluster: EmptyClusterStrategy::default(),
            init: KMeansInit::Random,
            rng,
        }
    }

    /// Set the number of clusters we will be looking for
    pub fn cluster_count(mut self, cluster_count: usize) -> Self {
        self.cluster_count = Some(cluster_count);
        self
    }

    /// Set the number of restarts.
    ///
    /// Every restart draws new initial centroids and runs until it stops; the final result is
    /// the restart with the lowest inertia (sum of squared distances of the observations from
    /// the centroid of their cluster).
    pub fn random_init_count(mut self, random_init_count: usize) -> Self {
        self.random_init_count = Some(random_init_count);
        self
    }

    /// Set the maximum number of iterations of each restart
    pub fn max_iterations(mut self, max_iterations: u64) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    /// Set how many iterations separate two progress notifications
    pub fn notify_count(mut self, notify_count: u64) -> Self {
        self.notify_count = Some(notify_count);
        self
    }

    /// Set the observer notified of the progress of the fit
    pub fn iteration_callback<C2: IterationCallback<F>>(
        self,
        iteration_callback: C2,
    ) -> KMeansParams<F, R, C2> {
        KMeansParams {
            cluster_count: self.cluster_count,
            random_init_count: self.random_init_count,
            max_iterations: self.max_iterations,
            notify_count: self.notify_count,
            iteration_callback: Some(iteration_callback),
            tolerance: self.tolerance,
            empty_cluster: self.empty_cluster,
            init: self.init,
            rng: self.rng,
        }
    }

    /// Change the value of `tolerance`
    pub fn tolerance(mut self, tolerance: F) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Change what happens to clusters left without members
    pub fn empty_cluster_strategy(mut self, empty_cluster: EmptyClusterStrategy) -> Self {
        self.empty_cluster = empty_cluster;
        self
    }

    /// Change the value of `init`
    pub fn init_method(mut self, init: KMeansInit<F>) -> Self {
        self.init = init;
        self
    }
}

impl<F: Float, R: Rng, C> ParamGuard for KMeansParams<F, R, C> {
    type Checked = KMeansValidParams<F, R, C>;
    type Error = KMeansParamsError;

    fn verify(&self) -> Result<(), Self::Error> {
        let cluster_count = self
            .cluster_count
            .ok_or(KMeansParamsError::Missing("cluster_count"))?;
        let random_init_count = self
            .random_init_count
            .ok_or(KMeansParamsError::Missing("random_init_count"))?;
        let max_iterations = self
            .max_iterations
            .ok_or(KMeansParamsError::Missing("max_iterations"))?;
        let notify_count = self
            .notify_count
            .ok_or(KMeansParamsError::Missing("notify_count"))?;
        if self.iteration_callback.is_none() {
            return Err(KMeansParamsError::Missing("iteration_callback"));
        }

        if cluster_count == 0 {
            Err(KMeansParamsError::NClusters)
        } else if random_init_count == 0 {
            Err(KMeansParamsError::NRuns)
        } else if max_iterations == 0 {
            Err(KMeansParamsError::MaxIterations)
        } else if notify_count == 0 {
            Err(KMeansParamsError::NotifyCount)
        } else if self.tolerance.is_nan() || self.tolerance < F::zero() {
            Err(KMeansParamsError::Tolerance)
        } else {
            match &self.init {
                KMeansInit::Precomputed(centroids) if centroids.nrows() != cluster_count => {
                    Err(KMeansParamsError::PrecomputedShape {
                        expected: cluster_count,
                        found: centroids.nrows(),
                    })
                }
                _ => Ok(()),
            }
        }
    }

    fn check(self) -> Result<Self::Checked, Self::Error> {
        self.verify()?;
        match self {
            KMeansParams {
                cluster_count: Some(cluster_count),
                random_init_count: Some(random_init_count),
                max_iterations: Some(max_iterations),
                notify_count: Some(notify_count),
                iteration_callback: Some(iteration_callback),
                tolerance,
                empty_cluster,
                init,
                rng,
            } => Ok(KMeansValidParams {
                cluster_count,
                random_init_count,
                max_iterations,
                notify_count,
                iteration_callback,
                tolerance,
                empty_cluster,
                init,
                rng,
            }),
            _ => Err(KMeansParamsError::Missing("iteration_callback")),
        }
    }
}

impl<F: Float, R: Rng, C> KMeansValidParams<F, R, C> {
    /// The number of clusters we will be looking for in the training dataset.
    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// The final result is the best output of `random_init_count` restarts in terms of inertia.
    pub fn random_init_count(&self) -> usize {
        self.random_init_count
    }

    /// Upper bound on the number of iterations of each restart.
    pub fn max_iterations(&self) -> u64 {
        self.max_iterations
    }

    /// Number of iterations between two progress notifications.
    pub fn notify_count(&self) -> u64 {
        self.notify_count
    }

    pub fn iteration_callback(&self) -> &C {
        &self.iteration_callback
    }

    /// Largest summed centroid movement still considered as converged.
    pub fn tolerance(&self) -> F {
        self.tolerance
    }

    pub fn empty_cluster_strategy(&self) -> EmptyClusterStrategy {
        self.empty_cluster
    }

    /// Cluster initialization strategy
    pub fn init_method(&self) -> &KMeansInit<F> {
        &self.init
    }

    /// Returns the random generator
    pub fn rng(&self) -> &R {
        &self.rng
    }
}

impl<F: Float, R: Rng + fmt::Debug, C> fmt::Debug for KMeansParams<F, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KMeansParams")
            .field("cluster_count", &self.cluster_count)
            .field("random_init_count", &self.random_init_count)
            .field("max_iterations", &self.max_iterations)
            .field("notify_count", &self.notify_count)
            .field("iteration_callback", &self.iteration_callback.is_some())
            .field("tolerance", &self.tolerance)
            .field("empty_cluster", &self.empty_cluster)
            .field("init", &self.init)
            .field("rng", &self.rng)
            .finish()
    }
}

impl<F: Float, R: Rng + fmt::Debug, C> fmt::Debug for KMeansValidParams<F, R, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KMeansValidParams")
            .field("cluster_count", &self.cluster_count)
            .field("random_init_count", &self.random_init_count)
            .field("max_iterations", &self.max_iterations)
            .field("notify_count", &self.notify_count)
            .field("tolerance", &self.tolerance)
            .field("empty_cluster", &self.empty_cluster)
            .field("init", &self.init)
            .field("rng", &self.rng)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        IterationReport, KMeans, KMeansInit, KMeansParams, KMeansParamsError, KMeansValidParams,
        ParamGuard, TracingCallback,
    };
    use ndarray::array;
    use rand_isaac::Isaac64Rng;

    fn complete() -> KMeansParams<f64, Isaac64Rng, TracingCallback> {
        KMeans::params()
            .cluster_count(2)
            .random_init_count(1)
            .max_iterations(100)
            .notify_count(10)
            .iteration_callback(TracingCallback)
    }

    #[test]
    fn autotraits() {
        fn has_autotraits<T: Send + Sync + Sized + Unpin>() {}
        has_autotraits::<KMeansParams<f64, Isaac64Rng, TracingCallback>>();
        has_autotraits::<KMeansValidParams<f64, Isaac64Rng, TracingCallback>>();
    }

    #[test]
    fn complete_params_are_valid() {
        let params = complete().tolerance(1e-3).check().unwrap();
        assert_eq!(params.cluster_count(), 2);
        assert_eq!(params.random_init_count(), 1);
        assert_eq!(params.max_iterations(), 100);
        assert_eq!(params.notify_count(), 10);
        assert_eq!(params.tolerance(), 1e-3);
        assert_eq!(params.init_method(), &KMeansInit::Random);
    }

    #[test]
    fn missing_parameters_are_reported() {
        let res = KMeans::<f64>::params()
            .random_init_count(1)
            .max_iterations(1)
            .notify_count(1)
            .iteration_callback(TracingCallback)
            .check();
        assert!(matches!(res, Err(KMeansParamsError::Missing("cluster_count"))));

        let res = KMeans::<f64>::params()
            .cluster_count(1)
            .max_iterations(1)
            .notify_count(1)
            .iteration_callback(TracingCallback)
            .check();
        assert!(matches!(
            res,
            Err(KMeansParamsError::Missing("random_init_count"))
        ));

        let res = KMeans::<f64>::params()
            .cluster_count(1)
            .random_init_count(1)
            .notify_count(1)
            .iteration_callback(TracingCallback)
            .check();
        assert!(matches!(res, Err(KMeansParamsError::Missing("max_iterations"))));

        let res = KMeans::<f64>::params()
            .cluster_count(1)
            .random_init_count(1)
            .max_iterations(1)
            .iteration_callback(TracingCallback)
            .check();
        assert!(matches!(res, Err(KMeansParamsError::Missing("notify_count"))));

        let res = KMeans::<f64>::params()
            .cluster_count(1)
            .random_init_count(1)
            .max_iterations(1)
            .notify_count(1)
            .check();
        assert!(matches!(
            res,
            Err(KMeansParamsError::Missing("iteration_callback"))
        ));
    }

    #[test]
    fn cluster_count_cannot_be_zero() {
        let res = complete().cluster_count(0).check();
        assert!(matches!(res, Err(KMeansParamsError::NClusters)))
    }

    #[test]
    fn random_init_count_cannot_be_zero() {
        let res = complete().random_init_count(0).check();
        assert!(matches!(res, Err(KMeansParamsError::NRuns)))
    }

    #[test]
    fn max_iterations_cannot_be_zero() {
        let res = complete().max_iterations(0).check();
        assert!(matches!(res, Err(KMeansParamsError::MaxIterations)))
    }

    #[test]
    fn notify_count_cannot_be_zero() {
        let res = complete().notify_count(0).check();
        assert!(matches!(res, Err(KMeansParamsError::NotifyCount)))
    }

    #[test]
    fn tolerance_has_to_be_non_negative() {
        assert!(complete().tolerance(0.).check().is_ok());
        let res = complete().tolerance(-1.).check();
        assert!(matches!(res, Err(KMeansParamsError::Tolerance)));
        let res = complete().tolerance(f64::NAN).check();
        assert!(matches!(res, Err(KMeansParamsError::Tolerance)));
    }

    #[test]
    fn precomputed_centroids_need_one_row_per_cluster() {
        let res = complete()
            .init_method(KMeansInit::Precomputed(array![[0., 0.], [1., 1.], [2., 2.]]))
            .check();
        assert!(matches!(
            res,
            Err(KMeansParamsError::PrecomputedShape {
                expected: 2,
                found: 3
            })
        ));
    }

    #[test]
    fn verify_does_not_consume() {
        let params = KMeans::<f32>::params()
            .cluster_count(3)
            .random_init_count(2)
            .max_iterations(5)
            .notify_count(5)
            .iteration_callback(|_: IterationReport<f32>| {});
        assert!(params.verify().is_ok());
        assert!(params.check().is_ok());
    }
}
