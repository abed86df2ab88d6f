use thiserror::Error;

/// An error when fitting with an invalid or missing hyperparameter
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KMeansParamsError {
    #[error("required parameter `{0}` was not set")]
    Missing(&'static str),
    #[error("cluster_count cannot be 0")]
    NClusters,
    #[error("random_init_count cannot be 0")]
    NRuns,
    #[error("max_iterations cannot be 0")]
    MaxIterations,
    #[error("notify_count cannot be 0")]
    NotifyCount,
    #[error("tolerance must be a non-negative number")]
    Tolerance,
    #[error("precomputed centroids have {found} rows, expected {expected}")]
    PrecomputedShape { expected: usize, found: usize },
}

/// An error when modeling a KMeans algorithm
#[derive(Error, Debug, Clone)]
pub enum KMeansError {
    /// When any of the hyperparameters are missing or set to the wrong value
    #[error("Invalid hyperparameter: {0}")]
    InvalidParams(#[from] KMeansParamsError),
    /// When there are fewer observations than requested clusters
    #[error("Fitting failed: {n_samples} observations cannot be split into {n_clusters} clusters")]
    NotEnoughSamples { n_samples: usize, n_clusters: usize },
    /// When a cluster lost all of its members and the empty cluster strategy is `Fail`
    #[error("Fitting failed: cluster {cluster} has no members")]
    EmptyCluster { cluster: usize },
    /// When precomputed centroids and observations disagree on the number of features
    #[error("Fitting failed: centroids have {found} features, observations have {expected}")]
    CentroidDimension { expected: usize, found: usize },
    #[error(transparent)]
    LloydError(#[from] crate::error::Error),
}
