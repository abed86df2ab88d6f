use super::assignment::Clusters;
use super::errors::KMeansError;
use crate::Float;
use ndarray::{Array1, Array2, ArrayBase, Data, Ix2, Zip};
use ndarray_rand::rand::Rng;
#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// What the update step does with a cluster that ended up without members.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EmptyClusterStrategy {
    /// Keep the previous centroid, the cluster does not move during this iteration.
    KeepPrevious,
    /// Move the centroid onto an observation picked uniformly at random.
    Reseed,
    /// Abort the fit with [`KMeansError::EmptyCluster`].
    Fail,
}

impl Default for EmptyClusterStrategy {
    fn default() -> Self {
        Self::KeepPrevious
    }
}

/// Outcome of an update step
#[derive(Clone, Debug, PartialEq)]
pub struct CentroidUpdate<F> {
    /// The new centroids, with shape `(n_clusters, n_features)`
    pub centroids: Array2<F>,
    /// Sum of the absolute coordinate differences between the previous and the new centroids,
    /// over every cluster. Zero means that no centroid moved.
    pub centroids_changed: F,
}

/// Update step: move every centroid to the mean of the observations assigned to it.
///
/// The convergence signal is accumulated over all the clusters, comparing each previous
/// centroid with its replacement. Empty clusters are handled according to `strategy`.
pub fn update_centroids<F: Float>(
    // (n_observations, n_features)
    observations: &ArrayBase<impl Data<Elem = F>, Ix2>,
    clusters: &Clusters,
    // (n_clusters, n_features)
    old_centroids: &ArrayBase<impl Data<Elem = F>, Ix2>,
    strategy: EmptyClusterStrategy,
    rng: &mut impl Rng,
) -> Result<CentroidUpdate<F>, KMeansError> {
    let n_clusters = old_centroids.nrows();
    let mut counts: Array1<usize> = Array1::zeros(n_clusters);
    let mut centroids = Array2::zeros((n_clusters, observations.ncols()));

    Zip::from(observations.rows())
        .and(clusters.memberships())
        .for_each(|observation, &cluster_membership| {
            let mut centroid = centroids.row_mut(cluster_membership);
            centroid += &observation;
            counts[cluster_membership] += 1;
        });

    let mut centroids_changed = F::zero();
    for (cluster, (mut centroid, &count)) in
        centroids.rows_mut().into_iter().zip(&counts).enumerate()
    {
        let old_centroid = old_centroids.row(cluster);
        if count > 0 {
            centroid /= F::cast(count);
        } else {
            match strategy {
                EmptyClusterStrategy::KeepPrevious => centroid.assign(&old_centroid),
                EmptyClusterStrategy::Reseed => {
                    let observation = rng.gen_range(0..observations.nrows());
                    centroid.assign(&observations.row(observation));
                }
                EmptyClusterStrategy::Fail => return Err(KMeansError::EmptyCluster { cluster }),
            }
        }
        centroids_changed += Zip::from(&old_centroid)
            .and(&centroid)
            .fold(F::zero(), |acc, &old, &new| acc + (new - old).abs());
    }

    Ok(CentroidUpdate {
        centroids,
        centroids_changed,
    })
}
