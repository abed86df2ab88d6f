use super::distance::{sq_dist, squared_distances};
use crate::Float;
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix1, Ix2, Zip};

/// A partition of the observations into clusters.
///
/// It is rebuilt from scratch by every assignment step: `memberships[i]` is the index of the
/// cluster observation `i` belongs to, and each cluster keeps the (ordered) indices of its
/// members. Clusters can be empty.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Clusters {
    memberships: Array1<usize>,
    members: Vec<Vec<usize>>,
}

impl Clusters {
    /// Group observation indices by cluster membership.
    ///
    /// **Panics** if a membership is not lower than `n_clusters`.
    pub fn from_memberships(memberships: Array1<usize>, n_clusters: usize) -> Self {
        let mut members = vec![Vec::new(); n_clusters];
        for (observation, &cluster) in memberships.iter().enumerate() {
            members[cluster].push(observation);
        }
        Self {
            memberships,
            members,
        }
    }

    pub fn n_clusters(&self) -> usize {
        self.members.len()
    }

    /// The cluster index of every observation, with shape `(n_observations)`.
    pub fn memberships(&self) -> &Array1<usize> {
        &self.memberships
    }

    /// Indices of the observations belonging to `cluster`, in increasing order.
    pub fn members(&self, cluster: usize) -> &[usize] {
        &self.members[cluster]
    }

    pub fn iter(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.members.iter().map(Vec::as_slice)
    }

    /// Number of observations in each cluster
    pub fn sizes(&self) -> Array1<usize> {
        self.members.iter().map(Vec::len).collect()
    }

    /// Copy the observations belonging to `cluster` into a matrix of shape
    /// `(n_members, n_features)`.
    pub fn points<F: Float, D: Data<Elem = F>>(
        &self,
        cluster: usize,
        observations: &ArrayBase<D, Ix2>,
    ) -> Array2<F> {
        observations.select(Axis(0), self.members(cluster))
    }

    /// Sum of the squared distances between each observation and the centroid of its cluster.
    pub fn inertia<F: Float>(
        &self,
        observations: &ArrayBase<impl Data<Elem = F>, Ix2>,
        centroids: &ArrayBase<impl Data<Elem = F>, Ix2>,
    ) -> F {
        Zip::from(observations.rows())
            .and(&self.memberships)
            .fold(F::zero(), |acc, observation, &cluster| {
                acc + sq_dist(&observation, &centroids.row(cluster))
            })
    }
}

/// Assignment step: partition the observations by their closest centroid.
///
/// The squared distance of every observation from every centroid is computed first, one
/// centroid at a time. Each observation then goes to the centroid with the smallest distance;
/// ties go to the centroid with the lowest index.
pub fn assign_clusters<F: Float>(
    // (n_observations, n_features)
    observations: &ArrayBase<impl Data<Elem = F>, Ix2>,
    // (n_centroids, n_features)
    centroids: &ArrayBase<impl Data<Elem = F>, Ix2>,
) -> Clusters {
    // (n_centroids, n_observations)
    let mut distances = Array2::zeros((centroids.nrows(), observations.nrows()));
    for (centroid, mut row) in centroids.rows().into_iter().zip(distances.rows_mut()) {
        row.assign(&squared_distances(observations, &centroid));
    }

    let memberships = distances
        .columns()
        .into_iter()
        .map(|column| argmin(column.iter().copied()).0)
        .collect();
    Clusters::from_memberships(memberships, centroids.nrows())
}

/// Given a matrix of centroids with shape (n_centroids, n_features) and an observation,
/// return the index of the closest centroid and its squared distance.
pub(crate) fn closest_centroid<F: Float>(
    // (n_centroids, n_features)
    centroids: &ArrayBase<impl Data<Elem = F>, Ix2>,
    // (n_features)
    observation: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> (usize, F) {
    argmin(
        centroids
            .rows()
            .into_iter()
            .map(|centroid| sq_dist(&centroid, observation)),
    )
}

// Fresh (index, distance) accumulator per call, only a strictly smaller distance wins.
fn argmin<F: Float>(distances: impl IntoIterator<Item = F>) -> (usize, F) {
    distances.into_iter().enumerate().fold(
        (0, F::infinity()),
        |(best_index, best_distance), (index, distance)| {
            if distance < best_distance {
                (index, distance)
            } else {
                (best_index, best_distance)
            }
        },
    )
}
