use super::errors::KMeansError;
use crate::Float;
use ndarray::{Array2, ArrayBase, Axis, Data, Ix2};
use ndarray_rand::rand;
use ndarray_rand::rand::Rng;

/// Specifies centroid initialization algorithm for KMeans.
#[derive(Clone, Debug, PartialEq)]
pub enum KMeansInit<F: Float> {
    /// Pick random points as centroids, without ever picking the same observation twice.
    Random,
    /// Start every run from the given centroids, with shape `(n_clusters, n_features)`.
    /// Restarts are pointless with this strategy since every run is identical.
    Precomputed(Array2<F>),
}

impl<F: Float> KMeansInit<F> {
    /// Runs the chosen initialization routine
    pub(crate) fn run<D: Data<Elem = F>>(
        &self,
        n_clusters: usize,
        observations: &ArrayBase<D, Ix2>,
        rng: &mut impl Rng,
    ) -> Result<Array2<F>, KMeansError> {
        match self {
            Self::Random => random_init(n_clusters, observations, rng),
            Self::Precomputed(centroids) => {
                if centroids.ncols() != observations.ncols() {
                    return Err(KMeansError::CentroidDimension {
                        expected: observations.ncols(),
                        found: centroids.ncols(),
                    });
                }
                Ok(centroids.to_owned())
            }
        }
    }
}

/// Pick `n_clusters` distinct observations, uniformly at random, as initial centroids.
///
/// Observations are sampled by index without replacement, hence there have to be at least
/// `n_clusters` of them. Returns a matrix with shape `(n_clusters, n_features)`.
pub fn random_init<F: Float, D: Data<Elem = F>>(
    n_clusters: usize,
    observations: &ArrayBase<D, Ix2>,
    rng: &mut impl Rng,
) -> Result<Array2<F>, KMeansError> {
    let n_samples = observations.nrows();
    if n_clusters > n_samples {
        return Err(KMeansError::NotEnoughSamples {
            n_samples,
            n_clusters,
        });
    }
    let indices = rand::seq::index::sample(rng, n_samples, n_clusters).into_vec();
    Ok(observations.select(Axis(0), &indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Array};
    use ndarray_rand::rand::SeedableRng;
    use ndarray_rand::rand_distr::Uniform;
    use ndarray_rand::RandomExt;
    use rand_isaac::Isaac64Rng;

    #[test]
    fn centroids_are_distinct_observations() {
        let mut rng = Isaac64Rng::seed_from_u64(42);
        let observations: Array2<f64> =
            Array::random_using((50, 3), Uniform::new(-10., 10.), &mut rng);

        for n_clusters in &[1, 5, 50] {
            let centroids = random_init(*n_clusters, &observations, &mut rng).unwrap();
            assert_eq!(centroids.dim(), (*n_clusters, 3));

            let mut picked: Vec<usize> = centroids
                .rows()
                .into_iter()
                .map(|centroid| {
                    observations
                        .rows()
                        .into_iter()
                        .position(|row| row == centroid)
                        .expect("centroid is not an observation")
                })
                .collect();
            picked.sort_unstable();
            picked.dedup();
            assert_eq!(picked.len(), *n_clusters);
        }
    }

    #[test]
    fn too_many_clusters_fails_fast() {
        let mut rng = Isaac64Rng::seed_from_u64(42);
        let observations = array![[0., 0.], [1., 1.], [2., 2.]];
        let res = random_init(4, &observations, &mut rng);
        assert!(matches!(
            res,
            Err(KMeansError::NotEnoughSamples {
                n_samples: 3,
                n_clusters: 4
            })
        ));
    }

    #[test]
    fn precomputed_centroids_are_checked() {
        let mut rng = Isaac64Rng::seed_from_u64(42);
        let observations = array![[0., 0.], [1., 1.], [2., 2.]];

        let init = KMeansInit::Precomputed(array![[0.5, 0.5], [2., 2.]]);
        assert_eq!(
            init.run(2, &observations, &mut rng).unwrap(),
            array![[0.5, 0.5], [2., 2.]]
        );

        let init = KMeansInit::Precomputed(array![[0.5], [2.]]);
        assert!(matches!(
            init.run(2, &observations, &mut rng),
            Err(KMeansError::CentroidDimension {
                expected: 2,
                found: 1
            })
        ));
    }
}
