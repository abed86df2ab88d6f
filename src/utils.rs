use crate::Float;
use ndarray::{s, Array, Array2, ArrayBase, Data, Ix1, Ix2};
use ndarray_rand::rand::Rng;
use ndarray_rand::rand_distr::StandardNormal;
use ndarray_rand::RandomExt;

/// Given an input matrix `blob_centroids`, with shape `(n_blobs, n_features)`,
/// generate `blob_size` data points (a "blob") around each of the blob centroids.
///
/// Each blob is formed by `blob_size` points sampled from a normal distribution centered
/// in the blob centroid with unit variance. Rows `[i * blob_size, (i + 1) * blob_size)` of
/// the output belong to blob `i`.
///
/// Handy to assemble a synthetic, well separated dataset for tests and benchmarks.
pub fn generate_blobs<F: Float>(
    blob_size: usize,
    blob_centroids: &ArrayBase<impl Data<Elem = F>, Ix2>,
    rng: &mut impl Rng,
) -> Array2<F> {
    let (n_centroids, n_features) = blob_centroids.dim();
    let mut blobs = Array2::zeros((n_centroids * blob_size, n_features));

    for (blob_index, blob_centroid) in blob_centroids.rows().into_iter().enumerate() {
        let blob = generate_blob(blob_size, &blob_centroid, rng);

        let indexes = s![blob_index * blob_size..(blob_index + 1) * blob_size, ..];
        blobs.slice_mut(indexes).assign(&blob);
    }
    blobs
}

/// Generate `blob_size` data points around `blob_centroid`, sampled from a unit variance
/// normal distribution.
pub fn generate_blob<F: Float>(
    blob_size: usize,
    blob_centroid: &ArrayBase<impl Data<Elem = F>, Ix1>,
    rng: &mut impl Rng,
) -> Array2<F> {
    let shape = (blob_size, blob_centroid.len());
    let origin_blob: Array2<f64> = Array::random_using(shape, StandardNormal, rng);
    origin_blob.mapv(F::cast) + blob_centroid
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{array, Axis};
    use ndarray_rand::rand::SeedableRng;
    use rand_isaac::Isaac64Rng;

    #[test]
    fn blobs_are_laid_out_in_order() {
        let mut rng = Isaac64Rng::seed_from_u64(42);
        let centroids = array![[0f32, 0.], [100., -100.]];
        let blobs = generate_blobs(200, &centroids, &mut rng);
        assert_eq!(blobs.dim(), (400, 2));

        for (blob, centroid) in blobs
            .axis_chunks_iter(Axis(0), 200)
            .zip(centroids.rows())
        {
            let mean = blob.mean_axis(Axis(0)).unwrap();
            assert!((&mean - &centroid).iter().all(|d| d.abs() < 0.5));
        }
    }
}
