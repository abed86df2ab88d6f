use crate::Float;
use ndarray::{Array1, ArrayBase, Axis, Data, Ix1, Ix2, Zip};

/// Squared euclidean distance between two points of equal dimension.
///
/// **Panics** if `a` and `b` do not have the same length.
pub fn sq_dist<F: Float>(
    a: &ArrayBase<impl Data<Elem = F>, Ix1>,
    b: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> F {
    Zip::from(a).and(b).fold(F::zero(), |acc, &a, &b| {
        let diff = b - a;
        acc + diff * diff
    })
}

/// Given a matrix of observations with shape `(n_observations, n_features)` and a single
/// centroid with shape `(n_features)`, return the squared euclidean distance of every
/// observation from the centroid.
///
/// `distances[i] == sum_d (centroid[d] - observations[[i, d]])^2`
pub fn squared_distances<F: Float>(
    // (n_observations, n_features)
    observations: &ArrayBase<impl Data<Elem = F>, Ix2>,
    // (n_features)
    centroid: &ArrayBase<impl Data<Elem = F>, Ix1>,
) -> Array1<F> {
    observations.map_axis(Axis(1), |observation| sq_dist(centroid, &observation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    #[test]
    fn oracle_distances() {
        let observations = array![[3.0, 4.0], [1.0, 3.0], [25.0, 15.0]];

        assert_abs_diff_eq!(
            squared_distances(&observations, &array![0.0, 1.0]),
            array![18.0, 5.0, 821.0]
        );
        assert_abs_diff_eq!(
            squared_distances(&observations, &array![40.0, 10.0]),
            array![1405.0, 1570.0, 250.0]
        );
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_self() {
        let a = array![1.5f32, -2.0, 7.25];
        let b = array![0.5f32, 2.0, 7.25];

        assert_abs_diff_eq!(sq_dist(&a, &b), 17.0);
        assert_abs_diff_eq!(sq_dist(&a, &b), sq_dist(&b, &a));
        assert_abs_diff_eq!(sq_dist(&a, &a), 0.0);
    }

    #[test]
    fn one_distance_per_observation() {
        let observations = ndarray::Array2::<f64>::ones((7, 3));
        let distances = squared_distances(&observations, &array![1.0, 1.0, 3.0]);

        assert_eq!(distances.len(), 7);
        assert!(distances.iter().all(|&d| d == 4.0));
    }
}
