//! Records
//!
//! The clustering routines operate on a 2-dimensional matrix of shape
//! `(n_observations, n_features)`. This module holds the floating point bound shared by every
//! routine and the helpers used to build and check such a matrix.
use ndarray::{Array2, ArrayBase, Axis, Data, Ix2, ScalarOperand};
use num_traits::{FromPrimitive, NumAssignOps, NumCast};

use std::fmt;
use std::iter::Sum;
use std::ops::AddAssign;

use crate::error::{Error, Result};

/// Floating point numbers
///
/// This trait bound multiplexes to the most common assumption of floating point number and
/// implement them for 32bit and 64bit floating points.
pub trait Float:
    FromPrimitive
    + num_traits::Float
    + PartialOrd
    + Sync
    + Send
    + Default
    + fmt::Display
    + fmt::Debug
    + Sum
    + NumAssignOps
    + for<'a> AddAssign<&'a Self>
    + ScalarOperand
    + approx::AbsDiffEq<Epsilon = Self>
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}

impl Float for f64 {}

/// Build a record matrix from a sequence of row vectors.
///
/// Every row has to have the same number of features as the first one, otherwise a
/// [`DimensionMismatch`](Error::DimensionMismatch) pointing at the first offending row is
/// returned.
///
/// ```
/// use lloyd::records_from_rows;
///
/// let records = records_from_rows(&[vec![0., 0.], vec![0., 1.], vec![10., 0.]]).unwrap();
/// assert_eq!(records.dim(), (3, 2));
/// ```
pub fn records_from_rows<F: Float>(rows: &[Vec<F>]) -> Result<Array2<F>> {
    let n_features = rows.first().map(Vec::len).unwrap_or(0);
    let mut flat = Vec::with_capacity(rows.len() * n_features);

    for (row, values) in rows.iter().enumerate() {
        if values.len() != n_features {
            return Err(Error::DimensionMismatch {
                row,
                expected: n_features,
                found: values.len(),
            });
        }
        flat.extend_from_slice(values);
    }

    Ok(Array2::from_shape_vec((rows.len(), n_features), flat)?)
}

/// Check that the records can be clustered: at least one feature and only finite values.
pub fn validate_records<F: Float, D: Data<Elem = F>>(records: &ArrayBase<D, Ix2>) -> Result<()> {
    if records.ncols() == 0 {
        return Err(Error::NoFeatures);
    }

    match records
        .axis_iter(Axis(0))
        .position(|row| row.iter().any(|x| !x.is_finite()))
    {
        Some(row) => Err(Error::NonFinite { row }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn rows_are_stacked_in_order() {
        let records = records_from_rows(&[vec![0., 0.], vec![0., 1.], vec![10., 0.]]).unwrap();
        assert_eq!(records, array![[0., 0.], [0., 1.], [10., 0.]]);
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let res = records_from_rows(&[vec![0., 0.], vec![1., 1.], vec![1.]]);
        assert!(matches!(
            res,
            Err(Error::DimensionMismatch {
                row: 2,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn no_rows_gives_empty_records() {
        let records = records_from_rows::<f64>(&[]).unwrap();
        assert_eq!(records.dim(), (0, 0));
    }

    #[test]
    fn validation() {
        assert!(validate_records(&array![[1., 2.], [3., 4.]]).is_ok());
        assert!(matches!(
            validate_records(&Array2::<f32>::zeros((3, 0))),
            Err(Error::NoFeatures)
        ));
        assert!(matches!(
            validate_records(&array![[1., 2.], [3., f64::NAN], [f64::INFINITY, 0.]]),
            Err(Error::NonFinite { row: 1 })
        ));
    }
}
