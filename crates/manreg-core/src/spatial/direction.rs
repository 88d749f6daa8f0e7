//! Orientation checks for direction and rotation matrices.
//!
//! A direction matrix holds the physical direction of image axis `i` in
//! column `i`. The same checks apply to the linear part of a rigid transform.

use nalgebra::SMatrix;

use super::Matrix3;

/// Check that `m * m^T` is the identity within `tolerance`.
pub fn is_orthogonal<const D: usize>(m: &SMatrix<f64, D, D>, tolerance: f64) -> bool {
    let product = m * m.transpose();
    (0..D).all(|i| {
        (0..D).all(|j| {
            let expected = if i == j { 1.0 } else { 0.0 };
            (product[(i, j)] - expected).abs() <= tolerance
        })
    })
}

/// Check that `m` is orthogonal with determinant +1.
pub fn is_proper_rotation(m: &Matrix3, tolerance: f64) -> bool {
    is_orthogonal(m, tolerance) && (m.determinant() - 1.0).abs() <= tolerance
}

/// Project a 3×3 matrix onto the closest proper rotation (Frobenius norm).
///
/// Uses the polar decomposition `R = U V^T` from the SVD, flipping the axis of
/// the smallest singular value when the result would be a reflection. A
/// matrix whose SVD cannot be computed maps to the identity.
pub fn nearest_rotation(m: &Matrix3) -> Matrix3 {
    let svd = m.svd(true, true);
    let (Some(mut u), Some(v_t)) = (svd.u, svd.v_t) else {
        return Matrix3::identity();
    };

    if (u * v_t).determinant() < 0.0 {
        // Singular values come out sorted, so the last column is the weakest axis.
        let mut last = u.column_mut(2);
        last.neg_mut();
    }
    u * v_t
}
