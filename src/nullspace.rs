//! Pseudo-inverse of the Jacobian and the null-space projector built from it.

use nalgebra::linalg::SVD;
use nalgebra::SVector;
use tracing::debug;

use crate::ik_error::IkError;
use crate::kinematic_traits::{JacobianMatrix, Projector, PseudoInverse, TASK_DOF};

/// Singular values below `RCOND * largest singular value` are treated as zero.
/// Same relative cutoff as numpy `pinv`.
pub const RCOND: f64 = 1e-15;

/// Upper bound on SVD iterations. Non-finite values would otherwise never converge.
const MAX_SVD_ITERATIONS: usize = 500;

fn decompose(jacobian: &JacobianMatrix, vectors: bool) -> Result<SVD<f64, nalgebra::U6, nalgebra::U7>, IkError> {
    SVD::try_new(*jacobian, vectors, vectors, f64::EPSILON, MAX_SVD_ITERATIONS)
        .ok_or(IkError::SvdNotConverged)
}

/// Absolute cutoff for the given singular values.
pub(crate) fn cutoff(singular_values: &SVector<f64, TASK_DOF>) -> f64 {
    RCOND * singular_values.max()
}

/// Singular values of the Jacobian, in no particular order.
/// Non-finite input produces NaN values rather than an error.
pub fn singular_values(jacobian: &JacobianMatrix) -> Result<SVector<f64, TASK_DOF>, IkError> {
    if !jacobian.iter().all(|v| v.is_finite()) {
        return Ok(SVector::from_element(f64::NAN));
    }
    Ok(decompose(jacobian, false)?.singular_values)
}

/// Moore-Penrose pseudo-inverse of the Jacobian, computed via singular value decomposition.
/// Singular values under the relative [`RCOND`] cutoff are dropped rather than inverted,
/// so the result stays finite at rank deficiency (but grows large just before it).
pub fn pseudo_inverse(jacobian: &JacobianMatrix) -> Result<PseudoInverse, IkError> {
    if !jacobian.iter().all(|v| v.is_finite()) {
        return Ok(PseudoInverse::from_element(f64::NAN));
    }
    let svd = decompose(jacobian, true)?;
    let eps = cutoff(&svd.singular_values);
    let dropped = svd.singular_values.iter().filter(|&&s| s <= eps).count();
    if dropped > 0 {
        debug!(dropped, cutoff = eps, "Jacobian is rank deficient, dropping singular values");
    }
    svd.pseudo_inverse(eps).map_err(IkError::PseudoInverse)
}

/// The projector `P = I - pinv(J) * J` mapping an arbitrary joint velocity into the subspace
/// that produces zero end-effector velocity. `J * P` vanishes, `P` is idempotent and symmetric.
pub fn nullspace_projector(jacobian: &JacobianMatrix) -> Result<Projector, IkError> {
    let pinv = pseudo_inverse(jacobian)?;
    Ok(Projector::identity() - pinv * jacobian)
}

/// Ratio of the largest to the smallest singular value. Infinite at a singularity.
pub fn condition_number(jacobian: &JacobianMatrix) -> Result<f64, IkError> {
    let sv = singular_values(jacobian)?;
    Ok(sv.max() / sv.min())
}
