//! Scalar performance criteria over joint configurations, used to bias the redundant motion.
//!
//! Both objectives are to be maximized. Gradients come from a [`NumericalGradient`] unless
//! an objective overrides [`Objective::gradient`] with a closed form.

use tracing::debug;

use crate::gradient::NumericalGradient;
use crate::ik_error::IkError;
use crate::joint_limits::JointLimits;
use crate::kinematic_traits::{JacobianMatrix, Joints, Kinematics, DOF};
use crate::nullspace::{cutoff, singular_values};

pub trait Objective {
    /// Value of the objective at the given joint configuration.
    fn evaluate(&self, qs: &Joints) -> Result<f64, IkError>;

    /// Gradient of the objective over joints.
    fn gradient(&self, qs: &Joints, estimator: &NumericalGradient) -> Result<Joints, IkError> {
        estimator.estimate(|q| self.evaluate(q), qs)
    }
}

/// Squared singular values above the rank cutoff, multiplied: det(J * J^T).
/// Rank deficient directions contribute an exact zero. NaN if the Jacobian is not finite.
pub fn gram_determinant(jacobian: &JacobianMatrix) -> Result<f64, IkError> {
    let sv = singular_values(jacobian)?;
    let eps = cutoff(&sv);
    Ok(sv.iter().map(|&s| if s > eps { s * s } else if s.is_nan() { s } else { 0.0 }).product())
}

/// ln(det(J * J^T)), computed as the sum of logarithms of the squared singular values.
/// Fails with [`IkError::ManipulabilityDomain`] when the determinant is not positive.
pub fn log_manipulability(jacobian: &JacobianMatrix) -> Result<f64, IkError> {
    let determinant = gram_determinant(jacobian)?;
    if determinant <= 0.0 {
        debug!(determinant, "manipulability undefined at singular configuration");
        return Err(IkError::ManipulabilityDomain { determinant });
    }
    if determinant.is_nan() {
        return Ok(f64::NAN);
    }
    let sv = singular_values(jacobian)?;
    Ok(sv.iter().map(|s| 2.0 * s.ln()).sum())
}

/// Yoshikawa manipulability measure sqrt(det(J * J^T)). Zero at singularities, never fails
/// on a finite Jacobian.
pub fn manipulability_index(jacobian: &JacobianMatrix) -> Result<f64, IkError> {
    Ok(gram_determinant(jacobian)?.sqrt())
}

/// Manipulability objective `ln(det(J * J^T))`. Larger values are farther from singularity.
pub struct Manipulability<'a, K: Kinematics> {
    robot: &'a K,
}

impl<'a, K: Kinematics> Manipulability<'a, K> {
    pub fn new(robot: &'a K) -> Self {
        Manipulability { robot }
    }
}

impl<K: Kinematics> Objective for Manipulability<'_, K> {
    fn evaluate(&self, qs: &Joints) -> Result<f64, IkError> {
        log_manipulability(&self.robot.jacobian(qs))
    }
}

/// Joint limit avoidance objective `-(1 / 2n) * sum(((q_i - m_i) / r_i)^2)`, with `m` the
/// midpoint and `r` the full range of each joint. Zero at the midpoint, more negative
/// towards the limits. Joints outside the limits are penalized further, not clamped.
pub struct JointLimitAvoidance {
    midpoint: Joints,
    range: Joints,
}

impl JointLimitAvoidance {
    pub fn new(limits: &JointLimits) -> Self {
        JointLimitAvoidance {
            midpoint: limits.midpoint(),
            range: limits.range(),
        }
    }

    /// Closed form gradient `-(1 / n) * (q_i - m_i) / r_i^2`, pointing to the midpoint.
    pub fn analytic_gradient(&self, qs: &Joints) -> Joints {
        std::array::from_fn(|i| {
            -(qs[i] - self.midpoint[i]) / (DOF as f64 * self.range[i] * self.range[i])
        })
    }
}

impl Default for JointLimitAvoidance {
    fn default() -> Self {
        Self::new(&JointLimits::kinova_gen3())
    }
}

impl Objective for JointLimitAvoidance {
    fn evaluate(&self, qs: &Joints) -> Result<f64, IkError> {
        let sum: f64 = (0..DOF)
            .map(|i| {
                let normalized = (qs[i] - self.midpoint[i]) / self.range[i];
                normalized * normalized
            })
            .sum();
        Ok(-sum / (2.0 * DOF as f64))
    }
}
