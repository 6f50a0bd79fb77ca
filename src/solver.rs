//! Primary task resolution: joint velocities that realize the desired end-effector velocity.

use nalgebra::Matrix6;

use crate::gradient::NumericalGradient;
use crate::ik_error::IkError;
use crate::kinematic_traits::{JacobianMatrix, Twist, Vector7};
use crate::nullspace::pseudo_inverse;

/// Default damping of the damped least squares resolution.
pub const DEFAULT_DAMPING: f64 = 0.01;

/// Two interchangeable ways of inverting the Jacobian for the primary task.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IkStrategy {
    /// `qdot = pinv(J) * xdot`. Exact minimum norm solution at full rank, but the joint
    /// velocities blow up as the Jacobian approaches rank deficiency.
    PseudoInverse,

    /// `qdot = J^T * (J * J^T + k^2 * I)^-1 * xdot`. Trades a small tracking error for
    /// a Gram matrix that stays invertible even exactly at a singularity.
    DampedLeastSquares { damping: f64 },
}

impl IkStrategy {
    /// Damped least squares with the default damping 0.01.
    pub fn damped() -> Self {
        IkStrategy::DampedLeastSquares { damping: DEFAULT_DAMPING }
    }

    pub fn resolve(&self, jacobian: &JacobianMatrix, xdot: &Twist) -> Result<Vector7, IkError> {
        match *self {
            IkStrategy::PseudoInverse => Ok(pseudo_inverse(jacobian)? * xdot),
            IkStrategy::DampedLeastSquares { damping } => damped_least_squares(jacobian, xdot, damping),
        }
    }
}

/// Damped least-squares: dq = J^T (J J^T + k²I)^{-1} xdot
fn damped_least_squares(jacobian: &JacobianMatrix, xdot: &Twist, damping: f64) -> Result<Vector7, IkError> {
    if !(damping >= 0.0 && damping.is_finite()) {
        return Err(IkError::InvalidParameter(format!(
            "damping must be finite and not negative (got {})", damping
        )));
    }
    let to_invert = jacobian * jacobian.transpose() + Matrix6::identity() * (damping * damping);
    let inverse = to_invert.try_inverse().ok_or(IkError::SingularGram)?;
    Ok(jacobian.transpose() * (inverse * xdot))
}

/// Weights and gains of the multicriteria solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverParameters {
    /// Weight of the manipulability gradient. The joint limit gradient gets `1 - alpha`.
    pub alpha: f64,

    /// Gain `k_z` applied to the projected secondary velocity.
    pub nullspace_gain: f64,

    /// Damping `k` used by the damped least squares strategy.
    pub damping: f64,

    /// Estimator used for objectives without an analytic gradient.
    pub gradient: NumericalGradient,
}

impl Default for SolverParameters {
    fn default() -> Self {
        SolverParameters {
            alpha: 0.75,
            nullspace_gain: 5.0,
            damping: DEFAULT_DAMPING,
            gradient: NumericalGradient::default(),
        }
    }
}

impl SolverParameters {
    /// Damped least squares strategy with the configured damping.
    pub fn damped_strategy(&self) -> IkStrategy {
        IkStrategy::DampedLeastSquares { damping: self.damping }
    }

    /// Checks that weights and gains are usable.
    pub fn validate(&self) -> Result<(), IkError> {
        if !(0.0..=1.0).contains(&self.alpha) {
            return Err(IkError::InvalidParameter(format!(
                "alpha must be within [0, 1] (got {})", self.alpha
            )));
        }
        if !self.nullspace_gain.is_finite() {
            return Err(IkError::InvalidParameter(format!(
                "nullspace_gain must be finite (got {})", self.nullspace_gain
            )));
        }
        if !(self.damping >= 0.0 && self.damping.is_finite()) {
            return Err(IkError::InvalidParameter(format!(
                "damping must be finite and not negative (got {})", self.damping
            )));
        }
        if !(self.gradient.step > 0.0 && self.gradient.step.is_finite()) {
            return Err(IkError::InvalidParameter(format!(
                "gradient step must be positive (got {})", self.gradient.step
            )));
        }
        Ok(())
    }

    /// Convert to string yaml representation, the same format as read by `from_yaml_file`.
    pub fn to_yaml(&self) -> String {
        format!(
            "multicriteria_ik:\n  \
              alpha: {}\n  \
              nullspace_gain: {}\n  \
              damping: {}\n  \
              gradient: {}\n  \
              gradient_step: {:e}\n",
            self.alpha,
            self.nullspace_gain,
            self.damping,
            self.gradient.scheme.name(),
            self.gradient.step
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_jacobian() -> JacobianMatrix {
        JacobianMatrix::from_fn(|i, j| ((i * 7 + j) as f64 * 0.7).sin() + if i == j { 1.0 } else { 0.0 })
    }

    #[test]
    fn test_pseudo_inverse_tracks_task() {
        let j = sample_jacobian();
        let xdot = Twist::new(0.1, -0.2, 0.05, 0.0, 0.3, -0.1);
        let qdot = IkStrategy::PseudoInverse.resolve(&j, &xdot).unwrap();
        assert_relative_eq!(j * qdot, xdot, epsilon = 1e-10);
    }

    #[test]
    fn test_small_damping_converges_to_pseudo_inverse() {
        let j = sample_jacobian();
        let xdot = Twist::new(0.1, -0.2, 0.05, 0.0, 0.3, -0.1);
        let exact = IkStrategy::PseudoInverse.resolve(&j, &xdot).unwrap();
        let damped = IkStrategy::DampedLeastSquares { damping: 1e-6 }.resolve(&j, &xdot).unwrap();
        assert_relative_eq!(exact, damped, epsilon = 1e-6);
    }

    #[test]
    fn test_damping_at_singularity() {
        let xdot = Twist::new(0.0, 0.0, 0.0, 1.0, 0.0, 0.0);
        let singular = JacobianMatrix::zeros();
        let qdot = IkStrategy::damped().resolve(&singular, &xdot).unwrap();
        assert!(qdot.iter().all(|v| v.is_finite()));
        assert_eq!(
            IkStrategy::DampedLeastSquares { damping: 0.0 }.resolve(&singular, &xdot),
            Err(IkError::SingularGram)
        );
    }

    #[test]
    fn test_negative_damping_rejected() {
        let result = IkStrategy::DampedLeastSquares { damping: -0.1 }
            .resolve(&sample_jacobian(), &Twist::zeros());
        assert!(matches!(result, Err(IkError::InvalidParameter(_))));
    }

    #[test]
    fn test_default_parameters() {
        let p = SolverParameters::default();
        assert_eq!(p.alpha, 0.75);
        assert_eq!(p.nullspace_gain, 5.0);
        assert_eq!(p.damping, 0.01);
        assert!(p.validate().is_ok());
        assert!(SolverParameters { alpha: 1.5, ..p }.validate().is_err());
        assert!(p.to_yaml().contains("gradient: forward"));
    }
}
