//! Plain function API for the Kinova Gen3 with default solver parameters.
//!
//! Inputs are slices so that values coming from outside (message buffers, command line)
//! can be passed as they are. Lengths are checked, nothing is truncated or padded.
//! ```
//! use kinova_ik::gen3;
//!
//! let q = [0.1, 0.6, -0.2, 1.2, 0.3, 0.8, -0.4];
//! let xdot = [0.05, 0.0, -0.02, 0.0, 0.0, 0.1];
//! let qdot = gen3::multicriteria_ik_damped(&q, &xdot).unwrap();
//! assert_eq!(qdot.len(), 7);
//! assert!(gen3::inverse_kinematics(&q, &xdot[..5]).is_err());
//! ```

use nalgebra::{Matrix3, Vector3};

use crate::ik_error::IkError;
use crate::jacobian::Jacobian;
use crate::kinematic_traits::{JacobianMatrix, Joints, Kinematics};
use crate::kinematics_impl::SerialKinematics;
use crate::multicriteria::MulticriteriaIk;
use crate::objectives::{JointLimitAvoidance, Manipulability, Objective};
use crate::solver::IkStrategy;
use crate::utils::{joints_from_slice, twist_from_slice};

/// Geometric Jacobian, 6 x 7.
pub fn jacobian(q: &[f64]) -> Result<JacobianMatrix, IkError> {
    let qs = joints_from_slice(q)?;
    Ok(SerialKinematics::kinova_gen3().jacobian(&qs))
}

/// Flange position (m) and rotation matrix.
pub fn forward_kinematics(q: &[f64]) -> Result<(Vector3<f64>, Matrix3<f64>), IkError> {
    let qs = joints_from_slice(q)?;
    Ok(SerialKinematics::kinova_gen3().forward_kinematics(&qs))
}

/// Pseudo-inverse resolution `pinv(J) * xdot`.
pub fn inverse_kinematics(q: &[f64], xdot: &[f64]) -> Result<Joints, IkError> {
    let (qs, twist) = (joints_from_slice(q)?, twist_from_slice(xdot)?);
    Jacobian::new(&SerialKinematics::kinova_gen3(), &qs).velocities_from_vector(&twist)
}

/// Damped least squares resolution with damping `k` (0.01 is the usual choice).
pub fn inverse_kinematics_dls(q: &[f64], xdot: &[f64], k: f64) -> Result<Joints, IkError> {
    let (qs, twist) = (joints_from_slice(q)?, twist_from_slice(xdot)?);
    Jacobian::new(&SerialKinematics::kinova_gen3(), &qs).velocities_damped(&twist, k)
}

/// Multicriteria resolution on top of the pseudo-inverse.
pub fn multicriteria_ik(q: &[f64], xdot: &[f64]) -> Result<Joints, IkError> {
    let (qs, twist) = (joints_from_slice(q)?, twist_from_slice(xdot)?);
    let robot = SerialKinematics::kinova_gen3();
    MulticriteriaIk::new(&robot).resolve(&qs, &twist, IkStrategy::PseudoInverse)
}

/// Multicriteria resolution on top of damped least squares.
pub fn multicriteria_ik_damped(q: &[f64], xdot: &[f64]) -> Result<Joints, IkError> {
    let (qs, twist) = (joints_from_slice(q)?, twist_from_slice(xdot)?);
    let robot = SerialKinematics::kinova_gen3();
    let solver = MulticriteriaIk::new(&robot);
    solver.resolve(&qs, &twist, solver.damped_strategy())
}

/// `ln(det(J * J^T))`, failing at singular configurations.
pub fn manipulability(q: &[f64]) -> Result<f64, IkError> {
    let qs = joints_from_slice(q)?;
    Manipulability::new(&SerialKinematics::kinova_gen3()).evaluate(&qs)
}

/// Joint limit avoidance value, 0 at the middle of all ranges and negative elsewhere.
pub fn joint_limits_cost(q: &[f64]) -> Result<f64, IkError> {
    let qs = joints_from_slice(q)?;
    JointLimitAvoidance::default().evaluate(&qs)
}
