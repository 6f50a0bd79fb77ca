//! Jacobian of the arm at a given configuration, and the joint velocities derived from it.

extern crate nalgebra as na;
use na::{Vector3, Vector6};
use rayon::prelude::*;
use crate::ik_error::IkError;
use crate::kinematic_traits::{JacobianMatrix, Joints, Kinematics, Projector, Twist, DOF};
use crate::nullspace::nullspace_projector;
use crate::solver::IkStrategy;
use crate::utils::{joints_to_vector7, vector7_to_joints};

/// Jacobian taken at one joint configuration.
///
/// Rows are the end-effector twist (linear velocity first, then angular velocity, base frame),
/// columns are the joints. The matrix is never updated in place: build a new `Jacobian`
/// for every configuration.
pub struct Jacobian {
    matrix: JacobianMatrix,
}

impl Jacobian {
    /// Jacobian as reported by the robot model for the joint angles `qs`.
    pub fn new(robot: &impl Kinematics, qs: &Joints) -> Self {
        Self { matrix: robot.jacobian(qs) }
    }

    /// Jacobian obtained by differentiating the forward kinematics with the step `epsilon`,
    /// for models where only the pose is trusted. See [`compute_jacobian`].
    pub fn numerical(robot: &(impl Kinematics + Sync), qs: &Joints, epsilon: f64) -> Self {
        Self { matrix: compute_jacobian(robot, qs, epsilon) }
    }

    pub fn from_matrix(matrix: JacobianMatrix) -> Self {
        Self { matrix }
    }

    pub fn matrix(&self) -> &JacobianMatrix {
        &self.matrix
    }

    /// Joint velocities (rad/s, returned as `Joints`) for the linear velocity in m/s and the
    /// angular velocity in rad/s of the end-effector, using the pseudo-inverse.
    pub fn velocities(&self, linear_velocity: &Vector3<f64>, angular_velocity: &Vector3<f64>) -> Result<Joints, IkError> {
        let mut twist = Twist::zeros();
        twist.fixed_rows_mut::<3>(0).copy_from(linear_velocity);
        twist.fixed_rows_mut::<3>(3).copy_from(angular_velocity);
        self.velocities_from_vector(&twist)
    }

    /// Minimum norm joint velocities for the twist, using the pseudoinverse.
    /// Near singularities the result grows large.
    pub fn velocities_from_vector(&self, twist: &Twist) -> Result<Joints, IkError> {
        self.velocities_with(IkStrategy::PseudoInverse, twist)
    }

    /// Joint velocities by damped least squares, bounded even at singularities.
    pub fn velocities_damped(&self, twist: &Twist, damping: f64) -> Result<Joints, IkError> {
        self.velocities_with(IkStrategy::DampedLeastSquares { damping }, twist)
    }

    pub fn velocities_with(&self, strategy: IkStrategy, twist: &Twist) -> Result<Joints, IkError> {
        Ok(vector7_to_joints(strategy.resolve(&self.matrix, twist)?))
    }

    /// Projector mapping any joint velocity into the null space of this Jacobian.
    pub fn nullspace_projector(&self) -> Result<Projector, IkError> {
        nullspace_projector(&self.matrix)
    }

    /// End-effector twist produced by the given joint velocities.
    pub fn twist(&self, joint_velocities: &Joints) -> Twist {
        self.matrix * joints_to_vector7(*joint_velocities)
    }
}

/// Jacobian by forward differences of [`Kinematics::forward`]. Joint `i` is advanced by
/// `epsilon` and the change of the flange pose over `epsilon` becomes column `i`: position
/// difference on top, rotation difference as a scaled axis below. Columns are computed
/// in parallel, the result does not depend on the thread count.
pub fn compute_jacobian(robot: &(impl Kinematics + Sync), joints: &Joints, epsilon: f64) -> JacobianMatrix {
    let reference = robot.forward(joints);
    let inverse_rotation = reference.rotation.inverse();

    let columns: Vec<Vector6<f64>> = (0..DOF)
        .into_par_iter()
        .map(|i| {
            let mut advanced = *joints;
            advanced[i] += epsilon;
            let pose = robot.forward(&advanced);
            let translation = (pose.translation.vector - reference.translation.vector) / epsilon;
            let rotation = (pose.rotation * inverse_rotation).scaled_axis() / epsilon;
            Vector6::new(
                translation.x, translation.y, translation.z,
                rotation.x, rotation.y, rotation.z,
            )
        })
        .collect();

    JacobianMatrix::from_columns(&columns)
}
