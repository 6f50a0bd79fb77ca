extern crate nalgebra as na;

use na::{Isometry3, Matrix3, SMatrix, SVector, Vector3, Vector6};

/// Pose is used a pose of the robot flange. It contains both Cartesian position and rotation quaternion
/// ```
/// extern crate nalgebra as na;
/// use na::{Isometry3, Translation3, UnitQuaternion, Vector3};
///
/// type Pose = Isometry3<f64>;
///
/// let translation = Translation3::new(1.0, 0.0, 0.0);
/// // The quaternion should be normalized to represent a valid rotation.
/// let rotation = UnitQuaternion::from_quaternion(na::Quaternion::new(1.0, 0.0, 0.0, 1.0).normalize());
/// let transform = Pose::from_parts(translation, rotation);
/// ```
pub type Pose = Isometry3<f64>;

/// Number of joints of the manipulator.
pub const DOF: usize = 7;

/// Number of Cartesian degrees of freedom of the task (3 linear + 3 angular).
pub const TASK_DOF: usize = 6;

/// Rotations of the 7 joints in radians. The same array is also used for joint velocities
/// (rad/s) and for gradients of objectives over joints.
pub type Joints = [f64; DOF];

/// End-effector velocity: linear velocity (m/s) in the first three rows,
/// angular velocity (rad/s) in the last three, both in the base frame.
pub type Twist = Vector6<f64>;

/// Maps joint velocities to the end-effector twist. Each column corresponds to a joint,
/// rows follow the layout of [`Twist`].
pub type JacobianMatrix = SMatrix<f64, TASK_DOF, DOF>;

/// Moore-Penrose pseudo-inverse of the [`JacobianMatrix`].
pub type PseudoInverse = SMatrix<f64, DOF, TASK_DOF>;

/// Square operator over joint space, such as the null-space projector.
pub type Projector = SMatrix<f64, DOF, DOF>;

/// Joint space column vector used inside the linear algebra.
pub type Vector7 = SVector<f64, DOF>;

/// All joints at zero. For the Kinova Gen3 this is the fully stretched, singular pose.
pub const JOINTS_AT_ZERO: Joints = [0.0; DOF];

/// Kinematic model of a 7 axis arm. Implementations must be pure: the same joint values
/// always produce the same pose and Jacobian.
pub trait Kinematics {
    /// Find the pose of the flange from the joint positions.
    fn forward(&self, qs: &Joints) -> Pose;

    /// Geometric Jacobian at the given joint positions, expressed in the base frame.
    fn jacobian(&self, qs: &Joints) -> JacobianMatrix;

    /// Positions of all joint frame origins and the flange, in the base frame.
    fn joint_positions(&self, qs: &Joints) -> [Vector3<f64>; DOF + 1];

    /// Flange position and rotation matrix, as plain vector and matrix.
    fn forward_kinematics(&self, qs: &Joints) -> (Vector3<f64>, Matrix3<f64>) {
        let pose = self.forward(qs);
        (
            pose.translation.vector,
            pose.rotation.to_rotation_matrix().into_inner(),
        )
    }
}
