use crate::kinematic_traits::{JacobianMatrix, Joints, Kinematics, Pose, DOF};
use crate::parameters::serial_kinematics::{Frame, Parameters};
use nalgebra::{Isometry3, Translation3, UnitQuaternion, Vector3};

/// Kinematics of a 7 axis serial arm with revolute joints, built from chain [`Parameters`].
#[derive(Debug, Clone)]
pub struct SerialKinematics {
    parameters: Parameters,
    /// Fixed joint frames, converted once from parameters.
    frames: [Isometry3<f64>; DOF],
    flange: Isometry3<f64>,
}

impl SerialKinematics {
    /// Creates a new `SerialKinematics` instance with the given parameters.
    pub fn new(parameters: Parameters) -> Self {
        SerialKinematics {
            parameters,
            frames: parameters.joints.map(|f| frame_to_isometry(&f)),
            flange: frame_to_isometry(&parameters.flange),
        }
    }

    /// The Kinova Gen3 arm.
    pub fn kinova_gen3() -> Self {
        Self::new(Parameters::kinova_gen3())
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Poses of the joint frames before the joint rotation is applied, followed by the flange pose.
    /// The z axis of each joint frame is the rotation axis of that joint.
    fn chain(&self, qs: &Joints) -> ([Isometry3<f64>; DOF], Pose) {
        let mut joint_frames = [Isometry3::identity(); DOF];
        let mut pose = Isometry3::identity();
        for i in 0..DOF {
            pose *= self.frames[i];
            joint_frames[i] = pose;
            pose *= UnitQuaternion::from_axis_angle(&Vector3::z_axis(), qs[i]);
        }
        (joint_frames, pose * self.flange)
    }
}

fn frame_to_isometry(frame: &Frame) -> Isometry3<f64> {
    let [x, y, z] = frame.xyz;
    let [roll, pitch, yaw] = frame.rpy;
    Isometry3::from_parts(
        Translation3::new(x, y, z),
        UnitQuaternion::from_euler_angles(roll, pitch, yaw),
    )
}

impl Kinematics for SerialKinematics {
    fn forward(&self, qs: &Joints) -> Pose {
        self.chain(qs).1
    }

    fn jacobian(&self, qs: &Joints) -> JacobianMatrix {
        let (joint_frames, flange) = self.chain(qs);
        let tip = flange.translation.vector;
        let mut jacobian = JacobianMatrix::zeros();
        for (i, frame) in joint_frames.iter().enumerate() {
            let axis = frame.rotation * Vector3::z();
            let linear = axis.cross(&(tip - frame.translation.vector));
            jacobian.fixed_view_mut::<3, 1>(0, i).copy_from(&linear);
            jacobian.fixed_view_mut::<3, 1>(3, i).copy_from(&axis);
        }
        jacobian
    }

    fn joint_positions(&self, qs: &Joints) -> [Vector3<f64>; DOF + 1] {
        let (joint_frames, flange) = self.chain(qs);
        let mut positions = [Vector3::zeros(); DOF + 1];
        for (position, frame) in positions.iter_mut().zip(joint_frames.iter()) {
            *position = frame.translation.vector;
        }
        positions[DOF] = flange.translation.vector;
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jacobian::compute_jacobian;
    use nalgebra::Matrix3;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_forward_at_zero() {
        let robot = SerialKinematics::kinova_gen3();
        let (position, rotation) = robot.forward_kinematics(&[0.0; 7]);
        assert!((position - Vector3::new(0.0, -0.0248501, 1.187385)).norm() < 1e-9);
        assert!((rotation - Matrix3::identity()).norm() < 1e-9);
    }

    #[test]
    fn test_forward_second_joint_quarter_turn() {
        let robot = SerialKinematics::kinova_gen3();
        let (position, rotation) = robot.forward_kinematics(&[0.0, FRAC_PI_2, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert!((position - Vector3::new(0.902575, -0.0248501, 0.28481)).norm() < 1e-9);
        let expected = Matrix3::new(
            0.0, 0.0, 1.0,
            0.0, 1.0, 0.0,
            -1.0, 0.0, 0.0,
        );
        assert!((rotation - expected).norm() < 1e-9);
    }

    #[test]
    fn test_joint_positions_end_at_flange() {
        let robot = SerialKinematics::kinova_gen3();
        let qs = [0.3, -0.4, 0.5, 1.1, -0.2, 0.7, 0.1];
        let positions = robot.joint_positions(&qs);
        assert!((positions[0] - Vector3::new(0.0, 0.0, 0.15643)).norm() < 1e-12);
        assert!((positions[DOF] - robot.forward(&qs).translation.vector).norm() < 1e-12);
    }

    #[test]
    fn test_jacobian_matches_finite_differences() {
        let robot = SerialKinematics::kinova_gen3();
        let qs = [0.1, 0.6, -0.2, 1.2, 0.3, 0.8, -0.4];
        let analytic = robot.jacobian(&qs);
        let numeric = compute_jacobian(&robot, &qs, 1e-7);
        for i in 0..6 {
            for j in 0..7 {
                assert!(
                    (analytic[(i, j)] - numeric[(i, j)]).abs() < 1e-5,
                    "analytic[{0},{1}] = {2} differs from numeric[{0},{1}] = {3}",
                    i, j, analytic[(i, j)], numeric[(i, j)]
                );
            }
        }
    }

    #[test]
    fn test_jacobian_rows_vanish_when_stretched() {
        let robot = SerialKinematics::kinova_gen3();
        let jacobian = robot.jacobian(&[0.0; 7]);
        // Linear y and angular x cannot be produced by any joint.
        for j in 0..7 {
            assert!(jacobian[(1, j)].abs() < 1e-12);
            assert!(jacobian[(3, j)].abs() < 1e-12);
        }
    }
}
