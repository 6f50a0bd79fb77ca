//! Defines the serial chain parameter data structure

pub mod serial_kinematics {
    use crate::kinematic_traits::DOF;
    use crate::utils::deg;

    /// Fixed transform from the parent frame to the frame of the next joint, URDF style:
    /// translation first, then rotation given as roll, pitch and yaw.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Frame {
        /// Translation in meters, expressed in the parent frame.
        pub xyz: [f64; 3],

        /// Fixed rotation in radians (roll about x, pitch about y, yaw about z).
        pub rpy: [f64; 3],
    }

    impl Frame {
        pub const fn new(xyz: [f64; 3], rpy: [f64; 3]) -> Self {
            Frame { xyz, rpy }
        }

        fn to_yaml(&self) -> String {
            format!(
                "{{ xyz: [{}], rpy: [{}] }}",
                self.xyz.iter().map(|x| x.to_string()).collect::<Vec<_>>().join(", "),
                self.rpy.iter().map(|x| deg(x)).collect::<Vec<_>>().join(", ")
            )
        }
    }

    /// Parameters for the kinematic model of the robot. See [parameters_robots.rs](parameters_robots.rs)
    /// for concrete robot models.
    ///
    /// Every joint is revolute and rotates about the z axis of its own frame. The joint frame
    /// is obtained by applying `joints[i]` to the previous frame, and then rotating by the joint angle.
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct Parameters {
        /// Frames of the joints, from the base to the last joint.
        pub joints: [Frame; DOF],

        /// Fixed transform from the last joint to the flange (end-effector interface).
        pub flange: Frame,
    }

    impl Parameters {
        /// Convert to string yaml representation (quick viewing, etc).
        pub fn to_yaml(&self) -> String {
            let mut yaml = String::from("serial_kinematics_frames:\n");
            for (i, frame) in self.joints.iter().enumerate() {
                yaml.push_str(&format!("  joint_{}: {}\n", i + 1, frame.to_yaml()));
            }
            yaml.push_str(&format!("  flange: {}\n", self.flange.to_yaml()));
            yaml
        }
    }
}
