//! Hardcoded serial chain parameters for supported robots

pub mod serial_kinematics {
    use crate::parameters::serial_kinematics::{Frame, Parameters};
    use std::f64::consts::{FRAC_PI_2, PI};

    impl Parameters {
        /// Kinova Gen3 7-DOF without the vision module, frames as in the Kinova URDF description.
        /// At zero, all joints stick straight up in the air and the flange orientation
        /// matches the base.
        pub fn kinova_gen3() -> Self {
            Parameters {
                joints: [
                    Frame::new([0.0, 0.0, 0.15643], [PI, 0.0, 0.0]),
                    Frame::new([0.0, 0.005375, -0.12838], [FRAC_PI_2, 0.0, 0.0]),
                    Frame::new([0.0, -0.21038, -0.006375], [-FRAC_PI_2, 0.0, 0.0]),
                    Frame::new([0.0, 0.006375, -0.21038], [FRAC_PI_2, 0.0, 0.0]),
                    Frame::new([0.0, -0.20843, -0.006375], [-FRAC_PI_2, 0.0, 0.0]),
                    Frame::new([0.0, 0.00017505, -0.10593], [FRAC_PI_2, 0.0, 0.0]),
                    Frame::new([0.0, -0.10593, -0.00017505], [-FRAC_PI_2, 0.0, 0.0]),
                ],
                flange: Frame::new([0.0, 0.0, -0.061525], [PI, 0.0, 0.0]),
            }
        }
    }

}
