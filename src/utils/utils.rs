//! Helper functions

use crate::ik_error::IkError;
use crate::kinematic_traits::{Joints, Twist, Vector7, DOF, TASK_DOF};
use nalgebra::{Isometry3, UnitQuaternion};

/// Checks if all joint values are finite
pub fn is_valid(qs: &Joints) -> bool {
    qs.iter().all(|&q| q.is_finite())
}

/// Convert array of f32's in degrees to Joints
/// that are array of f64's in radians
pub fn joints(angles: &[f32; DOF]) -> Joints {
    std::array::from_fn(|i| (angles[i] as f64).to_radians())
}

/// Convert joints that are array of f64's in radians to
/// array of f32's in degrees
pub fn to_degrees(angles: &Joints) -> [f32; DOF] {
    std::array::from_fn(|i| angles[i].to_degrees() as f32)
}

/// Print joint values, converting radians to degrees.
#[allow(dead_code)]
pub fn dump_joints(joints: &Joints) {
    let mut row_str = String::new();
    for joint_idx in 0..DOF {
        let computed = joints[joint_idx];
        row_str.push_str(&format!("{:5.2} ", computed.to_degrees()));
    }
    println!("[{}]", row_str.trim_end());
}

/// Print joint velocities as they are, in rad/s.
pub fn dump_velocities(velocities: &Joints) {
    let mut row_str = String::new();
    for joint_idx in 0..DOF {
        row_str.push_str(&format!("{:8.5} ", velocities[joint_idx]));
    }
    println!("[{}]", row_str.trim_end());
}

pub fn dump_pose(isometry: &Isometry3<f64>) {
    // Extract translation components
    let translation = isometry.translation.vector;

    // Extract rotation components
    let rotation: UnitQuaternion<f64> = isometry.rotation;

    // Print translation and rotation
    println!(
        "x: {:.5}, y: {:.5}, z: {:.5},  quat: {:.5},{:.5},{:.5},{:.5}",
        translation.x, translation.y, translation.z, rotation.i, rotation.j, rotation.k, rotation.w
    );
}

/// Allows to specify joint values in degrees (converts to radians)
#[allow(dead_code)]
pub fn as_radians(degrees: [i32; DOF]) -> Joints {
    std::array::from_fn(|i| (degrees[i] as f64).to_radians())
}

/// formatting for YAML output
pub(crate) fn deg(x: &f64) -> String {
    if *x == 0.0 {
        return "0".to_string();
    }
    format!("deg({:.4})", x.to_degrees())
}

/// Converts ```nalgebra::SVector<f64, 7>``` to Joints ([f64; 7])
pub fn vector7_to_joints(v: Vector7) -> Joints {
    std::array::from_fn(|i| v[i])
}

/// Converts ```Joints ([f64; 7])``` to a ```nalgebra::SVector<f64, 7>```
pub fn joints_to_vector7(j: Joints) -> Vector7 {
    Vector7::from_column_slice(&j)
}

/// Builds Joints from a slice, failing if the slice does not have exactly 7 elements.
/// Never truncates or pads.
pub fn joints_from_slice(values: &[f64]) -> Result<Joints, IkError> {
    values.try_into().map_err(|_| IkError::InvalidLength {
        expected: DOF,
        found: values.len(),
    })
}

/// Builds a Twist from a slice of 6 elements (3 linear, then 3 angular velocities).
pub fn twist_from_slice(values: &[f64]) -> Result<Twist, IkError> {
    if values.len() != TASK_DOF {
        return Err(IkError::InvalidLength {
            expected: TASK_DOF,
            found: values.len(),
        });
    }
    Ok(Twist::from_column_slice(values))
}
