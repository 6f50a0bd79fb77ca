use crate::ik_error::IkError;
use crate::kinematic_traits::{Joints, DOF};
use crate::utils::deg;

/// Mechanical bounds of the joints, in radians. Unlike a clamp, these only feed
/// the joint limit avoidance objective: joint values may transiently exceed them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointLimits {
    /// Lower limit of each joint
    pub from: Joints,

    /// Upper limit of each joint, strictly above the lower limit
    pub to: Joints,
}

impl JointLimits {
    pub fn new(from: Joints, to: Joints) -> Result<Self, IkError> {
        for i in 0..DOF {
            if !(from[i].is_finite() && to[i].is_finite() && from[i] < to[i]) {
                return Err(IkError::InvalidParameter(format!(
                    "joint {} limits must be finite with lower < upper (got {} .. {})",
                    i + 1, from[i], to[i]
                )));
            }
        }
        Ok(JointLimits { from, to })
    }

    /// Builds limits from values given in degrees.
    pub fn from_degrees(from: [f64; DOF], to: [f64; DOF]) -> Result<Self, IkError> {
        Self::new(from.map(f64::to_radians), to.map(f64::to_radians))
    }

    /// Joint limits of the Kinova Gen3. Joints 1, 3, 5 and 7 are unlimited in the hardware
    /// but are treated as a single turn around zero.
    pub fn kinova_gen3() -> Self {
        const MAX_DEGREES: [f64; DOF] = [180.0, 128.9, 180.0, 147.8, 180.0, 120.3, 180.0];
        JointLimits {
            from: MAX_DEGREES.map(|d| -d * std::f64::consts::PI / 180.0),
            to: MAX_DEGREES.map(|d| d * std::f64::consts::PI / 180.0),
        }
    }

    /// Middle of the range of each joint.
    pub fn midpoint(&self) -> Joints {
        std::array::from_fn(|i| (self.from[i] + self.to[i]) / 2.0)
    }

    /// Full width of the range of each joint.
    pub fn range(&self) -> Joints {
        std::array::from_fn(|i| self.to[i] - self.from[i])
    }

    /// True if all joints are within their limits, bounds included.
    pub fn compliant(&self, angles: &Joints) -> bool {
        (0..DOF).all(|i| angles[i] >= self.from[i] && angles[i] <= self.to[i])
    }

    /// Indices of the joints outside their limits.
    pub fn violations(&self, angles: &Joints) -> Vec<usize> {
        (0..DOF)
            .filter(|&i| angles[i] < self.from[i] || angles[i] > self.to[i])
            .collect()
    }

    /// Convert to string yaml representation, in degrees.
    pub fn to_yaml(&self) -> String {
        format!(
            "joint_limits:\n  min: [{}]\n  max: [{}]\n",
            self.from.iter().map(|x| format!("{:.4}", x.to_degrees())).collect::<Vec<_>>().join(", "),
            self.to.iter().map(|x| format!("{:.4}", x.to_degrees())).collect::<Vec<_>>().join(", ")
        )
    }

    /// Compact one line representation with deg() notation.
    pub fn describe(&self) -> String {
        (0..DOF)
            .map(|i| format!("J{}: {} .. {}", i + 1, deg(&self.from[i]), deg(&self.to[i])))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for JointLimits {
    fn default() -> Self {
        Self::kinova_gen3()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_kinova_values() {
        let limits = JointLimits::kinova_gen3();
        assert!((limits.from[0] + PI).abs() < 1e-15);
        assert!((limits.to[0] - PI).abs() < 1e-15);
        assert!((limits.to[1] - 128.9_f64.to_radians()).abs() < 1e-15);
        assert!((limits.from[5] + 120.3_f64.to_radians()).abs() < 1e-15);
        assert_eq!(limits.midpoint(), [0.0; DOF]);
        assert!((limits.range()[3] - 2.0 * 147.8_f64.to_radians()).abs() < 1e-14);
    }

    #[test]
    fn test_compliant() {
        let limits = JointLimits::kinova_gen3();
        assert!(limits.compliant(&[0.0; DOF]));
        assert!(limits.compliant(&[3.1, 0.0, -3.1, 0.0, 0.0, 0.0, 0.0]));
        let bent = [0.0, 2.3, 0.0, 0.0, 0.0, -2.2, 0.0];
        assert!(!limits.compliant(&bent));
        assert_eq!(limits.violations(&bent), vec![1, 5]);
    }

    #[test]
    fn test_invalid_limits() {
        assert!(JointLimits::new([0.0; DOF], [0.0; DOF]).is_err());
        let mut to = [1.0; DOF];
        to[4] = f64::NAN;
        assert!(JointLimits::new([0.0; DOF], to).is_err());
    }

    #[test]
    fn test_from_degrees() {
        let limits = JointLimits::from_degrees([-90.0; DOF], [45.0; DOF]).unwrap();
        assert!((limits.midpoint()[0] + 22.5_f64.to_radians()).abs() < 1e-12);
        assert!((limits.range()[6] - 135.0_f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn test_yaml_output() {
        let yaml = JointLimits::kinova_gen3().to_yaml();
        assert!(yaml.contains("min: [-180.0000, -128.9000"));
        assert!(JointLimits::kinova_gen3().describe().starts_with("J1: deg(-180.0000)"));
    }
}
