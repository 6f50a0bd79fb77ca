//! Redundancy resolution combining the primary task with manipulability and joint limit
//! avoidance, projected into the null space of the Jacobian.

use rayon::prelude::*;
use tracing::trace;

use crate::ik_error::IkError;
use crate::joint_limits::JointLimits;
use crate::kinematic_traits::{Joints, Kinematics, Twist, Vector7};
use crate::nullspace::nullspace_projector;
use crate::objectives::{JointLimitAvoidance, Manipulability, Objective};
use crate::solver::{IkStrategy, SolverParameters};
use crate::utils::{joints_to_vector7, vector7_to_joints};

/// Multicriteria inverse kinematics over any 7 axis [`Kinematics`].
///
/// `qdot = primary + k_z * P * (alpha * grad(manipulability) + (1 - alpha) * grad(limits))`
///
/// The secondary term lies in the null space of the Jacobian, so the end-effector velocity
/// is the one of the primary solution. The solver holds no state between calls.
pub struct MulticriteriaIk<'a, K: Kinematics> {
    robot: &'a K,
    parameters: SolverParameters,
    limits: JointLimits,
}

impl<'a, K: Kinematics> MulticriteriaIk<'a, K> {
    /// Solver with default weights and the Kinova Gen3 joint limits.
    pub fn new(robot: &'a K) -> Self {
        MulticriteriaIk {
            robot,
            parameters: SolverParameters::default(),
            limits: JointLimits::kinova_gen3(),
        }
    }

    pub fn with_parameters(robot: &'a K, parameters: SolverParameters, limits: JointLimits) -> Result<Self, IkError> {
        parameters.validate()?;
        Ok(MulticriteriaIk { robot, parameters, limits })
    }

    pub fn parameters(&self) -> &SolverParameters {
        &self.parameters
    }

    pub fn limits(&self) -> &JointLimits {
        &self.limits
    }

    /// Damped least squares with the damping of these parameters.
    pub fn damped_strategy(&self) -> IkStrategy {
        self.parameters.damped_strategy()
    }

    /// Joint velocities of the primary task alone.
    pub fn primary(&self, qs: &Joints, xdot: &Twist, strategy: IkStrategy) -> Result<Joints, IkError> {
        let jacobian = self.robot.jacobian(qs);
        Ok(vector7_to_joints(strategy.resolve(&jacobian, xdot)?))
    }

    /// Blend `z` of the objective gradients, before projection.
    pub fn secondary_gradient(&self, qs: &Joints) -> Result<Joints, IkError> {
        let alpha = self.parameters.alpha;
        let estimator = &self.parameters.gradient;
        let manipulability = Manipulability::new(self.robot).gradient(qs, estimator)?;
        let limits = JointLimitAvoidance::new(&self.limits).gradient(qs, estimator)?;
        Ok(std::array::from_fn(|i| alpha * manipulability[i] + (1.0 - alpha) * limits[i]))
    }

    /// Full resolution for one control tick. Errors of any stage, including the
    /// manipulability domain error at a singular configuration, are returned unchanged.
    pub fn resolve(&self, qs: &Joints, xdot: &Twist, strategy: IkStrategy) -> Result<Joints, IkError> {
        let jacobian = self.robot.jacobian(qs);
        let primary: Vector7 = strategy.resolve(&jacobian, xdot)?;
        let z = joints_to_vector7(self.secondary_gradient(qs)?);
        let projector = nullspace_projector(&jacobian)?;
        let secondary = projector * z * self.parameters.nullspace_gain;
        trace!(
            primary = primary.norm(),
            gradient = z.norm(),
            secondary = secondary.norm(),
            "multicriteria resolution"
        );
        Ok(vector7_to_joints(primary + secondary))
    }
}

impl<K: Kinematics + Sync> MulticriteriaIk<'_, K> {
    /// Resolves independent samples in parallel. Each output equals the sequential
    /// [`MulticriteriaIk::resolve`] of the same input, in the input order.
    pub fn resolve_batch(&self, samples: &[(Joints, Twist)], strategy: IkStrategy) -> Vec<Result<Joints, IkError>> {
        samples
            .par_iter()
            .map(|(qs, xdot)| self.resolve(qs, xdot, strategy))
            .collect()
    }
}
