#[cfg(test)]
mod tests {
    extern crate rand;

    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::joint_limits::JointLimits;
    use crate::kinematic_traits::{Joints, Kinematics, Twist, DOF};
    use crate::kinematics_impl::SerialKinematics;
    use crate::multicriteria::MulticriteriaIk;
    use crate::nullspace::{condition_number, nullspace_projector};
    use crate::solver::IkStrategy;
    use crate::utils::joints_to_vector7;

    const SAMPLES: usize = 256;

    fn random_joints(rng: &mut StdRng, limits: &JointLimits) -> Joints {
        std::array::from_fn(|i| rng.gen_range(limits.from[i]..limits.to[i]))
    }

    fn random_twist(rng: &mut StdRng) -> Twist {
        Twist::from_fn(|_, _| rng.gen_range(-0.5..0.5))
    }

    /// Random configurations away from singularities, where numerical tolerances are meaningful.
    fn well_conditioned(rng: &mut StdRng, robot: &SerialKinematics, max_condition: f64) -> Joints {
        let limits = JointLimits::kinova_gen3();
        loop {
            let qs = random_joints(rng, &limits);
            if condition_number(&robot.jacobian(&qs)).unwrap() < max_condition {
                return qs;
            }
        }
    }

    #[test]
    fn test_projector_annihilates_task() {
        let robot = SerialKinematics::kinova_gen3();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..SAMPLES {
            let qs = well_conditioned(&mut rng, &robot, 1e4);
            let jacobian = robot.jacobian(&qs);
            let p = nullspace_projector(&jacobian).unwrap();
            let z = joints_to_vector7(std::array::from_fn(|_| rng.gen_range(-10.0..10.0)));
            let residual = (jacobian * p * z).norm();
            assert!(residual < 1e-9 * z.norm(), "J*P*z = {} at {:?}", residual, qs);
        }
    }

    #[test]
    fn test_projector_idempotent_and_symmetric() {
        let robot = SerialKinematics::kinova_gen3();
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..SAMPLES {
            let qs = well_conditioned(&mut rng, &robot, 1e4);
            let p = nullspace_projector(&robot.jacobian(&qs)).unwrap();
            assert_relative_eq!(p * p, p, epsilon = 1e-9);
            assert_relative_eq!(p, p.transpose(), epsilon = 1e-9);
            assert_relative_eq!(p.trace(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_multicriteria_preserves_task() {
        let robot = SerialKinematics::kinova_gen3();
        let solver = MulticriteriaIk::new(&robot);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..SAMPLES {
            let qs = well_conditioned(&mut rng, &robot, 1e3);
            let xdot = random_twist(&mut rng);
            let qdot = solver.resolve(&qs, &xdot, IkStrategy::PseudoInverse).unwrap();
            let qdot = joints_to_vector7(qdot);
            let achieved = robot.jacobian(&qs) * qdot;
            let tolerance = 1e-8 * qdot.norm().max(1.0);
            assert!(
                (achieved - xdot).norm() < tolerance,
                "task error {} at {:?}", (achieved - xdot).norm(), qs
            );
        }
    }

    #[test]
    fn test_damping_converges_to_pseudo_inverse() {
        let robot = SerialKinematics::kinova_gen3();
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..SAMPLES {
            let qs = well_conditioned(&mut rng, &robot, 1e3);
            let xdot = random_twist(&mut rng);
            let jacobian = robot.jacobian(&qs);
            let exact = IkStrategy::PseudoInverse.resolve(&jacobian, &xdot).unwrap();
            let damped = IkStrategy::DampedLeastSquares { damping: 1e-6 }.resolve(&jacobian, &xdot).unwrap();
            assert!((exact - damped).norm() < 1e-6 * exact.norm().max(1.0));
        }
    }

    #[test]
    fn test_damping_bounds_velocities_near_singularity() {
        // Approaching the stretched pose, the lateral direction becomes unreachable.
        let robot = SerialKinematics::kinova_gen3();
        let xdot = Twist::new(0.0, 1.0, 0.0, 0.0, 0.0, 0.0);
        let k = 0.01;
        let bound = xdot.norm() / (2.0 * k);

        let mut pinv_norms = Vec::new();
        for epsilon in [1e-1, 1e-2, 1e-3, 1e-4] {
            let qs = [0.0, epsilon, 0.0, epsilon, 0.0, epsilon, 0.0];
            let jacobian = robot.jacobian(&qs);
            let damped = IkStrategy::DampedLeastSquares { damping: k }.resolve(&jacobian, &xdot).unwrap();
            assert!(damped.norm() <= bound * (1.0 + 1e-9), "DLS norm {} above {}", damped.norm(), bound);
            pinv_norms.push(IkStrategy::PseudoInverse.resolve(&jacobian, &xdot).unwrap().norm());
        }
        assert!(pinv_norms[3] > 10.0 * pinv_norms[0], "{:?}", pinv_norms);
        assert!(pinv_norms[3] > bound, "{:?}", pinv_norms);
    }

    #[test]
    fn test_solutions_are_finite_everywhere() {
        let robot = SerialKinematics::kinova_gen3();
        let limits = JointLimits::kinova_gen3();
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..SAMPLES {
            let qs = random_joints(&mut rng, &limits);
            let xdot = random_twist(&mut rng);
            let damped = IkStrategy::damped().resolve(&robot.jacobian(&qs), &xdot).unwrap();
            assert_eq!(damped.len(), DOF);
            assert!(damped.iter().all(|v| v.is_finite()));
        }
    }
}
