//! Velocity level inverse kinematics for the 7 axis Kinova Gen3 arm, with redundancy
//! resolution in the null space of the Jacobian.
//!
//! A 7 joint arm tracking a 6 dimensional end-effector velocity has one redundant degree of
//! freedom. This crate maps the desired velocity to joint velocities and uses the remaining
//! freedom to stay away from singularities and joint limits.
//!
//! # Features
//!
//! - Forward kinematics and the geometric Jacobian of the Kinova Gen3 (URDF geometry,
//!   no vision module). Other arms can be described with their own serial chain frames.
//! - Primary task resolution either by the Moore-Penrose pseudo-inverse or by damped least
//!   squares, which stays finite at singular configurations.
//! - Null-space projector `P = I - pinv(J) * J`. Any joint velocity projected with it produces
//!   no end-effector motion.
//! - Manipulability and joint limit avoidance objectives, with pluggable finite difference
//!   gradients (forward or central).
//! - Multicriteria resolution `qdot = primary + k_z * P * (alpha * grad(manipulability) +
//!   (1 - alpha) * grad(limits))`, also over batches of independent samples in parallel.
//! - Solver weights and joint limits from YAML files, and a small command line tool
//!   (feature `allow_filesystem`).
//!
//! All computations are pure functions of their inputs. Nothing is cached between calls.
//!
//! ```
//! use kinova_ik::kinematic_traits::Twist;
//! use kinova_ik::kinematics_impl::SerialKinematics;
//! use kinova_ik::multicriteria::MulticriteriaIk;
//! use kinova_ik::solver::IkStrategy;
//!
//! let robot = SerialKinematics::kinova_gen3();
//! let solver = MulticriteriaIk::new(&robot);
//! let q = [0.1, 0.6, -0.2, 1.2, 0.3, 0.8, -0.4];
//! let xdot = Twist::new(0.05, 0.0, -0.02, 0.0, 0.0, 0.1);
//! let qdot = solver.resolve(&q, &xdot, IkStrategy::PseudoInverse).unwrap();
//! assert!(qdot.iter().all(|v| v.is_finite()));
//! ```
//!
//! The functions in [`gen3`] provide the same operations over plain slices.

pub mod parameters;
pub mod parameters_robots;

#[cfg(feature = "allow_filesystem")]
pub mod parameters_from_file;
#[cfg(feature = "allow_filesystem")]
pub mod parameter_error;

#[path = "utils/utils.rs"]
pub mod utils;
pub mod ik_error;
pub mod kinematic_traits;
pub mod kinematics_impl;

pub mod jacobian;

pub mod nullspace;
pub mod solver;
pub mod gradient;
pub mod objectives;
pub mod joint_limits;
pub mod multicriteria;

pub mod gen3;

#[cfg(test)]
mod tests;
