use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use kinova_ik::joint_limits::JointLimits;
use kinova_ik::kinematic_traits::Kinematics;
use kinova_ik::kinematics_impl::SerialKinematics;
use kinova_ik::multicriteria::MulticriteriaIk;
use kinova_ik::nullspace::condition_number;
use kinova_ik::objectives::manipulability_index;
use kinova_ik::solver::{IkStrategy, SolverParameters};
use kinova_ik::utils::{dump_joints, dump_pose, dump_velocities, is_valid, joints_from_slice, twist_from_slice};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Method {
    /// Pseudo-inverse of the Jacobian
    Pinv,
    /// Damped least squares
    Dls,
    /// Pseudo-inverse plus null-space optimization
    Multicriteria,
    /// Damped least squares plus null-space optimization
    MulticriteriaDamped,
}

/// Joint velocities of the Kinova Gen3 for the desired end-effector velocity.
#[derive(Parser, Debug)]
#[command(name = "kinova-ik", version, about)]
struct Args {
    /// Seven joint angles, comma separated (radians unless --degrees)
    #[arg(long, required = true, value_delimiter = ',', allow_hyphen_values = true)]
    joints: Vec<f64>,

    /// End-effector velocity vx,vy,vz,wx,wy,wz (m/s and rad/s, base frame)
    #[arg(long, required = true, value_delimiter = ',', allow_hyphen_values = true)]
    velocity: Vec<f64>,

    #[arg(long, value_enum, default_value_t = Method::MulticriteriaDamped)]
    method: Method,

    /// Damping of the damped least squares, overrides the configuration file
    #[arg(long)]
    damping: Option<f64>,

    /// YAML file with multicriteria_ik and joint_limits sections
    #[arg(long)]
    config: Option<PathBuf>,

    /// Joint angles are given in degrees
    #[arg(long)]
    degrees: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut qs = joints_from_slice(&args.joints).context("Reading --joints")?;
    if args.degrees {
        qs = qs.map(f64::to_radians);
    }
    if !is_valid(&qs) {
        bail!("Joint values must be finite: {:?}", qs);
    }
    let xdot = twist_from_slice(&args.velocity).context("Reading --velocity")?;

    let (mut parameters, limits) = match &args.config {
        Some(path) => (
            SolverParameters::from_yaml_file(path)
                .with_context(|| format!("Reading solver parameters from {}", path.display()))?,
            JointLimits::from_yaml_file(path)
                .with_context(|| format!("Reading joint limits from {}", path.display()))?,
        ),
        None => (SolverParameters::default(), JointLimits::kinova_gen3()),
    };
    if let Some(damping) = args.damping {
        parameters.damping = damping;
    }

    let robot = SerialKinematics::kinova_gen3();
    let solver = MulticriteriaIk::with_parameters(&robot, parameters, limits)
        .context("Invalid solver parameters")?;
    let jacobian = robot.jacobian(&qs);

    println!("Joints (degrees):");
    dump_joints(&qs);
    let violations = limits.violations(&qs);
    if !violations.is_empty() {
        let names: Vec<String> = violations.iter().map(|i| format!("J{}", i + 1)).collect();
        println!("Outside joint limits: {}", names.join(", "));
    }
    println!("Flange pose:");
    dump_pose(&robot.forward(&qs));
    println!(
        "Manipulability index: {:.6e}, condition number: {:.3e}",
        manipulability_index(&jacobian)?,
        condition_number(&jacobian)?
    );

    let damped = solver.damped_strategy();
    let qdot = match args.method {
        Method::Pinv => solver.primary(&qs, &xdot, IkStrategy::PseudoInverse),
        Method::Dls => solver.primary(&qs, &xdot, damped),
        Method::Multicriteria => solver.resolve(&qs, &xdot, IkStrategy::PseudoInverse),
        Method::MulticriteriaDamped => solver.resolve(&qs, &xdot, damped),
    }
    .with_context(|| format!("Resolving joint velocities with {:?}", args.method))?;

    println!("Joint velocities (rad/s):");
    dump_velocities(&qdot);
    Ok(())
}
