//! Errors reported by the solver pipeline

/// Failures of the velocity-level inverse kinematics. None of these are recovered internally,
/// they are always reported to the immediate caller.
#[derive(Debug, Clone, PartialEq)]
pub enum IkError {
    /// Input vector has the wrong number of elements (7 joints or 6 twist components).
    InvalidLength { expected: usize, found: usize },
    /// Solver parameter outside of its valid range (negative damping, etc).
    InvalidParameter(String),
    /// ln(det(J * J^T)) is undefined as the determinant is not positive. This happens exactly
    /// at a kinematic singularity.
    ManipulabilityDomain { determinant: f64 },
    /// Singular value decomposition did not converge within the iteration limit.
    SvdNotConverged,
    /// The damped Gram matrix J * J^T + k^2 * I could not be inverted.
    SingularGram,
    /// Error reported by nalgebra when building the pseudo-inverse.
    PseudoInverse(&'static str),
}

impl std::fmt::Display for IkError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match *self {
            IkError::InvalidLength { expected, found } =>
                write!(f, "Invalid Length: expected {}, found {}", expected, found),
            IkError::InvalidParameter(ref msg) =>
                write!(f, "Invalid Parameter: {}", msg),
            IkError::ManipulabilityDomain { determinant } =>
                write!(f, "Manipulability undefined: det(J*J^T) = {:e} is not positive", determinant),
            IkError::SvdNotConverged =>
                write!(f, "Singular value decomposition of the Jacobian did not converge"),
            IkError::SingularGram =>
                write!(f, "Unable to invert the damped J*J^T matrix"),
            IkError::PseudoInverse(msg) =>
                write!(f, "Unable to compute the pseudoinverse of the Jacobian matrix: {}", msg),
        }
    }
}

impl std::error::Error for IkError {}
