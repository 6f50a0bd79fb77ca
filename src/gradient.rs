//! Finite difference gradients of scalar functions over joint space.

use crate::ik_error::IkError;
use crate::kinematic_traits::{Joints, DOF};

/// Difference scheme of the [`NumericalGradient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradientScheme {
    /// `(f(q + h e_i) - f(q)) / h`, one extra evaluation per joint.
    Forward,
    /// `(f(q + h e_i) - f(q - h e_i)) / 2h`, two evaluations per joint but second order accurate.
    Central,
}

impl GradientScheme {
    pub fn name(&self) -> &'static str {
        match self {
            GradientScheme::Forward => "forward",
            GradientScheme::Central => "central",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "forward" => Some(GradientScheme::Forward),
            "central" => Some(GradientScheme::Central),
            _ => None,
        }
    }

    /// Step that balances truncation against rounding error for this scheme.
    pub fn default_step(&self) -> f64 {
        match self {
            GradientScheme::Forward => f64::EPSILON.sqrt(),
            GradientScheme::Central => f64::EPSILON.cbrt(),
        }
    }
}

/// Finite difference gradient estimator.
///
/// The default is the one-sided forward scheme with `h = sqrt(machine epsilon)`, matching
/// scipy `approx_fprime`. NaN or infinite values of the function propagate into the gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumericalGradient {
    pub scheme: GradientScheme,
    pub step: f64,
}

impl Default for NumericalGradient {
    fn default() -> Self {
        Self::forward()
    }
}

impl NumericalGradient {
    pub fn forward() -> Self {
        NumericalGradient { scheme: GradientScheme::Forward, step: GradientScheme::Forward.default_step() }
    }

    pub fn central() -> Self {
        NumericalGradient { scheme: GradientScheme::Central, step: GradientScheme::Central.default_step() }
    }

    /// Estimates the gradient of `f` at `qs`, perturbing one joint at a time. Errors of `f`
    /// are returned as they are.
    pub fn estimate<F>(&self, f: F, qs: &Joints) -> Result<Joints, IkError>
    where
        F: Fn(&Joints) -> Result<f64, IkError>,
    {
        let h = self.step;
        let mut gradient = [0.0; DOF];
        match self.scheme {
            GradientScheme::Forward => {
                let f0 = f(qs)?;
                for i in 0..DOF {
                    let mut perturbed = *qs;
                    perturbed[i] += h;
                    gradient[i] = (f(&perturbed)? - f0) / h;
                }
            }
            GradientScheme::Central => {
                for i in 0..DOF {
                    let mut ahead = *qs;
                    let mut behind = *qs;
                    ahead[i] += h;
                    behind[i] -= h;
                    gradient[i] = (f(&ahead)? - f(&behind)?) / (2.0 * h);
                }
            }
        }
        Ok(gradient)
    }
}
