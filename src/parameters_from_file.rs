//! Supports reading solver parameters and joint limits from YAML file (optional)

use std::path::Path;

use tracing::debug;
use yaml_rust2::{Yaml, YamlLoader};

use crate::gradient::{GradientScheme, NumericalGradient};
use crate::joint_limits::JointLimits;
use crate::kinematic_traits::DOF;
use crate::parameter_error::ParameterError;
use crate::solver::SolverParameters;

const SOLVER_SECTION: &str = "multicriteria_ik";
const LIMITS_SECTION: &str = "joint_limits";

fn load_document(contents: &str) -> Result<Yaml, ParameterError> {
    let mut docs = YamlLoader::load_from_str(contents)
        .map_err(|e| ParameterError::ParseError(e.to_string()))?;
    if docs.is_empty() {
        return Err(ParameterError::ParseError("empty YAML document".to_string()));
    }
    Ok(docs.swap_remove(0))
}

/// Reads a number, accepting both `5` and `5.0`.
fn as_number(value: &Yaml, name: &str) -> Result<f64, ParameterError> {
    match value {
        Yaml::Real(_) => value.as_f64().ok_or_else(|| {
            ParameterError::ParseError(format!("'{}' is not a valid number", name))
        }),
        Yaml::Integer(i) => Ok(*i as f64),
        _ => Err(ParameterError::ParseError(format!("'{}' must be a number", name))),
    }
}

/// Optional number: missing keys give the default.
fn number_or(section: &Yaml, key: &str, default: f64) -> Result<f64, ParameterError> {
    let value = &section[key];
    if value.is_badvalue() {
        Ok(default)
    } else {
        as_number(value, key)
    }
}

fn read_joint_array(section: &Yaml, key: &str) -> Result<[f64; DOF], ParameterError> {
    let value = &section[key];
    if value.is_badvalue() {
        return Err(ParameterError::MissingField(format!("{}.{}", LIMITS_SECTION, key)));
    }
    let items = value.as_vec().ok_or_else(|| {
        ParameterError::ParseError(format!("'{}' must be a list of {} numbers", key, DOF))
    })?;
    if items.len() != DOF {
        return Err(ParameterError::InvalidLength { expected: DOF, found: items.len() });
    }
    let mut result = [0.0; DOF];
    for (i, item) in items.iter().enumerate() {
        result[i] = as_number(item, key)?;
    }
    Ok(result)
}

impl SolverParameters {
    /// Read the solver weights from YAML file. YAML file like this is supported:
    /// ```yaml
    /// multicriteria_ik:
    ///   alpha: 0.75
    ///   nullspace_gain: 5.0
    ///   damping: 0.01
    ///   gradient: forward # or central
    ///   gradient_step: 1.4901161193847656e-8
    /// ```
    /// All keys are optional and take the defaults when missing. The step defaults to the
    /// one suitable for the chosen scheme.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ParameterError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ParameterError> {
        let doc = load_document(contents)?;
        let section = &doc[SOLVER_SECTION];
        let defaults = SolverParameters::default();
        if section.is_badvalue() {
            debug!("no {} section, using default solver parameters", SOLVER_SECTION);
            return Ok(defaults);
        }

        let scheme = match &section["gradient"] {
            Yaml::BadValue => defaults.gradient.scheme,
            Yaml::String(name) => GradientScheme::from_name(name).ok_or_else(|| {
                ParameterError::InvalidValue(format!("unknown gradient scheme '{}'", name))
            })?,
            _ => return Err(ParameterError::ParseError("'gradient' must be a string".to_string())),
        };

        let parameters = SolverParameters {
            alpha: number_or(section, "alpha", defaults.alpha)?,
            nullspace_gain: number_or(section, "nullspace_gain", defaults.nullspace_gain)?,
            damping: number_or(section, "damping", defaults.damping)?,
            gradient: NumericalGradient {
                scheme,
                step: number_or(section, "gradient_step", scheme.default_step())?,
            },
        };
        parameters.validate()?;
        debug!(
            alpha = parameters.alpha,
            nullspace_gain = parameters.nullspace_gain,
            damping = parameters.damping,
            gradient = parameters.gradient.scheme.name(),
            "solver parameters loaded"
        );
        Ok(parameters)
    }
}

impl JointLimits {
    /// Read joint limits in degrees from YAML file:
    /// ```yaml
    /// joint_limits:
    ///   min: [-180.0, -128.9, -180.0, -147.8, -180.0, -120.3, -180.0]
    ///   max: [180.0, 128.9, 180.0, 147.8, 180.0, 120.3, 180.0]
    /// ```
    /// If the section is missing, the Kinova Gen3 limits are used. If present, both
    /// `min` and `max` are required.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ParameterError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ParameterError> {
        let doc = load_document(contents)?;
        let section = &doc[LIMITS_SECTION];
        if section.is_badvalue() {
            debug!("no {} section, using Kinova Gen3 joint limits", LIMITS_SECTION);
            return Ok(JointLimits::kinova_gen3());
        }
        let from = read_joint_array(section, "min")?;
        let to = read_joint_array(section, "max")?;
        let limits = JointLimits::from_degrees(from, to)?;
        debug!(limits = %limits.describe(), "joint limits loaded");
        Ok(limits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_empty() {
        let parameters = SolverParameters::from_yaml_str("other: 1\n").unwrap();
        assert_eq!(parameters, SolverParameters::default());
        let limits = JointLimits::from_yaml_str("other: 1\n").unwrap();
        assert_eq!(limits, JointLimits::kinova_gen3());
    }

    #[test]
    fn test_integer_values_accepted() {
        let parameters = SolverParameters::from_yaml_str(
            "multicriteria_ik:\n  nullspace_gain: 3\n  gradient: central\n",
        ).unwrap();
        assert_eq!(parameters.nullspace_gain, 3.0);
        assert_eq!(parameters.alpha, 0.75);
        assert_eq!(parameters.gradient, NumericalGradient::central());
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            SolverParameters::from_yaml_str("multicriteria_ik:\n  alpha: 2.0\n"),
            Err(ParameterError::InvalidValue(_))
        ));
        assert!(matches!(
            SolverParameters::from_yaml_str("multicriteria_ik:\n  gradient: backward\n"),
            Err(ParameterError::InvalidValue(_))
        ));
        assert!(matches!(
            SolverParameters::from_yaml_str("multicriteria_ik:\n  damping: soft\n"),
            Err(ParameterError::ParseError(_))
        ));
    }

    #[test]
    fn test_limits_errors() {
        assert!(matches!(
            JointLimits::from_yaml_str("joint_limits:\n  min: [0, 0, 0, 0, 0, 0, 0]\n"),
            Err(ParameterError::MissingField(_))
        ));
        assert!(matches!(
            JointLimits::from_yaml_str("joint_limits:\n  min: [0, 0, 0]\n  max: [1, 1, 1]\n"),
            Err(ParameterError::InvalidLength { expected: 7, found: 3 })
        ));
        assert!(matches!(
            JointLimits::from_yaml_str(
                "joint_limits:\n  min: [0, 0, 0, 0, 0, 0, 0]\n  max: [1, 1, 1, 0, 1, 1, 1]\n"
            ),
            Err(ParameterError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_to_yaml_reads_back() {
        let parameters = SolverParameters {
            alpha: 0.5,
            nullspace_gain: 2.5,
            damping: 0.05,
            gradient: NumericalGradient::central(),
        };
        let loaded = SolverParameters::from_yaml_str(&parameters.to_yaml()).unwrap();
        assert_eq!(loaded.alpha, 0.5);
        assert_eq!(loaded.nullspace_gain, 2.5);
        assert_eq!(loaded.damping, 0.05);
        assert_eq!(loaded.gradient.scheme, GradientScheme::Central);
        assert!((loaded.gradient.step - parameters.gradient.step).abs() < 1e-12);

        let limits = JointLimits::kinova_gen3();
        let loaded = JointLimits::from_yaml_str(&limits.to_yaml()).unwrap();
        for i in 0..DOF {
            assert!((loaded.from[i] - limits.from[i]).abs() < 1e-6);
            assert!((loaded.to[i] - limits.to[i]).abs() < 1e-6);
        }
    }
}
