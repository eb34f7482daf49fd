//! Arithmetic operations supported by the calculator.
//!
//! Each [`CalculationType`] folds a list of inputs left to right:
//! `[a, b, c]` under subtraction is `(a - b) - c`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Minimum number of operands accepted by every operation.
pub const MIN_INPUTS: usize = 2;

/// Reasons an operation cannot produce a result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperationError {
    #[error("Inputs must contain at least two numbers.")]
    TooFewInputs,

    #[error("Inputs must be finite numbers.")]
    NonFiniteInput,

    #[error("Cannot divide by zero.")]
    DivisionByZero,

    #[error("Cannot compute modulus with zero divisor.")]
    ModulusByZero,

    #[error("Result is not a finite number.")]
    NonFiniteResult,
}

/// The five supported calculator operations.
///
/// Serialized in lowercase as `addition`, `subtraction`, `multiplication`,
/// `division` and `modulus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalculationType {
    Addition,
    Subtraction,
    Multiplication,
    Division,
    Modulus,
}

impl CalculationType {
    pub const ALL: [CalculationType; 5] = [
        CalculationType::Addition,
        CalculationType::Subtraction,
        CalculationType::Multiplication,
        CalculationType::Division,
        CalculationType::Modulus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Addition => "addition",
            Self::Subtraction => "subtraction",
            Self::Multiplication => "multiplication",
            Self::Division => "division",
            Self::Modulus => "modulus",
        }
    }

    /// Applies the operation to `inputs`.
    ///
    /// # Errors
    ///
    /// - [`OperationError::TooFewInputs`] for fewer than [`MIN_INPUTS`] values
    /// - [`OperationError::NonFiniteInput`] if any input is NaN or infinite
    /// - [`OperationError::DivisionByZero`] / [`OperationError::ModulusByZero`]
    ///   if any value after the first is zero
    /// - [`OperationError::NonFiniteResult`] on overflow to infinity
    pub fn compute(&self, inputs: &[f64]) -> Result<f64, OperationError> {
        if inputs.len() < MIN_INPUTS {
            return Err(OperationError::TooFewInputs);
        }
        if inputs.iter().any(|v| !v.is_finite()) {
            return Err(OperationError::NonFiniteInput);
        }

        let (first, rest) = (inputs[0], &inputs[1..]);

        let result = match self {
            Self::Addition => inputs.iter().sum(),
            Self::Subtraction => rest.iter().fold(first, |acc, v| acc - v),
            Self::Multiplication => inputs.iter().product(),
            Self::Division => {
                if rest.contains(&0.0) {
                    return Err(OperationError::DivisionByZero);
                }
                rest.iter().fold(first, |acc, v| acc / v)
            }
            Self::Modulus => {
                if rest.contains(&0.0) {
                    return Err(OperationError::ModulusByZero);
                }
                rest.iter().fold(first, |acc, v| acc % v)
            }
        };

        if !result.is_finite() {
            return Err(OperationError::NonFiniteResult);
        }

        Ok(result)
    }
}

impl fmt::Display for CalculationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CalculationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown calculation type '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_addition() {
        assert_eq!(CalculationType::Addition.compute(&[10.0, 20.0, 30.0]), Ok(60.0));
    }

    #[test]
    fn test_subtraction_folds_left() {
        assert_eq!(
            CalculationType::Subtraction.compute(&[100.0, 50.0, 25.0]),
            Ok(25.0)
        );
        assert_eq!(CalculationType::Subtraction.compute(&[1.0, 5.0]), Ok(-4.0));
    }

    #[test]
    fn test_multiplication() {
        assert_eq!(
            CalculationType::Multiplication.compute(&[5.0, 4.0, 2.0]),
            Ok(40.0)
        );
    }

    #[test]
    fn test_division() {
        assert_eq!(CalculationType::Division.compute(&[100.0, 5.0]), Ok(20.0));
        assert_eq!(CalculationType::Division.compute(&[100.0, 5.0, 2.0]), Ok(10.0));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            CalculationType::Division.compute(&[10.0, 0.0]),
            Err(OperationError::DivisionByZero)
        );
        assert_eq!(
            CalculationType::Division.compute(&[10.0, 2.0, 0.0]),
            Err(OperationError::DivisionByZero)
        );
    }

    #[test]
    fn test_zero_dividend_is_allowed() {
        assert_eq!(CalculationType::Division.compute(&[0.0, 5.0]), Ok(0.0));
    }

    #[test]
    fn test_modulus() {
        assert_eq!(CalculationType::Modulus.compute(&[10.0, 3.0]), Ok(1.0));
        assert_eq!(CalculationType::Modulus.compute(&[-7.0, 3.0]), Ok(-1.0));
        assert_eq!(CalculationType::Modulus.compute(&[29.0, 10.0, 4.0]), Ok(1.0));
    }

    #[test]
    fn test_modulus_by_zero() {
        assert_eq!(
            CalculationType::Modulus.compute(&[10.0, 0.0]),
            Err(OperationError::ModulusByZero)
        );
    }

    #[test]
    fn test_too_few_inputs() {
        for op in CalculationType::ALL {
            assert_eq!(op.compute(&[1.0]), Err(OperationError::TooFewInputs));
            assert_eq!(op.compute(&[]), Err(OperationError::TooFewInputs));
        }
    }

    #[test]
    fn test_non_finite_input_rejected() {
        assert_eq!(
            CalculationType::Addition.compute(&[f64::NAN, 1.0]),
            Err(OperationError::NonFiniteInput)
        );
    }

    #[test]
    fn test_overflow_rejected() {
        assert_eq!(
            CalculationType::Multiplication.compute(&[f64::MAX, 10.0]),
            Err(OperationError::NonFiniteResult)
        );
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&CalculationType::Multiplication).unwrap();
        assert_eq!(json, "\"multiplication\"");

        let parsed: CalculationType = serde_json::from_str("\"modulus\"").unwrap();
        assert_eq!(parsed, CalculationType::Modulus);

        assert!(serde_json::from_str::<CalculationType>("\"invalid_op\"").is_err());
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "Division".parse::<CalculationType>(),
            Ok(CalculationType::Division)
        );
        assert!("power".parse::<CalculationType>().is_err());
    }
}
