//! Scientific functions applied to the current operand.

use std::fmt;
use std::str::FromStr;

use super::evaluation::{Calculation, EvaluationError, parse_operand};

/// The function row shown in scientific mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScientificFn {
    Sin,
    Cos,
    Tan,
    Sqrt,
    Log,
    Ln,
    Exp,
    Square,
}

impl ScientificFn {
    /// All functions in keypad order.
    pub const ALL: [ScientificFn; 8] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Sqrt,
        Self::Log,
        Self::Ln,
        Self::Exp,
        Self::Square,
    ];

    /// Name used in history labels and shell commands.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Sqrt => "sqrt",
            Self::Log => "log",
            Self::Ln => "ln",
            Self::Exp => "exp",
            Self::Square => "square",
        }
    }

    /// Keypad label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Sqrt => "√",
            Self::Exp => "e^x",
            Self::Square => "x²",
            other => other.name(),
        }
    }

    /// Apply the function to a number. Trigonometry is in radians and
    /// `log` is base 10.
    pub fn eval(self, x: f64) -> Result<f64, EvaluationError> {
        let value = match self {
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Sqrt => {
                if x < 0.0 {
                    return Err(self.domain_error(x));
                }
                x.sqrt()
            }
            Self::Log | Self::Ln => {
                if x <= 0.0 {
                    return Err(self.domain_error(x));
                }
                if self == Self::Log { x.log10() } else { x.ln() }
            }
            Self::Exp => x.exp(),
            Self::Square => x * x,
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvaluationError::NonFinite)
        }
    }

    fn domain_error(self, x: f64) -> EvaluationError {
        EvaluationError::Domain {
            function: self.name(),
            operand: x.to_string(),
        }
    }
}

impl fmt::Display for ScientificFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScientificFn {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sin" => Ok(Self::Sin),
            "cos" => Ok(Self::Cos),
            "tan" => Ok(Self::Tan),
            "sqrt" | "√" => Ok(Self::Sqrt),
            "log" | "log10" => Ok(Self::Log),
            "ln" => Ok(Self::Ln),
            "exp" | "e^x" => Ok(Self::Exp),
            "square" | "sq" | "x²" | "x^2" => Ok(Self::Square),
            other => Err(format!("unknown function '{}'", other)),
        }
    }
}

/// Apply `func` to the operand text shown on the display.
///
/// The history label is `func(operand)` with the operand exactly as shown.
pub fn apply(func: ScientificFn, operand: &str) -> Result<Calculation, EvaluationError> {
    let x = parse_operand(operand)?;
    let value = func.eval(x)?;
    Ok(Calculation::new(format!("{}({})", func.name(), operand), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqrt() {
        let calc = apply(ScientificFn::Sqrt, "4").unwrap();
        assert_eq!(calc.result, "2");
        assert_eq!(calc.expression, "sqrt(4)");

        assert!(matches!(
            apply(ScientificFn::Sqrt, "-4"),
            Err(EvaluationError::Domain { function: "sqrt", .. })
        ));
    }

    #[test]
    fn test_logarithms_reject_non_positive() {
        assert!(apply(ScientificFn::Log, "0").is_err());
        assert!(apply(ScientificFn::Ln, "-1").is_err());
        assert_eq!(apply(ScientificFn::Log, "1000").unwrap().result, "3");
        assert_eq!(apply(ScientificFn::Ln, "1").unwrap().result, "0");
    }

    #[test]
    fn test_trig_in_radians() {
        assert_eq!(apply(ScientificFn::Sin, "0").unwrap().result, "0");
        assert_eq!(apply(ScientificFn::Cos, "0").unwrap().result, "1");
        let half_pi = std::f64::consts::FRAC_PI_2.to_string();
        assert_eq!(apply(ScientificFn::Sin, &half_pi).unwrap().result, "1");
        assert_eq!(apply(ScientificFn::Tan, "1").unwrap().result, "1.55740772");
    }

    #[test]
    fn test_exp_and_square() {
        assert_eq!(apply(ScientificFn::Exp, "1").unwrap().result, "2.71828183");
        assert_eq!(apply(ScientificFn::Square, "-3").unwrap().result, "9");
        assert_eq!(apply(ScientificFn::Square, "1.5").unwrap().expression, "square(1.5)");
        assert_eq!(apply(ScientificFn::Exp, "1000"), Err(EvaluationError::NonFinite));
    }

    #[test]
    fn test_invalid_operand() {
        assert!(apply(ScientificFn::Sin, "Error").is_err());
        assert!(apply(ScientificFn::Sin, "").is_err());
    }

    #[test]
    fn test_parse_names() {
        for func in ScientificFn::ALL {
            assert_eq!(func.name().parse::<ScientificFn>(), Ok(func));
        }
        assert_eq!("√".parse::<ScientificFn>(), Ok(ScientificFn::Sqrt));
        assert!("cosh".parse::<ScientificFn>().is_err());
    }
}
