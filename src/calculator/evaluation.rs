//! Expression evaluation for the keypad calculator.
//!
//! Evaluates the pending expression accumulated by operator presses.
//! Operators are applied strictly left to right, the same way a pocket
//! calculator commits each operand as soon as the next operator is pressed,
//! so `2 + 3 × 4` is `20`. Only decimal literals and the four operators are
//! understood; nothing else in the input is reachable.

use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

/// Maximum number of fractional digits shown in a result.
pub const MAX_FRACTION_DIGITS: usize = 8;

/// Reasons an expression or function application could not produce a number.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("empty expression")]
    Empty,
    #[error("malformed operand at position {position}")]
    MalformedOperand { position: usize },
    #[error("unexpected character '{found}' at position {position}")]
    UnexpectedChar { found: char, position: usize },
    #[error("expression ends with an operator")]
    TrailingOperator,
    #[error("division by zero")]
    DivisionByZero,
    #[error("result is not a finite number")]
    NonFinite,
    #[error("{function} is undefined for {operand}")]
    Domain {
        function: &'static str,
        operand: String,
    },
}

/// One of the four binary operators on the keypad.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Parse an operator key, accepting the typographic `×` and `÷` too.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Self::Add),
            '-' | '−' => Some(Self::Subtract),
            '*' | '×' => Some(Self::Multiply),
            '/' | '÷' => Some(Self::Divide),
            _ => None,
        }
    }

    /// ASCII symbol used when writing the pending expression.
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    fn apply(self, lhs: f64, rhs: f64) -> Result<f64, EvaluationError> {
        let value = match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => {
                if rhs == 0.0 {
                    return Err(EvaluationError::DivisionByZero);
                }
                lhs / rhs
            }
        };
        finite(value)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A successful calculation, ready to be shown and recorded.
#[derive(Clone, Debug, PartialEq)]
pub struct Calculation {
    /// The expression as it will appear in history.
    pub expression: String,
    /// The raw numeric value.
    pub value: f64,
    /// The value formatted for display.
    pub result: String,
}

impl Calculation {
    pub(crate) fn new(expression: String, value: f64) -> Self {
        Self {
            expression,
            result: format_result(value),
            value,
        }
    }
}

/// Evaluate the pending expression followed by the current operand.
///
/// `pending` is the text accumulated by operator presses (e.g. `"7 + "`)
/// and `operand` is what the display currently shows.
pub fn calculate(pending: &str, operand: &str) -> Result<Calculation, EvaluationError> {
    let expression = format!("{}{}", pending, operand);
    let value = evaluate(&expression)?;
    Ok(Calculation::new(expression, value))
}

/// Evaluate an arithmetic expression left to right.
pub fn evaluate(input: &str) -> Result<f64, EvaluationError> {
    let mut scanner = Scanner::new(input);

    scanner.skip_whitespace();
    if scanner.at_end() {
        return Err(EvaluationError::Empty);
    }

    let mut acc = scanner.operand()?;
    loop {
        scanner.skip_whitespace();
        if scanner.at_end() {
            return Ok(acc);
        }
        let op = scanner.operator()?;
        scanner.skip_whitespace();
        if scanner.at_end() {
            return Err(EvaluationError::TrailingOperator);
        }
        let rhs = scanner.operand()?;
        acc = op.apply(acc, rhs)?;
    }
}

/// Parse a single operand such as the display contents.
pub fn parse_operand(input: &str) -> Result<f64, EvaluationError> {
    let mut scanner = Scanner::new(input.trim());
    if scanner.at_end() {
        return Err(EvaluationError::Empty);
    }
    let value = scanner.operand()?;
    match scanner.peek() {
        None => Ok(value),
        Some(found) => Err(EvaluationError::UnexpectedChar {
            found,
            position: scanner.position,
        }),
    }
}

/// Format a number for the display.
///
/// At most [`MAX_FRACTION_DIGITS`] fractional digits, no exponent and no
/// digit grouping; trailing zeros are trimmed and `-0` becomes `0`.
pub fn format_result(value: f64) -> String {
    let formatted = format!("{:.*}", MAX_FRACTION_DIGITS, value);
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');

    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

fn finite(value: f64) -> Result<f64, EvaluationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvaluationError::NonFinite)
    }
}

struct Scanner<'a> {
    chars: Peekable<Chars<'a>>,
    position: usize,
}

impl<'a> Scanner<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            position: 0,
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next()?;
        self.position += 1;
        Some(c)
    }

    fn at_end(&mut self) -> bool {
        self.peek().is_none()
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
    }

    /// `-? (digits ('.' digits?)? | '.' digits)`
    fn operand(&mut self) -> Result<f64, EvaluationError> {
        let start = self.position;
        let mut literal = String::new();

        if self.peek() == Some('-') {
            literal.push('-');
            self.bump();
        }

        let mut digits = 0;
        let mut seen_dot = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                digits += 1;
            } else if c == '.' && !seen_dot {
                seen_dot = true;
            } else {
                break;
            }
            literal.push(c);
            self.bump();
        }

        if digits == 0 {
            return match self.peek() {
                Some(found) if !found.is_whitespace() && literal.is_empty() => {
                    Err(EvaluationError::UnexpectedChar {
                        found,
                        position: self.position,
                    })
                }
                _ => Err(EvaluationError::MalformedOperand { position: start }),
            };
        }

        let value: f64 = literal
            .parse()
            .map_err(|_| EvaluationError::MalformedOperand { position: start })?;
        finite(value)
    }

    fn operator(&mut self) -> Result<Operator, EvaluationError> {
        let position = self.position;
        match self.bump() {
            Some(c) => Operator::from_char(c)
                .ok_or(EvaluationError::UnexpectedChar { found: c, position }),
            None => Err(EvaluationError::TrailingOperator),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        assert_eq!(evaluate("7 + 3"), Ok(10.0));
        assert_eq!(evaluate("7 - 10"), Ok(-3.0));
        assert_eq!(evaluate("6 * 7"), Ok(42.0));
        assert_eq!(evaluate("10 / 4"), Ok(2.5));
    }

    #[test]
    fn test_typographic_operators() {
        assert_eq!(evaluate("6 × 7"), Ok(42.0));
        assert_eq!(evaluate("9 ÷ 3"), Ok(3.0));
        assert_eq!(evaluate("9 − 3"), Ok(6.0));
    }

    #[test]
    fn test_left_to_right_without_precedence() {
        assert_eq!(evaluate("2 + 3 * 4"), Ok(20.0));
        assert_eq!(evaluate("10 - 4 / 2"), Ok(3.0));
    }

    #[test]
    fn test_whitespace_is_optional() {
        assert_eq!(evaluate("1.5+2.5"), Ok(4.0));
        assert_eq!(evaluate("  8 /2 "), Ok(4.0));
    }

    #[test]
    fn test_signed_and_partial_decimals() {
        assert_eq!(evaluate("-5 + 3"), Ok(-2.0));
        assert_eq!(evaluate("4 * -2"), Ok(-8.0));
        assert_eq!(evaluate(".5 + 5."), Ok(5.5));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(evaluate("5 / 0"), Err(EvaluationError::DivisionByZero));
        assert_eq!(evaluate("5 / 0.0"), Err(EvaluationError::DivisionByZero));
    }

    #[test]
    fn test_malformed_input() {
        assert_eq!(evaluate(""), Err(EvaluationError::Empty));
        assert_eq!(evaluate("   "), Err(EvaluationError::Empty));
        assert_eq!(evaluate("12 + "), Err(EvaluationError::TrailingOperator));
        assert!(matches!(
            evaluate("1..2"),
            Err(EvaluationError::UnexpectedChar { found: '.', .. })
        ));
        assert!(matches!(
            evaluate("2 +* 2"),
            Err(EvaluationError::UnexpectedChar { found: '*', .. })
        ));
        assert!(matches!(
            evaluate("- + 1"),
            Err(EvaluationError::MalformedOperand { .. })
        ));
    }

    #[test]
    fn test_code_is_not_reachable() {
        assert!(evaluate("alert(1)").is_err());
        assert!(evaluate("Math.PI").is_err());
        assert!(evaluate("(1 + 2)").is_err());
        assert!(evaluate("2 ** 3").is_err());
        assert!(evaluate("1; 2").is_err());
    }

    #[test]
    fn test_overflow_is_rejected() {
        let huge = format!("1{} * 10", "0".repeat(308));
        assert_eq!(evaluate(&huge), Err(EvaluationError::NonFinite));
    }

    #[test]
    fn test_calculate_joins_pending_and_operand() {
        let calc = calculate("7 + ", "3").unwrap();
        assert_eq!(calc.expression, "7 + 3");
        assert_eq!(calc.result, "10");
        assert_eq!(calc.value, 10.0);
    }

    #[test]
    fn test_two_operand_grid() {
        let operands = [0.0, 1.0, 2.5, 7.0, 123.456];
        for &a in &operands {
            for &b in &operands {
                let add = calculate(&format!("{} + ", a), &b.to_string()).unwrap();
                assert_eq!(add.result, format_result(a + b));
                let sub = calculate(&format!("{} - ", a), &b.to_string()).unwrap();
                assert_eq!(sub.result, format_result(a - b));
                let mul = calculate(&format!("{} * ", a), &b.to_string()).unwrap();
                assert_eq!(mul.result, format_result(a * b));
                if b != 0.0 {
                    let div = calculate(&format!("{} / ", a), &b.to_string()).unwrap();
                    assert_eq!(div.result, format_result(a / b));
                }
            }
        }
    }

    #[test]
    fn test_format_result() {
        assert_eq!(format_result(10.0), "10");
        assert_eq!(format_result(2.5), "2.5");
        assert_eq!(format_result(1.0 / 3.0), "0.33333333");
        assert_eq!(format_result(2.0 / 3.0), "0.66666667");
        assert_eq!(format_result(0.1 + 0.2), "0.3");
        assert_eq!(format_result(-0.000000001), "0");
        assert_eq!(format_result(1_000_000.0), "1000000");
        assert_eq!(format_result(-42.125), "-42.125");
    }

    #[test]
    fn test_parse_operand() {
        assert_eq!(parse_operand("42"), Ok(42.0));
        assert_eq!(parse_operand("-0.5"), Ok(-0.5));
        assert_eq!(
            parse_operand("Error"),
            Err(EvaluationError::UnexpectedChar {
                found: 'E',
                position: 0,
            })
        );
        assert!(parse_operand("1 + 2").is_err());
        assert_eq!(parse_operand(""), Err(EvaluationError::Empty));
    }
}
