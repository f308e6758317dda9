//! Expression evaluation.
//!
//! Parses canonical text into a tree and interprets it against an
//! [`Environment`]. Every failure, whatever its kind, becomes
//! [`Outcome::Error`] at this boundary.

use super::environment::{AngleMode, Environment};
use super::error::CalcError;
use super::normalize::normalize;
use super::parser::parse;
use tracing::debug;

/// Maximum number of decimal places shown in a result.
pub const DISPLAY_DECIMALS: usize = 10;

/// Result of evaluating a calculator expression.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Outcome {
    /// A finite, non-NaN value.
    Number(f64),
    Error,
}

impl Outcome {
    /// Check if this is a successful result.
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Error => None,
        }
    }

    /// Text shown for this outcome: the formatted number or `Error`.
    pub fn display(&self) -> String {
        match self {
            Self::Number(value) => format_result(*value),
            Self::Error => "Error".to_string(),
        }
    }
}

impl From<Result<f64, CalcError>> for Outcome {
    fn from(result: Result<f64, CalcError>) -> Self {
        match result {
            Ok(value) => Self::Number(value),
            Err(_) => Self::Error,
        }
    }
}

/// Evaluate a canonical expression, keeping the failure kind.
pub fn try_evaluate(canonical: &str, angle_mode: AngleMode) -> Result<f64, CalcError> {
    let expr = parse(canonical)?;
    let value = expr.eval(&Environment::new(angle_mode))?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::NonFinite)
    }
}

/// Evaluate a canonical expression.
pub fn evaluate(canonical: &str, angle_mode: AngleMode) -> Outcome {
    let result = try_evaluate(canonical, angle_mode);
    if let Err(ref error) = result {
        debug!(expression = canonical, kind = error.kind(), %error, "evaluation failed");
    }
    result.into()
}

/// Normalize and evaluate raw keypad input.
pub fn evaluate_input(raw: &str, angle_mode: AngleMode) -> Outcome {
    evaluate(&normalize(raw), angle_mode)
}

/// Format a value for display.
///
/// Rounds to [`DISPLAY_DECIMALS`] places and strips trailing zeros. Never
/// uses exponent notation, so the text can be typed back in as an
/// expression.
pub fn format_result(value: f64) -> String {
    let formatted = format!("{:.*}", DISPLAY_DECIMALS, value);
    let trimmed = if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted.as_str()
    };

    // Tiny negatives round to "-0".
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn eval_raw(raw: &str, mode: AngleMode) -> Outcome {
        evaluate_input(raw, mode)
    }

    #[test]
    fn test_basic_evaluation() {
        let result = evaluate("2+2", AngleMode::Radians);
        assert!(result.is_number());
        assert_eq!(result.display(), "4");
    }

    #[test]
    fn test_addition_matches_float_sum() {
        for (a, b) in [(0.1, 0.2), (1e6, 2.5), (-3.75, 1.25), (123.456, 0.0)] {
            let outcome = evaluate(&format!("{a}+{b}"), AngleMode::Radians);
            assert!(approx(outcome.value().unwrap(), a + b));
        }
        assert_eq!(evaluate("0.1+0.2", AngleMode::Radians).display(), "0.3");
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(evaluate("1/0", AngleMode::Radians), Outcome::Error);
        assert_eq!(
            try_evaluate("1/0", AngleMode::Radians),
            Err(CalcError::NonFinite)
        );
        assert_eq!(evaluate("0/0", AngleMode::Radians), Outcome::Error);
    }

    #[test]
    fn test_trig_functions() {
        let deg = evaluate("sin(90)", AngleMode::Degrees).value().unwrap();
        assert!(approx(deg, 1.0));
        let rad = evaluate("sin(PI/2)", AngleMode::Radians).value().unwrap();
        assert!(approx(rad, 1.0));
        assert_eq!(evaluate("sin(PI)", AngleMode::Radians).display(), "0");
    }

    #[test]
    fn test_angle_mode_changes_result() {
        let rad = evaluate("sin(90)", AngleMode::Radians);
        let deg = evaluate("sin(90)", AngleMode::Degrees);
        assert_ne!(rad.display(), deg.display());
        assert_eq!(deg.display(), "1");
    }

    #[test]
    fn test_factorial() {
        assert_eq!(eval_raw("5!", AngleMode::Radians), Outcome::Number(120.0));
        assert_eq!(eval_raw("-1!", AngleMode::Radians), Outcome::Error);
        assert_eq!(eval_raw("0!", AngleMode::Radians), Outcome::Number(1.0));
        assert_eq!(eval_raw("171!", AngleMode::Radians), Outcome::Error);
        assert_eq!(eval_raw("(2+1)!", AngleMode::Radians), Outcome::Number(6.0));
    }

    #[test]
    fn test_implicit_multiplication() {
        assert_eq!(eval_raw("2(3+4)", AngleMode::Radians), Outcome::Number(14.0));
        assert_eq!(eval_raw("(1+1)(2+2)", AngleMode::Radians), Outcome::Number(8.0));
        assert_eq!(eval_raw("2π", AngleMode::Radians).display(), "6.2831853072");
    }

    #[test]
    fn test_keypad_symbols() {
        assert_eq!(eval_raw("6×7", AngleMode::Radians), Outcome::Number(42.0));
        assert_eq!(eval_raw("9÷4", AngleMode::Radians), Outcome::Number(2.25));
        assert_eq!(eval_raw("2^10", AngleMode::Radians), Outcome::Number(1024.0));
        assert_eq!(eval_raw("√9", AngleMode::Radians), Outcome::Number(3.0));
        assert_eq!(eval_raw("√(16)+1", AngleMode::Radians), Outcome::Number(5.0));
        assert_eq!(eval_raw("50%", AngleMode::Radians), Outcome::Number(0.5));
        assert_eq!(eval_raw("e", AngleMode::Radians).display(), "2.7182818285");
    }

    #[test]
    fn test_raw_and_canonical_agree() {
        for raw in [
            "2^3!", "-2^2", "3!^2", "2^50%", "√9!", "2×-3+4!", "10%5", "5%!", "5%^2", "2^-2!",
            "-2!^2", "√-4", "2--3!",
        ] {
            let direct = try_evaluate(raw, AngleMode::Radians).ok();
            let normalized = try_evaluate(&normalize(raw), AngleMode::Radians).ok();
            assert_eq!(direct, normalized, "mismatch for {raw}");
        }
    }

    #[test]
    fn test_sign_and_power() {
        assert_eq!(eval_raw("-2^2", AngleMode::Radians), Outcome::Number(-4.0));
        assert_eq!(eval_raw("(-2)^2", AngleMode::Radians), Outcome::Number(4.0));
        assert_eq!(eval_raw("2^-2", AngleMode::Radians), Outcome::Number(0.25));
        assert_eq!(eval_raw("3-2^2", AngleMode::Radians), Outcome::Number(-1.0));
    }

    #[test]
    fn test_percent_then_factorial() {
        let outcome = eval_raw("5%!", AngleMode::Radians);
        assert!(outcome.is_number());
        assert!(outcome.value().unwrap() > 0.0);
        assert!(outcome.value().unwrap() < 1e-150);
    }

    #[test]
    fn test_percent_then_operand_multiplies() {
        assert_eq!(eval_raw("10%5", AngleMode::Radians), Outcome::Number(0.5));
    }

    #[test]
    fn test_deep_nesting_fails_closed() {
        let nested = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
        assert_eq!(eval_raw(&nested, AngleMode::Radians), Outcome::Error);
        let signs = format!("{}1", "-".repeat(100_000));
        assert_eq!(eval_raw(&signs, AngleMode::Radians), Outcome::Error);
    }

    #[test]
    fn test_domain_errors() {
        assert_eq!(eval_raw("asin(2)", AngleMode::Radians), Outcome::Error);
        assert!(matches!(
            try_evaluate("ln(0)", AngleMode::Radians),
            Err(CalcError::Domain { .. })
        ));
        assert_eq!(eval_raw("log(-1)", AngleMode::Radians), Outcome::Error);
    }

    #[test]
    fn test_syntax_errors_do_not_panic() {
        for raw in ["", "3+", "(", ")", "sin(", "2**", "√", "!", "1.2.3", "2$3", "××"] {
            assert_eq!(eval_raw(raw, AngleMode::Radians), Outcome::Error, "{raw}");
        }
    }

    #[test]
    fn test_rand_is_fresh() {
        let values: Vec<f64> = (0..20)
            .map(|_| evaluate("rand()", AngleMode::Radians).value().unwrap())
            .collect();
        assert!(values.iter().all(|v| (0.0..1.0).contains(v)));
        assert!(values.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn test_format_result() {
        assert_eq!(format_result(4.0), "4");
        assert_eq!(format_result(1.0 / 3.0), "0.3333333333");
        assert_eq!(format_result(2.5), "2.5");
        assert_eq!(format_result(-7.25), "-7.25");
        assert_eq!(format_result(-1e-12), "0");
        assert_eq!(format_result(1e21), "1000000000000000000000");
        assert_eq!(format_result(120.0), "120");
    }
}
