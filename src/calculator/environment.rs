//! The closed set of constants and functions an expression may reference.

use super::error::CalcError;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::f64::consts::PI;
use std::fmt;

/// Unit used for the arguments of `sin`/`cos`/`tan` and the results of
/// their inverses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    #[default]
    Radians,
    Degrees,
}

impl AngleMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Radians => Self::Degrees,
            Self::Degrees => Self::Radians,
        }
    }

    /// Factor converting an argument in this unit to radians.
    fn radians_per_unit(self) -> f64 {
        match self {
            Self::Radians => 1.0,
            Self::Degrees => PI / 180.0,
        }
    }

    /// Factor converting radians to this unit.
    fn units_per_radian(self) -> f64 {
        match self {
            Self::Radians => 1.0,
            Self::Degrees => 180.0 / PI,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Radians => "Radians",
            Self::Degrees => "Degrees",
        }
    }
}

impl fmt::Display for AngleMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Named constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Constant {
    Pi,
    E,
}

impl Constant {
    pub const ALL: [Constant; 2] = [Self::Pi, Self::E];

    pub fn value(self) -> f64 {
        match self {
            Self::Pi => PI,
            Self::E => std::f64::consts::E,
        }
    }

    /// Spelling used in canonical form.
    pub fn name(self) -> &'static str {
        match self {
            Self::Pi => "PI",
            Self::E => "E",
        }
    }
}

/// Built-in functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Ln,
    Log,
    Sqrt,
    Factorial,
    Rand,
}

impl Function {
    pub const ALL: [Function; 14] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Asin,
        Self::Acos,
        Self::Atan,
        Self::Sinh,
        Self::Cosh,
        Self::Tanh,
        Self::Ln,
        Self::Log,
        Self::Sqrt,
        Self::Factorial,
        Self::Rand,
    ];

    /// Spelling used in canonical form.
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Ln => "ln",
            Self::Log => "log",
            Self::Sqrt => "sqrt",
            Self::Factorial => "factorial",
            Self::Rand => "rand",
        }
    }

    /// Number of arguments the function takes.
    pub fn arity(self) -> usize {
        match self {
            Self::Rand => 0,
            _ => 1,
        }
    }

    /// Text a function key appends to the expression buffer.
    pub fn key_text(self) -> String {
        match self {
            Self::Sqrt => "√(".to_string(),
            Self::Rand => "rand()".to_string(),
            other => format!("{}(", other.name()),
        }
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

lazy_static! {
    static ref FUNCTIONS: HashMap<&'static str, Function> =
        Function::ALL.iter().map(|&f| (f.name(), f)).collect();
    static ref CONSTANTS: HashMap<&'static str, Constant> = Constant::ALL
        .iter()
        .map(|&c| (c.name(), c))
        .collect();
}

/// Factorial by iterative product.
///
/// Negative (or NaN) input yields NaN. Non-integers multiply up to their
/// floor. The loop stops once the product overflows, so huge arguments
/// return infinity without spinning.
pub fn factorial(n: f64) -> f64 {
    if n.is_nan() || n < 0.0 {
        return f64::NAN;
    }
    if n == 0.0 || n == 1.0 {
        return 1.0;
    }
    let mut result: f64 = 1.0;
    let mut i: f64 = 2.0;
    while i <= n && result.is_finite() {
        result *= i;
        i += 1.0;
    }
    result
}

/// Evaluation scope: the constant/function tables plus the angle mode.
#[derive(Clone, Copy, Debug, Default)]
pub struct Environment {
    angle_mode: AngleMode,
}

impl Environment {
    pub fn new(angle_mode: AngleMode) -> Self {
        Self { angle_mode }
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    pub fn function(&self, name: &str) -> Option<Function> {
        FUNCTIONS.get(name).copied()
    }

    pub fn constant(&self, name: &str) -> Option<Constant> {
        CONSTANTS.get(name).copied()
    }

    /// Apply `function` to already evaluated arguments.
    ///
    /// `rand` draws a fresh value on every call.
    pub fn call(&self, function: Function, args: &[f64]) -> Result<f64, CalcError> {
        let x = match args {
            [] if function == Function::Rand => return Ok(rand::random::<f64>()),
            [x] if function.arity() == 1 => *x,
            _ => {
                return Err(CalcError::Arity {
                    function: function.name(),
                    expected: function.arity(),
                    found: args.len(),
                });
            }
        };
        let domain = |ok: bool| {
            if ok {
                Ok(())
            } else {
                Err(CalcError::Domain {
                    function: function.name(),
                    value: x,
                })
            }
        };

        let value = match function {
            Function::Sin => (x * self.angle_mode.radians_per_unit()).sin(),
            Function::Cos => (x * self.angle_mode.radians_per_unit()).cos(),
            Function::Tan => (x * self.angle_mode.radians_per_unit()).tan(),
            Function::Asin => {
                domain((-1.0..=1.0).contains(&x))?;
                x.asin() * self.angle_mode.units_per_radian()
            }
            Function::Acos => {
                domain((-1.0..=1.0).contains(&x))?;
                x.acos() * self.angle_mode.units_per_radian()
            }
            Function::Atan => x.atan() * self.angle_mode.units_per_radian(),
            Function::Sinh => x.sinh(),
            Function::Cosh => x.cosh(),
            Function::Tanh => x.tanh(),
            Function::Ln => {
                domain(x > 0.0)?;
                x.ln()
            }
            Function::Log => {
                domain(x > 0.0)?;
                x.log10()
            }
            Function::Sqrt => {
                domain(x >= 0.0)?;
                x.sqrt()
            }
            Function::Factorial => {
                domain(x >= 0.0)?;
                factorial(x)
            }
            Function::Rand => rand::random::<f64>(),
        };
        Ok(value)
    }
}
