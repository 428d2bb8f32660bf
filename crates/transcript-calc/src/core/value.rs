//! Values an evaluator can hand back to the pipeline.

use std::fmt;

/// Result of evaluating an expression.
///
/// Only `Number` and `Boolean` are usable results. `Function` is what a bare
/// function name evaluates to; `Null` and `Undefined` are the absence
/// sentinels.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Numeric result
    Number(f64),
    /// Boolean result (comparisons, `true`/`false`)
    Boolean(bool),
    /// Callable value, identified by name
    Function(String),
    /// Explicit null value
    Null,
    /// No value at all (empty or comment-only input)
    Undefined,
}

impl Value {
    /// Returns true for either absence sentinel
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Null | Self::Undefined)
    }

    /// Returns true for a function value
    #[must_use]
    pub const fn is_callable(&self) -> bool {
        matches!(self, Self::Function(_))
    }

    /// Returns the numeric payload, if any
    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => f.write_str(&format_number(*n)),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Function(name) => write!(f, "function {name}"),
            Self::Null => f.write_str("null"),
            Self::Undefined => f.write_str("undefined"),
        }
    }
}

/// Formats a number in its canonical form.
///
/// Shortest round-trip digits; exponent notation with an explicit sign
/// outside `[1e-6, 1e21)`.
#[must_use]
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".into();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.into();
    }
    if n == 0.0 {
        // Covers -0 as well
        return "0".into();
    }

    let magnitude = n.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let formatted = format!("{n:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) if exponent.starts_with('-') => {
                format!("{mantissa}e{exponent}")
            }
            Some((mantissa, exponent)) => format!("{mantissa}e+{exponent}"),
            None => formatted,
        };
    }

    format!("{n}")
}
