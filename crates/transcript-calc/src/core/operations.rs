//! Arithmetic, comparison and built-in function primitives

use crate::core::{CalcError, CalcResult};

/// Binary arithmetic operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
    /// Modulo (%)
    Modulo,
    /// Power (^)
    Power,
}

impl Operation {
    /// Returns the operator symbol for display
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Modulo => "%",
            Self::Power => "^",
        }
    }
}

/// Relational operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// ==
    Equal,
    /// !=
    NotEqual,
    /// <
    Less,
    /// <=
    LessEqual,
    /// >
    Greater,
    /// >=
    GreaterEqual,
}

impl Comparison {
    /// Returns the operator symbol for display
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Less => "<",
            Self::LessEqual => "<=",
            Self::Greater => ">",
            Self::GreaterEqual => ">=",
        }
    }

    /// Applies the comparison
    #[must_use]
    pub fn holds(&self, a: f64, b: f64) -> bool {
        match self {
            Self::Equal => a == b,
            Self::NotEqual => a != b,
            Self::Less => a < b,
            Self::LessEqual => a <= b,
            Self::Greater => a > b,
            Self::GreaterEqual => a >= b,
        }
    }
}

/// Stateless arithmetic with overflow and NaN checks on every result
#[derive(Debug, Default, Clone, Copy)]
pub struct Calculator;

impl Calculator {
    /// Performs an operation on two operands
    pub fn calculate(a: f64, b: f64, op: Operation) -> CalcResult<f64> {
        match op {
            Operation::Add => Self::add(a, b),
            Operation::Subtract => Self::subtract(a, b),
            Operation::Multiply => Self::multiply(a, b),
            Operation::Divide => Self::divide(a, b),
            Operation::Modulo => Self::modulo(a, b),
            Operation::Power => Self::power(a, b),
        }
    }

    /// Addition: a + b
    pub fn add(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_overflow(a + b)
    }

    /// Subtraction: a - b
    pub fn subtract(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_overflow(a - b)
    }

    /// Multiplication: a * b
    pub fn multiply(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_overflow(a * b)
    }

    /// Division: a / b
    pub fn divide(a: f64, b: f64) -> CalcResult<f64> {
        if b == 0.0 {
            return Err(CalcError::DivisionByZero);
        }
        Self::check_overflow(a / b)
    }

    /// Modulo: a % b
    pub fn modulo(a: f64, b: f64) -> CalcResult<f64> {
        if b == 0.0 {
            return Err(CalcError::DivisionByZero);
        }
        Self::check_overflow(a % b)
    }

    /// Power: a ^ b
    pub fn power(a: f64, b: f64) -> CalcResult<f64> {
        Self::check_overflow(a.powf(b))
    }

    /// Negation
    pub fn negate(a: f64) -> CalcResult<f64> {
        Self::check_overflow(-a)
    }

    /// Factorial: n!
    pub fn factorial(n: f64) -> CalcResult<f64> {
        if n < 0.0 || n.fract() != 0.0 || n.is_nan() {
            return Err(CalcError::InvalidFactorial);
        }
        // 171! is already infinite
        if n > 170.0 {
            return Err(CalcError::Overflow);
        }
        let mut acc = 1.0;
        let mut k = 2.0;
        while k <= n {
            acc *= k;
            k += 1.0;
        }
        Self::check_overflow(acc)
    }

    /// Checks for overflow (infinity) or NaN
    pub(crate) fn check_overflow(result: f64) -> CalcResult<f64> {
        if result.is_nan() {
            Err(CalcError::InvalidResult("NaN".into()))
        } else if result.is_infinite() {
            Err(CalcError::Overflow)
        } else {
            Ok(result)
        }
    }
}

/// Functions callable from expressions
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Sqrt,
    Cbrt,
    Abs,
    Exp,
    Log,
    Log10,
    Log2,
    Floor,
    Ceil,
    Round,
    Sign,
    Pow,
    Atan2,
    Mod,
    Max,
    Min,
}

impl Builtin {
    const ALL: [Self; 25] = [
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Asin,
        Self::Acos,
        Self::Atan,
        Self::Sinh,
        Self::Cosh,
        Self::Tanh,
        Self::Sqrt,
        Self::Cbrt,
        Self::Abs,
        Self::Exp,
        Self::Log,
        Self::Log10,
        Self::Log2,
        Self::Floor,
        Self::Ceil,
        Self::Round,
        Self::Sign,
        Self::Pow,
        Self::Atan2,
        Self::Mod,
        Self::Max,
        Self::Min,
    ];

    /// Looks up a function by its expression name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Name as written in expressions
    #[must_use]
    pub const fn name(&self) -> &'static str {
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
            Self::Sqrt => "sqrt",
            Self::Cbrt => "cbrt",
            Self::Abs => "abs",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Log10 => "log10",
            Self::Log2 => "log2",
            Self::Floor => "floor",
            Self::Ceil => "ceil",
            Self::Round => "round",
            Self::Sign => "sign",
            Self::Pow => "pow",
            Self::Atan2 => "atan2",
            Self::Mod => "mod",
            Self::Max => "max",
            Self::Min => "min",
        }
    }

    /// Accepted argument count range `(min, max)`; `None` means unbounded
    #[must_use]
    pub const fn arity(&self) -> (usize, Option<usize>) {
        match self {
            Self::Log => (1, Some(2)),
            Self::Pow | Self::Atan2 | Self::Mod => (2, Some(2)),
            Self::Max | Self::Min => (1, None),
            _ => (1, Some(1)),
        }
    }

    /// Applies the function after checking the argument count
    pub fn apply(&self, args: &[f64]) -> CalcResult<f64> {
        let (min, max) = self.arity();
        if args.len() < min {
            return Err(CalcError::TooFewArguments {
                function: self.name().into(),
                expected: min,
                actual: args.len(),
            });
        }
        if let Some(max) = max {
            if args.len() > max {
                return Err(CalcError::TooManyArguments {
                    function: self.name().into(),
                    expected: max,
                    actual: args.len(),
                });
            }
        }

        let x = args[0];
        let raw = match self {
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Asin => x.asin(),
            Self::Acos => x.acos(),
            Self::Atan => x.atan(),
            Self::Sinh => x.sinh(),
            Self::Cosh => x.cosh(),
            Self::Tanh => x.tanh(),
            Self::Sqrt => x.sqrt(),
            Self::Cbrt => x.cbrt(),
            Self::Abs => x.abs(),
            Self::Exp => x.exp(),
            Self::Log => match args.get(1) {
                Some(base) => x.ln() / base.ln(),
                None => x.ln(),
            },
            Self::Log10 => x.log10(),
            Self::Log2 => x.log2(),
            Self::Floor => x.floor(),
            Self::Ceil => x.ceil(),
            Self::Round => x.round(),
            Self::Sign => {
                if x == 0.0 {
                    0.0
                } else {
                    x.signum()
                }
            }
            Self::Pow => return Calculator::power(x, args[1]),
            Self::Atan2 => x.atan2(args[1]),
            Self::Mod => return Calculator::modulo(x, args[1]),
            Self::Max => args.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Self::Min => args.iter().copied().fold(f64::INFINITY, f64::min),
        };
        Calculator::check_overflow(raw)
    }
}
