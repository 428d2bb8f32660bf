//! Built-in evaluator: walks the AST produced by [`Parser`].

use crate::core::capability::{EvalFailure, ExpressionEvaluator};
use crate::core::parser::{AstNode, Parser};
use crate::core::value::Value;
use crate::core::{Builtin, CalcError, CalcResult, Calculator};

/// Golden ratio
const PHI: f64 = 1.618_033_988_749_895;

/// Resolves a named constant
fn constant(name: &str) -> Option<Value> {
    let value = match name {
        "pi" | "PI" => Value::Number(std::f64::consts::PI),
        "e" | "E" => Value::Number(std::f64::consts::E),
        "tau" => Value::Number(std::f64::consts::TAU),
        "phi" => Value::Number(PHI),
        "true" => Value::Boolean(true),
        "false" => Value::Boolean(false),
        "null" => Value::Null,
        _ => return None,
    };
    Some(value)
}

/// Evaluator for AST expressions.
///
/// Stateless: every call starts from scratch, so one instance can serve any
/// number of submissions.
#[derive(Debug, Default, Clone, Copy)]
pub struct Evaluator;

impl Evaluator {
    /// Creates a new evaluator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Evaluates an AST node and returns the resulting value
    pub fn evaluate(&self, node: &AstNode) -> CalcResult<Value> {
        match node {
            AstNode::Empty => Ok(Value::Undefined),
            AstNode::Number(n) => Calculator::check_overflow(*n).map(Value::Number),
            AstNode::Identifier(name) => Self::resolve(name),
            AstNode::Call { name, args } => self.call(name, args),
            AstNode::BinaryOp { left, op, right } => {
                let a = self.number(left)?;
                let b = self.number(right)?;
                Calculator::calculate(a, b, *op).map(Value::Number)
            }
            AstNode::Compare { left, op, right } => {
                let a = self.number(left)?;
                let b = self.number(right)?;
                Ok(Value::Boolean(op.holds(a, b)))
            }
            AstNode::Negate(inner) => {
                let value = self.number(inner)?;
                Calculator::negate(value).map(Value::Number)
            }
            AstNode::Factorial(inner) => {
                let value = self.number(inner)?;
                Calculator::factorial(value).map(Value::Number)
            }
        }
    }

    /// Parses and evaluates a string expression
    pub fn evaluate_str(&self, input: &str) -> CalcResult<Value> {
        let ast = Parser::parse_str(input)?;
        self.evaluate(&ast)
    }

    fn resolve(name: &str) -> CalcResult<Value> {
        if let Some(value) = constant(name) {
            return Ok(value);
        }
        Builtin::from_name(name)
            .map(|f| Value::Function(f.name().to_string()))
            .ok_or_else(|| CalcError::UndefinedSymbol(name.to_string()))
    }

    fn call(&self, name: &str, args: &[AstNode]) -> CalcResult<Value> {
        let Some(function) = Builtin::from_name(name) else {
            return Err(if constant(name).is_some() {
                CalcError::NotAFunction(name.to_string())
            } else {
                CalcError::UndefinedSymbol(name.to_string())
            });
        };

        let values = args
            .iter()
            .map(|arg| self.number(arg))
            .collect::<CalcResult<Vec<f64>>>()?;
        function.apply(&values).map(Value::Number)
    }

    /// Evaluates a node in numeric context
    fn number(&self, node: &AstNode) -> CalcResult<f64> {
        match self.evaluate(node)? {
            Value::Number(n) => Ok(n),
            Value::Boolean(b) => Ok(if b { 1.0 } else { 0.0 }),
            Value::Null => Ok(0.0),
            Value::Undefined => Err(CalcError::InvalidResult("undefined".into())),
            Value::Function(name) => Err(CalcError::FunctionOperand(name)),
        }
    }
}

impl ExpressionEvaluator for Evaluator {
    fn evaluate(&mut self, expression: &str) -> Result<Value, EvalFailure> {
        self.evaluate_str(expression).map_err(EvalFailure::from)
    }
}
