use std::f64::consts::{E, PI};

use crate::{
    error::EvalError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{EvalResult, Parser, Precedence},
        value::core::Value,
    },
};

/// The shape of a builtin math function.
#[derive(Debug, Clone, Copy)]
pub enum Builtin {
    /// Takes no argument, e.g. `pi`. A trailing `()` is optional.
    Constant(f64),
    /// Takes one parenthesized argument, e.g. `sqrt(2)`.
    Unary(fn(f64) -> f64),
    /// Takes two comma-separated arguments, e.g. `atan2(1, 1)`.
    Binary(fn(f64, f64) -> f64),
}

/// Defines the builtin functions by generating a lookup table.
///
/// The macro produces `BUILTIN_TABLE`, the static `(name, Builtin)` pairs
/// searched by [`lookup`].
macro_rules! builtin_functions {
    (
        $(
            $name:literal => $builtin:expr
        ),* $(,)?
    ) => {
        static BUILTIN_TABLE: &[(&str, Builtin)] = &[
            $(
                ($name, $builtin),
            )*
        ];
    };
}

builtin_functions! {
    "sin"   => Builtin::Unary(f64::sin),
    "cos"   => Builtin::Unary(f64::cos),
    "tan"   => Builtin::Unary(f64::tan),
    "asin"  => Builtin::Unary(f64::asin),
    "acos"  => Builtin::Unary(f64::acos),
    "atan"  => Builtin::Unary(f64::atan),
    "atan2" => Builtin::Binary(f64::atan2),
    "sinh"  => Builtin::Unary(f64::sinh),
    "cosh"  => Builtin::Unary(f64::cosh),
    "tanh"  => Builtin::Unary(f64::tanh),
    "asinh" => Builtin::Unary(f64::asinh),
    "acosh" => Builtin::Unary(f64::acosh),
    "atanh" => Builtin::Unary(f64::atanh),
    "exp"   => Builtin::Unary(f64::exp),
    "log"   => Builtin::Unary(f64::ln),
    "log10" => Builtin::Unary(f64::log10),
    "log2"  => Builtin::Unary(f64::log2),
    "ceil"  => Builtin::Unary(f64::ceil),
    "floor" => Builtin::Unary(f64::floor),
    "round" => Builtin::Unary(f64::round),
    "sqrt"  => Builtin::Unary(f64::sqrt),
    "pi"    => Builtin::Constant(PI),
    "e"     => Builtin::Constant(E),
}

/// Finds the builtin called `name`.
///
/// # Example
/// ```
/// use reckon::interpreter::parser::builtin::{Builtin, lookup};
///
/// assert!(matches!(lookup("sqrt"), Some(Builtin::Unary(_))));
/// assert!(matches!(lookup("atan2"), Some(Builtin::Binary(_))));
/// assert!(lookup("sqr").is_none());
/// ```
#[must_use]
pub fn lookup(name: &str) -> Option<Builtin> {
    BUILTIN_TABLE.iter()
                 .find(|(candidate, _)| *candidate == name)
                 .map(|(_, builtin)| *builtin)
}

impl Parser {
    /// Evaluates a call to `function`, named by `name`, after the name was
    /// consumed.
    ///
    /// Arguments are full expressions and must evaluate to numbers.
    pub(crate) fn call_builtin(&mut self, function: Builtin, name: &Token) -> EvalResult<Value> {
        match function {
            Builtin::Constant(value) => {
                if self.peek_kind() == TokenKind::LParen {
                    self.consume();
                    self.expect(TokenKind::RParen)?;
                }
                Ok(Value::Number(value))
            },
            Builtin::Unary(apply) => {
                self.expect(TokenKind::LParen)?;
                let argument = self.grouping()?;
                let x = self.number_argument(argument, name)?;
                Ok(Value::Number(apply(x)))
            },
            Builtin::Binary(apply) => {
                self.expect(TokenKind::LParen)?;
                let first = self.expression(Precedence::None, None)?;
                self.expect(TokenKind::Comma)?;
                let second = self.grouping()?;
                let x = self.number_argument(first, name)?;
                let y = self.number_argument(second, name)?;
                Ok(Value::Number(apply(x, y)))
            },
        }
    }

    fn number_argument(&self, argument: Value, name: &Token) -> EvalResult<f64> {
        match argument {
            Value::Number(x) => Ok(x),
            other => Err(EvalError::InvalidOperation { operator:  name.lexeme(&self.source)
                                                                      .to_string(),
                                                       type_name: other.type_name(),
                                                       column:    name.column(&self.source), }.into()),
        }
    }
}
