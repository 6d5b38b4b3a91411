use crate::{
    error::EvalError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::core::{EvalResult, Parser, Precedence, arena_failure},
        value::{core::Value, text::Text},
    },
};

impl Parser {
    /// Parses the right operand of the binary `operator`.
    ///
    /// The operand is parsed at the operator's own binding power, which makes
    /// equal-precedence chains left-associative. `^` parses one level lower
    /// so that `a ^ b ^ c` groups as `a ^ (b ^ c)`.
    pub(crate) fn infix(&mut self, operator: &Token) -> EvalResult<Value> {
        let power = Precedence::of(operator.kind);
        let min_bp = if operator.kind == TokenKind::Caret {
            power.lower()
        } else {
            power
        };
        self.expression(min_bp, None)
    }

    /// Applies a binary operator to two evaluated operands.
    ///
    /// Both operands must have the same type. Supported combinations:
    /// - `+`: numbers (addition) and strings (concatenation).
    /// - `-`, `*`, `/`, `^`: numbers. Division by zero and invalid powers
    ///   follow IEEE-754 and produce infinities or NaN.
    /// - `==`, `!=`: every type.
    /// - `<`, `<=`, `>`, `>=`: numbers.
    /// - `&&`, `||`: booleans. Both sides are always evaluated.
    ///
    /// # Errors
    /// A type mismatch or an unsupported combination fails the line.
    pub(crate) fn do_operation(&mut self,
                               left: Value,
                               right: Value,
                               operator: &Token)
                               -> EvalResult<Value> {
        use TokenKind::{
            AndAnd, BangEqual, Caret, EqualEqual, Greater, GreaterEqual, Less, LessEqual, Minus,
            OrOr, Plus, Slash, Star,
        };
        use Value::{Bool, Number};

        let column = operator.column(&self.source);

        if left.value_type() != right.value_type() {
            return Err(EvalError::TypeMismatch { left: self.render(&left),
                                                 left_type: left.type_name(),
                                                 right: self.render(&right),
                                                 right_type: right.type_name(),
                                                 column }.into());
        }

        let result = match (operator.kind, &left, &right) {
            (Plus, Number(a), Number(b)) => Number(a + b),
            (Plus, Value::String(a), Value::String(b)) => {
                Value::String(Text::concat(&mut self.arena, a, b).map_err(arena_failure(column))?)
            },
            (Minus, Number(a), Number(b)) => Number(a - b),
            (Star, Number(a), Number(b)) => Number(a * b),
            (Slash, Number(a), Number(b)) => Number(a / b),
            (Caret, Number(a), Number(b)) => Number(a.powf(*b)),
            (EqualEqual, ..) => Bool(left.equals(&right, &self.arena)
                                         .map_err(arena_failure(column))?),
            (BangEqual, ..) => Bool(!left.equals(&right, &self.arena)
                                         .map_err(arena_failure(column))?),
            (Less, Number(a), Number(b)) => Bool(a < b),
            (LessEqual, Number(a), Number(b)) => Bool(a <= b),
            (Greater, Number(a), Number(b)) => Bool(a > b),
            (GreaterEqual, Number(a), Number(b)) => Bool(a >= b),
            (AndAnd, Bool(a), Bool(b)) => Bool(*a && *b),
            (OrOr, Bool(a), Bool(b)) => Bool(*a || *b),
            _ => {
                return Err(EvalError::InvalidOperation { operator: operator.lexeme(&self.source)
                                                                           .to_string(),
                                                         type_name: left.type_name(),
                                                         column }.into());
            },
        };

        Ok(result)
    }
}
