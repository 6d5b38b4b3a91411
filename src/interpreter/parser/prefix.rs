use std::rc::Rc;

use crate::{
    error::EvalError,
    interpreter::{
        lexer::{Token, TokenKind},
        parser::{
            builtin,
            core::{EvalResult, Halt, Parser, Precedence, arena_failure},
        },
        value::{core::Value, text::Text},
    },
};

impl Parser {
    /// Evaluates the construct introduced by `token`.
    ///
    /// Every token kind that may start an expression has a handler here:
    /// - literals: numbers, strings, `true`, `false`
    /// - `( expr )`
    /// - prefix `-` and `!`
    /// - `ans`, `$name`, `let name = expr`
    /// - identifiers: builtins, `export(...)`, `import(...)`
    /// - `exit`
    ///
    /// Any other token cannot start an expression and fails the line.
    pub(crate) fn prefix(&mut self, token: &Token) -> EvalResult<Value> {
        match token.kind {
            TokenKind::Number => self.number(token),
            TokenKind::String => self.string(token),
            TokenKind::True => Ok(Value::Bool(true)),
            TokenKind::False => Ok(Value::Bool(false)),
            TokenKind::LParen => self.grouping(),
            TokenKind::Minus | TokenKind::Bang => self.unary(token),
            TokenKind::Ans => Ok(self.ans.clone()),
            TokenKind::Dollar => self.get_var(),
            TokenKind::Let => self.declare(),
            TokenKind::Identifier => self.identifier(token),
            TokenKind::Exit => Err(Halt::Exit),
            _ => Err(self.unexpected(token, "an expression").into()),
        }
    }

    /// Evaluates `( expr )` after the opening parenthesis was consumed.
    pub(crate) fn grouping(&mut self) -> EvalResult<Value> {
        let value = self.expression(Precedence::None, None)?;
        self.expect(TokenKind::RParen)?;
        Ok(value)
    }

    fn number(&self, token: &Token) -> EvalResult<Value> {
        let lexeme = token.lexeme(&self.source);
        lexeme.parse::<f64>()
              .map(Value::Number)
              .map_err(|_| self.unexpected(token, "a number").into())
    }

    /// Copies the literal's body, without its quotes, into the arena.
    /// Escapes stay as written.
    fn string(&mut self, token: &Token) -> EvalResult<Value> {
        let source = Rc::clone(&self.source);
        let body = source.get(token.span.start + 1..token.span.end - 1)
                         .unwrap_or_default();
        let column = token.column(&source);

        let text = Text::in_arena(&mut self.arena, body.as_bytes()).map_err(arena_failure(column))?;
        Ok(Value::String(text))
    }

    fn unary(&mut self, token: &Token) -> EvalResult<Value> {
        let operand = self.expression(Precedence::Unary, None)?;

        match (token.kind, operand) {
            (TokenKind::Minus, Value::Number(n)) => Ok(Value::Number(-n)),
            (TokenKind::Bang, Value::Bool(b)) => Ok(Value::Bool(!b)),
            (_, operand) => {
                Err(EvalError::InvalidOperation { operator:  token.lexeme(&self.source)
                                                                  .to_string(),
                                                  type_name: operand.type_name(),
                                                  column:    token.column(&self.source), }.into())
            },
        }
    }

    /// Evaluates `$name`.
    ///
    /// An unknown name fails the line; every declared variable is recorded to
    /// the diagnostics sink to help spot typos.
    fn get_var(&mut self) -> EvalResult<Value> {
        let ident = self.expect(TokenKind::Identifier)?;
        let source = Rc::clone(&self.source);
        let name = ident.lexeme(&source);

        if let Some(value) = self.env.get(name) {
            return Ok(value.clone());
        }

        for (_, key, value) in self.env.iter() {
            let rendered = value.stringify(&self.arena, self.render_limit);
            self.log.record(&format!("Key: {key}, Value: {rendered}"));
        }
        Err(EvalError::UnknownVariable { name:   name.to_string(),
                                         column: ident.column(&source), }.into())
    }

    /// Evaluates `let name = expr`.
    ///
    /// The value is copied into owned storage before it is stored, since the
    /// arena is rewound on the next line. Redeclaring a name replaces its
    /// value, whatever its previous type. The stored value is also the result.
    fn declare(&mut self) -> EvalResult<Value> {
        let ident = self.expect(TokenKind::Identifier)?;
        self.expect(TokenKind::Equals)?;
        let value = self.expression(Precedence::None, None)?;

        let source = Rc::clone(&self.source);
        let name = ident.lexeme(&source);
        let column = ident.column(&source);

        let owned = value.into_owned(&self.arena)
                         .map_err(arena_failure(column))?;
        self.env
            .set(name, owned.clone())
            .map_err(|full| EvalError::EnvironmentFull { name: name.to_string(),
                                                         capacity: full.capacity,
                                                         column })?;
        Ok(owned)
    }

    /// Dispatches a bare identifier to `export`, `import` or a builtin.
    fn identifier(&mut self, token: &Token) -> EvalResult<Value> {
        let source = Rc::clone(&self.source);
        let name = token.lexeme(&source);

        match name {
            "export" => self.export(token),
            "import" => self.import(token),
            _ => match builtin::lookup(name) {
                Some(function) => self.call_builtin(function, token),
                None => Err(EvalError::UnknownIdentifier { name:   name.to_string(),
                                                           column: token.column(&source), }.into()),
            },
        }
    }
}
