use std::rc::Rc;

use tracing::debug;

use crate::{
    config::Config,
    error::{EvalError, LexError},
    interpreter::{
        arena::{Arena, ArenaError},
        environment::Environment,
        lexer::{self, Token, TokenKind, tokenize},
        value::core::Value,
    },
    log::{Diagnostics, FileLog, NullLog},
};

/// Why evaluation of a line stopped early.
#[derive(Debug)]
pub(crate) enum Halt {
    /// The line failed.
    Error(EvalError),
    /// `exit` was evaluated.
    Exit,
}

impl From<EvalError> for Halt {
    fn from(error: EvalError) -> Self {
        Self::Error(error)
    }
}

/// Result type used by the parser's handlers.
///
/// `Err` carries either the error that failed the line or the request to
/// exit; both unwind the whole expression through `?`.
pub(crate) type EvalResult<T> = Result<T, Halt>;

/// Binding powers, from loosest to tightest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Tokens that never continue an expression.
    None,
    /// `||`
    Or,
    /// `&&`
    And,
    /// `==` and `!=`
    Equality,
    /// `<`, `<=`, `>` and `>=`
    Comparison,
    /// `+` and `-`
    Term,
    /// `*` and `/`
    Factor,
    /// `^`
    Power,
    /// Prefix `-` and `!`
    Unary,
}

impl Precedence {
    /// The left binding power of `kind` when it appears after an operand.
    ///
    /// # Example
    /// ```
    /// use reckon::interpreter::{lexer::TokenKind, parser::core::Precedence};
    ///
    /// assert!(Precedence::of(TokenKind::Star) > Precedence::of(TokenKind::Plus));
    /// assert_eq!(Precedence::of(TokenKind::RParen), Precedence::None);
    /// ```
    #[must_use]
    pub const fn of(kind: TokenKind) -> Self {
        match kind {
            TokenKind::OrOr => Self::Or,
            TokenKind::AndAnd => Self::And,
            TokenKind::EqualEqual | TokenKind::BangEqual => Self::Equality,
            TokenKind::Less
            | TokenKind::LessEqual
            | TokenKind::Greater
            | TokenKind::GreaterEqual => Self::Comparison,
            TokenKind::Plus | TokenKind::Minus => Self::Term,
            TokenKind::Star | TokenKind::Slash => Self::Factor,
            TokenKind::Caret => Self::Power,
            _ => Self::None,
        }
    }

    /// The next looser binding power. Parsing the right operand of a
    /// right-associative operator at this level lets the same operator
    /// continue inside it.
    #[must_use]
    pub const fn lower(self) -> Self {
        match self {
            Self::None | Self::Or => Self::None,
            Self::And => Self::Or,
            Self::Equality => Self::And,
            Self::Comparison => Self::Equality,
            Self::Term => Self::Comparison,
            Self::Factor => Self::Term,
            Self::Power => Self::Factor,
            Self::Unary => Self::Power,
        }
    }
}

/// The outcome of evaluating one line.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// The line produced a value. Strings in it are owned.
    Value(Value),
    /// The line failed; the error has been recorded to the diagnostics sink.
    Failed(EvalError),
    /// `exit` was evaluated; the driver should end the process with `status`.
    Exit {
        /// Process exit status: 1 if the line had already failed, else 0.
        status: i32,
    },
}

impl Evaluation {
    /// Returns `true` if the line failed.
    #[must_use]
    pub const fn failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// The produced value, or `Number(0)` when there is none.
    #[must_use]
    pub fn value(&self) -> Value {
        match self {
            Self::Value(value) => value.clone(),
            Self::Failed(_) | Self::Exit { .. } => Value::Number(0.0),
        }
    }

    /// The error that failed the line, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&EvalError> {
        match self {
            Self::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// A Pratt parser that evaluates while it parses.
///
/// The parser lives for the whole session. It owns the variable table, the
/// string arena, the last result (`ans`) and the diagnostics sink; each input
/// line is bound with [`Parser::reset`] and evaluated with
/// [`Parser::parse_expr`], or both at once with [`Parser::evaluate`].
///
/// # Example
/// ```
/// use reckon::interpreter::{parser::core::Parser, value::core::Value};
///
/// let mut parser = Parser::new();
///
/// let result = parser.evaluate("let x = 2 + 3 * 4").unwrap();
/// assert_eq!(result.value(), Value::Number(14.0));
///
/// let result = parser.evaluate("$x ^ 2 == 196").unwrap();
/// assert_eq!(result.value(), Value::Bool(true));
/// ```
pub struct Parser {
    pub(crate) source:       Rc<str>,
    pub(crate) tokens:       Vec<Token>,
    pub(crate) current:      usize,
    pub(crate) ans:          Value,
    pub(crate) failed:       bool,
    pub(crate) arena:        Arena,
    pub(crate) env:          Environment,
    pub(crate) log:          Box<dyn Diagnostics>,
    pub(crate) render_limit: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Creates a parser with default settings that discards diagnostics.
    #[must_use]
    pub fn new() -> Self {
        Self::with_diagnostics(&Config::default(), Box::new(NullLog))
    }

    /// Creates a parser from `config`, logging to the configured file if
    /// any.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        let log: Box<dyn Diagnostics> = match FileLog::from_config(config) {
            Some(file) => Box::new(file),
            None => Box::new(NullLog),
        };
        Self::with_diagnostics(config, log)
    }

    /// Creates a parser from `config` that records diagnostics to `log`.
    #[must_use]
    pub fn with_diagnostics(config: &Config, log: Box<dyn Diagnostics>) -> Self {
        Self { source: Rc::from(""),
               tokens: Vec::new(),
               current: 0,
               ans: Value::Number(0.0),
               failed: false,
               arena: Arena::new(config.arena_capacity),
               env: Environment::with_capacity(config.env_capacity),
               log,
               render_limit: config.render_limit }
    }

    /// Binds the parser to a new line and its tokens.
    ///
    /// Clears the failed flag, rewinds the token cursor and the string arena.
    /// Values from earlier lines survive because `ans` and every variable
    /// hold owned strings.
    pub fn reset(&mut self, source: &str, tokens: Vec<Token>) {
        self.source = Rc::from(source);
        self.tokens = tokens;
        self.current = 0;
        self.failed = false;
        self.arena.reset();
        self.log.begin_line();
    }

    /// Tokenizes and evaluates one line.
    ///
    /// # Errors
    /// Returns the lexical error when the line contains an unterminated
    /// string literal. That error is fatal: the caller is expected to end the
    /// session.
    pub fn evaluate(&mut self, line: &str) -> Result<Evaluation, LexError> {
        let tokens = match tokenize(line) {
            Ok(tokens) => tokens,
            Err(error) => {
                self.log.record(&format!("Fatal: {error}"));
                return Err(error);
            },
        };
        self.reset(line, tokens);
        Ok(self.parse_expr())
    }

    /// Evaluates the bound line as one expression.
    ///
    /// On success the result becomes the new `ans`. On failure the error is
    /// recorded to the diagnostics sink and the failed flag stays set until
    /// the next [`Parser::reset`].
    pub fn parse_expr(&mut self) -> Evaluation {
        match self.top_level() {
            Ok(value) => {
                debug!(line = %self.source, result = %value, "evaluated");
                self.ans = value.clone();
                Evaluation::Value(value)
            },
            Err(Halt::Exit) => {
                debug!(failed = self.failed, "exit requested");
                Evaluation::Exit { status: i32::from(self.failed) }
            },
            Err(Halt::Error(error)) => {
                self.failed = true;
                self.log.record(&error.to_string());
                Evaluation::Failed(error)
            },
        }
    }

    /// Returns `true` if the current line has failed.
    #[must_use]
    pub const fn failed(&self) -> bool {
        self.failed
    }

    /// The last successful top-level result.
    #[must_use]
    pub const fn ans(&self) -> &Value {
        &self.ans
    }

    /// The variable table.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.env
    }

    /// The string arena of the current line.
    #[must_use]
    pub const fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Renders a value within the configured length limit.
    #[must_use]
    pub fn render(&self, value: &Value) -> String {
        value.stringify(&self.arena, self.render_limit)
    }

    fn top_level(&mut self) -> EvalResult<Value> {
        match self.tokens.first() {
            None => return Err(EvalError::EmptyInput.into()),
            Some(token) if token.kind == TokenKind::End => {
                return Err(EvalError::EmptyInput.into());
            },
            _ => {},
        }

        let value = self.expression(Precedence::None, None)?;

        let next = self.consume();
        match next.kind {
            TokenKind::End => {},
            TokenKind::Error => return Err(self.lexical_error(&next).into()),
            _ => {
                return Err(EvalError::TrailingTokens { token:  next.lexeme(&self.source)
                                                                   .to_string(),
                                                       column: next.column(&self.source), }.into());
            },
        }

        let column = next.column(&self.source);
        value.into_owned(&self.arena)
             .map_err(|e| arena_failure(column)(e).into())
    }

    /// Parses and evaluates an expression whose operators bind tighter than
    /// `min_bp`.
    ///
    /// When `leading` is set, the first token must be of that kind.
    pub(crate) fn expression(&mut self,
                             min_bp: Precedence,
                             leading: Option<TokenKind>)
                             -> EvalResult<Value> {
        let token = self.consume();
        if let Some(expected) = leading
           && token.kind != expected
        {
            return Err(self.unexpected(&token, expected.describe()).into());
        }

        let mut left = self.prefix(&token)?;

        while Precedence::of(self.peek_kind()) > min_bp {
            let operator = self.consume();
            let right = self.infix(&operator)?;
            left = self.do_operation(left, right, &operator)?;
        }

        Ok(left)
    }

    /// Kind of the next unconsumed token.
    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.tokens
            .get(self.current)
            .map_or(TokenKind::End, |token| token.kind)
    }

    /// Consumes the next token. Past the end of the list this keeps
    /// returning an `End` token.
    pub(crate) fn consume(&mut self) -> Token {
        match self.tokens.get(self.current) {
            Some(token) => {
                self.current += 1;
                token.clone()
            },
            None => Token { kind: TokenKind::End,
                            span: self.source.len()..self.source.len(), },
        }
    }

    /// Consumes the next token if it has kind `expected`.
    pub(crate) fn expect(&mut self, expected: TokenKind) -> EvalResult<Token> {
        let token = self.consume();
        if token.kind == expected {
            Ok(token)
        } else {
            Err(self.unexpected(&token, expected.describe()).into())
        }
    }

    /// Builds the error for finding `token` where `expected` was required.
    pub(crate) fn unexpected(&self, token: &Token, expected: &str) -> EvalError {
        let column = token.column(&self.source);
        match token.kind {
            TokenKind::End => EvalError::UnexpectedEndOfInput { column },
            TokenKind::Error => self.lexical_error(token),
            _ => EvalError::UnexpectedToken { expected: expected.to_string(),
                                              found: token.lexeme(&self.source).to_string(),
                                              column },
        }
    }

    fn lexical_error(&self, token: &Token) -> EvalError {
        let rest = token.lexeme(&self.source);
        EvalError::Lexical { source: lexer::error_at(rest),
                             lexeme: rest.to_string(),
                             column: token.column(&self.source), }
    }
}

impl Drop for Parser {
    fn drop(&mut self) {
        self.log.flush();
    }
}

/// Maps an arena failure at `column` to an evaluation error.
pub(crate) fn arena_failure(column: usize) -> impl Fn(ArenaError) -> EvalError {
    move |source| EvalError::Arena { source, column }
}
