use std::ops::Range;

use logos::{Lexer, Logos};
use tracing::trace;

use crate::error::LexError;

/// The kind of a lexical token.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// `End` and `Error` are never matched by a rule; [`tokenize`] appends them to
/// close the token list.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[logos(error = LexError)]
#[logos(skip r"[ \t\r\n\f\x0B]+")]
pub enum TokenKind {
    /// Numeric literal tokens, such as `42`, `3.14` or `1.`.
    #[regex(r"[0-9]+(\.[0-9]*)?")]
    Number,
    /// String literal tokens, quoted with `"` or `'`.
    #[token("\"", |lex| string_literal(lex, '"'))]
    #[token("'", |lex| string_literal(lex, '\''))]
    String,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `^`
    #[token("^")]
    Caret,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `,`
    #[token(",")]
    Comma,
    /// `=`
    #[token("=")]
    Equals,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `&&`. A single `&` is an error.
    #[token("&&")]
    #[token("&", |_| unpaired('&'))]
    AndAnd,
    /// `||`. A single `|` is an error.
    #[token("||")]
    #[token("|", |_| unpaired('|'))]
    OrOr,
    /// `!`
    #[token("!")]
    Bang,
    /// `$`, the variable lookup prefix.
    #[token("$")]
    Dollar,
    /// `let`
    #[token("let")]
    Let,
    /// `ans`
    #[token("ans")]
    Ans,
    /// `exit`
    #[token("exit")]
    Exit,
    /// `true`
    #[token("true")]
    True,
    /// `false`
    #[token("false")]
    False,
    /// Identifier tokens; variable or function names such as `x` or `sqrt`.
    #[regex(r"[a-zA-Z][a-zA-Z0-9_]*")]
    Identifier,
    /// End of input.
    End,
    /// The position where tokenizing stopped on a lexical error. Its span
    /// covers the rest of the input.
    Error,
}

impl TokenKind {
    /// Describes the kind for error messages, e.g. `')'` or `an identifier`.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Number => "a number",
            Self::String => "a string",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Caret => "'^'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::Comma => "','",
            Self::Equals => "'='",
            Self::EqualEqual => "'=='",
            Self::BangEqual => "'!='",
            Self::Less => "'<'",
            Self::LessEqual => "'<='",
            Self::Greater => "'>'",
            Self::GreaterEqual => "'>='",
            Self::AndAnd => "'&&'",
            Self::OrOr => "'||'",
            Self::Bang => "'!'",
            Self::Dollar => "'$'",
            Self::Let => "'let'",
            Self::Ans => "'ans'",
            Self::Exit => "'exit'",
            Self::True => "'true'",
            Self::False => "'false'",
            Self::Identifier => "an identifier",
            Self::End => "end of input",
            Self::Error => "a lexical error",
        }
    }
}

/// A token: its kind plus the byte range of its text in the source line.
///
/// Tokens never own text; they are only meaningful together with the line
/// they were produced from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// What the token is.
    pub kind: TokenKind,
    /// Byte range of the lexeme in the source line.
    pub span: Range<usize>,
}

impl Token {
    /// Returns the text of this token within `source`.
    ///
    /// The synthetic `End` token has an empty lexeme.
    #[must_use]
    pub fn lexeme<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.span.clone()).unwrap_or("")
    }

    /// Returns the 1-based column of the token's first character.
    #[must_use]
    pub fn column(&self, source: &str) -> usize {
        source.get(..self.span.start)
              .map_or(self.span.start, |prefix| prefix.chars().count())
        + 1
    }
}

/// Splits a line into tokens.
///
/// The returned list always ends with either an `End` token or, when a
/// lexical error stopped tokenizing, an `Error` token spanning the rest of
/// the input.
///
/// # Errors
/// Returns [`LexError::UnterminatedString`] when a string literal is never
/// closed. That condition is fatal to the session, so no token list is
/// produced.
///
/// # Example
/// ```
/// use reckon::interpreter::lexer::{TokenKind, tokenize};
///
/// let tokens = tokenize("let x = 2 <= 3").unwrap();
/// let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
///
/// assert_eq!(kinds,
///            [TokenKind::Let,
///             TokenKind::Identifier,
///             TokenKind::Equals,
///             TokenKind::Number,
///             TokenKind::LessEqual,
///             TokenKind::Number,
///             TokenKind::End]);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut lexer = TokenKind::lexer(source);

    while let Some(result) = lexer.next() {
        match result {
            Ok(kind) => tokens.push(Token { kind,
                                            span: lexer.span() }),
            Err(error) if error.is_fatal() => return Err(error),
            Err(error) => {
                trace!(%error, at = lexer.span().start, "tokenizing stopped");
                tokens.push(Token { kind: TokenKind::Error,
                                    span: lexer.span().start..source.len(), });
                return Ok(tokens);
            },
        }
    }

    tokens.push(Token { kind: TokenKind::End,
                        span: source.len()..source.len(), });
    trace!(count = tokens.len(), "tokenized line");
    Ok(tokens)
}

/// Re-derives the lexical error for text starting at an `Error` token.
///
/// Tokenizing is deterministic, so scanning the failing suffix again yields
/// the same error that stopped [`tokenize`].
#[must_use]
pub fn error_at(rest: &str) -> LexError {
    match TokenKind::lexer(rest).next() {
        Some(Err(error)) => error,
        _ => LexError::UnexpectedCharacter,
    }
}

/// Consumes the body of a string literal up to its closing `quote`.
///
/// A backslash skips the next character without interpreting it, so `\"`
/// does not close a `"`-quoted literal.
fn string_literal(lex: &mut Lexer<TokenKind>, quote: char) -> Result<(), LexError> {
    let rest = lex.remainder();
    let mut chars = rest.char_indices();

    while let Some((i, c)) = chars.next() {
        if c == '\\' {
            chars.next();
        } else if c == quote {
            lex.bump(i + c.len_utf8());
            return Ok(());
        }
    }

    lex.bump(rest.len());
    Err(LexError::UnterminatedString { quote })
}

/// Rejects a single `&` or `|`.
const fn unpaired(symbol: char) -> Result<(), LexError> {
    Err(LexError::UnpairedOperator { symbol })
}
