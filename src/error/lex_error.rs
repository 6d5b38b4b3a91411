/// Represents all errors the tokenizer can raise.
///
/// This is also the error type of the `logos` lexer; the default variant is
/// what `logos` reports for a byte no rule matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LexError {
    /// A character that starts no token.
    #[default]
    UnexpectedCharacter,
    /// A single `&` or `|` where the doubled operator was required.
    UnpairedOperator {
        /// The operator character that was not doubled.
        symbol: char,
    },
    /// A string literal that runs to the end of the input without its
    /// closing quote.
    UnterminatedString {
        /// The quote character that opened the literal.
        quote: char,
    },
}

impl LexError {
    /// Returns `true` for the errors that must terminate the whole session
    /// instead of only failing the current line.
    ///
    /// # Example
    /// ```
    /// use reckon::error::LexError;
    ///
    /// assert!(LexError::UnterminatedString { quote: '"' }.is_fatal());
    /// assert!(!LexError::UnpairedOperator { symbol: '&' }.is_fatal());
    /// ```
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::UnterminatedString { .. })
    }
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter => write!(f, "Unrecognized character."),
            Self::UnpairedOperator { symbol } => {
                write!(f, "Expected '{symbol}{symbol}' but found a single '{symbol}'.")
            },
            Self::UnterminatedString { quote } => {
                write!(f, "String literal is missing its closing {quote}.")
            },
        }
    }
}

impl std::error::Error for LexError {}
