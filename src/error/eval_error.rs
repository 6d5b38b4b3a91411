use crate::{error::LexError, interpreter::arena::ArenaError};

/// Broad classification of an [`EvalError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The line could not be tokenized.
    Lexical,
    /// A token appeared where a different one was required.
    Syntax,
    /// Operand types do not match or do not support the operator.
    Type,
    /// Unknown variable, function or identifier.
    Name,
    /// Reading or writing a variable file failed.
    Io,
    /// The arena or the variable table ran out of room.
    Resource,
}

#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can fail the evaluation of one line.
///
/// Every variant carries the 1-based column of the token that triggered it.
pub enum EvalError {
    /// The tokenizer stopped on a character it could not classify.
    Lexical {
        /// What went wrong while tokenizing.
        source: LexError,
        /// The unconsumed text starting at the offending character.
        lexeme: String,
        /// Column of the offending character.
        column: usize,
    },
    /// The line contains no expression at all.
    EmptyInput,
    /// A token of one kind was required but another was found.
    UnexpectedToken {
        /// Description of what the grammar required.
        expected: String,
        /// The text of the token that was found.
        found:    String,
        /// Column of the found token.
        column:   usize,
    },
    /// The expression ended before it was complete.
    UnexpectedEndOfInput {
        /// Column where the input ended.
        column: usize,
    },
    /// Tokens remain after a complete expression.
    TrailingTokens {
        /// The first extra token.
        token:  String,
        /// Column of the extra token.
        column: usize,
    },
    /// The operands of a binary operator carry different types.
    TypeMismatch {
        /// Stringified left operand.
        left:       String,
        /// Type name of the left operand.
        left_type:  &'static str,
        /// Stringified right operand.
        right:      String,
        /// Type name of the right operand.
        right_type: &'static str,
        /// Column of the operator.
        column:     usize,
    },
    /// An operator was applied to a type it does not support.
    InvalidOperation {
        /// The operator text.
        operator:  String,
        /// Type name of the operand.
        type_name: &'static str,
        /// Column of the operator.
        column:    usize,
    },
    /// A `$name` lookup for a variable that was never declared.
    UnknownVariable {
        /// The variable name.
        name:   String,
        /// Column of the name.
        column: usize,
    },
    /// A bare identifier that is neither a builtin nor `export`/`import`.
    UnknownIdentifier {
        /// The identifier.
        name:   String,
        /// Column of the identifier.
        column: usize,
    },
    /// A variable file could not be opened, read, written or decoded.
    Io {
        /// What failed.
        details: String,
        /// The file involved.
        path:    String,
        /// Column of the `export`/`import` call.
        column:  usize,
    },
    /// The string arena could not hold a transient value.
    Arena {
        /// The arena failure.
        source: ArenaError,
        /// Column of the token whose evaluation needed the space.
        column: usize,
    },
    /// The variable table has no free slot for a new name.
    EnvironmentFull {
        /// The name that could not be inserted.
        name:     String,
        /// Number of slots in the table.
        capacity: usize,
        /// Column of the declaration.
        column:   usize,
    },
}

impl EvalError {
    /// Classifies the error.
    ///
    /// # Example
    /// ```
    /// use reckon::error::{ErrorKind, EvalError};
    ///
    /// let err = EvalError::UnknownVariable { name:   "x".to_string(),
    ///                                        column: 2, };
    /// assert_eq!(err.kind(), ErrorKind::Name);
    /// ```
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Lexical { .. } => ErrorKind::Lexical,
            Self::EmptyInput
            | Self::UnexpectedToken { .. }
            | Self::UnexpectedEndOfInput { .. }
            | Self::TrailingTokens { .. } => ErrorKind::Syntax,
            Self::TypeMismatch { .. } | Self::InvalidOperation { .. } => ErrorKind::Type,
            Self::UnknownVariable { .. } | Self::UnknownIdentifier { .. } => ErrorKind::Name,
            Self::Io { .. } => ErrorKind::Io,
            Self::Arena { .. } | Self::EnvironmentFull { .. } => ErrorKind::Resource,
        }
    }
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexical { source,
                            lexeme,
                            column, } => {
                write!(f, "Error at column {column}: {source} Near '{lexeme}'.")
            },
            Self::EmptyInput => write!(f, "Error: Nothing to evaluate."),
            Self::UnexpectedToken { expected,
                                    found,
                                    column, } => write!(f,
                                                        "Error at column {column}: Expected {expected} but found '{found}'."),
            Self::UnexpectedEndOfInput { column } => {
                write!(f, "Error at column {column}: Unexpected end of input.")
            },
            Self::TrailingTokens { token, column } => write!(f,
                                                             "Error at column {column}: Extra tokens after expression, starting at '{token}'."),
            Self::TypeMismatch { left,
                                 left_type,
                                 right,
                                 right_type,
                                 column, } => write!(f,
                                                     "Error at column {column}: Value {left} of type {left_type} has a different type than value {right} of type {right_type}."),
            Self::InvalidOperation { operator,
                                     type_name,
                                     column, } => write!(f,
                                                         "Error at column {column}: Can't apply '{operator}' to a value of type {type_name}."),
            Self::UnknownVariable { name, column } => {
                write!(f, "Error at column {column}: Variable '{name}' doesn't exist.")
            },
            Self::UnknownIdentifier { name, column } => {
                write!(f, "Error at column {column}: Unknown identifier '{name}'.")
            },
            Self::Io { details,
                       path,
                       column, } => write!(f, "Error at column {column}: {details} '{path}'."),
            Self::Arena { source, column } => write!(f, "Error at column {column}: {source}"),
            Self::EnvironmentFull { name,
                                    capacity,
                                    column, } => write!(f,
                                                        "Error at column {column}: Cannot declare '{name}', all {capacity} variable slots are in use."),
        }
    }
}

impl std::error::Error for EvalError {}
