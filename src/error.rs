/// Tokenizer errors.
///
/// Defines the error type produced while splitting a line into tokens:
/// unrecognized characters, undoubled `&`/`|` and unterminated string
/// literals. Only the last one is fatal to the session.
pub mod lex_error;
/// Evaluation errors.
///
/// Contains every error that can fail a single line: syntax and type errors,
/// unknown names, variable file failures and resource exhaustion.
pub mod eval_error;

pub use eval_error::{ErrorKind, EvalError};
pub use lex_error::LexError;
