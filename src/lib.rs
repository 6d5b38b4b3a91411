//! # reckon
//!
//! reckon is an interactive expression evaluator written in Rust.
//! It evaluates one line at a time: arithmetic, comparisons, boolean logic and
//! string concatenation over a small dynamic type system, with variables,
//! builtin math functions and single-variable files.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use crate::interpreter::{
    parser::core::{Evaluation, Parser},
    value::core::Value,
};

/// Session settings.
///
/// Holds the knobs of one evaluator session: arena and variable table sizes,
/// where diagnostics go and how values are rendered.
pub mod config;
/// Provides unified error types for tokenizing and evaluation.
///
/// This module defines all errors that can be raised while tokenizing or
/// evaluating a line. Every evaluation error carries the column of the token
/// that caused it.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, evaluator).
/// - Classifies errors into lexical, syntax, type, name, I/O and resource
///   errors.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the evaluation of input lines.
///
/// This module ties together tokenizing, parsing, evaluation, value
/// representations and variable storage.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, values, arena and
///   environment.
/// - Provides entry points for evaluating lines.
pub mod interpreter;
/// Diagnostics sinks.
///
/// The evaluator reports every failed line as a human-readable record. This
/// module defines the sink trait and its file, in-memory and no-op
/// implementations.
pub mod log;
/// General utilities.
///
/// Helpers that are not specific to a single phase, such as lossless integer
/// conversions.
pub mod util;

/// Evaluates every non-blank line of `source` in one session and returns the
/// last result.
///
/// Lines share variables and `ans`. Evaluation stops at the first failing
/// line or at `exit`.
///
/// # Errors
/// Returns the error of the first failing line, or the lexical error of an
/// unterminated string literal.
///
/// # Examples
/// ```
/// use reckon::{get_result, interpreter::value::core::Value};
///
/// let result = get_result("let r = 2 + 2\n$r * 10").unwrap();
/// assert_eq!(result, Some(Value::Number(40.0)));
///
/// // `x` was never declared.
/// assert!(get_result("$x + 1").is_err());
/// ```
pub fn get_result(source: &str) -> Result<Option<Value>, Box<dyn std::error::Error>> {
    let mut parser = Parser::new();
    let mut result = None;

    for line in source.lines().filter(|line| !line.trim().is_empty()) {
        match parser.evaluate(line)? {
            Evaluation::Value(value) => result = Some(value),
            Evaluation::Failed(error) => return Err(Box::new(error)),
            Evaluation::Exit { .. } => break,
        }
    }

    Ok(result)
}
