/// The arena module provides storage for transient strings.
///
/// A fixed-capacity bump allocator that holds the strings created while
/// evaluating one line. It is rewound before each line; handles issued
/// before a rewind are detected as stale.
pub mod arena;
/// The environment module stores declared variables.
///
/// A fixed-size open-addressing hash table from variable name to value,
/// using linear probing. Entries are never removed.
pub mod environment;
/// The lexer module tokenizes an input line for further parsing.
///
/// The lexer (tokenizer) reads the raw line and produces a list of tokens,
/// each corresponding to a meaningful language element such as a number,
/// string, identifier, operator or keyword.
///
/// # Responsibilities
/// - Converts the input line into tokens with kind and byte span.
/// - Handles numeric and string literals, identifiers, and operators.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module evaluates token lists.
///
/// A Pratt parser that computes the value of an expression while parsing
/// it. It owns the session state: variables, the string arena, the last
/// result and the diagnostics sink.
///
/// # Responsibilities
/// - Applies operator precedence and associativity.
/// - Checks operand types and reports errors with column information.
/// - Implements declarations, builtin functions and variable files.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// Declares the three value types (numbers, strings and booleans) and the
/// storage behind strings.
pub mod value;
