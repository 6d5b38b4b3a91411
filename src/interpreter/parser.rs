/// The parser state and the Pratt loop.
///
/// Defines `Parser`, binding powers and the `Evaluation` outcome of a line.
/// The parser evaluates while it parses; no syntax tree is built.
pub mod core;

/// Prefix handlers.
///
/// Evaluates every construct that can start an expression: literals,
/// grouping, unary operators, `ans`, variable lookup and declaration, and
/// identifiers.
pub mod prefix;

/// Binary operator evaluation.
///
/// Parses right operands with the correct associativity and applies
/// arithmetic, comparison, equality and logical operators.
pub mod binary;

/// Builtin math functions.
///
/// The table of functions and constants callable by name, such as `sqrt`,
/// `atan2` or `pi`.
pub mod builtin;

/// Variable files.
///
/// Implements `export(...)` and `import(...)` and the binary record format
/// they share.
pub mod persist;
