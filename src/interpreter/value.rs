/// Transient and owned string storage.
///
/// Defines the `Text` type carried by `Value::String`: either bytes owned
/// on the heap or a handle into the evaluator's string arena. Includes
/// creation, concatenation, equality and conversion to owned storage.
pub mod text;

/// The `Value` type, its type tags and rendering.
pub mod core;
