/// Integer conversion helpers.
///
/// Conversions between `usize` and `u64` used by the variable file format,
/// which stores lengths as 64-bit integers regardless of the host.
pub mod num;
/// Wall-clock formatting.
///
/// Renders timestamps as readable UTC dates for the diagnostics log.
pub mod time;
