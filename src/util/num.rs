/// Widens a `usize` to `u64`.
///
/// Every supported target has pointers of at most 64 bits, so the conversion
/// is lossless.
///
/// ## Example
/// ```
/// use reckon::util::num::usize_to_u64;
///
/// assert_eq!(usize_to_u64(42), 42u64);
/// ```
#[must_use]
pub const fn usize_to_u64(value: usize) -> u64 {
    value as u64
}

/// Safely converts a `u64` to `usize` if and only if it fits.
///
/// ## Errors
/// Returns `Err(error)` if the value exceeds `usize::MAX`, which can only
/// happen on targets with pointers narrower than 64 bits.
///
/// ## Parameters
/// - `value`: The unsigned integer to convert.
/// - `error`: The error to return if conversion is not lossless.
///
/// ## Returns
/// - `Ok(usize)`: The converted value if it fits.
/// - `Err(error)`: If the value is too large.
///
/// ## Example
/// ```
/// use reckon::util::num::u64_to_usize_checked;
///
/// assert_eq!(u64_to_usize_checked(1234, "too big!"), Ok(1234));
///
/// if cfg!(target_pointer_width = "32") {
///     assert!(u64_to_usize_checked(u64::MAX, "too big!").is_err());
/// }
/// ```
pub fn u64_to_usize_checked<E>(value: u64, error: E) -> Result<usize, E> {
    usize::try_from(value).map_or(Err(error), Ok)
}
