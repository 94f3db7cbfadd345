//! Validation of host-supplied identity and key material
//!
//! Inputs are checked for length, hex decodability and digit content only;
//! their meaning is opaque to the engine.

/// Error type for input validation failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The input was not the expected length
    #[error("{field} has incorrect length: expected {expected}, got {actual}")]
    IncorrectLength {
        /// Name of the input
        field: &'static str,
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// The input contained invalid characters
    #[error("{field} contains invalid characters")]
    InvalidCharacters {
        /// Name of the input
        field: &'static str,
    },

    /// A required input was not given
    #[error("{0} is required")]
    Missing(&'static str),

    /// Unknown credential algorithm name
    #[error("Unknown algorithm: {0}")]
    UnknownAlgorithm(String),
}

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Decode a hex string into exactly `N` bytes
pub(crate) fn parse_hex_array<const N: usize>(
    field: &'static str,
    input: &str,
) -> ValidationResult<[u8; N]> {
    if input.len() != N * 2 {
        return Err(ValidationError::IncorrectLength {
            field,
            expected: N * 2,
            actual: input.len(),
        });
    }

    let mut out = [0u8; N];
    hex::decode_to_slice(input, &mut out)
        .map_err(|_| ValidationError::InvalidCharacters { field })?;
    Ok(out)
}

/// Check that `input` is exactly `len` decimal digits
pub(crate) fn validate_digits<'a>(
    field: &'static str,
    input: &'a str,
    len: usize,
) -> ValidationResult<&'a str> {
    if input.len() != len {
        return Err(ValidationError::IncorrectLength {
            field,
            expected: len,
            actual: input.len(),
        });
    }

    if !input.bytes().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidCharacters { field });
    }

    Ok(input)
}
