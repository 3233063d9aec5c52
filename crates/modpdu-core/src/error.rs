use thiserror::Error;

/// Errors that can occur while encoding a PDU body into an output buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EncodeError {
    #[error("buffer too small (needed {needed}, available {available})")]
    BufferTooSmall { needed: usize, available: usize },
}

/// A field value that violates the layout rules of its variant.
///
/// Returned by every constructor, and by `from_buffer` when the function code
/// matched and all fields were present but at least one value is illegal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationError {
    #[error("start address out of range")]
    InvalidStartAddress,
    #[error("address out of range")]
    InvalidAddress,
    #[error("quantity out of range")]
    InvalidQuantity,
    #[error("invalid field value")]
    InvalidValue,
    #[error("byte count does not match quantity")]
    InvalidByteCount,
    #[error("invalid function code 0x{0:02X}")]
    InvalidFunctionCode(u8),
}

/// Why a buffer does not encode an instance of the variant being probed.
///
/// This is a normal negative outcome used for dispatch, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NoMatch {
    #[error("function code mismatch (expected 0x{expected:02X}, found 0x{found:02X})")]
    FunctionCode { expected: u8, found: u8 },
    #[error("buffer truncated (needed {needed} bytes, available {available})")]
    Truncated { needed: usize, available: usize },
    #[error("unsupported function code 0x{0:02X}")]
    UnsupportedFunction(u8),
}

/// Internal failure used while parsing, split back into [`NoMatch`] and
/// [`ValidationError`] at the `from_buffer` boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ParseFault {
    NoMatch(NoMatch),
    Invalid(ValidationError),
}

impl From<NoMatch> for ParseFault {
    fn from(value: NoMatch) -> Self {
        Self::NoMatch(value)
    }
}

impl From<ValidationError> for ParseFault {
    fn from(value: ValidationError) -> Self {
        Self::Invalid(value)
    }
}
