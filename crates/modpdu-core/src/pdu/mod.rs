//! Request and response bodies, one type per function code.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::RangeInclusive;

use crate::encoding::{Reader, Writer};
use crate::error::ParseFault;
use crate::{EncodeError, NoMatch, ValidationError};

pub mod bits;
pub mod exception;
pub mod function_code;
pub mod limits;
pub mod request;
pub mod response;

pub use exception::{ExceptionCode, ExceptionResponse};
pub use function_code::FunctionCode;
pub use request::*;
pub use response::*;

/// Capabilities shared by every request and response body.
///
/// Parsing is deliberately not part of this trait: each body exposes its own
/// `from_buffer` associated function.
pub trait Pdu {
    /// Wire tag written at offset 0.
    fn function_code(&self) -> u8;

    /// Stable identifier for logs and diagnostics. Not part of the wire format.
    fn name(&self) -> &'static str;

    /// Exact number of bytes [`Pdu::encode`] writes.
    fn byte_count(&self) -> usize;

    /// Write the body into `w`. Fails only when `w` has fewer than
    /// [`Pdu::byte_count`] bytes left.
    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError>;

    /// Serialize into a freshly allocated buffer of exactly
    /// [`Pdu::byte_count`] bytes.
    fn payload(&self) -> Vec<u8> {
        let mut buf = vec![0u8; self.byte_count()];
        let encoded = {
            let mut w = Writer::new(&mut buf);
            self.encode(&mut w).map(|()| w.position())
        };
        debug_assert_eq!(encoded, Ok(buf.len()), "{} byte count mismatch", self.name());
        buf
    }
}

/// Outcome of probing a buffer with a body's `from_buffer`.
///
/// Validation failures are reported separately through `Err`, so a
/// dispatcher can move on to the next candidate on `NoMatch` without
/// swallowing malformed payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed<T> {
    Match(T),
    NoMatch(NoMatch),
}

impl<T> Parsed<T> {
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Match(value) => Some(value),
            Self::NoMatch(_) => None,
        }
    }

    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Match(_))
    }

    pub fn no_match(&self) -> Option<NoMatch> {
        match self {
            Self::Match(_) => None,
            Self::NoMatch(reason) => Some(*reason),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Parsed<U> {
        match self {
            Self::Match(value) => Parsed::Match(f(value)),
            Self::NoMatch(reason) => Parsed::NoMatch(reason),
        }
    }
}

/// Run `body` after consuming a leading `function` byte and fold the result
/// into the tri-state `from_buffer` shape.
pub(crate) fn parse<'a, T>(
    buf: &'a [u8],
    function: FunctionCode,
    body: impl FnOnce(&mut Reader<'a>) -> Result<T, ParseFault>,
) -> Result<Parsed<T>, ValidationError> {
    let mut r = Reader::new(buf);
    let outcome = match r.expect_function(function.as_u8()) {
        Ok(()) => body(&mut r),
        Err(reason) => Err(reason.into()),
    };
    settle(outcome)
}

pub(crate) fn settle<T>(outcome: Result<T, ParseFault>) -> Result<Parsed<T>, ValidationError> {
    match outcome {
        Ok(value) => Ok(Parsed::Match(value)),
        Err(ParseFault::NoMatch(reason)) => Ok(Parsed::NoMatch(reason)),
        Err(ParseFault::Invalid(err)) => Err(err),
    }
}

pub(crate) fn start_address_field<A: TryInto<u16>>(value: A) -> Result<u16, ValidationError> {
    value
        .try_into()
        .map_err(|_| ValidationError::InvalidStartAddress)
}

pub(crate) fn address_field<A: TryInto<u16>>(value: A) -> Result<u16, ValidationError> {
    value.try_into().map_err(|_| ValidationError::InvalidAddress)
}

pub(crate) fn quantity_field<Q: TryInto<u16>>(
    value: Q,
    range: RangeInclusive<u16>,
) -> Result<u16, ValidationError> {
    let quantity: u16 = value
        .try_into()
        .map_err(|_| ValidationError::InvalidQuantity)?;
    if !range.contains(&quantity) {
        return Err(ValidationError::InvalidQuantity);
    }
    Ok(quantity)
}

pub(crate) fn registers_from_bytes(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect()
}
