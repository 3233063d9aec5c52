use crate::encoding::{Reader, Writer};
use crate::error::ParseFault;
use crate::pdu::{settle, FunctionCode, Parsed, Pdu};
use crate::{EncodeError, NoMatch, ValidationError};

const EXCEPTION_BIT: u8 = 0x80;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExceptionCode {
    IllegalFunction,
    IllegalDataAddress,
    IllegalDataValue,
    ServerDeviceFailure,
    Acknowledge,
    ServerDeviceBusy,
    MemoryParityError,
    GatewayPathUnavailable,
    GatewayTargetFailedToRespond,
    Unknown(u8),
}

impl ExceptionCode {
    pub const fn from_u8(value: u8) -> Self {
        match value {
            0x01 => Self::IllegalFunction,
            0x02 => Self::IllegalDataAddress,
            0x03 => Self::IllegalDataValue,
            0x04 => Self::ServerDeviceFailure,
            0x05 => Self::Acknowledge,
            0x06 => Self::ServerDeviceBusy,
            0x08 => Self::MemoryParityError,
            0x0A => Self::GatewayPathUnavailable,
            0x0B => Self::GatewayTargetFailedToRespond,
            other => Self::Unknown(other),
        }
    }

    pub const fn as_u8(self) -> u8 {
        match self {
            Self::IllegalFunction => 0x01,
            Self::IllegalDataAddress => 0x02,
            Self::IllegalDataValue => 0x03,
            Self::ServerDeviceFailure => 0x04,
            Self::Acknowledge => 0x05,
            Self::ServerDeviceBusy => 0x06,
            Self::MemoryParityError => 0x08,
            Self::GatewayPathUnavailable => 0x0A,
            Self::GatewayTargetFailedToRespond => 0x0B,
            Self::Unknown(raw) => raw,
        }
    }
}

/// Exception response: the request's function code with bit 7 set, followed
/// by a one-byte exception code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExceptionResponse {
    /// Raw function code without the exception bit.
    function: u8,
    code: ExceptionCode,
}

impl ExceptionResponse {
    pub fn new(function: u8, code: ExceptionCode) -> Result<Self, ValidationError> {
        if function == 0 || FunctionCode::is_exception(function) {
            return Err(ValidationError::InvalidFunctionCode(function));
        }
        Ok(Self { function, code })
    }

    /// Reject `request` with `code`.
    pub fn for_request(request: &impl Pdu, code: ExceptionCode) -> Result<Self, ValidationError> {
        Self::new(request.function_code(), code)
    }

    pub fn from_buffer(buf: &[u8]) -> Result<Parsed<Self>, ValidationError> {
        settle(Self::decode(&mut Reader::new(buf)))
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self, ParseFault> {
        let function_byte = r.read_u8()?;
        if !FunctionCode::is_exception(function_byte) {
            return Err(NoMatch::FunctionCode {
                expected: function_byte | EXCEPTION_BIT,
                found: function_byte,
            }
            .into());
        }
        let code = ExceptionCode::from_u8(r.read_u8()?);
        Ok(Self::new(function_byte & !EXCEPTION_BIT, code)?)
    }

    /// Function code of the rejected request, without the exception bit.
    pub const fn function(&self) -> u8 {
        self.function
    }

    pub const fn code(&self) -> ExceptionCode {
        self.code
    }
}

impl Pdu for ExceptionResponse {
    fn function_code(&self) -> u8 {
        self.function | EXCEPTION_BIT
    }

    fn name(&self) -> &'static str {
        "Exception"
    }

    fn byte_count(&self) -> usize {
        2
    }

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_u8(self.function_code())?;
        w.write_u8(self.code.as_u8())?;
        Ok(())
    }
}
