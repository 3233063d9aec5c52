//! Response bodies (server to client).

mod read;
mod read_write;
mod write;

pub use read::{
    ReadCoilsResponse, ReadDiscreteInputsResponse, ReadHoldingRegistersResponse,
    ReadInputRegistersResponse, ReadTextRegistersResponse,
};
pub use read_write::ReadWriteMultipleRegistersResponse;
pub use write::{
    MaskWriteRegisterResponse, WriteMultipleCoilsResponse, WriteMultipleRegistersResponse,
    WriteSingleCoilResponse, WriteSingleRegisterResponse,
};

use tracing::{debug, trace};

use crate::encoding::{Reader, Writer};
use crate::pdu::{ExceptionResponse, FunctionCode, Parsed, Pdu};
use crate::{EncodeError, NoMatch, ValidationError};

/// Any supported response body, including exception responses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum ResponseBody {
    ReadCoils(ReadCoilsResponse),
    ReadDiscreteInputs(ReadDiscreteInputsResponse),
    ReadHoldingRegisters(ReadHoldingRegistersResponse),
    ReadInputRegisters(ReadInputRegistersResponse),
    WriteSingleCoil(WriteSingleCoilResponse),
    WriteSingleRegister(WriteSingleRegisterResponse),
    WriteMultipleCoils(WriteMultipleCoilsResponse),
    WriteMultipleRegisters(WriteMultipleRegistersResponse),
    MaskWriteRegister(MaskWriteRegisterResponse),
    ReadWriteMultipleRegisters(ReadWriteMultipleRegistersResponse),
    ReadTextRegisters(ReadTextRegistersResponse),
    Exception(ExceptionResponse),
}

impl ResponseBody {
    /// Decode whichever response body the leading function code selects.
    pub fn from_buffer(buf: &[u8]) -> Result<Parsed<Self>, ValidationError> {
        let outcome = Self::dispatch(buf);
        match &outcome {
            Ok(Parsed::Match(body)) => {
                trace!(name = body.name(), len = body.byte_count(), "decoded response body");
            }
            Ok(Parsed::NoMatch(reason)) => trace!(%reason, "buffer is not a response body"),
            Err(err) => debug!(%err, "rejected malformed response body"),
        }
        outcome
    }

    fn dispatch(buf: &[u8]) -> Result<Parsed<Self>, ValidationError> {
        let function_byte = match Reader::new(buf).peek_u8() {
            Ok(byte) => byte,
            Err(reason) => return Ok(Parsed::NoMatch(reason)),
        };
        if FunctionCode::is_exception(function_byte) {
            return Ok(ExceptionResponse::from_buffer(buf)?.map(Self::Exception));
        }
        let Some(function) = FunctionCode::from_u8(function_byte) else {
            return Ok(Parsed::NoMatch(NoMatch::UnsupportedFunction(function_byte)));
        };

        Ok(match function {
            FunctionCode::ReadCoils => ReadCoilsResponse::from_buffer(buf)?.map(Self::ReadCoils),
            FunctionCode::ReadDiscreteInputs => {
                ReadDiscreteInputsResponse::from_buffer(buf)?.map(Self::ReadDiscreteInputs)
            }
            FunctionCode::ReadHoldingRegisters => {
                ReadHoldingRegistersResponse::from_buffer(buf)?.map(Self::ReadHoldingRegisters)
            }
            FunctionCode::ReadInputRegisters => {
                ReadInputRegistersResponse::from_buffer(buf)?.map(Self::ReadInputRegisters)
            }
            FunctionCode::WriteSingleCoil => {
                WriteSingleCoilResponse::from_buffer(buf)?.map(Self::WriteSingleCoil)
            }
            FunctionCode::WriteSingleRegister => {
                WriteSingleRegisterResponse::from_buffer(buf)?.map(Self::WriteSingleRegister)
            }
            FunctionCode::WriteMultipleCoils => {
                WriteMultipleCoilsResponse::from_buffer(buf)?.map(Self::WriteMultipleCoils)
            }
            FunctionCode::WriteMultipleRegisters => {
                WriteMultipleRegistersResponse::from_buffer(buf)?.map(Self::WriteMultipleRegisters)
            }
            FunctionCode::MaskWriteRegister => {
                MaskWriteRegisterResponse::from_buffer(buf)?.map(Self::MaskWriteRegister)
            }
            FunctionCode::ReadWriteMultipleRegisters => {
                ReadWriteMultipleRegistersResponse::from_buffer(buf)?
                    .map(Self::ReadWriteMultipleRegisters)
            }
            FunctionCode::ReadTextRegisters => {
                ReadTextRegistersResponse::from_buffer(buf)?.map(Self::ReadTextRegisters)
            }
        })
    }

    /// Function code this body answers. For exception responses this is the
    /// rejected request's code, when supported.
    pub fn function(&self) -> Option<FunctionCode> {
        let function = match self {
            Self::ReadCoils(_) => FunctionCode::ReadCoils,
            Self::ReadDiscreteInputs(_) => FunctionCode::ReadDiscreteInputs,
            Self::ReadHoldingRegisters(_) => FunctionCode::ReadHoldingRegisters,
            Self::ReadInputRegisters(_) => FunctionCode::ReadInputRegisters,
            Self::WriteSingleCoil(_) => FunctionCode::WriteSingleCoil,
            Self::WriteSingleRegister(_) => FunctionCode::WriteSingleRegister,
            Self::WriteMultipleCoils(_) => FunctionCode::WriteMultipleCoils,
            Self::WriteMultipleRegisters(_) => FunctionCode::WriteMultipleRegisters,
            Self::MaskWriteRegister(_) => FunctionCode::MaskWriteRegister,
            Self::ReadWriteMultipleRegisters(_) => FunctionCode::ReadWriteMultipleRegisters,
            Self::ReadTextRegisters(_) => FunctionCode::ReadTextRegisters,
            Self::Exception(resp) => return FunctionCode::from_u8(resp.function()),
        };
        Some(function)
    }

    pub const fn is_exception(&self) -> bool {
        matches!(self, Self::Exception(_))
    }

    fn as_pdu(&self) -> &dyn Pdu {
        match self {
            Self::ReadCoils(resp) => resp,
            Self::ReadDiscreteInputs(resp) => resp,
            Self::ReadHoldingRegisters(resp) => resp,
            Self::ReadInputRegisters(resp) => resp,
            Self::WriteSingleCoil(resp) => resp,
            Self::WriteSingleRegister(resp) => resp,
            Self::WriteMultipleCoils(resp) => resp,
            Self::WriteMultipleRegisters(resp) => resp,
            Self::MaskWriteRegister(resp) => resp,
            Self::ReadWriteMultipleRegisters(resp) => resp,
            Self::ReadTextRegisters(resp) => resp,
            Self::Exception(resp) => resp,
        }
    }
}

impl Pdu for ResponseBody {
    fn function_code(&self) -> u8 {
        self.as_pdu().function_code()
    }

    fn name(&self) -> &'static str {
        self.as_pdu().name()
    }

    fn byte_count(&self) -> usize {
        self.as_pdu().byte_count()
    }

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        self.as_pdu().encode(w)
    }
}

macro_rules! impl_from_response {
    ($($variant:ident => $ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for ResponseBody {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

impl_from_response! {
    ReadCoils => ReadCoilsResponse,
    ReadDiscreteInputs => ReadDiscreteInputsResponse,
    ReadHoldingRegisters => ReadHoldingRegistersResponse,
    ReadInputRegisters => ReadInputRegistersResponse,
    WriteSingleCoil => WriteSingleCoilResponse,
    WriteSingleRegister => WriteSingleRegisterResponse,
    WriteMultipleCoils => WriteMultipleCoilsResponse,
    WriteMultipleRegisters => WriteMultipleRegistersResponse,
    MaskWriteRegister => MaskWriteRegisterResponse,
    ReadWriteMultipleRegisters => ReadWriteMultipleRegistersResponse,
    ReadTextRegisters => ReadTextRegistersResponse,
    Exception => ExceptionResponse,
}

#[cfg(test)]
mod tests {
    use super::{ResponseBody, WriteSingleCoilResponse};
    use crate::pdu::{ExceptionCode, FunctionCode, Parsed, Pdu};
    use crate::{NoMatch, ValidationError};

    #[test]
    fn response_decode_exception_unknown_code() {
        match ResponseBody::from_buffer(&[0x83, 0x19]).unwrap() {
            Parsed::Match(ResponseBody::Exception(ex)) => {
                assert_eq!(ex.function(), 0x03);
                assert_eq!(ex.code(), ExceptionCode::Unknown(0x19));
            }
            other => panic!("expected exception, got {other:?}"),
        }
    }

    #[test]
    fn exception_reports_rejected_function() {
        let body = ResponseBody::from_buffer(&[0xC1, 0x02]).unwrap().ok().unwrap();
        assert!(body.is_exception());
        assert_eq!(body.function(), Some(FunctionCode::ReadTextRegisters));
        assert_eq!(body.function_code(), 0xC1);
        assert_eq!(body.name(), "Exception");
    }

    #[test]
    fn enum_encode_roundtrip() {
        let original = ResponseBody::from(WriteSingleCoilResponse::new(0x0007, true).unwrap());
        let decoded = ResponseBody::from_buffer(&original.payload())
            .unwrap()
            .ok()
            .unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn read_text_registers_response_dispatch() {
        match ResponseBody::from_buffer(&[0x41, 0x00, 0x02, 0x48, 0x49]).unwrap() {
            Parsed::Match(ResponseBody::ReadTextRegisters(resp)) => {
                assert_eq!(resp.values(), &[0x4849]);
                assert_eq!(resp.text_bytes(), b"HI");
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn unsupported_function_is_no_match() {
        assert_eq!(
            ResponseBody::from_buffer(&[0x11, 0x02, 0x01, 0xFF]).unwrap(),
            Parsed::NoMatch(NoMatch::UnsupportedFunction(0x11))
        );
    }

    #[test]
    fn malformed_response_is_an_error() {
        assert_eq!(
            ResponseBody::from_buffer(&[0x05, 0x00, 0x01, 0x12, 0x34]).unwrap_err(),
            ValidationError::InvalidValue
        );
    }
}
