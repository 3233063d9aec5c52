//! Request bodies (client to server).

mod read;
mod read_write;
mod write;

pub use read::{
    ReadCoilsRequest, ReadDiscreteInputsRequest, ReadHoldingRegistersRequest,
    ReadInputRegistersRequest, ReadTextRegistersRequest,
};
pub use read_write::ReadWriteMultipleRegistersRequest;
pub use write::{
    MaskWriteRegisterRequest, WriteMultipleCoilsRequest, WriteMultipleRegistersRequest,
    WriteSingleCoilRequest, WriteSingleRegisterRequest,
};

pub(crate) use write::{coil_raw, coil_value};

use tracing::{debug, trace};

use crate::encoding::{Reader, Writer};
use crate::pdu::{FunctionCode, Parsed, Pdu};
use crate::{EncodeError, NoMatch, ValidationError};

/// Any supported request body, selected by function code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum RequestBody {
    ReadCoils(ReadCoilsRequest),
    ReadDiscreteInputs(ReadDiscreteInputsRequest),
    ReadHoldingRegisters(ReadHoldingRegistersRequest),
    ReadInputRegisters(ReadInputRegistersRequest),
    WriteSingleCoil(WriteSingleCoilRequest),
    WriteSingleRegister(WriteSingleRegisterRequest),
    WriteMultipleCoils(WriteMultipleCoilsRequest),
    WriteMultipleRegisters(WriteMultipleRegistersRequest),
    MaskWriteRegister(MaskWriteRegisterRequest),
    ReadWriteMultipleRegisters(ReadWriteMultipleRegistersRequest),
    ReadTextRegisters(ReadTextRegistersRequest),
}

impl RequestBody {
    /// Decode whichever request body the leading function code selects.
    pub fn from_buffer(buf: &[u8]) -> Result<Parsed<Self>, ValidationError> {
        let outcome = Self::dispatch(buf);
        match &outcome {
            Ok(Parsed::Match(body)) => {
                trace!(name = body.name(), len = body.byte_count(), "decoded request body");
            }
            Ok(Parsed::NoMatch(reason)) => trace!(%reason, "buffer is not a request body"),
            Err(err) => debug!(%err, "rejected malformed request body"),
        }
        outcome
    }

    fn dispatch(buf: &[u8]) -> Result<Parsed<Self>, ValidationError> {
        let function_byte = match Reader::new(buf).peek_u8() {
            Ok(byte) => byte,
            Err(reason) => return Ok(Parsed::NoMatch(reason)),
        };
        let Some(function) = FunctionCode::from_u8(function_byte) else {
            return Ok(Parsed::NoMatch(NoMatch::UnsupportedFunction(function_byte)));
        };

        Ok(match function {
            FunctionCode::ReadCoils => ReadCoilsRequest::from_buffer(buf)?.map(Self::ReadCoils),
            FunctionCode::ReadDiscreteInputs => {
                ReadDiscreteInputsRequest::from_buffer(buf)?.map(Self::ReadDiscreteInputs)
            }
            FunctionCode::ReadHoldingRegisters => {
                ReadHoldingRegistersRequest::from_buffer(buf)?.map(Self::ReadHoldingRegisters)
            }
            FunctionCode::ReadInputRegisters => {
                ReadInputRegistersRequest::from_buffer(buf)?.map(Self::ReadInputRegisters)
            }
            FunctionCode::WriteSingleCoil => {
                WriteSingleCoilRequest::from_buffer(buf)?.map(Self::WriteSingleCoil)
            }
            FunctionCode::WriteSingleRegister => {
                WriteSingleRegisterRequest::from_buffer(buf)?.map(Self::WriteSingleRegister)
            }
            FunctionCode::WriteMultipleCoils => {
                WriteMultipleCoilsRequest::from_buffer(buf)?.map(Self::WriteMultipleCoils)
            }
            FunctionCode::WriteMultipleRegisters => {
                WriteMultipleRegistersRequest::from_buffer(buf)?.map(Self::WriteMultipleRegisters)
            }
            FunctionCode::MaskWriteRegister => {
                MaskWriteRegisterRequest::from_buffer(buf)?.map(Self::MaskWriteRegister)
            }
            FunctionCode::ReadWriteMultipleRegisters => {
                ReadWriteMultipleRegistersRequest::from_buffer(buf)?
                    .map(Self::ReadWriteMultipleRegisters)
            }
            FunctionCode::ReadTextRegisters => {
                ReadTextRegistersRequest::from_buffer(buf)?.map(Self::ReadTextRegisters)
            }
        })
    }

    pub fn function(&self) -> FunctionCode {
        match self {
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
        }
    }

    fn as_pdu(&self) -> &dyn Pdu {
        match self {
            Self::ReadCoils(req) => req,
            Self::ReadDiscreteInputs(req) => req,
            Self::ReadHoldingRegisters(req) => req,
            Self::ReadInputRegisters(req) => req,
            Self::WriteSingleCoil(req) => req,
            Self::WriteSingleRegister(req) => req,
            Self::WriteMultipleCoils(req) => req,
            Self::WriteMultipleRegisters(req) => req,
            Self::MaskWriteRegister(req) => req,
            Self::ReadWriteMultipleRegisters(req) => req,
            Self::ReadTextRegisters(req) => req,
        }
    }
}

impl Pdu for RequestBody {
    fn function_code(&self) -> u8 {
        self.function().as_u8()
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

macro_rules! impl_from_request {
    ($($variant:ident => $ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for RequestBody {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

impl_from_request! {
    ReadCoils => ReadCoilsRequest,
    ReadDiscreteInputs => ReadDiscreteInputsRequest,
    ReadHoldingRegisters => ReadHoldingRegistersRequest,
    ReadInputRegisters => ReadInputRegistersRequest,
    WriteSingleCoil => WriteSingleCoilRequest,
    WriteSingleRegister => WriteSingleRegisterRequest,
    WriteMultipleCoils => WriteMultipleCoilsRequest,
    WriteMultipleRegisters => WriteMultipleRegistersRequest,
    MaskWriteRegister => MaskWriteRegisterRequest,
    ReadWriteMultipleRegisters => ReadWriteMultipleRegistersRequest,
    ReadTextRegisters => ReadTextRegistersRequest,
}
