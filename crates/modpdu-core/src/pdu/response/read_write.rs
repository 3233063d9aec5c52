use alloc::vec::Vec;

use super::read::{read_register_block, registers_for_request, write_register_block};
use crate::encoding::Writer;
use crate::pdu::{
    limits, parse, quantity_field, FunctionCode, Parsed, Pdu, ReadWriteMultipleRegistersRequest,
};
use crate::{EncodeError, ValidationError};

/// Read/Write Multiple Registers (FC23) response carrying the read half.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReadWriteMultipleRegistersResponse {
    values: Vec<u16>,
}

impl ReadWriteMultipleRegistersResponse {
    pub const FUNCTION: FunctionCode = FunctionCode::ReadWriteMultipleRegisters;

    pub fn new(values: &[u16]) -> Result<Self, ValidationError> {
        quantity_field(values.len(), limits::READ_REGISTERS)?;
        Ok(Self {
            values: values.to_vec(),
        })
    }

    pub fn for_request(
        request: &ReadWriteMultipleRegistersRequest,
        values: &[u16],
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            values: registers_for_request(request.read_quantity(), values)?,
        })
    }

    pub fn from_buffer(buf: &[u8]) -> Result<Parsed<Self>, ValidationError> {
        parse(buf, Self::FUNCTION, |r| {
            Ok(Self {
                values: read_register_block(r)?,
            })
        })
    }

    pub fn values(&self) -> &[u16] {
        &self.values
    }

    pub fn register_count(&self) -> usize {
        self.values.len()
    }

    pub fn register(&self, index: usize) -> Option<u16> {
        self.values.get(index).copied()
    }
}

impl Pdu for ReadWriteMultipleRegistersResponse {
    fn function_code(&self) -> u8 {
        Self::FUNCTION.as_u8()
    }

    fn name(&self) -> &'static str {
        Self::FUNCTION.name()
    }

    fn byte_count(&self) -> usize {
        2 + self.values.len() * 2
    }

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        write_register_block(w, Self::FUNCTION, &self.values)
    }
}
