use alloc::vec::Vec;

use crate::encoding::{Reader, Writer};
use crate::error::ParseFault;
use crate::pdu::{
    bits, limits, parse, quantity_field, registers_from_bytes, FunctionCode, Parsed, Pdu,
    ReadCoilsRequest, ReadDiscreteInputsRequest, ReadHoldingRegistersRequest,
    ReadInputRegistersRequest, ReadTextRegistersRequest,
};
use crate::{EncodeError, ValidationError};

fn check_status_len(len: usize) -> Result<(), ValidationError> {
    if !limits::READ_BITS_BYTES.contains(&len) {
        return Err(ValidationError::InvalidByteCount);
    }
    Ok(())
}

fn read_status(r: &mut Reader<'_>) -> Result<Vec<u8>, ParseFault> {
    let byte_count = usize::from(r.read_u8()?);
    let status = r.read_exact(byte_count)?;
    check_status_len(byte_count)?;
    Ok(status.to_vec())
}

fn status_for_request(quantity: u16, values: &[bool]) -> Result<Vec<u8>, ValidationError> {
    if values.len() != usize::from(quantity) {
        return Err(ValidationError::InvalidQuantity);
    }
    Ok(bits::pack(values))
}

fn write_status(
    w: &mut Writer<'_>,
    function: FunctionCode,
    status: &[u8],
) -> Result<(), EncodeError> {
    w.write_u8(function.as_u8())?;
    // at most 250 bytes
    w.write_u8(status.len() as u8)?;
    w.write_all(status)?;
    Ok(())
}

/// Register block with a one-byte byte count, as used by FC03, FC04 and FC23.
pub(crate) fn read_register_block(r: &mut Reader<'_>) -> Result<Vec<u16>, ParseFault> {
    let byte_count = usize::from(r.read_u8()?);
    let data = r.read_exact(byte_count)?;
    if byte_count % 2 != 0 {
        return Err(ValidationError::InvalidByteCount.into());
    }
    quantity_field(byte_count / 2, limits::READ_REGISTERS)
        .map_err(|_| ValidationError::InvalidByteCount)?;
    Ok(registers_from_bytes(data))
}

pub(crate) fn write_register_block(
    w: &mut Writer<'_>,
    function: FunctionCode,
    values: &[u16],
) -> Result<(), EncodeError> {
    w.write_u8(function.as_u8())?;
    // at most 125 registers
    w.write_u8((values.len() * 2) as u8)?;
    w.write_be_u16_slice(values)?;
    Ok(())
}

pub(crate) fn registers_for_request(
    quantity: u16,
    values: &[u16],
) -> Result<Vec<u16>, ValidationError> {
    if values.len() != usize::from(quantity) {
        return Err(ValidationError::InvalidQuantity);
    }
    Ok(values.to_vec())
}

/// Read Coils (FC01) response carrying packed coil states.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReadCoilsResponse {
    status: Vec<u8>,
}

impl ReadCoilsResponse {
    pub const FUNCTION: FunctionCode = FunctionCode::ReadCoils;

    /// Build from already packed status bytes.
    pub fn new(status: &[u8]) -> Result<Self, ValidationError> {
        check_status_len(status.len())?;
        Ok(Self {
            status: status.to_vec(),
        })
    }

    pub fn from_coils(coils: &[bool]) -> Result<Self, ValidationError> {
        quantity_field(coils.len(), limits::READ_BITS)?;
        Ok(Self {
            status: bits::pack(coils),
        })
    }

    /// Answer `request` with exactly `request.quantity()` coil states.
    pub fn for_request(
        request: &ReadCoilsRequest,
        coils: &[bool],
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            status: status_for_request(request.quantity(), coils)?,
        })
    }

    pub fn from_buffer(buf: &[u8]) -> Result<Parsed<Self>, ValidationError> {
        parse(buf, Self::FUNCTION, |r| Ok(Self { status: read_status(r)? }))
    }

    pub fn status(&self) -> &[u8] {
        &self.status
    }

    pub fn coil(&self, index: usize) -> Option<bool> {
        bits::bit(&self.status, index)
    }

    /// The first `quantity` coil states; the response itself does not carry
    /// the requested quantity.
    pub fn coils(&self, quantity: u16) -> Vec<bool> {
        bits::unpack(&self.status, usize::from(quantity))
    }
}

impl Pdu for ReadCoilsResponse {
    fn function_code(&self) -> u8 {
        Self::FUNCTION.as_u8()
    }

    fn name(&self) -> &'static str {
        Self::FUNCTION.name()
    }

    fn byte_count(&self) -> usize {
        2 + self.status.len()
    }

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        write_status(w, Self::FUNCTION, &self.status)
    }
}

/// Read Discrete Inputs (FC02) response carrying packed input states.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReadDiscreteInputsResponse {
    status: Vec<u8>,
}

impl ReadDiscreteInputsResponse {
    pub const FUNCTION: FunctionCode = FunctionCode::ReadDiscreteInputs;

    pub fn new(status: &[u8]) -> Result<Self, ValidationError> {
        check_status_len(status.len())?;
        Ok(Self {
            status: status.to_vec(),
        })
    }

    pub fn from_inputs(inputs: &[bool]) -> Result<Self, ValidationError> {
        quantity_field(inputs.len(), limits::READ_BITS)?;
        Ok(Self {
            status: bits::pack(inputs),
        })
    }

    pub fn for_request(
        request: &ReadDiscreteInputsRequest,
        inputs: &[bool],
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            status: status_for_request(request.quantity(), inputs)?,
        })
    }

    pub fn from_buffer(buf: &[u8]) -> Result<Parsed<Self>, ValidationError> {
        parse(buf, Self::FUNCTION, |r| Ok(Self { status: read_status(r)? }))
    }

    pub fn status(&self) -> &[u8] {
        &self.status
    }

    pub fn input(&self, index: usize) -> Option<bool> {
        bits::bit(&self.status, index)
    }

    pub fn inputs(&self, quantity: u16) -> Vec<bool> {
        bits::unpack(&self.status, usize::from(quantity))
    }
}

impl Pdu for ReadDiscreteInputsResponse {
    fn function_code(&self) -> u8 {
        Self::FUNCTION.as_u8()
    }

    fn name(&self) -> &'static str {
        Self::FUNCTION.name()
    }

    fn byte_count(&self) -> usize {
        2 + self.status.len()
    }

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        write_status(w, Self::FUNCTION, &self.status)
    }
}

/// Read Holding Registers (FC03) response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReadHoldingRegistersResponse {
    values: Vec<u16>,
}

impl ReadHoldingRegistersResponse {
    pub const FUNCTION: FunctionCode = FunctionCode::ReadHoldingRegisters;

    pub fn new(values: &[u16]) -> Result<Self, ValidationError> {
        quantity_field(values.len(), limits::READ_REGISTERS)?;
        Ok(Self {
            values: values.to_vec(),
        })
    }

    pub fn for_request(
        request: &ReadHoldingRegistersRequest,
        values: &[u16],
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            values: registers_for_request(request.quantity(), values)?,
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

impl Pdu for ReadHoldingRegistersResponse {
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

/// Read Input Registers (FC04) response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReadInputRegistersResponse {
    values: Vec<u16>,
}

impl ReadInputRegistersResponse {
    pub const FUNCTION: FunctionCode = FunctionCode::ReadInputRegisters;

    pub fn new(values: &[u16]) -> Result<Self, ValidationError> {
        quantity_field(values.len(), limits::READ_REGISTERS)?;
        Ok(Self {
            values: values.to_vec(),
        })
    }

    pub fn for_request(
        request: &ReadInputRegistersRequest,
        values: &[u16],
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            values: registers_for_request(request.quantity(), values)?,
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

impl Pdu for ReadInputRegistersResponse {
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

/// Read Text Registers (FC 0x41) response.
///
/// Up to 0x7D0 registers do not fit a one-byte byte count, so this body
/// carries a two-byte big-endian byte count after the function code.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReadTextRegistersResponse {
    values: Vec<u16>,
}

impl ReadTextRegistersResponse {
    pub const FUNCTION: FunctionCode = FunctionCode::ReadTextRegisters;

    pub fn new(values: &[u16]) -> Result<Self, ValidationError> {
        quantity_field(values.len(), limits::READ_TEXT_REGISTERS)?;
        Ok(Self {
            values: values.to_vec(),
        })
    }

    pub fn for_request(
        request: &ReadTextRegistersRequest,
        values: &[u16],
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            values: registers_for_request(request.count(), values)?,
        })
    }

    pub fn from_buffer(buf: &[u8]) -> Result<Parsed<Self>, ValidationError> {
        parse(buf, Self::FUNCTION, |r| {
            let byte_count = usize::from(r.read_be_u16()?);
            let data = r.read_exact(byte_count)?;
            if byte_count % 2 != 0 {
                return Err(ValidationError::InvalidByteCount.into());
            }
            quantity_field(byte_count / 2, limits::READ_TEXT_REGISTERS)
                .map_err(|_| ValidationError::InvalidByteCount)?;
            Ok(Self {
                values: registers_from_bytes(data),
            })
        })
    }

    pub fn values(&self) -> &[u16] {
        &self.values
    }

    pub fn register(&self, index: usize) -> Option<u16> {
        self.values.get(index).copied()
    }

    /// Registers as text, two ASCII bytes per register, high byte first, with
    /// trailing NUL padding removed.
    pub fn text_bytes(&self) -> Vec<u8> {
        let mut bytes: Vec<u8> = self.values.iter().flat_map(|v| v.to_be_bytes()).collect();
        while bytes.last() == Some(&0) {
            bytes.pop();
        }
        bytes
    }
}

impl Pdu for ReadTextRegistersResponse {
    fn function_code(&self) -> u8 {
        Self::FUNCTION.as_u8()
    }

    fn name(&self) -> &'static str {
        Self::FUNCTION.name()
    }

    fn byte_count(&self) -> usize {
        3 + self.values.len() * 2
    }

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_u8(Self::FUNCTION.as_u8())?;
        // at most 4000 bytes
        w.write_be_u16((self.values.len() * 2) as u16)?;
        w.write_be_u16_slice(&self.values)?;
        Ok(())
    }
}
