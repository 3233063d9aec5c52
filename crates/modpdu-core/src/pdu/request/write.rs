use alloc::vec::Vec;

use crate::encoding::Writer;
use crate::pdu::{
    address_field, bits, limits, parse, quantity_field, registers_from_bytes,
    start_address_field, FunctionCode, Parsed, Pdu,
};
use crate::{EncodeError, ValidationError};

pub(crate) const COIL_ON: u16 = 0xFF00;
pub(crate) const COIL_OFF: u16 = 0x0000;

pub(crate) fn coil_value(raw: u16) -> Result<bool, ValidationError> {
    match raw {
        COIL_ON => Ok(true),
        COIL_OFF => Ok(false),
        _ => Err(ValidationError::InvalidValue),
    }
}

pub(crate) const fn coil_raw(value: bool) -> u16 {
    if value {
        COIL_ON
    } else {
        COIL_OFF
    }
}

/// Write Single Coil (FC05) request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WriteSingleCoilRequest {
    address: u16,
    value: bool,
}

impl WriteSingleCoilRequest {
    pub const FUNCTION: FunctionCode = FunctionCode::WriteSingleCoil;

    pub fn new(address: impl TryInto<u16>, value: bool) -> Result<Self, ValidationError> {
        Ok(Self {
            address: address_field(address)?,
            value,
        })
    }

    pub fn from_buffer(buf: &[u8]) -> Result<Parsed<Self>, ValidationError> {
        parse(buf, Self::FUNCTION, |r| {
            let address = r.read_be_u16()?;
            let raw = r.read_be_u16()?;
            Ok(Self::new(address, coil_value(raw)?)?)
        })
    }

    pub const fn address(&self) -> u16 {
        self.address
    }

    pub const fn value(&self) -> bool {
        self.value
    }
}

impl Pdu for WriteSingleCoilRequest {
    fn function_code(&self) -> u8 {
        Self::FUNCTION.as_u8()
    }

    fn name(&self) -> &'static str {
        Self::FUNCTION.name()
    }

    fn byte_count(&self) -> usize {
        5
    }

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_u8(Self::FUNCTION.as_u8())?;
        w.write_be_u16(self.address)?;
        w.write_be_u16(coil_raw(self.value))?;
        Ok(())
    }
}

/// Write Single Register (FC06) request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WriteSingleRegisterRequest {
    address: u16,
    value: u16,
}

impl WriteSingleRegisterRequest {
    pub const FUNCTION: FunctionCode = FunctionCode::WriteSingleRegister;

    pub fn new(address: impl TryInto<u16>, value: u16) -> Result<Self, ValidationError> {
        Ok(Self {
            address: address_field(address)?,
            value,
        })
    }

    pub fn from_buffer(buf: &[u8]) -> Result<Parsed<Self>, ValidationError> {
        parse(buf, Self::FUNCTION, |r| {
            let address = r.read_be_u16()?;
            let value = r.read_be_u16()?;
            Ok(Self::new(address, value)?)
        })
    }

    pub const fn address(&self) -> u16 {
        self.address
    }

    pub const fn value(&self) -> u16 {
        self.value
    }
}

impl Pdu for WriteSingleRegisterRequest {
    fn function_code(&self) -> u8 {
        Self::FUNCTION.as_u8()
    }

    fn name(&self) -> &'static str {
        Self::FUNCTION.name()
    }

    fn byte_count(&self) -> usize {
        5
    }

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_u8(Self::FUNCTION.as_u8())?;
        w.write_be_u16(self.address)?;
        w.write_be_u16(self.value)?;
        Ok(())
    }
}

/// Write Multiple Coils (FC15) request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WriteMultipleCoilsRequest {
    start_address: u16,
    values: Vec<bool>,
}

impl WriteMultipleCoilsRequest {
    pub const FUNCTION: FunctionCode = FunctionCode::WriteMultipleCoils;

    pub fn new(start_address: impl TryInto<u16>, values: &[bool]) -> Result<Self, ValidationError> {
        let start_address = start_address_field(start_address)?;
        quantity_field(values.len(), limits::WRITE_COILS)?;
        Ok(Self {
            start_address,
            values: values.to_vec(),
        })
    }

    pub fn from_buffer(buf: &[u8]) -> Result<Parsed<Self>, ValidationError> {
        parse(buf, Self::FUNCTION, |r| {
            let start_address = r.read_be_u16()?;
            let quantity = r.read_be_u16()?;
            let byte_count = usize::from(r.read_u8()?);
            let packed = r.read_exact(byte_count)?;

            let quantity = quantity_field(quantity, limits::WRITE_COILS)?;
            if byte_count != bits::packed_len(usize::from(quantity)) {
                return Err(ValidationError::InvalidByteCount.into());
            }
            Ok(Self {
                start_address,
                values: bits::unpack(packed, usize::from(quantity)),
            })
        })
    }

    pub const fn start_address(&self) -> u16 {
        self.start_address
    }

    pub fn quantity(&self) -> u16 {
        // bounded by WRITE_COILS at construction
        self.values.len() as u16
    }

    pub fn values(&self) -> &[bool] {
        &self.values
    }

    fn packed_len(&self) -> usize {
        bits::packed_len(self.values.len())
    }
}

impl Pdu for WriteMultipleCoilsRequest {
    fn function_code(&self) -> u8 {
        Self::FUNCTION.as_u8()
    }

    fn name(&self) -> &'static str {
        Self::FUNCTION.name()
    }

    fn byte_count(&self) -> usize {
        6 + self.packed_len()
    }

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_u8(Self::FUNCTION.as_u8())?;
        w.write_be_u16(self.start_address)?;
        w.write_be_u16(self.quantity())?;
        // at most 246 bytes for 1968 coils
        w.write_u8(self.packed_len() as u8)?;
        w.write_all(&bits::pack(&self.values))?;
        Ok(())
    }
}

/// Write Multiple Registers (FC16) request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WriteMultipleRegistersRequest {
    start_address: u16,
    values: Vec<u16>,
}

impl WriteMultipleRegistersRequest {
    pub const FUNCTION: FunctionCode = FunctionCode::WriteMultipleRegisters;

    pub fn new(start_address: impl TryInto<u16>, values: &[u16]) -> Result<Self, ValidationError> {
        let start_address = start_address_field(start_address)?;
        quantity_field(values.len(), limits::WRITE_REGISTERS)?;
        Ok(Self {
            start_address,
            values: values.to_vec(),
        })
    }

    pub fn from_buffer(buf: &[u8]) -> Result<Parsed<Self>, ValidationError> {
        parse(buf, Self::FUNCTION, |r| {
            let start_address = r.read_be_u16()?;
            let quantity = r.read_be_u16()?;
            let byte_count = usize::from(r.read_u8()?);
            let data = r.read_exact(byte_count)?;

            let quantity = quantity_field(quantity, limits::WRITE_REGISTERS)?;
            if byte_count != usize::from(quantity) * 2 {
                return Err(ValidationError::InvalidByteCount.into());
            }
            Ok(Self {
                start_address,
                values: registers_from_bytes(data),
            })
        })
    }

    pub const fn start_address(&self) -> u16 {
        self.start_address
    }

    pub fn quantity(&self) -> u16 {
        self.values.len() as u16
    }

    pub fn values(&self) -> &[u16] {
        &self.values
    }
}

impl Pdu for WriteMultipleRegistersRequest {
    fn function_code(&self) -> u8 {
        Self::FUNCTION.as_u8()
    }

    fn name(&self) -> &'static str {
        Self::FUNCTION.name()
    }

    fn byte_count(&self) -> usize {
        6 + self.values.len() * 2
    }

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_u8(Self::FUNCTION.as_u8())?;
        w.write_be_u16(self.start_address)?;
        w.write_be_u16(self.quantity())?;
        w.write_u8((self.values.len() * 2) as u8)?;
        w.write_be_u16_slice(&self.values)?;
        Ok(())
    }
}

/// Mask Write Register (FC22) request.
///
/// The server stores `(current & and_mask) | (or_mask & !and_mask)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MaskWriteRegisterRequest {
    address: u16,
    and_mask: u16,
    or_mask: u16,
}

impl MaskWriteRegisterRequest {
    pub const FUNCTION: FunctionCode = FunctionCode::MaskWriteRegister;

    pub fn new(
        address: impl TryInto<u16>,
        and_mask: u16,
        or_mask: u16,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            address: address_field(address)?,
            and_mask,
            or_mask,
        })
    }

    pub fn from_buffer(buf: &[u8]) -> Result<Parsed<Self>, ValidationError> {
        parse(buf, Self::FUNCTION, |r| {
            let address = r.read_be_u16()?;
            let and_mask = r.read_be_u16()?;
            let or_mask = r.read_be_u16()?;
            Ok(Self::new(address, and_mask, or_mask)?)
        })
    }

    pub const fn address(&self) -> u16 {
        self.address
    }

    pub const fn and_mask(&self) -> u16 {
        self.and_mask
    }

    pub const fn or_mask(&self) -> u16 {
        self.or_mask
    }
}

impl Pdu for MaskWriteRegisterRequest {
    fn function_code(&self) -> u8 {
        Self::FUNCTION.as_u8()
    }

    fn name(&self) -> &'static str {
        Self::FUNCTION.name()
    }

    fn byte_count(&self) -> usize {
        7
    }

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_u8(Self::FUNCTION.as_u8())?;
        w.write_be_u16(self.address)?;
        w.write_be_u16(self.and_mask)?;
        w.write_be_u16(self.or_mask)?;
        Ok(())
    }
}
