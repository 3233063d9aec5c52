use crate::encoding::{Reader, Writer};
use crate::error::ParseFault;
use crate::pdu::{limits, parse, quantity_field, start_address_field, FunctionCode, Parsed, Pdu};
use crate::{EncodeError, ValidationError};

/// Every read request shares the same 5-byte layout:
/// function code, start address (BE), quantity (BE).
pub(crate) const READ_REQUEST_LEN: usize = 5;

fn read_range(r: &mut Reader<'_>) -> Result<(u16, u16), ParseFault> {
    let start_address = r.read_be_u16()?;
    let quantity = r.read_be_u16()?;
    Ok((start_address, quantity))
}

fn write_range(
    w: &mut Writer<'_>,
    function: FunctionCode,
    start_address: u16,
    quantity: u16,
) -> Result<(), EncodeError> {
    w.write_u8(function.as_u8())?;
    w.write_be_u16(start_address)?;
    w.write_be_u16(quantity)?;
    Ok(())
}

/// Read Coils (FC01) request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReadCoilsRequest {
    start_address: u16,
    quantity: u16,
}

impl ReadCoilsRequest {
    pub const FUNCTION: FunctionCode = FunctionCode::ReadCoils;

    pub fn new(
        start_address: impl TryInto<u16>,
        quantity: impl TryInto<u16>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            start_address: start_address_field(start_address)?,
            quantity: quantity_field(quantity, limits::READ_BITS)?,
        })
    }

    pub fn from_buffer(buf: &[u8]) -> Result<Parsed<Self>, ValidationError> {
        parse(buf, Self::FUNCTION, |r| {
            let (start_address, quantity) = read_range(r)?;
            Ok(Self::new(start_address, quantity)?)
        })
    }

    pub const fn start_address(&self) -> u16 {
        self.start_address
    }

    pub const fn quantity(&self) -> u16 {
        self.quantity
    }
}

impl Pdu for ReadCoilsRequest {
    fn function_code(&self) -> u8 {
        Self::FUNCTION.as_u8()
    }

    fn name(&self) -> &'static str {
        Self::FUNCTION.name()
    }

    fn byte_count(&self) -> usize {
        READ_REQUEST_LEN
    }

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        write_range(w, Self::FUNCTION, self.start_address, self.quantity)
    }
}

/// Read Discrete Inputs (FC02) request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReadDiscreteInputsRequest {
    start_address: u16,
    quantity: u16,
}

impl ReadDiscreteInputsRequest {
    pub const FUNCTION: FunctionCode = FunctionCode::ReadDiscreteInputs;

    pub fn new(
        start_address: impl TryInto<u16>,
        quantity: impl TryInto<u16>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            start_address: start_address_field(start_address)?,
            quantity: quantity_field(quantity, limits::READ_BITS)?,
        })
    }

    pub fn from_buffer(buf: &[u8]) -> Result<Parsed<Self>, ValidationError> {
        parse(buf, Self::FUNCTION, |r| {
            let (start_address, quantity) = read_range(r)?;
            Ok(Self::new(start_address, quantity)?)
        })
    }

    pub const fn start_address(&self) -> u16 {
        self.start_address
    }

    pub const fn quantity(&self) -> u16 {
        self.quantity
    }
}

impl Pdu for ReadDiscreteInputsRequest {
    fn function_code(&self) -> u8 {
        Self::FUNCTION.as_u8()
    }

    fn name(&self) -> &'static str {
        Self::FUNCTION.name()
    }

    fn byte_count(&self) -> usize {
        READ_REQUEST_LEN
    }

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        write_range(w, Self::FUNCTION, self.start_address, self.quantity)
    }
}

/// Read Holding Registers (FC03) request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReadHoldingRegistersRequest {
    start_address: u16,
    quantity: u16,
}

impl ReadHoldingRegistersRequest {
    pub const FUNCTION: FunctionCode = FunctionCode::ReadHoldingRegisters;

    pub fn new(
        start_address: impl TryInto<u16>,
        quantity: impl TryInto<u16>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            start_address: start_address_field(start_address)?,
            quantity: quantity_field(quantity, limits::READ_REGISTERS)?,
        })
    }

    pub fn from_buffer(buf: &[u8]) -> Result<Parsed<Self>, ValidationError> {
        parse(buf, Self::FUNCTION, |r| {
            let (start_address, quantity) = read_range(r)?;
            Ok(Self::new(start_address, quantity)?)
        })
    }

    pub const fn start_address(&self) -> u16 {
        self.start_address
    }

    pub const fn quantity(&self) -> u16 {
        self.quantity
    }
}

impl Pdu for ReadHoldingRegistersRequest {
    fn function_code(&self) -> u8 {
        Self::FUNCTION.as_u8()
    }

    fn name(&self) -> &'static str {
        Self::FUNCTION.name()
    }

    fn byte_count(&self) -> usize {
        READ_REQUEST_LEN
    }

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        write_range(w, Self::FUNCTION, self.start_address, self.quantity)
    }
}

/// Read Input Registers (FC04) request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReadInputRegistersRequest {
    start_address: u16,
    quantity: u16,
}

impl ReadInputRegistersRequest {
    pub const FUNCTION: FunctionCode = FunctionCode::ReadInputRegisters;

    pub fn new(
        start_address: impl TryInto<u16>,
        quantity: impl TryInto<u16>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            start_address: start_address_field(start_address)?,
            quantity: quantity_field(quantity, limits::READ_REGISTERS)?,
        })
    }

    pub fn from_buffer(buf: &[u8]) -> Result<Parsed<Self>, ValidationError> {
        parse(buf, Self::FUNCTION, |r| {
            let (start_address, quantity) = read_range(r)?;
            Ok(Self::new(start_address, quantity)?)
        })
    }

    pub const fn start_address(&self) -> u16 {
        self.start_address
    }

    pub const fn quantity(&self) -> u16 {
        self.quantity
    }
}

impl Pdu for ReadInputRegistersRequest {
    fn function_code(&self) -> u8 {
        Self::FUNCTION.as_u8()
    }

    fn name(&self) -> &'static str {
        Self::FUNCTION.name()
    }

    fn byte_count(&self) -> usize {
        READ_REQUEST_LEN
    }

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        write_range(w, Self::FUNCTION, self.start_address, self.quantity)
    }
}

/// Read Text Registers (FC 0x41) request.
///
/// Vendor extension using the read-register layout with a wider ceiling of
/// 0x7D0 registers. A count of zero is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReadTextRegistersRequest {
    start_address: u16,
    count: u16,
}

impl ReadTextRegistersRequest {
    pub const FUNCTION: FunctionCode = FunctionCode::ReadTextRegisters;

    pub fn new(
        start_address: impl TryInto<u16>,
        count: impl TryInto<u16>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            start_address: start_address_field(start_address)?,
            count: quantity_field(count, limits::READ_TEXT_REGISTERS)?,
        })
    }

    pub fn from_buffer(buf: &[u8]) -> Result<Parsed<Self>, ValidationError> {
        parse(buf, Self::FUNCTION, |r| {
            let (start_address, count) = read_range(r)?;
            Ok(Self::new(start_address, count)?)
        })
    }

    pub const fn start_address(&self) -> u16 {
        self.start_address
    }

    pub const fn count(&self) -> u16 {
        self.count
    }
}

impl Pdu for ReadTextRegistersRequest {
    fn function_code(&self) -> u8 {
        Self::FUNCTION.as_u8()
    }

    fn name(&self) -> &'static str {
        Self::FUNCTION.name()
    }

    fn byte_count(&self) -> usize {
        READ_REQUEST_LEN
    }

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        write_range(w, Self::FUNCTION, self.start_address, self.count)
    }
}
