use crate::encoding::Writer;
use crate::pdu::request::{coil_raw, coil_value};
use crate::pdu::{
    address_field, limits, parse, quantity_field, start_address_field, FunctionCode,
    MaskWriteRegisterRequest, Parsed, Pdu, WriteMultipleCoilsRequest,
    WriteMultipleRegistersRequest, WriteSingleCoilRequest, WriteSingleRegisterRequest,
};
use crate::{EncodeError, ValidationError};

/// Write Single Coil (FC05) response, an echo of the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WriteSingleCoilResponse {
    address: u16,
    value: bool,
}

impl WriteSingleCoilResponse {
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
            Ok(Self {
                address,
                value: coil_value(raw)?,
            })
        })
    }

    pub const fn address(&self) -> u16 {
        self.address
    }

    pub const fn value(&self) -> bool {
        self.value
    }
}

impl From<&WriteSingleCoilRequest> for WriteSingleCoilResponse {
    fn from(request: &WriteSingleCoilRequest) -> Self {
        Self {
            address: request.address(),
            value: request.value(),
        }
    }
}

impl Pdu for WriteSingleCoilResponse {
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

/// Write Single Register (FC06) response, an echo of the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WriteSingleRegisterResponse {
    address: u16,
    value: u16,
}

impl WriteSingleRegisterResponse {
    pub const FUNCTION: FunctionCode = FunctionCode::WriteSingleRegister;

    pub fn new(address: impl TryInto<u16>, value: u16) -> Result<Self, ValidationError> {
        Ok(Self {
            address: address_field(address)?,
            value,
        })
    }

    pub fn from_buffer(buf: &[u8]) -> Result<Parsed<Self>, ValidationError> {
        parse(buf, Self::FUNCTION, |r| {
            Ok(Self {
                address: r.read_be_u16()?,
                value: r.read_be_u16()?,
            })
        })
    }

    pub const fn address(&self) -> u16 {
        self.address
    }

    pub const fn value(&self) -> u16 {
        self.value
    }
}

impl From<&WriteSingleRegisterRequest> for WriteSingleRegisterResponse {
    fn from(request: &WriteSingleRegisterRequest) -> Self {
        Self {
            address: request.address(),
            value: request.value(),
        }
    }
}

impl Pdu for WriteSingleRegisterResponse {
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

/// Write Multiple Coils (FC15) response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WriteMultipleCoilsResponse {
    start_address: u16,
    quantity: u16,
}

impl WriteMultipleCoilsResponse {
    pub const FUNCTION: FunctionCode = FunctionCode::WriteMultipleCoils;

    pub fn new(
        start_address: impl TryInto<u16>,
        quantity: impl TryInto<u16>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            start_address: start_address_field(start_address)?,
            quantity: quantity_field(quantity, limits::WRITE_COILS)?,
        })
    }

    pub fn from_buffer(buf: &[u8]) -> Result<Parsed<Self>, ValidationError> {
        parse(buf, Self::FUNCTION, |r| {
            let start_address = r.read_be_u16()?;
            let quantity = r.read_be_u16()?;
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

impl From<&WriteMultipleCoilsRequest> for WriteMultipleCoilsResponse {
    fn from(request: &WriteMultipleCoilsRequest) -> Self {
        Self {
            start_address: request.start_address(),
            quantity: request.quantity(),
        }
    }
}

impl Pdu for WriteMultipleCoilsResponse {
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
        w.write_be_u16(self.start_address)?;
        w.write_be_u16(self.quantity)?;
        Ok(())
    }
}

/// Write Multiple Registers (FC16) response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WriteMultipleRegistersResponse {
    start_address: u16,
    quantity: u16,
}

impl WriteMultipleRegistersResponse {
    pub const FUNCTION: FunctionCode = FunctionCode::WriteMultipleRegisters;

    pub fn new(
        start_address: impl TryInto<u16>,
        quantity: impl TryInto<u16>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            start_address: start_address_field(start_address)?,
            quantity: quantity_field(quantity, limits::WRITE_REGISTERS)?,
        })
    }

    pub fn from_buffer(buf: &[u8]) -> Result<Parsed<Self>, ValidationError> {
        parse(buf, Self::FUNCTION, |r| {
            let start_address = r.read_be_u16()?;
            let quantity = r.read_be_u16()?;
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

impl From<&WriteMultipleRegistersRequest> for WriteMultipleRegistersResponse {
    fn from(request: &WriteMultipleRegistersRequest) -> Self {
        Self {
            start_address: request.start_address(),
            quantity: request.quantity(),
        }
    }
}

impl Pdu for WriteMultipleRegistersResponse {
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
        w.write_be_u16(self.start_address)?;
        w.write_be_u16(self.quantity)?;
        Ok(())
    }
}

/// Mask Write Register (FC22) response, an echo of the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MaskWriteRegisterResponse {
    address: u16,
    and_mask: u16,
    or_mask: u16,
}

impl MaskWriteRegisterResponse {
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
            Ok(Self {
                address: r.read_be_u16()?,
                and_mask: r.read_be_u16()?,
                or_mask: r.read_be_u16()?,
            })
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

impl From<&MaskWriteRegisterRequest> for MaskWriteRegisterResponse {
    fn from(request: &MaskWriteRegisterRequest) -> Self {
        Self {
            address: request.address(),
            and_mask: request.and_mask(),
            or_mask: request.or_mask(),
        }
    }
}

impl Pdu for MaskWriteRegisterResponse {
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

#[cfg(test)]
mod tests {
    use super::{
        MaskWriteRegisterResponse, WriteMultipleCoilsResponse, WriteMultipleRegistersResponse,
        WriteSingleCoilResponse,
    };
    use crate::pdu::{
        MaskWriteRegisterRequest, Parsed, Pdu, WriteMultipleRegistersRequest,
        WriteSingleCoilRequest,
    };
    use crate::ValidationError;

    #[test]
    fn single_coil_echo_matches_request_bytes() {
        let request = WriteSingleCoilRequest::new(0x0007, true).unwrap();
        let response = WriteSingleCoilResponse::from(&request);
        assert_eq!(response.payload(), request.payload());
        assert_eq!(
            WriteSingleCoilResponse::from_buffer(&response.payload()).unwrap(),
            Parsed::Match(response)
        );
    }

    #[test]
    fn write_single_coil_rejects_invalid_payload() {
        assert_eq!(
            WriteSingleCoilResponse::from_buffer(&[0x05, 0x00, 0x01, 0x12, 0x34]).unwrap_err(),
            ValidationError::InvalidValue
        );
    }

    #[test]
    fn multiple_registers_echo_drops_values() {
        let request = WriteMultipleRegistersRequest::new(0x0001, &[0x000A, 0x0102]).unwrap();
        let response = WriteMultipleRegistersResponse::from(&request);
        assert_eq!(response.payload(), [0x10, 0x00, 0x01, 0x00, 0x02]);
        assert_eq!(response.byte_count(), 5);
    }

    #[test]
    fn multiple_coils_response_validates_quantity() {
        assert_eq!(
            WriteMultipleCoilsResponse::from_buffer(&[0x0F, 0x00, 0x00, 0x07, 0xB1]).unwrap_err(),
            ValidationError::InvalidQuantity
        );
        assert!(WriteMultipleCoilsResponse::new(0, 1968).is_ok());
    }

    #[test]
    fn mask_write_response_roundtrip() {
        let request = MaskWriteRegisterRequest::new(0x0007, 0xFF00, 0x00A5).unwrap();
        let response = MaskWriteRegisterResponse::from(&request);
        assert_eq!(response.payload(), [0x16, 0x00, 0x07, 0xFF, 0x00, 0x00, 0xA5]);
        assert_eq!(
            MaskWriteRegisterResponse::from_buffer(&response.payload()).unwrap(),
            Parsed::Match(response)
        );
    }
}
