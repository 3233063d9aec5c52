use alloc::vec::Vec;

use crate::encoding::Writer;
use crate::pdu::{
    limits, parse, quantity_field, registers_from_bytes, start_address_field,
    FunctionCode, Parsed, Pdu,
};
use crate::{EncodeError, ValidationError};

/// Read/Write Multiple Registers (FC23) request.
///
/// The write is performed before the read on the server side.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ReadWriteMultipleRegistersRequest {
    read_start_address: u16,
    read_quantity: u16,
    write_start_address: u16,
    values: Vec<u16>,
}

impl ReadWriteMultipleRegistersRequest {
    pub const FUNCTION: FunctionCode = FunctionCode::ReadWriteMultipleRegisters;

    pub fn new(
        read_start_address: impl TryInto<u16>,
        read_quantity: impl TryInto<u16>,
        write_start_address: impl TryInto<u16>,
        values: &[u16],
    ) -> Result<Self, ValidationError> {
        let read_start_address = start_address_field(read_start_address)?;
        let read_quantity = quantity_field(read_quantity, limits::READ_REGISTERS)?;
        let write_start_address = start_address_field(write_start_address)?;
        quantity_field(values.len(), limits::READ_WRITE_REGISTERS)?;
        Ok(Self {
            read_start_address,
            read_quantity,
            write_start_address,
            values: values.to_vec(),
        })
    }

    pub fn from_buffer(buf: &[u8]) -> Result<Parsed<Self>, ValidationError> {
        parse(buf, Self::FUNCTION, |r| {
            let read_start_address = r.read_be_u16()?;
            let read_quantity = r.read_be_u16()?;
            let write_start_address = r.read_be_u16()?;
            let write_quantity = r.read_be_u16()?;
            let byte_count = usize::from(r.read_u8()?);
            let data = r.read_exact(byte_count)?;

            let read_quantity = quantity_field(read_quantity, limits::READ_REGISTERS)?;
            let write_quantity = quantity_field(write_quantity, limits::READ_WRITE_REGISTERS)?;
            if byte_count != usize::from(write_quantity) * 2 {
                return Err(ValidationError::InvalidByteCount.into());
            }
            Ok(Self {
                read_start_address,
                read_quantity,
                write_start_address,
                values: registers_from_bytes(data),
            })
        })
    }

    pub const fn read_start_address(&self) -> u16 {
        self.read_start_address
    }

    pub const fn read_quantity(&self) -> u16 {
        self.read_quantity
    }

    pub const fn write_start_address(&self) -> u16 {
        self.write_start_address
    }

    pub fn write_quantity(&self) -> u16 {
        self.values.len() as u16
    }

    pub fn values(&self) -> &[u16] {
        &self.values
    }
}

impl Pdu for ReadWriteMultipleRegistersRequest {
    fn function_code(&self) -> u8 {
        Self::FUNCTION.as_u8()
    }

    fn name(&self) -> &'static str {
        Self::FUNCTION.name()
    }

    fn byte_count(&self) -> usize {
        10 + self.values.len() * 2
    }

    fn encode(&self, w: &mut Writer<'_>) -> Result<(), EncodeError> {
        w.write_u8(Self::FUNCTION.as_u8())?;
        w.write_be_u16(self.read_start_address)?;
        w.write_be_u16(self.read_quantity)?;
        w.write_be_u16(self.write_start_address)?;
        w.write_be_u16(self.write_quantity())?;
        w.write_u8((self.values.len() * 2) as u8)?;
        w.write_be_u16_slice(&self.values)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::ReadWriteMultipleRegistersRequest;
    use crate::pdu::{Parsed, Pdu};
    use crate::ValidationError;

    #[test]
    fn read_write_multiple_registers_roundtrip() {
        let req = ReadWriteMultipleRegistersRequest::new(0x0010, 2, 0x0020, &[0x1111, 0x2222])
            .unwrap();
        assert_eq!(req.byte_count(), 14);
        assert_eq!(
            req.payload(),
            [0x17, 0x00, 0x10, 0x00, 0x02, 0x00, 0x20, 0x00, 0x02, 0x04, 0x11, 0x11, 0x22, 0x22]
        );

        match ReadWriteMultipleRegistersRequest::from_buffer(&req.payload()).unwrap() {
            Parsed::Match(decoded) => {
                assert_eq!(decoded.read_start_address(), 0x0010);
                assert_eq!(decoded.read_quantity(), 2);
                assert_eq!(decoded.write_start_address(), 0x0020);
                assert_eq!(decoded.write_quantity(), 2);
                assert_eq!(decoded.values(), &[0x1111, 0x2222]);
            }
            other => panic!("unexpected outcome: {other:?}"),
        }
    }

    #[test]
    fn validates_both_quantities() {
        assert_eq!(
            ReadWriteMultipleRegistersRequest::new(0, 126, 0, &[1]).unwrap_err(),
            ValidationError::InvalidQuantity
        );
        assert_eq!(
            ReadWriteMultipleRegistersRequest::new(0, 1, 0, &[0u16; 122]).unwrap_err(),
            ValidationError::InvalidQuantity
        );
        assert_eq!(
            ReadWriteMultipleRegistersRequest::new(0, 1, 0x1_0000, &[1]).unwrap_err(),
            ValidationError::InvalidStartAddress
        );
    }

    #[test]
    fn decode_rejects_invalid_byte_count() {
        assert_eq!(
            ReadWriteMultipleRegistersRequest::from_buffer(&[
                0x17, 0x00, 0x10, 0x00, 0x01, 0x00, 0x20, 0x00, 0x01, 0x01, 0x12
            ])
            .unwrap_err(),
            ValidationError::InvalidByteCount
        );
    }
}
