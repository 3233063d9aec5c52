use crate::NoMatch;

/// A cursor that advances through a received byte slice.
///
/// Every read is length-checked first; running off the end yields
/// [`NoMatch::Truncated`] instead of a fault.
#[derive(Debug, Clone, Copy)]
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub const fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub const fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len().saturating_sub(self.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Check that `len` more bytes are available without consuming them.
    pub fn require(&self, len: usize) -> Result<(), NoMatch> {
        if self.remaining() < len {
            return Err(NoMatch::Truncated {
                needed: self.pos + len,
                available: self.buf.len(),
            });
        }
        Ok(())
    }

    pub fn peek_u8(&self) -> Result<u8, NoMatch> {
        self.require(1)?;
        Ok(self.buf[self.pos])
    }

    pub fn read_u8(&mut self) -> Result<u8, NoMatch> {
        let byte = self.peek_u8()?;
        self.pos += 1;
        Ok(byte)
    }

    pub fn read_exact(&mut self, len: usize) -> Result<&'a [u8], NoMatch> {
        self.require(len)?;
        let start = self.pos;
        self.pos += len;
        Ok(&self.buf[start..start + len])
    }

    pub fn read_be_u16(&mut self) -> Result<u16, NoMatch> {
        let bytes = self.read_exact(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    /// Consume the leading function code, rejecting any other tag.
    pub fn expect_function(&mut self, expected: u8) -> Result<(), NoMatch> {
        let found = self.read_u8()?;
        if found != expected {
            return Err(NoMatch::FunctionCode { expected, found });
        }
        Ok(())
    }
}
