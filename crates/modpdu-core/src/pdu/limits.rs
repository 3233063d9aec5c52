//! Per-body quantity ranges.

use core::ops::RangeInclusive;

/// Coils or discrete inputs in one read request.
pub const READ_BITS: RangeInclusive<u16> = 1..=2000;
/// Holding or input registers in one read request.
pub const READ_REGISTERS: RangeInclusive<u16> = 1..=125;
pub const WRITE_COILS: RangeInclusive<u16> = 1..=1968;
pub const WRITE_REGISTERS: RangeInclusive<u16> = 1..=123;
/// Write half of a read/write multiple registers request.
pub const READ_WRITE_REGISTERS: RangeInclusive<u16> = 1..=121;
/// Text registers in one read; an empty read is legal.
pub const READ_TEXT_REGISTERS: RangeInclusive<u16> = 0..=0x7D0;

/// Packed status bytes in a coil or discrete input read response.
pub const READ_BITS_BYTES: RangeInclusive<usize> = 1..=250;
