//! LSB-first packing of coil and discrete input states.

use alloc::vec;
use alloc::vec::Vec;

pub fn packed_len(quantity: usize) -> usize {
    quantity.div_ceil(8)
}

/// Pack `values` eight to a byte, first value in bit 0. Unused high bits of
/// the last byte are zero.
pub fn pack(values: &[bool]) -> Vec<u8> {
    let mut out = vec![0u8; packed_len(values.len())];
    for (i, value) in values.iter().enumerate() {
        if *value {
            out[i / 8] |= 1u8 << (i % 8);
        }
    }
    out
}

pub fn bit(packed: &[u8], index: usize) -> Option<bool> {
    let byte = packed.get(index / 8)?;
    Some((byte & (1u8 << (index % 8))) != 0)
}

/// Unpack the first `quantity` states. Padding bits are ignored.
pub fn unpack(packed: &[u8], quantity: usize) -> Vec<bool> {
    (0..quantity)
        .map_while(|index| bit(packed, index))
        .collect()
}
