//! Modbus PDU bodies in pure Rust.
//!
//! `modpdu-core` models every supported request and response body as its own
//! immutable, validated type. Each body can be built from field values,
//! serialized to the exact wire bytes, and recovered from a received buffer.
//! Transport framing (MBAP, RTU CRC) is left to the caller.
//!
//! ```
//! use modpdu_core::pdu::{Parsed, Pdu, ReadTextRegistersRequest};
//!
//! let request = ReadTextRegistersRequest::new(0x0000, 0x0001)?;
//! assert_eq!(request.payload(), [0x41, 0x00, 0x00, 0x00, 0x01]);
//!
//! match ReadTextRegistersRequest::from_buffer(&request.payload())? {
//!     Parsed::Match(decoded) => assert_eq!(decoded.count(), 1),
//!     Parsed::NoMatch(reason) => panic!("{reason}"),
//! }
//! # Ok::<(), modpdu_core::ValidationError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod encoding;
pub mod error;
pub mod pdu;

pub use error::{EncodeError, NoMatch, ValidationError};
pub use pdu::{Parsed, Pdu, RequestBody, ResponseBody};
