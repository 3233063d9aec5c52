//! Shared helpers for the `pdudecode` and `pduencode` binaries.

#![forbid(unsafe_code)]

pub mod common;
