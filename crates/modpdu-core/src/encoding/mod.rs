//! Bounds-checked cursors over byte slices.

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;
