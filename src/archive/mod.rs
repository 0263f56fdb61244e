//! PAK/HQR archive driver
//!
//! Thin orchestration over the core decoders: manifest parsing, offset and
//! entry header reading, per-entry decompression, and texture dispatch for
//! `.pvr`-tagged entries. Entries have no data dependencies on one another,
//! so failures are contained to the entry that raised them.

pub mod manifest;

mod extract;
mod reader;

pub use extract::{Entry, EntryPayload, Extractor};
pub use reader::ArchiveReader;
