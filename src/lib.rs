//! Static disassembler for SLEDE8 binaries.
//!
//! Besides decoding instructions, the disassembler guesses which parts of a
//! program image are data: every `FINN` target is assumed to start a data
//! block that runs until the next jump or call target.

#![warn(missing_docs)]

pub mod addr;
pub mod dis;
pub mod emit;
pub mod label;
pub mod load;
pub mod scan;
pub mod segment;

pub use emit::{Analysis, disassemble, write_listing};
pub use load::{FiletypeError, MAGIC, is_filetype_error, load_image};
