//! Rendering of a complete, annotated SLEDE8 listing.

use crate::dis::slede8::{DecodeIssue, Instruction};
use crate::label::LabelTable;
use crate::scan::{References, scan_references};
use crate::segment::{DataBlock, DataMap, find_data_blocks};
use std::io::{self, Write};

//===========================================================================//

/// The results of statically analyzing a program image: the references it
/// makes, the labels assigned to them, and the bytes guessed to be data.
pub struct Analysis<'a> {
    image: &'a [u8],
    references: References,
    blocks: Vec<DataBlock>,
    data: DataMap,
}

impl<'a> Analysis<'a> {
    /// Analyzes the given program image.
    pub fn new(image: &'a [u8]) -> Analysis<'a> {
        let references = scan_references(image);
        let blocks = find_data_blocks(
            &references.entries,
            &references.branches,
            image.len(),
        );
        let data = DataMap::from_blocks(&blocks, image.len());
        log::debug!(
            "{} labels, {} data blocks covering {} bytes",
            references.labels.len(),
            blocks.len(),
            data.count()
        );
        Analysis { image, references, blocks, data }
    }

    /// Returns the references found in the image.
    pub fn references(&self) -> &References {
        &self.references
    }

    /// Returns the label table.
    pub fn labels(&self) -> &LabelTable {
        &self.references.labels
    }

    /// Returns the guessed data blocks, in ascending order of start offset.
    pub fn blocks(&self) -> &[DataBlock] {
        &self.blocks
    }

    /// Returns the set of offsets classified as data.
    pub fn data(&self) -> &DataMap {
        &self.data
    }

    /// Writes the full listing: the label and data segment comment blocks,
    /// followed by the disassembly itself.
    pub fn write_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        self.write_labels(writer)?;
        self.write_segments(writer)?;
        self.write_body(writer)
    }

    fn write_labels<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer)?;
        writeln!(writer, "; Labels:")?;
        for (addr, label) in self.references.listing() {
            writeln!(writer, "; {addr:#05x} - {label}")?;
        }
        Ok(())
    }

    fn write_segments<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        writeln!(writer)?;
        writeln!(writer, "; Guessed data segments:")?;
        for block in &self.blocks {
            writeln!(writer, "; \t {block}")?;
        }
        Ok(())
    }

    fn write_body<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let image = self.image;
        let labels = self.labels();
        writeln!(writer)?;
        writeln!(writer, ";SLEDE8 BEGIN")?;
        let mut pc = 0;
        while pc < image.len() {
            if let Some(label) = labels.label_at_offset(pc) {
                writeln!(writer)?;
                writeln!(writer, "{label}:")?;
            }
            if self.data.contains(pc) {
                write!(writer, ".DATA {:#x}", image[pc])?;
                pc += 1;
                // A label splits a data run even within one block.
                while self.data.contains(pc)
                    && labels.label_at_offset(pc).is_none()
                {
                    write!(writer, ", {:#x}", image[pc])?;
                    pc += 1;
                }
                writeln!(writer)?;
            } else {
                let line = match Instruction::decode_at(image, pc) {
                    Ok(instruction) => instruction.format(labels),
                    Err(issue) => {
                        if let DecodeIssue::Truncated(_) = issue {
                            log::warn!("{pc:#05x}: truncated final word");
                        }
                        issue.to_string()
                    }
                };
                writeln!(writer, "{line}")?;
                pc += 2;
            }
        }
        writeln!(writer, ";SLEDE8 END")
    }
}

//===========================================================================//

/// Analyzes `image` and writes its annotated listing to `writer`.
pub fn write_listing<W: Write>(
    image: &[u8],
    writer: &mut W,
) -> io::Result<()> {
    Analysis::new(image).write_to(writer)
}

/// Analyzes `image` and returns its annotated listing.
pub fn disassemble(image: &[u8]) -> String {
    let mut listing = Vec::<u8>::new();
    // Writing to a Vec never fails.
    write_listing(image, &mut listing).unwrap_or_default();
    String::from_utf8_lossy(&listing).into_owned()
}

//===========================================================================//


//===========================================================================//
