//! Discovery of the addresses that a program image refers to.

use crate::addr::Addr;
use crate::dis::slede8::reference_kind;
use crate::label::{LabelKind, LabelTable};

//===========================================================================//

/// The addresses referenced by a program image, along with the synthetic
/// labels assigned to them.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct References {
    /// Targets of `FINN` instructions, in discovery order.  Each marks the
    /// presumed start of a data block.
    pub entries: Vec<Addr>,
    /// Targets of `HOPP`, `BHOPP`, and `TUR` instructions, in discovery
    /// order.
    pub branches: Vec<Addr>,
    /// Labels for all referenced addresses.
    pub labels: LabelTable,
}

impl References {
    /// Returns every recorded reference paired with its label, data
    /// references first, each group in discovery order.  Addresses that were
    /// referenced more than once appear once per reference.
    pub fn listing(&self) -> impl Iterator<Item = (Addr, &str)> {
        self.entries.iter().chain(self.branches.iter()).filter_map(|&addr| {
            self.labels.label_at(addr).map(|label| (addr, label))
        })
    }
}

//===========================================================================//

/// Scans every byte offset of `image` for address-taking instructions.
///
/// The scan does not know yet which bytes are code, so it examines each
/// offset rather than stepping by whole words; a data byte or the second
/// half of a word can therefore produce a spurious reference.  Addresses
/// more than one past the end of the image are ignored.
///
/// Label numbers come from one counter per label kind, and a counter
/// advances on every reference of its kind, even one to an address that is
/// already labeled.
pub fn scan_references(image: &[u8]) -> References {
    let mut references = References::default();
    let mut branch_count = 0usize;
    let mut data_count = 0usize;
    for (ptr, word) in image.windows(2).enumerate() {
        let (b1, b2) = (word[0], word[1]);
        let Some(kind) = reference_kind(b1) else { continue };
        let addr = Addr::from_word(b1, b2);
        if !addr.is_within(image.len()) {
            log::debug!("{ptr:#05x}: ignoring {kind} reference to {addr:#x}");
            continue;
        }
        let counter = match kind {
            LabelKind::Branch => {
                references.branches.push(addr);
                &mut branch_count
            }
            LabelKind::DataBlock => {
                references.entries.push(addr);
                &mut data_count
            }
        };
        if references.labels.assign(addr, kind, *counter) {
            log::debug!(
                "{ptr:#05x}: {} at {addr:#05x}",
                kind.name(*counter)
            );
        }
        *counter += 1;
    }
    if let Some(&last) = image.last()
        && reference_kind(last).is_some()
    {
        log::debug!("final byte {last:#x} has no address operand; skipped");
    }
    references
}

//===========================================================================//


//===========================================================================//
