//! Synthetic labels for addresses discovered during analysis.

use crate::addr::Addr;
use std::collections::BTreeMap;
use std::fmt;

//===========================================================================//

/// The category of a synthetic label.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum LabelKind {
    /// The target of a `HOPP`, `BHOPP`, or `TUR` instruction.
    Branch,
    /// The target of a `FINN` instruction.
    DataBlock,
}

impl LabelKind {
    fn prefix(self) -> &'static str {
        match self {
            LabelKind::Branch => "Branch",
            LabelKind::DataBlock => "DataBlock",
        }
    }

    /// Returns the label name with the given sequence number.
    pub fn name(self, number: usize) -> String {
        format!("{}{number}", self.prefix())
    }
}

impl fmt::Display for LabelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        f.write_str(self.prefix())
    }
}

//===========================================================================//

/// A mapping from addresses to synthetic label names, shared by branch and
/// data labels.  Each address holds at most one label; the first one
/// assigned wins.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LabelTable {
    labels: BTreeMap<Addr, String>,
}

impl LabelTable {
    /// Returns an empty label table.
    pub fn new() -> LabelTable {
        LabelTable { labels: BTreeMap::new() }
    }

    /// Assigns the label `kind` + `number` to `addr`, unless `addr` already
    /// has a label.  Returns true if the label was inserted.
    pub fn assign(
        &mut self,
        addr: Addr,
        kind: LabelKind,
        number: usize,
    ) -> bool {
        if self.labels.contains_key(&addr) {
            return false;
        }
        self.labels.insert(addr, kind.name(number));
        true
    }

    /// Returns the label for the given address, if there is one.
    pub fn label_at(&self, addr: Addr) -> Option<&str> {
        self.labels.get(&addr).map(String::as_str)
    }

    /// Returns the label for the given image offset, if there is one.
    pub fn label_at_offset(&self, offset: usize) -> Option<&str> {
        Addr::try_from(offset).ok().and_then(|addr| self.label_at(addr))
    }

    /// Returns the number of labeled addresses.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if no address is labeled.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns an iterator over all labels, in ascending address order.
    pub fn iter(&self) -> impl Iterator<Item = (Addr, &str)> {
        self.labels.iter().map(|(&addr, label)| (addr, label.as_str()))
    }
}

//===========================================================================//


//===========================================================================//
