use byteorder::{ByteOrder, LittleEndian};
use std::fmt;

//===========================================================================//

/// Represents a 12-bit SLEDE8 address, as encoded in the operand of a `FINN`,
/// `HOPP`, `BHOPP`, or `TUR` instruction.  Addresses are byte offsets into
/// the program image (i.e. the binary with its header stripped).
#[derive(
    Clone, Copy, Debug, Default, Hash, Eq, Ord, PartialEq, PartialOrd,
)]
pub struct Addr(u16);

impl Addr {
    /// The size of this integer type in bits.
    pub const BITS: u32 = 12;

    /// The smallest address value (0).
    pub const MIN: Addr = Addr(0);

    /// The largest address value (`(1 << BITS) - 1`).
    pub const MAX: Addr = Addr(0xfff);

    /// Extracts the address operand from an instruction word.  The high
    /// nibble of `b1` supplies the low four bits of the address, and `b2`
    /// supplies the high eight bits.
    pub fn from_word(b1: u8, b2: u8) -> Addr {
        Addr(LittleEndian::read_u16(&[b1, b2]) >> 4)
    }

    /// Converts a `u16` into an `Addr`. If the value is outside the range of
    /// `Addr`, only the low 12 bits are kept.
    pub fn wrap_u16(value: u16) -> Addr {
        Addr(value & Addr::MAX.0)
    }

    /// Returns the address as a `u16`.
    pub fn as_u16(self) -> u16 {
        self.0
    }

    /// Converts the address into a `usize`.
    pub fn as_usize(self) -> usize {
        usize::from(self.0)
    }

    /// Returns true if this address may be referenced in an image of
    /// `image_len` bytes.  Note that an address equal to `image_len` (one
    /// past the last byte) is accepted.
    pub fn is_within(self, image_len: usize) -> bool {
        self.as_usize() <= image_len
    }
}

impl From<Addr> for usize {
    fn from(addr: Addr) -> usize {
        addr.as_usize()
    }
}

impl TryFrom<usize> for Addr {
    type Error = ();

    fn try_from(value: usize) -> Result<Addr, ()> {
        match u16::try_from(value) {
            Ok(value) if value <= Addr::MAX.0 => Ok(Addr(value)),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        self.0.fmt(f)
    }
}

impl fmt::LowerHex for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        self.0.fmt(f)
    }
}

impl fmt::UpperHex for Addr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        self.0.fmt(f)
    }
}

//===========================================================================//


//===========================================================================//
