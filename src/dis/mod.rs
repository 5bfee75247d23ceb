//! Facilities for disassembling binary code.

pub mod slede8;

//===========================================================================//
