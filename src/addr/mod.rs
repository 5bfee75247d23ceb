//! Types for representing SLEDE8 addresses.

#[allow(clippy::module_inception)]
mod addr;

pub use addr::Addr;

//===========================================================================//
