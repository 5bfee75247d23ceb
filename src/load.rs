//! Loading of SLEDE8 binary files.

use std::io::{self, Read};
use thiserror::Error;

//===========================================================================//

macro_rules! invalid_data {
    ($e:expr) => {
        return Err(::std::io::Error::new(::std::io::ErrorKind::InvalidData,
                                         $e))
    };
}

//===========================================================================//

/// The magic header that every SLEDE8 binary starts with.
pub const MAGIC: &[u8; 7] = b".SLEDE8";

/// The error wrapped by the [`io::Error`] that [`load_image`] returns for a
/// file without the magic header.
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("Filetype error.")]
pub struct FiletypeError;

/// Reads a SLEDE8 binary file and returns its program image, i.e. everything
/// after the magic header.  Returns an error of kind
/// [`io::ErrorKind::InvalidData`] if the header is missing or wrong.
pub fn load_image<R: Read>(mut reader: R) -> io::Result<Vec<u8>> {
    let mut header = [0u8; MAGIC.len()];
    match reader.read_exact(&mut header) {
        Ok(()) => {}
        Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => {
            invalid_data!(FiletypeError);
        }
        Err(error) => return Err(error),
    }
    if &header != MAGIC {
        log::debug!("bad magic header: {:x?}", header);
        invalid_data!(FiletypeError);
    }
    let mut image = Vec::<u8>::new();
    reader.read_to_end(&mut image)?;
    Ok(image)
}

/// Returns true if `error` was caused by a file without the magic header.
pub fn is_filetype_error(error: &io::Error) -> bool {
    error.get_ref().is_some_and(|inner| inner.is::<FiletypeError>())
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{FiletypeError, is_filetype_error, load_image};
    use std::io;

    #[test]
    fn strips_header() {
        let image = load_image(&b".SLEDE8\x01\x05\x00\x00"[..]).unwrap();
        assert_eq!(image, vec![0x01, 0x05, 0x00, 0x00]);
    }

    #[test]
    fn header_only() {
        assert_eq!(load_image(&b".SLEDE8"[..]).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn wrong_header() {
        let error = load_image(&b"XSLEDE8\x00\x00"[..]).unwrap_err();
        assert_eq!(error.kind(), io::ErrorKind::InvalidData);
        assert!(is_filetype_error(&error));
        assert_eq!(error.to_string(), "Filetype error.");
        assert!(is_filetype_error(&load_image(&b".slede8"[..]).unwrap_err()));
    }

    #[test]
    fn short_header() {
        assert!(is_filetype_error(&load_image(&b".SLE"[..]).unwrap_err()));
        assert!(is_filetype_error(&load_image(&b""[..]).unwrap_err()));
    }

    #[test]
    fn other_errors_pass_through() {
        let error = io::Error::new(io::ErrorKind::InvalidData, "other");
        assert!(!is_filetype_error(&error));
        let error = io::Error::new(io::ErrorKind::InvalidData, FiletypeError);
        assert!(is_filetype_error(&error));
        assert!(!is_filetype_error(&io::ErrorKind::NotFound.into()));
    }
}

//===========================================================================//
