//! MPS7 file header.

use crate::cursor::ByteCursor;
use crate::error::DecodeError;
use log::{info, warn};
use std::io::Read;

/// Magic tag opening every MPS7 file.
pub const MAGIC: [u8; 4] = *b"MPS7";

/// The only format version with a documented layout.
pub const DOCUMENTED_VERSION: u8 = 1;

/// Size of the header on the wire.
pub const HEADER_LEN: usize = 9;

/// Decoded file header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Format version byte. Stored, not interpreted.
    pub version: u8,

    /// Number of records that follow the header.
    pub record_count: u32,
}

/// Decodes the 9-byte header at the cursor's position.
///
/// Any version byte is accepted; an undocumented one is only logged.
pub fn decode_header<R: Read>(cursor: &mut ByteCursor<R>) -> Result<Header, DecodeError> {
    let found = cursor.read_array::<4>()?;
    if found != MAGIC {
        return Err(DecodeError::BadMagic { found });
    }

    let version = cursor.read_u8()?;
    let record_count = cursor.read_u32_be()?;

    if version != DOCUMENTED_VERSION {
        warn!(
            "Header declares version {}, decoding with the version {} layout",
            version, DOCUMENTED_VERSION
        );
    }
    info!("MPS7 v{} header: {} record(s)", version, record_count);

    Ok(Header {
        version,
        record_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn decode(bytes: &[u8]) -> Result<Header, DecodeError> {
        decode_header(&mut ByteCursor::new(Cursor::new(bytes)))
    }

    #[test]
    fn test_decode_valid_header() {
        let header = decode(b"MPS7\x01\x00\x00\x00\x47").unwrap();
        assert_eq!(header.version, 1);
        assert_eq!(header.record_count, 71);
    }

    #[test]
    fn test_record_count_is_big_endian() {
        let header = decode(b"MPS7\x01\x01\x02\x03\x04").unwrap();
        assert_eq!(header.record_count, 0x0102_0304);
    }

    #[test]
    fn test_bad_magic_rejected() {
        match decode(b"MPS6\x01\x00\x00\x00\x01") {
            Err(DecodeError::BadMagic { found }) => assert_eq!(&found, b"MPS6"),
            other => panic!("Expected BadMagic, got {:?}", other),
        }
    }

    #[test]
    fn test_any_version_accepted() {
        let header = decode(b"MPS7\xff\x00\x00\x00\x00").unwrap();
        assert_eq!(header.version, 0xff);
        assert_eq!(header.record_count, 0);
    }

    #[test]
    fn test_truncated_header() {
        match decode(b"MPS7\x01\x00\x00") {
            Err(DecodeError::Truncated { offset, needed }) => {
                assert_eq!(offset, 5);
                assert_eq!(needed, 4);
            }
            other => panic!("Expected Truncated, got {:?}", other),
        }
    }

    #[test]
    fn test_header_consumes_nine_bytes() {
        let mut cursor = ByteCursor::new(Cursor::new(b"MPS7\x01\x00\x00\x00\x02extra"));
        decode_header(&mut cursor).unwrap();
        assert_eq!(cursor.position(), HEADER_LEN as u64);
    }
}
