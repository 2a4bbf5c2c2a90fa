//! Record models and the per-record decoder.

use crate::cents::Cents;
use crate::cursor::ByteCursor;
use crate::error::DecodeError;
use std::fmt;
use std::io::Read;

/// Bytes shared by every record: tag, timestamp and user id.
pub const BASE_RECORD_LEN: usize = 13;

/// Width of the amount field carried by debits and credits.
pub const AMOUNT_LEN: usize = 8;

/// Record type tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Money leaving the user's account.
    Debit,

    /// Money entering the user's account.
    Credit,

    /// A recurring payment was set up.
    AutopayStart,

    /// A recurring payment was cancelled.
    AutopayEnd,
}

impl RecordKind {
    /// Maps a wire tag to its kind. Only 0 through 3 are valid.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(RecordKind::Debit),
            1 => Some(RecordKind::Credit),
            2 => Some(RecordKind::AutopayStart),
            3 => Some(RecordKind::AutopayEnd),
            _ => None,
        }
    }

    pub fn tag(self) -> u8 {
        match self {
            RecordKind::Debit => 0,
            RecordKind::Credit => 1,
            RecordKind::AutopayStart => 2,
            RecordKind::AutopayEnd => 3,
        }
    }

    /// Whether an amount field follows the user id on the wire.
    pub fn carries_amount(self) -> bool {
        matches!(self, RecordKind::Debit | RecordKind::Credit)
    }

    /// Encoded length of a record of this kind.
    pub fn wire_len(self) -> usize {
        if self.carries_amount() {
            BASE_RECORD_LEN + AMOUNT_LEN
        } else {
            BASE_RECORD_LEN
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Debit => "debit",
            RecordKind::Credit => "credit",
            RecordKind::AutopayStart => "autopay-start",
            RecordKind::AutopayEnd => "autopay-end",
        };
        f.write_str(name)
    }
}

/// A decoded transaction log record.
///
/// Autopay records carry no amount on the wire; their `amount` is always zero
/// so the aggregation step never has to special-case them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record {
    pub kind: RecordKind,

    /// Seconds since the Unix epoch. Not interpreted.
    pub timestamp: u32,

    pub user_id: u64,

    pub amount: Cents,
}

/// Decodes one record at the cursor's position.
///
/// The tag is read and validated first since it decides how many more bytes
/// belong to this record. An unknown tag fails before anything past it is read.
pub fn decode_record<R: Read>(cursor: &mut ByteCursor<R>) -> Result<Record, DecodeError> {
    let offset = cursor.position();
    let tag = cursor.read_u8()?;
    let kind = RecordKind::from_tag(tag).ok_or(DecodeError::UnknownRecordType { tag, offset })?;

    let timestamp = cursor.read_u32_be()?;
    let user_id = cursor.read_u64_be()?;

    let amount = if kind.carries_amount() {
        Cents::from_f64_truncated(cursor.read_f64_be()?)
    } else {
        Cents::ZERO
    };

    Ok(Record {
        kind,
        timestamp,
        user_id,
        amount,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode(kind: RecordKind, timestamp: u32, user_id: u64, dollars: f64) -> Vec<u8> {
        let mut bytes = vec![kind.tag()];
        bytes.extend_from_slice(&timestamp.to_be_bytes());
        bytes.extend_from_slice(&user_id.to_be_bytes());
        if kind.carries_amount() {
            bytes.extend_from_slice(&dollars.to_be_bytes());
        }
        bytes
    }

    #[test]
    fn test_decode_debit() {
        let bytes = encode(RecordKind::Debit, 1_393_108_945, 4_136_353_673_894_269_217, 604.274);
        let mut cursor = ByteCursor::new(Cursor::new(bytes));

        let record = decode_record(&mut cursor).unwrap();
        assert_eq!(record.kind, RecordKind::Debit);
        assert_eq!(record.timestamp, 1_393_108_945);
        assert_eq!(record.user_id, 4_136_353_673_894_269_217);
        assert_eq!(record.amount.as_i64(), 60427);
        assert_eq!(cursor.position(), 21);
    }

    #[test]
    fn test_decode_credit() {
        let bytes = encode(RecordKind::Credit, 7, 42, 10.5);
        let record = decode_record(&mut ByteCursor::new(Cursor::new(bytes))).unwrap();
        assert_eq!(record.kind, RecordKind::Credit);
        assert_eq!(record.amount, Cents::new(1050));
    }

    #[test]
    fn test_decode_autopay_has_no_amount() {
        let mut bytes = encode(RecordKind::AutopayEnd, 7, 42, 0.0);
        // next record's tag must be left untouched
        bytes.push(RecordKind::Debit.tag());
        let mut cursor = ByteCursor::new(Cursor::new(bytes));

        let record = decode_record(&mut cursor).unwrap();
        assert_eq!(record.kind, RecordKind::AutopayEnd);
        assert_eq!(record.amount, Cents::ZERO);
        assert_eq!(cursor.position(), 13);
    }

    #[test]
    fn test_each_kind_consumes_its_wire_len() {
        for tag in 0..=3u8 {
            let kind = RecordKind::from_tag(tag).unwrap();
            let mut bytes = encode(kind, 1, 2, 3.25);
            bytes.extend_from_slice(&[0xaa; 32]);
            let mut cursor = ByteCursor::new(Cursor::new(bytes));

            decode_record(&mut cursor).unwrap();
            assert_eq!(cursor.position(), kind.wire_len() as u64, "{}", kind);
        }
        assert_eq!(RecordKind::Debit.wire_len(), 21);
        assert_eq!(RecordKind::AutopayStart.wire_len(), 13);
    }

    #[test]
    fn test_unknown_tag_rejected_after_one_byte() {
        for tag in [4u8, 5, 0x7f, 0xff] {
            let mut bytes = vec![tag];
            bytes.extend_from_slice(&[0u8; 20]);
            let mut cursor = ByteCursor::new(Cursor::new(bytes));

            match decode_record(&mut cursor) {
                Err(DecodeError::UnknownRecordType { tag: found, offset }) => {
                    assert_eq!(found, tag);
                    assert_eq!(offset, 0);
                }
                other => panic!("Expected UnknownRecordType, got {:?}", other),
            }
            assert_eq!(cursor.position(), 1);
        }
    }

    #[test]
    fn test_short_debit_is_truncated() {
        let full = encode(RecordKind::Debit, 1, 2, 3.0);
        for len in 0..full.len() {
            let mut cursor = ByteCursor::new(Cursor::new(&full[..len]));
            assert!(
                matches!(decode_record(&mut cursor), Err(DecodeError::Truncated { .. })),
                "length {}",
                len
            );
        }
    }

    #[test]
    fn test_negative_amount() {
        let bytes = encode(RecordKind::Credit, 0, 1, -12.349);
        let record = decode_record(&mut ByteCursor::new(Cursor::new(bytes))).unwrap();
        assert_eq!(record.amount.as_i64(), -1234);
    }
}
