//! Single-pass decode-and-aggregate driver.
//!
//! Reads the header once, then decodes exactly as many records as it declares,
//! folding each into an [`AggregateState`] and discarding it. Any decode error
//! or overflowing total ends the pass; no partial totals are returned.

use crate::aggregate::{AggregateState, DEFAULT_WATCH_USER_ID};
use crate::cursor::ByteCursor;
use crate::error::{DecodeError, Error, Result};
use crate::header::{decode_header, Header};
use crate::record::{decode_record, Record};
use log::debug;
use std::io::Read;

/// Iterator over the records that follow a decoded header.
///
/// Yields at most `record_count` items and stops after the first error.
pub struct Records<R> {
    cursor: ByteCursor<R>,
    remaining: u32,
    failed: bool,
}

impl<R: Read> Records<R> {
    /// Decodes the header from `reader` and positions the iterator at the first record.
    pub fn new(reader: R) -> std::result::Result<(Header, Self), DecodeError> {
        let mut cursor = ByteCursor::new(reader);
        let header = decode_header(&mut cursor)?;
        let records = Records {
            cursor,
            remaining: header.record_count,
            failed: false,
        };
        Ok((header, records))
    }

    /// Bytes consumed from the source so far, header included.
    pub fn position(&self) -> u64 {
        self.cursor.position()
    }
}

impl<R: Read> Iterator for Records<R> {
    type Item = std::result::Result<Record, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;
        let result = decode_record(&mut self.cursor);
        self.failed = result.is_err();
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            (0, Some(self.remaining as usize))
        }
    }
}

/// Final output of a successful pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub header: Header,
    pub state: AggregateState,
}

/// Runs a full pass over an MPS7 log.
///
/// # Example
///
/// ```
/// use mps7::LogProcessor;
/// use std::io::Cursor;
///
/// let mut log = b"MPS7\x01\x00\x00\x00\x01".to_vec();
/// log.push(0); // debit
/// log.extend_from_slice(&0u32.to_be_bytes());
/// log.extend_from_slice(&42u64.to_be_bytes());
/// log.extend_from_slice(&10.5f64.to_be_bytes());
///
/// let summary = LogProcessor::new(42).process(Cursor::new(log)).unwrap();
/// assert_eq!(summary.state.total_debit.to_string(), "10.50");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LogProcessor {
    watch_user_id: u64,
}

impl LogProcessor {
    /// Creates a processor tracking the balance of `watch_user_id`.
    pub fn new(watch_user_id: u64) -> Self {
        LogProcessor { watch_user_id }
    }

    pub fn watch_user_id(&self) -> u64 {
        self.watch_user_id
    }

    /// Decodes and aggregates the whole log from `reader`.
    pub fn process<R: Read>(&self, reader: R) -> Result<Summary> {
        let (header, records) = Records::new(reader).map_err(Error::Header)?;
        let mut state = AggregateState::new(self.watch_user_id);

        for (index, result) in (0u32..).zip(records) {
            let record = result.map_err(|source| Error::Record { index, source })?;
            debug!(
                "Record {}: {} user {} amount {}",
                index, record.kind, record.user_id, record.amount
            );
            state
                .fold(&record)
                .map_err(|source| Error::Aggregate { index, source })?;
        }

        Ok(Summary { header, state })
    }
}

impl Default for LogProcessor {
    fn default() -> Self {
        Self::new(DEFAULT_WATCH_USER_ID)
    }
}
