//! Error types for the MPS7 decoder.

use thiserror::Error;

/// Result type alias for decoder operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised while pulling bytes out of an MPS7 stream.
///
/// Every variant is fatal to the current pass.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The source ran dry before the requested bytes were available
    #[error("input truncated at byte {offset}: needed {needed} more byte(s)")]
    Truncated { offset: u64, needed: usize },

    /// The first four bytes were not `MPS7`
    #[error("bad magic tag {found:?}, expected \"MPS7\"")]
    BadMagic { found: [u8; 4] },

    /// A record tag outside 0..=3
    #[error("unknown record type {tag} at byte {offset}")]
    UnknownRecordType { tag: u8, offset: u64 },

    /// The underlying source failed for a reason other than end of input
    #[error("I/O error while decoding: {0}")]
    Io(#[source] std::io::Error),
}

/// Failures raised while folding decoded records into totals.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// An accumulator would leave the `i64` cents range
    #[error("{field} overflowed")]
    Overflow { field: &'static str },

    /// Two partial states track different watch users
    #[error("cannot merge totals for watch user {found} into totals for watch user {expected}")]
    WatchUserMismatch { expected: u64, found: u64 },
}

/// Errors that can occur while running a full decode pass or the CLI around it.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to open the input or write the report
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV report writing error
    #[error("CSV writing error: {0}")]
    Csv(#[from] csv::Error),

    /// The file header could not be decoded
    #[error("invalid header: {0}")]
    Header(#[source] DecodeError),

    /// A record could not be decoded
    #[error("invalid record #{index}: {source}")]
    Record {
        index: u32,
        #[source]
        source: DecodeError,
    },

    /// A record decoded but could not be added to the totals
    #[error("record #{index} could not be totalled: {source}")]
    Aggregate {
        index: u32,
        #[source]
        source: AggregateError,
    },

    /// Missing input file argument
    #[error("Missing input file argument. Usage: mps7-report <txnlog.dat> [--csv] [--watch-user <id>]")]
    MissingArgument,

    /// A flag or environment value could not be parsed
    #[error("Invalid value {value:?} for {flag}")]
    InvalidArgument { flag: String, value: String },
}
