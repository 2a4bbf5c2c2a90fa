//! # MPS7 Decoder
//!
//! A single-pass decoder for MPS7 binary transaction logs that folds every
//! record into exact summary totals.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: amounts are truncated to integer cents at decode time
//! - **Streaming processing**: records are decoded one at a time and never retained
//! - **Fail fast**: any decode error or overflowing total aborts the pass; partial totals are never returned
//! - **Exact layout**: the record tag decides how many bytes belong to each record
//!
//! ## Example
//!
//! ```no_run
//! use mps7::{report, LogProcessor, ReportFormat, DEFAULT_WATCH_USER_ID};
//! use std::fs::File;
//! use std::io::BufReader;
//!
//! let file = BufReader::new(File::open("txnlog.dat").unwrap());
//! let summary = LogProcessor::new(DEFAULT_WATCH_USER_ID).process(file).unwrap();
//! report::write_report(&summary.state, ReportFormat::Text, std::io::stdout()).unwrap();
//! ```

pub mod aggregate;
pub mod cents;
pub mod cursor;
pub mod engine;
pub mod error;
pub mod header;
pub mod record;
pub mod report;

pub use aggregate::{AggregateState, DEFAULT_WATCH_USER_ID};
pub use cents::{Cents, ParseCentsError};
pub use cursor::ByteCursor;
pub use engine::{LogProcessor, Records, Summary};
pub use error::{AggregateError, DecodeError, Error, Result};
pub use header::{decode_header, Header};
pub use record::{decode_record, Record, RecordKind};
pub use report::ReportFormat;
