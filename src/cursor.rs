//! Sequential byte cursor over any `Read` source.

use crate::error::DecodeError;
use std::io::{ErrorKind, Read};

/// Forward-only reader that hands out exactly the requested number of bytes.
///
/// Short reads from the underlying source are retried until the request is
/// satisfied; running out of input is reported as [`DecodeError::Truncated`]
/// and never as a partial buffer.
pub struct ByteCursor<R> {
    inner: R,
    position: u64,
}

impl<R: Read> ByteCursor<R> {
    /// Wraps a byte source positioned at its first byte.
    pub fn new(inner: R) -> Self {
        ByteCursor { inner, position: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Reads exactly `N` bytes.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut buf = [0u8; N];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    /// Reads exactly `n` bytes into a fresh buffer.
    pub fn read(&mut self, n: usize) -> Result<Vec<u8>, DecodeError> {
        let mut buf = vec![0u8; n];
        self.fill(&mut buf)?;
        Ok(buf)
    }

    pub fn read_u8(&mut self) -> Result<u8, DecodeError> {
        let [b] = self.read_array::<1>()?;
        Ok(b)
    }

    pub fn read_u32_be(&mut self) -> Result<u32, DecodeError> {
        Ok(u32::from_be_bytes(self.read_array()?))
    }

    pub fn read_u64_be(&mut self) -> Result<u64, DecodeError> {
        Ok(u64::from_be_bytes(self.read_array()?))
    }

    pub fn read_f64_be(&mut self) -> Result<f64, DecodeError> {
        Ok(f64::from_bits(self.read_u64_be()?))
    }

    fn fill(&mut self, buf: &mut [u8]) -> Result<(), DecodeError> {
        // read_exact loops over short reads and Interrupted
        match self.inner.read_exact(buf) {
            Ok(()) => {
                self.position += buf.len() as u64;
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => Err(DecodeError::Truncated {
                offset: self.position,
                needed: buf.len(),
            }),
            Err(e) => Err(DecodeError::Io(e)),
        }
    }
}
