//! Big-endian framing for the binary envelope.
//!
//! All lengths and counts on the wire are 4-byte signed big-endian integers.
//! Every read is bounds-checked; running past the end of the buffer is a
//! [`DecodeError::Truncated`], a negative length is a
//! [`DecodeError::SchemaMismatch`].

use crate::error::DecodeError;

/// Length/count prefix size.
pub const SIZEOF_LENGTH: usize = 4;

/// Append a 32-bit signed integer in big-endian.
#[inline]
pub fn put_i32(buf: &mut Vec<u8>, v: i32) {
    buf.extend_from_slice(&v.to_be_bytes());
}

/// Append a length-prefixed segment.
#[inline]
pub fn put_segment(buf: &mut Vec<u8>, payload: &[u8]) {
    put_i32(buf, payload.len() as i32);
    buf.extend_from_slice(payload);
}

/// Cursor over an encoded buffer.
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Reader { data, pos: 0 }
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether the cursor has consumed the whole buffer.
    pub fn is_empty(&self) -> bool {
        self.pos == self.data.len()
    }

    /// Read exactly `n` bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8], DecodeError> {
        if self.remaining() < n {
            return Err(DecodeError::Truncated {
                need: n,
                have: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read a 32-bit signed big-endian integer.
    pub fn read_i32(&mut self) -> Result<i32, DecodeError> {
        let b = self.read_bytes(SIZEOF_LENGTH)?;
        Ok(i32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Read one length-prefixed segment.
    pub fn read_segment(&mut self) -> Result<&'a [u8], DecodeError> {
        let len = self.read_i32()?;
        if len < 0 {
            return Err(DecodeError::SchemaMismatch(format!(
                "negative segment length {}",
                len
            )));
        }
        self.read_bytes(len as usize)
    }
}
