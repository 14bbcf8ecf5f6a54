// src/services/byte_cursor.rs

use super::errors::TlsParserError;
use byteorder::{BigEndian, ReadBytesExt};
use std::io::Cursor;

/// Forward-only reader over a borrowed buffer.
///
/// Two read disciplines share the same cursor: `get_bytes`/`read_int` fail on a short
/// read and leave the position untouched, while `take`/`try_read_int` hand back whatever
/// is available and never fail. Cloning gives a second reader over the same bytes with
/// its own position.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    inner: Cursor<&'a [u8]>,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        ByteCursor {
            inner: Cursor::new(data),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.get_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn position(&self) -> usize {
        self.inner.position() as usize
    }

    pub fn remaining(&self) -> usize {
        self.len().saturating_sub(self.position())
    }

    pub fn has_more(&self) -> bool {
        self.position() < self.len()
    }

    /// Force the position. Values past the end are clamped to the end.
    pub fn move_to(&mut self, position: usize) {
        let clamped = position.min(self.len());
        self.inner.set_position(clamped as u64);
    }

    /// Next `n` bytes, or `Incomplete` if fewer remain.
    pub fn get_bytes(&mut self, n: usize) -> Result<&'a [u8], TlsParserError> {
        let available = self.remaining();
        if available < n {
            return Err(TlsParserError::Incomplete {
                expected: n,
                actual: available,
            });
        }
        Ok(self.advance(n))
    }

    /// Big-endian unsigned integer of width `n` (1..=4), or `Incomplete`.
    pub fn read_int(&mut self, n: usize) -> Result<u32, TlsParserError> {
        debug_assert!((1..=4).contains(&n), "integer width out of range: {}", n);
        let available = self.remaining();
        if available < n {
            return Err(TlsParserError::Incomplete {
                expected: n,
                actual: available,
            });
        }
        self.inner
            .read_uint::<BigEndian>(n)
            .map(|v| v as u32)
            .map_err(|_| TlsParserError::Incomplete {
                expected: n,
                actual: available,
            })
    }

    /// Up to `n` bytes; fewer when the buffer runs out.
    pub fn take(&mut self, n: usize) -> &'a [u8] {
        let n = n.min(self.remaining());
        self.advance(n)
    }

    /// Lenient integer read. A short read consumes the tail and yields `None`.
    pub fn try_read_int(&mut self, n: usize) -> Option<u32> {
        match self.read_int(n) {
            Ok(v) => Some(v),
            Err(_) => {
                self.move_to(self.len());
                None
            }
        }
    }

    /// Unread tail of the buffer, without advancing.
    pub fn rest(&self) -> &'a [u8] {
        let data: &'a [u8] = *self.inner.get_ref();
        &data[self.position()..]
    }

    fn advance(&mut self, n: usize) -> &'a [u8] {
        let start = self.position();
        let data: &'a [u8] = *self.inner.get_ref();
        let bytes = &data[start..start + n];
        self.inner.set_position((start + n) as u64);
        bytes
    }
}
