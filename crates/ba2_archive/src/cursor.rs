//! Bounds checked reading over an in-memory archive

use byteorder::{ByteOrder, LittleEndian};
use std::io::SeekFrom;

use crate::error::{Error, Result};
use crate::types::FixedSize;

/// A read-only cursor over a borrowed byte buffer
///
/// Every read and seek is checked against the buffer size. A failed operation
/// leaves the position untouched.
#[derive(Debug, Clone)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    position: u64,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at the start of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Current offset from the start of the buffer
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Total size of the buffer
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// Number of bytes between the current position and the end of the buffer
    pub fn remaining(&self) -> u64 {
        self.size() - self.position
    }

    /// Move the cursor, failing if the result falls outside of `[0, size]`
    pub fn seek(&mut self, pos: SeekFrom) -> Result<u64> {
        let size = self.size();
        let target = match pos {
            SeekFrom::Start(offset) => offset as i128,
            SeekFrom::Current(offset) => self.position as i128 + offset as i128,
            SeekFrom::End(offset) => size as i128 + offset as i128,
        };

        if target < 0 || target > size as i128 {
            return Err(Error::InvalidSeek { target, size });
        }

        self.position = target as u64;
        Ok(self.position)
    }

    /// Return the next `n` bytes and advance past them
    pub fn read(&mut self, n: usize) -> Result<&'a [u8]> {
        let requested = n as u64;
        if requested > self.remaining() {
            return Err(Error::OutOfBounds {
                position: self.position,
                requested,
                size: self.size(),
            });
        }

        let start = self.position as usize;
        self.position += requested;
        Ok(&self.data[start..start + n])
    }

    /// Read a little-endian `u16`
    pub fn read_u16(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.read(2)?))
    }

    /// Read a little-endian `u32`
    pub fn read_u32(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.read(4)?))
    }

    /// Read one of the fixed layout structures of the archive
    ///
    /// The whole structure is bounds checked before any field is decoded.
    pub fn read_struct<T: FixedSize>(&mut self) -> Result<T> {
        let bytes = self.read(T::SIZE)?;
        Ok(T::decode(bytes)?)
    }

    /// Borrow `len` bytes at `offset` without moving the cursor
    pub fn slice_at(&self, offset: u64, len: u64) -> Result<&'a [u8]> {
        let mut probe = self.clone();
        probe.seek(SeekFrom::Start(offset))?;
        let len = usize::try_from(len).map_err(|_| Error::OutOfBounds {
            position: offset,
            requested: len,
            size: self.size(),
        })?;
        probe.read(len)
    }
}
