//! Decompression of record and chunk data.

use std::io::{self, Read};

use flate2::read::ZlibDecoder;
use tracing::instrument;

use crate::error::{Error, Result};

/// Identifies how the data of a record or chunk is stored in the archive
///
/// BA2 records carry no explicit method, it follows from the two sizes: a packed
/// size of 0, or one equal to the unpacked size, means the data is stored as is.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum CompressionMethod {
    /// Stores the data as it is
    #[default]
    None,

    /// Data is a zlib stream
    Zlib,
}

impl CompressionMethod {
    /// Derive the method from a record's packed and unpacked sizes
    pub fn for_sizes(packed: u32, unpacked: u32) -> Self {
        if packed == 0 || packed == unpacked {
            CompressionMethod::None
        } else {
            CompressionMethod::Zlib
        }
    }
}

pub(crate) enum Ba2BlockReader<'a> {
    Raw(&'a [u8]),
    Compressed(Box<ZlibDecoder<&'a [u8]>>),
}

impl<'a> Ba2BlockReader<'a> {
    pub fn new(data: &'a [u8], compression: CompressionMethod) -> Self {
        match compression {
            CompressionMethod::None => Ba2BlockReader::Raw(data),
            CompressionMethod::Zlib => Ba2BlockReader::Compressed(Box::new(ZlibDecoder::new(data))),
        }
    }
}

impl Read for Ba2BlockReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Ba2BlockReader::Raw(r) => r.read(buf),
            Ba2BlockReader::Compressed(r) => r.read(buf),
        }
    }
}

/// Upper bound on the buffer reserved ahead of decoding, as a multiple of the stored size
const RESERVE_RATIO: u64 = 16;

/// Decode stored data, requiring the result to be exactly `expected` bytes long
///
/// Decoding stops one byte past `expected`, so a stream that inflates to more
/// than it declares is rejected without being inflated in full.
#[instrument(skip(data), fields(stored = data.len()), err)]
pub(crate) fn unpack(data: &[u8], compression: CompressionMethod, expected: u64) -> Result<Vec<u8>> {
    let reserve = expected.min((data.len() as u64).saturating_mul(RESERVE_RATIO));
    let mut out = Vec::with_capacity(usize::try_from(reserve).unwrap_or(0));
    Ba2BlockReader::new(data, compression)
        .take(expected.saturating_add(1))
        .read_to_end(&mut out)?;

    if out.len() as u64 != expected {
        return Err(Error::SizeMismatch {
            expected,
            found: out.len() as u64,
        });
    }

    Ok(out)
}
