//! Base types for structure of BA2 file.

use binrw::{BinRead, BinWrite};
use std::fmt;

use crate::compression::CompressionMethod;
use crate::error::{Error, Result};

/// Magic tag every BA2 file starts with
pub const MAGIC: [u8; 4] = *b"BTDX";

/// Size of [`Ba2Header`] on disk
pub const HEADER_SIZE: u64 = 32;

/// Decode bytes one byte per character, the way names and extensions are stored
pub(crate) fn latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| b as char).collect()
}

/// A structure with a fixed on-disk size
///
/// Lets the [`crate::cursor::ByteCursor`] bounds check the full structure before decoding.
pub trait FixedSize: Sized {
    /// Number of bytes the structure occupies
    const SIZE: usize;

    /// Decode the structure from exactly [`FixedSize::SIZE`] bytes
    fn decode(bytes: &[u8]) -> binrw::BinResult<Self>;
}

macro_rules! fixed_size {
    ($($ty:ty => $size:expr),* $(,)?) => {
        $(
            impl FixedSize for $ty {
                const SIZE: usize = $size;

                fn decode(bytes: &[u8]) -> binrw::BinResult<Self> {
                    <$ty>::read(&mut std::io::Cursor::new(bytes))
                }
            }
        )*
    };
}

fixed_size! {
    Ba2Header => 32,
    GeneralEntry => 36,
    TextureEntry => 24,
    ChunkEntry => 24,
}

/// Selects which record layout the archive uses
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// `GNRL`: flat files, one 36 byte record each
    General,

    /// `DX10`: textures split into chunks of mip levels
    Texture,
}

impl ContainerKind {
    /// Resolve the 4 byte tag from the header
    pub fn from_tag(tag: [u8; 4]) -> Result<Self> {
        match &tag {
            b"GNRL" => Ok(ContainerKind::General),
            b"DX10" => Ok(ContainerKind::Texture),
            _ => Err(Error::UnsupportedKind { found: tag }),
        }
    }

    /// The 4 byte tag stored in the header
    pub fn tag(&self) -> [u8; 4] {
        match self {
            ContainerKind::General => *b"GNRL",
            ContainerKind::Texture => *b"DX10",
        }
    }

    /// The only format version accepted for this kind
    pub fn required_version(&self) -> u32 {
        match self {
            ContainerKind::General => 2,
            ContainerKind::Texture => 3,
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&latin1(&self.tag()))
    }
}

/// BA2 file header
///
/// All fields are little endian. The magic, kind and version are stored as read;
/// [`crate::read::Ba2Archive`] validates them.
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct Ba2Header {
    /// Always `BTDX` for a valid archive
    pub magic: [u8; 4],

    /// Format version, tied to the container kind
    pub version: u32,

    /// Container kind tag, `GNRL` or `DX10`
    pub kind: [u8; 4],

    /// Number of records stored in the file
    pub file_count: u32,

    /// Absolute offset of the name table, 0 when there is none
    pub name_table_offset: u64,

    /// Two fields with unknown meaning, kept as read
    pub reserved: [u32; 2],
}

impl Default for Ba2Header {
    fn default() -> Self {
        Self {
            magic: MAGIC,
            version: ContainerKind::General.required_version(),
            kind: ContainerKind::General.tag(),
            file_count: 0,
            name_table_offset: 0,
            reserved: [0; 2],
        }
    }
}

/// A file extension stored as 4 bytes padded with zeros
#[derive(BinRead, BinWrite, Default, Copy, Clone, PartialEq, Eq, Hash)]
#[brw(little)]
pub struct Extension(pub [u8; 4]);

impl Extension {
    /// The extension with trailing padding removed
    pub fn as_bytes(&self) -> &[u8] {
        let end = self.0.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
        &self.0[..end]
    }

    /// Whether the extension is all padding
    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl From<&str> for Extension {
    fn from(value: &str) -> Self {
        let mut raw = [0u8; 4];
        value
            .bytes()
            .take(4)
            .enumerate()
            .for_each(|(i, b)| raw[i] = b);
        Extension(raw)
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&latin1(self.as_bytes()))
    }
}

impl fmt::Debug for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Extension({:?})", latin1(self.as_bytes()))
    }
}

/// `GNRL` record
///
/// Describes one flat file. A `packed_size` of 0 means the data is stored raw
/// and is `unpacked_size` bytes long.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct GeneralEntry {
    /// Hash of the file name
    pub name_hash: u32,

    /// File extension
    pub extension: Extension,

    /// Hash of the directory
    pub dir_hash: u32,

    /// Flags with unknown meaning
    pub flags: u32,

    /// Absolute offset of the data in the file
    pub offset: u64,

    /// Stored size, 0 when the data is not compressed
    pub packed_size: u32,

    /// Size of the data once extracted
    pub unpacked_size: u32,

    /// Alignment marker, usually `0xBAADF00D`
    pub alignment: u32,
}

impl GeneralEntry {
    /// Number of bytes the data occupies in the archive
    pub fn stored_size(&self) -> u64 {
        stored_size(self.packed_size, self.unpacked_size)
    }

    /// How the data was stored
    pub fn compression_method(&self) -> CompressionMethod {
        CompressionMethod::for_sizes(self.packed_size, self.unpacked_size)
    }
}

/// `DX10` record header
///
/// Followed on disk by `chunk_count` [`ChunkEntry`] values.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct TextureEntry {
    /// Hash of the file name
    pub name_hash: u32,

    /// File extension
    pub extension: Extension,

    /// Hash of the directory
    pub dir_hash: u32,

    /// Unknown byte
    pub unknown: u8,

    /// Number of chunk entries following this header
    pub chunk_count: u8,

    /// Length of the chunk header, usually 24
    pub header_len: u16,

    /// Height in pixels
    pub height: u16,

    /// Width in pixels
    pub width: u16,

    /// Number of mip levels
    pub mip_count: u8,

    /// DXGI pixel format code
    pub format: u8,

    /// Non-zero for cubemaps
    pub cubemap: u8,

    /// Tiling mode
    pub tiling: u8,
}

/// A range of mip levels belonging to a texture
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct ChunkEntry {
    /// Absolute offset of the chunk data
    pub offset: u64,

    /// Stored size, 0 when the data is not compressed
    pub packed_size: u32,

    /// Size of the chunk once extracted
    pub unpacked_size: u32,

    /// First mip level stored in this chunk
    pub mip_first: u16,

    /// Last mip level stored in this chunk
    pub mip_last: u16,

    /// Alignment marker
    pub alignment: u32,
}

impl ChunkEntry {
    /// Number of bytes the chunk occupies in the archive
    pub fn stored_size(&self) -> u64 {
        stored_size(self.packed_size, self.unpacked_size)
    }

    /// How the chunk was stored
    pub fn compression_method(&self) -> CompressionMethod {
        CompressionMethod::for_sizes(self.packed_size, self.unpacked_size)
    }

    /// The mip levels covered, inclusive
    pub fn mip_range(&self) -> std::ops::RangeInclusive<u16> {
        self.mip_first..=self.mip_last
    }
}

fn stored_size(packed: u32, unpacked: u32) -> u64 {
    if packed == 0 {
        unpacked as u64
    } else {
        packed as u64
    }
}
