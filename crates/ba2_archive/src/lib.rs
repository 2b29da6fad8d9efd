//! This library handles reading and extracting **BA2** archives used by *Bethesda* games.
//!
//! # BA2 Archive Format Documentation
//!
//! A BA2 file bundles game assets into one file. It comes in two kinds that share a
//! header but lay their records out differently: `GNRL` archives hold flat files, and
//! `DX10` archives hold textures split into chunks of mip levels.
//!
//! ## File Structure
//!
//! A BA2 file consists of a header, the per-file records, the stored data and an
//! optional name table.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: "BTDX"                                            |
//! | 0x0004         | Version                | 4 bytes: 2 for `GNRL`, 3 for `DX10`                        |
//! | 0x0008         | Kind                   | 4 bytes: "GNRL" or "DX10"                                  |
//! | 0x000C         | File Count             | 4 bytes: Number of records in the archive                  |
//! | 0x0010         | Name Table Offset      | 8 bytes: Offset to the name table, 0 when absent           |
//! | 0x0018         | Reserved               | 8 bytes: Two fields of unknown meaning                     |
//!
//! `DX10` archives store one more reserved 4 byte field right after the header.
//!
//! ### General Records
//!
//! `GNRL` archives follow the header with `File Count` records of 36 bytes:
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Name Hash              | 4 bytes: Hash of the file name                          |
//! | 0x0004         | Extension              | 4 bytes: Extension padded with zeros                    |
//! | 0x0008         | Directory Hash         | 4 bytes: Hash of the directory                          |
//! | 0x000C         | Flags                  | 4 bytes: Unknown flags                                  |
//! | 0x0010         | Data Offset            | 8 bytes: Offset of the data from the start of the file  |
//! | 0x0018         | Packed Size            | 4 bytes: Stored size, 0 when not compressed             |
//! | 0x001C         | Unpacked Size          | 4 bytes: Size of the data once extracted                |
//! | 0x0020         | Alignment              | 4 bytes: Usually 0xBAADF00D                             |
//!
//! ### Texture Records
//!
//! `DX10` archives follow the reserved field with `File Count` texture records, each a
//! 24 byte header followed by `Chunk Count` chunk entries of 24 bytes.
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Name Hash              | 4 bytes: Hash of the file name                          |
//! | 0x0004         | Extension              | 4 bytes: Extension padded with zeros                    |
//! | 0x0008         | Directory Hash         | 4 bytes: Hash of the directory                          |
//! | 0x000C         | Unknown                | 1 byte                                                  |
//! | 0x000D         | Chunk Count            | 1 byte: Number of chunk entries that follow             |
//! | 0x000E         | Header Length          | 2 bytes: Length of a chunk entry                        |
//! | 0x0010         | Height                 | 2 bytes: Height in pixels                               |
//! | 0x0012         | Width                  | 2 bytes: Width in pixels                                |
//! | 0x0014         | Mip Count              | 1 byte: Number of mip levels                            |
//! | 0x0015         | Format                 | 1 byte: DXGI pixel format                               |
//! | 0x0016         | Cubemap                | 1 byte: Non-zero for cubemaps                           |
//! | 0x0017         | Tiling                 | 1 byte: Tiling mode                                     |
//!
//! Chunk entries:
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Data Offset            | 8 bytes: Offset of the chunk from the start of the file |
//! | 0x0008         | Packed Size            | 4 bytes: Stored size, 0 when not compressed             |
//! | 0x000C         | Unpacked Size          | 4 bytes: Size of the chunk once extracted               |
//! | 0x0010         | First Mip              | 2 bytes: First mip level in the chunk                   |
//! | 0x0012         | Last Mip               | 2 bytes: Last mip level in the chunk                    |
//! | 0x0014         | Alignment              | 4 bytes: Alignment marker                               |
//!
//! ### Name Table
//!
//! When the name table offset is non-zero, the table holds one entry per record in the
//! same order: a 2 byte length followed by that many bytes of the path. Paths use `\`
//! as separator and are decoded one byte per character.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.ba2`
//! - **Endianness**: Little-endian for all multi-byte integers
//! - **Compression**: data whose packed size is neither 0 nor equal to its unpacked size
//!   is a zlib stream
//!

pub mod compression;
pub mod cursor;
pub mod entry;
pub mod error;
pub mod extract;
pub mod read;
pub mod texture;
pub mod types;

pub use compression::CompressionMethod;
pub use entry::{Ba2File, GeneralFile, Records, TextureFile};
pub use extract::{ExtractOptions, ExtractSummary};
pub use read::Ba2Archive;
pub use texture::{ChunkData, TextureAssembler};
pub use types::ContainerKind;
