//! Access to the chunks of `DX10` texture records
//!
//! Turning chunks back into an image depends on the pixel format, tiling and
//! layout the caller wants, so this crate stops at decoded chunks. Implement
//! [`TextureAssembler`] to build an image from them.

use std::io::SeekFrom;
use tracing::{debug, instrument};

use crate::compression::unpack;
use crate::entry::{Ba2File, TextureFile};
use crate::error::{Error, FileNotFoundError, Result, Stage, StageContext};
use crate::read::Ba2Archive;
use crate::types::{ChunkEntry, ContainerKind};

/// The decoded data of one chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkData {
    /// Position of the chunk inside its texture record
    pub index: usize,

    /// The chunk entry as stored on disk
    pub entry: ChunkEntry,

    /// Decompressed data, exactly `entry.unpacked_size` bytes
    pub data: Vec<u8>,
}

/// Builds something usable out of a texture and its decoded chunks
pub trait TextureAssembler {
    /// What the assembler produces
    type Output;

    /// Called with every chunk of `texture`, in declaration order
    fn assemble(&mut self, texture: &TextureFile, chunks: Vec<ChunkData>) -> Result<Self::Output>;
}

impl Ba2Archive {
    /// Get a texture record by index
    pub fn texture(&self, index: usize) -> Result<&TextureFile> {
        match self.by_index(index)? {
            Ba2File::Texture(texture) => Ok(texture),
            Ba2File::General(_) => Err(Error::WrongKind {
                index,
                expected: ContainerKind::Texture,
            }),
        }
    }

    fn chunk_entry(&self, record: usize, chunk: usize) -> Result<&ChunkEntry> {
        self.texture(record)?
            .chunks
            .get(chunk)
            .ok_or(Error::FileNotFound(FileNotFoundError::Chunk { record, chunk }))
    }

    /// The bytes of a chunk as stored in the archive
    pub fn chunk_data(&self, record: usize, chunk: usize) -> Result<&[u8]> {
        let entry = self.chunk_entry(record, chunk)?;
        let stage = Stage::Chunk { record, chunk };

        let mut cursor = self.cursor();
        cursor.seek(SeekFrom::Start(entry.offset)).at(stage)?;
        cursor.read(entry.stored_size() as usize).at(stage)
    }

    /// The bytes of a chunk, decompressed and checked against its declared size
    #[instrument(skip(self), err)]
    pub fn read_chunk(&self, record: usize, chunk: usize) -> Result<Vec<u8>> {
        let entry = self.chunk_entry(record, chunk)?;
        let stored = self.chunk_data(record, chunk)?;

        let data = unpack(stored, entry.compression_method(), entry.unpacked_size as u64)
            .at(Stage::Chunk { record, chunk })?;
        debug!(
            record,
            chunk,
            mips = ?entry.mip_range(),
            unpacked = entry.unpacked_size,
            "read chunk"
        );
        Ok(data)
    }

    /// Decode every chunk of a texture record
    pub fn read_chunks(&self, record: usize) -> Result<Vec<ChunkData>> {
        self.texture(record)?
            .chunks
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                Ok(ChunkData {
                    index,
                    entry: *entry,
                    data: self.read_chunk(record, index)?,
                })
            })
            .collect()
    }

    /// Decode every chunk of a texture record and hand them to `assembler`
    pub fn assemble_texture<A: TextureAssembler>(
        &self,
        record: usize,
        assembler: &mut A,
    ) -> Result<A::Output> {
        let texture = self.texture(record)?;
        let chunks = self.read_chunks(record)?;
        assembler.assemble(texture, chunks)
    }
}
