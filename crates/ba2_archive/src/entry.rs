//! Decoded records of a BA2 archive

use crate::types::{ChunkEntry, ContainerKind, Extension, GeneralEntry, TextureEntry};

/// A flat file stored in a `GNRL` archive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneralFile {
    /// Name from the name table, empty when the archive has none
    pub name: String,

    /// The record as stored on disk
    pub entry: GeneralEntry,
}

/// A texture stored in a `DX10` archive
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextureFile {
    /// Name from the name table, empty when the archive has none
    pub name: String,

    /// The record header as stored on disk
    pub entry: TextureEntry,

    /// Chunks in the order they were declared, highest resolution first
    pub chunks: Vec<ChunkEntry>,
}

/// Every record of an archive
///
/// An archive only ever holds one layout, picked by the header's container kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Records {
    /// Records of a `GNRL` archive
    General(Vec<GeneralFile>),

    /// Records of a `DX10` archive
    Texture(Vec<TextureFile>),
}

impl Records {
    /// Number of records
    pub fn len(&self) -> usize {
        match self {
            Records::General(files) => files.len(),
            Records::Texture(files) => files.len(),
        }
    }

    /// Whether there are no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The container kind these records belong to
    pub fn kind(&self) -> ContainerKind {
        match self {
            Records::General(_) => ContainerKind::General,
            Records::Texture(_) => ContainerKind::Texture,
        }
    }

    /// Borrow a record by position
    pub fn get(&self, index: usize) -> Option<Ba2File<'_>> {
        match self {
            Records::General(files) => files.get(index).map(Ba2File::General),
            Records::Texture(files) => files.get(index).map(Ba2File::Texture),
        }
    }

    /// Iterate over the records in declaration order
    pub fn iter(&self) -> impl Iterator<Item = Ba2File<'_>> {
        (0..self.len()).filter_map(move |i| self.get(i))
    }
}

/// A borrowed record of either kind
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Ba2File<'a> {
    /// A flat file
    General(&'a GeneralFile),

    /// A texture
    Texture(&'a TextureFile),
}

impl<'a> Ba2File<'a> {
    /// Get the name of the file
    ///
    /// # Warnings
    ///
    /// It is dangerous to use this name directly when extracting an archive.
    /// It may contain an absolute path (`/etc/shadow`), or break out of the
    /// current directory (`..\runtime`). Use [`crate::extract::output_path`]
    /// which rejects such names.
    pub fn name(&self) -> &'a str {
        match *self {
            Ba2File::General(f) => &f.name,
            Ba2File::Texture(f) => &f.name,
        }
    }

    /// Hash of the file name
    pub fn name_hash(&self) -> u32 {
        match self {
            Ba2File::General(f) => f.entry.name_hash,
            Ba2File::Texture(f) => f.entry.name_hash,
        }
    }

    /// Hash of the directory
    pub fn dir_hash(&self) -> u32 {
        match self {
            Ba2File::General(f) => f.entry.dir_hash,
            Ba2File::Texture(f) => f.entry.dir_hash,
        }
    }

    /// File extension
    pub fn extension(&self) -> Extension {
        match self {
            Ba2File::General(f) => f.entry.extension,
            Ba2File::Texture(f) => f.entry.extension,
        }
    }

    /// Size in bytes once extracted, the sum of all chunks for a texture
    pub fn size(&self) -> u64 {
        match self {
            Ba2File::General(f) => f.entry.unpacked_size as u64,
            Ba2File::Texture(f) => f.chunks.iter().map(|c| c.unpacked_size as u64).sum(),
        }
    }

    /// Size in bytes in the archive, the sum of all chunks for a texture
    pub fn stored_size(&self) -> u64 {
        match self {
            Ba2File::General(f) => f.entry.stored_size(),
            Ba2File::Texture(f) => f.chunks.iter().map(|c| c.stored_size()).sum(),
        }
    }

    /// The container kind of the record
    pub fn kind(&self) -> ContainerKind {
        match self {
            Ba2File::General(_) => ContainerKind::General,
            Ba2File::Texture(_) => ContainerKind::Texture,
        }
    }
}
