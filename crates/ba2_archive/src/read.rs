//! Types for reading BA2 archives
//!

use indexmap::IndexMap;
use std::{
    fmt::{self, Debug},
    io::{Read, SeekFrom},
    path::Path,
    sync::Arc,
};
use tracing::{debug, info, instrument};

use crate::{
    cursor::ByteCursor,
    entry::{Ba2File, GeneralFile, Records, TextureFile},
    error::{Error, FileNotFoundError, Result, Stage, StageContext},
    types::{latin1, Ba2Header, ChunkEntry, ContainerKind, FixedSize, GeneralEntry, TextureEntry, MAGIC},
};

#[derive(Debug)]
pub(crate) struct Shared {
    header: Ba2Header,
    kind: ContainerKind,
    texture_reserved: Option<u32>,
    records: Records,
    names: IndexMap<Box<str>, usize>,
}

/// BA2 archive reader
///
/// The whole file is held in memory. Once loaded the archive is read only, so it
/// can be cloned cheaply and shared between threads.
///
/// ```no_run
/// fn list_ba2_contents(reader: impl std::io::Read) -> ba2_archive::error::Result<()> {
///     let ba2 = ba2_archive::Ba2Archive::new(reader)?;
///
///     for i in 0..ba2.len() {
///         let file = ba2.by_index(i)?;
///         println!("Filename: {} ({} bytes)", file.name(), file.size());
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Ba2Archive {
    data: Arc<[u8]>,
    shared: Arc<Shared>,
}

impl Debug for Ba2Archive {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Ba2Archive")
            .field("size", &self.data.len())
            .field("kind", &self.shared.kind)
            .field("records", &self.shared.records.len())
            .finish()
    }
}

impl Ba2Archive {
    /// Read a BA2 archive to the end and decode the files it contains.
    pub fn new(mut reader: impl Read) -> Result<Ba2Archive> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Load the BA2 archive at `path`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()), err)]
    pub fn open(path: impl AsRef<Path>) -> Result<Ba2Archive> {
        Self::from_bytes(std::fs::read(path)?)
    }

    /// Decode a BA2 archive already held in memory.
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Result<Ba2Archive> {
        let data: Vec<u8> = data.into();
        let data: Arc<[u8]> = data.into();
        let shared = Self::get_metadata(&data)?;

        Ok(Ba2Archive {
            data,
            shared: shared.into(),
        })
    }

    /// Number of records contained in this BA2.
    pub fn len(&self) -> usize {
        self.shared.records.len()
    }

    /// Whether this BA2 archive contains no records
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The header as read from the file
    pub fn header(&self) -> &Ba2Header {
        &self.shared.header
    }

    /// Which record layout this archive uses
    pub fn kind(&self) -> ContainerKind {
        self.shared.kind
    }

    /// Format version from the header
    pub fn version(&self) -> u32 {
        self.shared.header.version
    }

    /// The extra field following the header of `DX10` archives
    pub fn texture_reserved(&self) -> Option<u32> {
        self.shared.texture_reserved
    }

    /// Total size of the archive in bytes
    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }

    /// The raw bytes of the archive
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Every record in declaration order
    pub fn records(&self) -> &Records {
        &self.shared.records
    }

    /// Number of bytes from the start of the name table to the end of the file
    pub fn name_table_size(&self) -> Option<u64> {
        match self.shared.header.name_table_offset {
            0 => None,
            offset => Some(self.size().saturating_sub(offset)),
        }
    }

    /// Total size of the files in the archive once extracted, if it can be known.
    pub fn decompressed_size(&self) -> Option<u128> {
        let mut total = 0u128;
        for file in self.shared.records.iter() {
            total = total.checked_add(file.size() as u128)?;
        }
        Some(total)
    }

    /// Returns an iterator over the file names in declaration order.
    ///
    /// Names are empty when the archive has no name table.
    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.shared.records.iter().map(|f| f.name())
    }

    /// Get the index of a file entry by name, if it's present.
    ///
    /// When a name is stored more than once the first record wins.
    #[inline(always)]
    pub fn index_for_name(&self, name: &str) -> Option<usize> {
        self.shared.names.get(name).copied()
    }

    /// Get the name of a file entry, if it's present.
    #[inline(always)]
    pub fn name_for_index(&self, index: usize) -> Option<&str> {
        self.shared.records.get(index).map(|f| f.name())
    }

    /// Search for a file entry by name
    pub fn by_name(&self, name: &str) -> Result<Ba2File<'_>> {
        let Some(index) = self.index_for_name(name) else {
            return Err(Error::FileNotFound(FileNotFoundError::Name(
                name.to_owned(),
            )));
        };
        self.by_index(index)
    }

    /// Get a contained file by index
    pub fn by_index(&self, file_number: usize) -> Result<Ba2File<'_>> {
        self.shared
            .records
            .get(file_number)
            .ok_or(Error::FileNotFound(FileNotFoundError::Index(file_number)))
    }

    pub(crate) fn cursor(&self) -> ByteCursor<'_> {
        ByteCursor::new(&self.data)
    }

    fn get_header(cursor: &mut ByteCursor) -> Result<(Ba2Header, ContainerKind)> {
        let header: Ba2Header = cursor.read_struct()?;
        if header.magic != MAGIC {
            return Err(Error::InvalidMagic {
                expected: MAGIC,
                found: header.magic,
            });
        }

        let kind = ContainerKind::from_tag(header.kind)?;
        if header.version != kind.required_version() {
            return Err(Error::VersionMismatch {
                kind,
                expected: kind.required_version(),
                found: header.version,
            });
        }

        Ok((header, kind))
    }

    fn get_names(cursor: &mut ByteCursor, header: &Ba2Header) -> Result<Vec<String>> {
        cursor
            .seek(SeekFrom::Start(header.name_table_offset))
            .at(Stage::NameTable { index: 0 })?;

        (0..header.file_count as usize)
            .map(|index| {
                let len = cursor.read_u16().at(Stage::NameTable { index })?;
                let raw = cursor
                    .read(len as usize)
                    .at(Stage::NameTable { index })?;
                Ok(latin1(raw))
            })
            .collect()
    }

    fn get_general_records(
        cursor: &mut ByteCursor,
        header: &Ba2Header,
        names: &[String],
    ) -> Result<Vec<GeneralFile>> {
        (0..header.file_count as usize)
            .map(|index| {
                let entry: GeneralEntry = cursor.read_struct().at(Stage::Record { index })?;
                let file = GeneralFile {
                    name: names.get(index).cloned().unwrap_or_default(),
                    entry,
                };
                debug!(index, name = %file.name, ?entry, "read general record");
                Ok(file)
            })
            .collect()
    }

    fn get_texture_records(
        cursor: &mut ByteCursor,
        header: &Ba2Header,
        names: &[String],
    ) -> Result<Vec<TextureFile>> {
        let mut files = Vec::new();
        for index in 0..header.file_count as usize {
            let entry: TextureEntry = cursor.read_struct().at(Stage::Record { index })?;

            let start = cursor.position();
            let mut chunks: Vec<ChunkEntry> = Vec::with_capacity(entry.chunk_count as usize);
            for chunk in 0..entry.chunk_count as usize {
                let stage = Stage::Chunk {
                    record: index,
                    chunk,
                };
                chunks.push(cursor.read_struct().at(stage)?);
            }
            debug_assert_eq!(
                cursor.position() - start,
                entry.chunk_count as u64 * ChunkEntry::SIZE as u64
            );

            let file = TextureFile {
                name: names.get(index).cloned().unwrap_or_default(),
                entry,
                chunks,
            };
            debug!(index, name = %file.name, ?entry, chunks = file.chunks.len(), "read texture record");
            files.push(file);
        }
        Ok(files)
    }

    /// Every stored range must lie inside the archive
    fn check_ranges(cursor: &ByteCursor, records: &Records) -> Result<()> {
        match records {
            Records::General(files) => {
                for (index, file) in files.iter().enumerate() {
                    cursor
                        .slice_at(file.entry.offset, file.entry.stored_size())
                        .at(Stage::Record { index })?;
                }
            }
            Records::Texture(files) => {
                for (record, file) in files.iter().enumerate() {
                    for (chunk, entry) in file.chunks.iter().enumerate() {
                        cursor
                            .slice_at(entry.offset, entry.stored_size())
                            .at(Stage::Chunk { record, chunk })?;
                    }
                }
            }
        }
        Ok(())
    }

    #[instrument(skip_all, fields(size = data.len()), err)]
    fn get_metadata(data: &[u8]) -> Result<Shared> {
        let mut cursor = ByteCursor::new(data);
        let (header, kind) = Self::get_header(&mut cursor).at(Stage::Header)?;
        info!("loading {kind} archive of {} files", header.file_count);

        let records_start = cursor.position();
        let names = match header.name_table_offset {
            0 => Vec::new(),
            _ => Self::get_names(&mut cursor, &header)?,
        };
        cursor
            .seek(SeekFrom::Start(records_start))
            .at(Stage::Header)?;

        let (texture_reserved, records) = match kind {
            ContainerKind::General => (
                None,
                Records::General(Self::get_general_records(&mut cursor, &header, &names)?),
            ),
            ContainerKind::Texture => {
                let reserved = cursor.read_u32().at(Stage::Header)?;
                (
                    Some(reserved),
                    Records::Texture(Self::get_texture_records(&mut cursor, &header, &names)?),
                )
            }
        };

        Self::check_ranges(&cursor, &records)?;

        let mut index_map = IndexMap::with_capacity(names.len());
        for (index, name) in names.into_iter().enumerate() {
            index_map.entry(name.into_boxed_str()).or_insert(index);
        }

        Ok(Shared {
            header,
            kind,
            texture_reserved,
            records,
            names: index_map,
        })
    }
}
