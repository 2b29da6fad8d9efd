//! Error types that can be emitted from this library

use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// The part of an archive that was being decoded when an error occurred
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Stage {
    /// The fixed 32 byte header, including the texture reserved field
    Header,

    /// An entry of the name table
    NameTable {
        /// Position of the entry in the table
        index: usize,
    },

    /// A per-file record
    Record {
        /// Position of the record in the archive
        index: usize,
    },

    /// A chunk entry nested inside a texture record
    Chunk {
        /// Position of the owning texture record
        record: usize,
        /// Position of the chunk inside that record
        chunk: usize,
    },

    /// The stored data of a record
    Payload {
        /// Position of the record in the archive
        index: usize,
    },
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Header => write!(f, "header"),
            Stage::NameTable { index } => write!(f, "name table entry {index}"),
            Stage::Record { index } => write!(f, "record {index}"),
            Stage::Chunk { record, chunk } => write!(f, "chunk {chunk} of record {record}"),
            Stage::Payload { index } => write!(f, "payload of record {index}"),
        }
    }
}

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent warpper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent warpper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// An error tagged with the decoding stage it happened in
    #[error("failed to decode {stage}")]
    Decode {
        /// Where the failure happened
        stage: Stage,
        /// What went wrong
        #[source]
        source: Box<Error>,
    },

    /// The magic tag at the start of the file is not `BTDX`
    #[error("invalid magic: expected {:?}, found {:?}", String::from_utf8_lossy(.expected), String::from_utf8_lossy(.found))]
    #[diagnostic(help("this file is not a BA2 archive"))]
    InvalidMagic {
        /// Required tag
        expected: [u8; 4],
        /// Tag read from the file
        found: [u8; 4],
    },

    /// The container kind tag is not one of the recognized values
    #[error("unsupported container kind {:?}", String::from_utf8_lossy(.found))]
    #[diagnostic(help("supported kinds are \"GNRL\" and \"DX10\""))]
    UnsupportedKind {
        /// Tag read from the file
        found: [u8; 4],
    },

    /// The format version does not match the one required by the container kind
    #[error("{kind} archives require version {expected}, found {found}")]
    VersionMismatch {
        /// The container kind named by the header
        kind: crate::types::ContainerKind,
        /// Version required by that kind
        expected: u32,
        /// Version read from the file
        found: u32,
    },

    /// A read would run past the end of the buffer
    #[error("reading {requested} bytes at offset {position} exceeds the archive size of {size} bytes")]
    OutOfBounds {
        /// Offset the read started at
        position: u64,
        /// Number of bytes requested
        requested: u64,
        /// Total size of the buffer
        size: u64,
    },

    /// A seek would land outside of the buffer
    #[error("seek to offset {target} is outside of the archive size of {size} bytes")]
    InvalidSeek {
        /// Resulting offset of the seek
        target: i128,
        /// Total size of the buffer
        size: u64,
    },

    /// Decompressed data does not have the declared length
    #[error("expected {expected} bytes after decompression, found {found}")]
    SizeMismatch {
        /// Declared unpacked size
        expected: u64,
        /// Length actually produced
        found: u64,
    },

    /// A stored name would write outside of the extraction directory
    #[error("refusing to extract to unsafe path {name:?}")]
    UnsafePath {
        /// The stored name
        name: String,
    },

    /// Texture records only expose their chunks and can not be written as a single file
    #[error("record {index} is a texture and can not be extracted as a file")]
    #[diagnostic(help("use `Ba2Archive::read_chunk` or a `TextureAssembler` instead"))]
    TextureExtraction {
        /// Position of the record in the archive
        index: usize,
    },

    /// The requested record is not an entry of the requested kind
    #[error("record {index} is not a {expected} record")]
    WrongKind {
        /// Position of the record in the archive
        index: usize,
        /// The kind the caller asked for
        expected: crate::types::ContainerKind,
    },

    /// unable to find requested file
    #[error("unable to find requested file")]
    FileNotFound(#[from] FileNotFoundError),
}

impl Error {
    /// Wrap this error with the stage it happened in
    pub fn at(self, stage: Stage) -> Error {
        Error::Decode {
            stage,
            source: Box::new(self),
        }
    }

    /// The innermost error, with every [`Error::Decode`] layer removed
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::Decode { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// The outermost stage this error was tagged with, if any
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::Decode { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Error type to provide further information when a file has not been found
#[derive(Error, Diagnostic, Debug)]
pub enum FileNotFoundError {
    /// at index {0}
    #[error("at index {0}")]
    Index(usize),

    /// by name {0}
    #[error("by name {0}")]
    Name(String),

    /// chunk {chunk} of record {record}
    #[error("chunk {chunk} of record {record}")]
    Chunk {
        /// Position of the texture record
        record: usize,
        /// Position of the missing chunk
        chunk: usize,
    },
}

/// Attach a [`Stage`] to the error side of a result
pub(crate) trait StageContext<T> {
    fn at(self, stage: Stage) -> Result<T>;
}

impl<T, E: Into<Error>> StageContext<T> for core::result::Result<T, E> {
    fn at(self, stage: Stage) -> Result<T> {
        self.map_err(|e| Into::<Error>::into(e).at(stage))
    }
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
