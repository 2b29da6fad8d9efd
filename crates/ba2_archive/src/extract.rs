//! Writing the files of an archive to disk

use bon::Builder;
use std::fs;
use std::io::{SeekFrom, Write};
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument, warn};

use crate::compression::unpack;
use crate::entry::Ba2File;
use crate::error::{Error, Result, Stage, StageContext};
use crate::read::Ba2Archive;

/// Options for how files should be written when extracting
#[derive(Debug, Clone, Copy, Builder)]
pub struct ExtractOptions {
    /// Replace files that already exist at the target path
    ///
    /// When disabled, extracting onto an existing file fails instead.
    #[builder(default = true)]
    pub overwrite: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// A file written by [`Ba2Archive::extract_all`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedFile {
    /// Position of the record in the archive
    pub index: usize,
    /// Where the file was written
    pub path: PathBuf,
}

/// A record [`Ba2Archive::extract_all`] could not write
#[derive(Debug)]
pub struct ExtractFailure {
    /// Position of the record in the archive
    pub index: usize,
    /// Stored name of the record
    pub name: String,
    /// Why it failed
    pub error: Error,
}

/// Outcome of extracting every record of an archive
#[derive(Debug, Default)]
pub struct ExtractSummary {
    /// Records written to disk
    pub extracted: Vec<ExtractedFile>,
    /// Records that failed, in archive order
    pub failed: Vec<ExtractFailure>,
    /// Texture records, which have no single file form
    pub skipped: Vec<usize>,
}

impl ExtractSummary {
    /// Whether every extractable record was written
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// The relative path a record is written to
///
/// Both `\` and `/` separate directories. Names that are absolute, carry a
/// drive prefix or step outside the root with `..` are rejected. A record
/// without a name is called `{index:08}_{name_hash:08x}` followed by its
/// extension.
pub fn output_path(file: Ba2File<'_>, index: usize) -> Result<PathBuf> {
    let name = file.name();
    if name.is_empty() {
        return Ok(PathBuf::from(fallback_name(file, index)));
    }

    let unsafe_path = || Error::UnsafePath {
        name: name.to_owned(),
    };

    if name.starts_with(['\\', '/']) || has_drive_prefix(name) {
        return Err(unsafe_path());
    }

    let mut path = PathBuf::new();
    for part in name.split(['\\', '/']).filter(|p| !p.is_empty()) {
        match Path::new(part).components().next() {
            Some(Component::Normal(_)) => path.push(part),
            Some(Component::CurDir) => {}
            _ => return Err(unsafe_path()),
        }
    }

    if path.as_os_str().is_empty() {
        return Err(unsafe_path());
    }

    Ok(path)
}

/// `C:` and the like
fn has_drive_prefix(name: &str) -> bool {
    matches!(name.as_bytes(), [letter, b':', ..] if letter.is_ascii_alphabetic())
}

fn fallback_name(file: Ba2File<'_>, index: usize) -> String {
    let extension = file.extension();
    if extension.is_empty() {
        format!("{index:08}_{:08x}", file.name_hash())
    } else {
        format!("{index:08}_{:08x}.{extension}", file.name_hash())
    }
}

impl Ba2Archive {
    /// Read the data of a general record, decompressed and checked against its declared size
    #[instrument(skip(self), err)]
    pub fn read_file(&self, index: usize) -> Result<Vec<u8>> {
        let file = match self.by_index(index)? {
            Ba2File::General(file) => file,
            Ba2File::Texture(_) => return Err(Error::TextureExtraction { index }),
        };
        let entry = &file.entry;
        let stage = Stage::Payload { index };

        let mut cursor = self.cursor();
        cursor.seek(SeekFrom::Start(entry.offset)).at(stage)?;
        let stored = cursor.read(entry.stored_size() as usize).at(stage)?;

        let data = unpack(stored, entry.compression_method(), entry.unpacked_size as u64).at(stage)?;
        debug!(
            index,
            name = %file.name,
            packed = entry.packed_size,
            unpacked = entry.unpacked_size,
            "read payload"
        );
        Ok(data)
    }

    /// Write one general record below `root`, returning the path written
    ///
    /// Missing directories are created.
    #[instrument(skip(self, root), fields(root = %root.as_ref().display()), err)]
    pub fn extract_to(
        &self,
        index: usize,
        root: impl AsRef<Path>,
        options: ExtractOptions,
    ) -> Result<PathBuf> {
        let file = self.by_index(index)?;
        if let Ba2File::Texture(_) = file {
            return Err(Error::TextureExtraction { index });
        }

        let path = root.as_ref().join(output_path(file, index)?);
        let data = self.read_file(index)?;

        let parent = path.parent().unwrap_or(root.as_ref());
        fs::create_dir_all(parent)?;

        // written next to the target and moved into place once complete
        let mut out = NamedTempFile::new_in(parent)?;
        out.write_all(&data)?;
        if options.overwrite {
            out.persist(&path).map_err(|e| e.error)?;
        } else {
            out.persist_noclobber(&path).map_err(|e| e.error)?;
        }

        debug!("wrote {}", path.display());
        Ok(path)
    }

    /// Write every general record below `root`
    ///
    /// A failing record does not stop the others, it is reported in the summary.
    #[instrument(skip(self, root), fields(root = %root.as_ref().display()))]
    pub fn extract_all(&self, root: impl AsRef<Path>, options: ExtractOptions) -> ExtractSummary {
        let root = root.as_ref();
        let mut summary = ExtractSummary::default();

        for (index, file) in self.records().iter().enumerate() {
            if let Ba2File::Texture(_) = file {
                summary.skipped.push(index);
                continue;
            }

            match self.extract_to(index, root, options) {
                Ok(path) => summary.extracted.push(ExtractedFile { index, path }),
                Err(error) => {
                    warn!(index, name = file.name(), "failed to extract: {error}");
                    summary.failed.push(ExtractFailure {
                        index,
                        name: file.name().to_owned(),
                        error,
                    });
                }
            }
        }

        info!(
            extracted = summary.extracted.len(),
            failed = summary.failed.len(),
            skipped = summary.skipped.len(),
            "extraction finished"
        );
        summary
    }
}
