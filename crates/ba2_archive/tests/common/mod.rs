#![allow(dead_code)]

use binrw::BinWrite;
use flate2::{write::ZlibEncoder, Compression};
use std::io::{Cursor, Write};

use ba2_archive::types::{
    Ba2Header, ChunkEntry, ContainerKind, Extension, GeneralEntry, TextureEntry,
};

pub const ALIGNMENT: u32 = 0xBAAD_F00D;

pub fn zlib(data: &[u8]) -> Vec<u8> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

/// A file to place in a synthetic `GNRL` archive
pub struct StoredFile {
    pub name: String,
    pub extension: &'static str,
    pub content: Vec<u8>,
    pub compressed: bool,
}

impl StoredFile {
    pub fn raw(name: &str, content: &[u8]) -> Self {
        Self {
            name: name.to_owned(),
            extension: extension_of(name),
            content: content.to_vec(),
            compressed: false,
        }
    }

    pub fn zlib(name: &str, content: &[u8]) -> Self {
        Self {
            compressed: true,
            ..Self::raw(name, content)
        }
    }
}

/// A chunk to place in a synthetic `DX10` archive
pub struct StoredChunk {
    pub content: Vec<u8>,
    pub compressed: bool,
    pub mips: (u16, u16),
}

/// A texture to place in a synthetic `DX10` archive
pub struct StoredTexture {
    pub name: String,
    pub width: u16,
    pub height: u16,
    pub mip_count: u8,
    pub chunks: Vec<StoredChunk>,
}

fn extension_of(name: &str) -> &'static str {
    match name.rsplit_once('.').map(|(_, ext)| ext) {
        Some("txt") => "txt",
        Some("nif") => "nif",
        Some("dds") => "dds",
        Some("bin") => "bin",
        _ => "",
    }
}

fn stored(content: &[u8], compressed: bool) -> (Vec<u8>, u32) {
    if compressed {
        let packed = zlib(content);
        let len = packed.len() as u32;
        (packed, len)
    } else {
        (content.to_vec(), 0)
    }
}

fn write_names<'a>(out: &mut Vec<u8>, names: impl Iterator<Item = &'a str>) {
    for name in names {
        let raw: Vec<u8> = name.chars().map(|c| c as u32 as u8).collect();
        out.extend_from_slice(&(raw.len() as u16).to_le_bytes());
        out.extend_from_slice(&raw);
    }
}

/// Lay out a `GNRL` archive: header, records, data, then the name table
pub fn general_archive(files: &[StoredFile], name_table: bool) -> Vec<u8> {
    let records_end = 32 + 36 * files.len() as u64;

    let mut data = Vec::new();
    let mut entries = Vec::new();
    for (i, file) in files.iter().enumerate() {
        let (bytes, packed_size) = stored(&file.content, file.compressed);
        entries.push(GeneralEntry {
            name_hash: 0x100 + i as u32,
            extension: Extension::from(file.extension),
            dir_hash: 0x200 + i as u32,
            flags: 0,
            offset: records_end + data.len() as u64,
            packed_size,
            unpacked_size: file.content.len() as u32,
            alignment: ALIGNMENT,
        });
        data.extend_from_slice(&bytes);
    }

    let header = Ba2Header {
        file_count: files.len() as u32,
        name_table_offset: if name_table {
            records_end + data.len() as u64
        } else {
            0
        },
        ..Default::default()
    };

    let mut out = Cursor::new(Vec::new());
    header.write(&mut out).unwrap();
    for entry in &entries {
        entry.write(&mut out).unwrap();
    }
    let mut out = out.into_inner();
    out.extend_from_slice(&data);
    if name_table {
        write_names(&mut out, files.iter().map(|f| f.name.as_str()));
    }
    out
}

/// Lay out a `DX10` archive: header, reserved field, records with their chunks, data,
/// then the name table
pub fn texture_archive(textures: &[StoredTexture], name_table: bool) -> Vec<u8> {
    let records_len: u64 = textures
        .iter()
        .map(|t| 24 + 24 * t.chunks.len() as u64)
        .sum();
    let records_end = 32 + 4 + records_len;

    let mut data = Vec::new();
    let mut records = Cursor::new(Vec::new());
    for (i, texture) in textures.iter().enumerate() {
        TextureEntry {
            name_hash: 0x300 + i as u32,
            extension: Extension::from("dds"),
            dir_hash: 0x400 + i as u32,
            unknown: 0,
            chunk_count: texture.chunks.len() as u8,
            header_len: 24,
            height: texture.height,
            width: texture.width,
            mip_count: texture.mip_count,
            format: 0x47,
            cubemap: 0,
            tiling: 8,
        }
        .write(&mut records)
        .unwrap();

        for chunk in &texture.chunks {
            let (bytes, packed_size) = stored(&chunk.content, chunk.compressed);
            ChunkEntry {
                offset: records_end + data.len() as u64,
                packed_size,
                unpacked_size: chunk.content.len() as u32,
                mip_first: chunk.mips.0,
                mip_last: chunk.mips.1,
                alignment: ALIGNMENT,
            }
            .write(&mut records)
            .unwrap();
            data.extend_from_slice(&bytes);
        }
    }

    let header = Ba2Header {
        version: ContainerKind::Texture.required_version(),
        kind: ContainerKind::Texture.tag(),
        file_count: textures.len() as u32,
        name_table_offset: if name_table {
            records_end + data.len() as u64
        } else {
            0
        },
        ..Default::default()
    };

    let mut out = Cursor::new(Vec::new());
    header.write(&mut out).unwrap();
    let mut out = out.into_inner();
    out.extend_from_slice(&0xCAFE_u32.to_le_bytes());
    out.extend_from_slice(&records.into_inner());
    out.extend_from_slice(&data);
    if name_table {
        write_names(&mut out, textures.iter().map(|t| t.name.as_str()));
    }
    out
}

/// Overwrite a little endian `u32` inside an archive
pub fn patch_u32(archive: &mut [u8], offset: usize, value: u32) {
    archive[offset..offset + 4].copy_from_slice(&value.to_le_bytes());
}

/// Offset of the unpacked size field of general record `index`
pub fn unpacked_size_offset(index: usize) -> usize {
    32 + 36 * index + 28
}
