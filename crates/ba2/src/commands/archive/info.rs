use ba2_archive::Ba2Archive;
use clap::Args;
use miette::{Context, Result};
use owo_colors::{OwoColorize, Stream::Stdout};
use std::path::PathBuf;

#[derive(Args)]
pub struct InfoArgs {
    /// An input BA2 file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let ba2 = Ba2Archive::open(&self.file)
            .context(format!("path: {}", &self.file.display()))?;
        let header = ba2.header();

        let row = |label: &str, value: String| {
            println!(
                "{:<20} {}",
                label.if_supports_color(Stdout, |t| t.bold()),
                value
            );
        };

        row("kind", ba2.kind().to_string());
        row("version", ba2.version().to_string());
        row("files", ba2.len().to_string());
        row("size", ba2.size().to_string());
        row(
            "name table",
            match ba2.name_table_size() {
                Some(size) => format!("{size} bytes at {:#x}", header.name_table_offset),
                None => "none".to_owned(),
            },
        );
        row(
            "unpacked size",
            ba2.decompressed_size()
                .map_or_else(|| "unknown".to_owned(), |s| s.to_string()),
        );
        row(
            "reserved",
            format!("{:#010x} {:#010x}", header.reserved[0], header.reserved[1]),
        );
        if let Some(reserved) = ba2.texture_reserved() {
            row("texture reserved", format!("{reserved:#010x}"));
        }

        Ok(())
    }
}
