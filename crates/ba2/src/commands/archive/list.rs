use ba2_archive::{Ba2Archive, Ba2File};
use clap::Args;
use miette::{Context, Result};
use owo_colors::{OwoColorize, Stream::Stdout};
use std::path::PathBuf;

#[derive(Args)]
pub struct ListArgs {
    /// An input BA2 file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// Also print the chunks of texture records
    #[arg(long, default_value_t = false)]
    chunks: bool,
}

impl ListArgs {
    pub fn handle(&self) -> Result<()> {
        let ba2 = Ba2Archive::open(&self.file)
            .context(format!("path: {}", &self.file.display()))?;

        for (index, file) in ba2.records().iter().enumerate() {
            let name = match file.name() {
                "" => "<unnamed>",
                name => name,
            };

            println!(
                "{:>6} {:>12} {:>12} {}",
                index,
                file.stored_size(),
                file.size(),
                name.if_supports_color(Stdout, |t| t.green())
            );

            if let (true, Ba2File::Texture(texture)) = (self.chunks, file) {
                println!(
                    "{:>6} {}x{} mips={} format={:#04x} cubemap={} tiling={}",
                    "",
                    texture.entry.width,
                    texture.entry.height,
                    texture.entry.mip_count,
                    texture.entry.format,
                    texture.entry.cubemap,
                    texture.entry.tiling
                );
                for (i, chunk) in texture.chunks.iter().enumerate() {
                    println!(
                        "{:>6} chunk {i}: mips {}..={} at {:#x} ({} -> {} bytes)",
                        "",
                        chunk.mip_first,
                        chunk.mip_last,
                        chunk.offset,
                        chunk.stored_size(),
                        chunk.unpacked_size
                    );
                }
            }
        }

        Ok(())
    }
}
