use ba2_archive::{Ba2Archive, ExtractOptions};
use clap::Args;
use miette::{miette, Context, Result};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Args)]
pub struct ExtractArgs {
    /// An input BA2 file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    /// A target directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl ExtractArgs {
    pub fn handle(&self) -> Result<()> {
        let ba2 = Ba2Archive::open(&self.file)
            .context(format!("path: {}", &self.file.display()))?;

        let summary = ba2.extract_all(
            &self.directory,
            ExtractOptions::builder().overwrite(self.overwrite).build(),
        );

        for file in &summary.extracted {
            info!("wrote {}", file.path.display());
        }
        if !summary.skipped.is_empty() {
            info!(
                "skipped {} texture records, they have no single file form",
                summary.skipped.len()
            );
        }
        for failure in &summary.failed {
            error!("record {} ({}): {:?}", failure.index, failure.name, failure.error);
        }

        if !summary.is_success() {
            return Err(miette!(
                "{} of {} records failed to extract",
                summary.failed.len(),
                ba2.len()
            ));
        }
        Ok(())
    }
}
