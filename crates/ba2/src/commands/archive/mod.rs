pub mod extract;
pub mod info;
pub mod list;

#[derive(clap::Subcommand)]
pub enum ArchiveCommands {
    /// Print the header of a BA2 archive
    Info(info::InfoArgs),
    /// List the records of a BA2 archive
    List(list::ListArgs),
    /// Extract the files of a BA2 archive into a directory
    Extract(extract::ExtractArgs),
}

impl ArchiveCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            ArchiveCommands::Info(info) => info.handle(),
            ArchiveCommands::List(list) => list.handle(),
            ArchiveCommands::Extract(extract) => extract.handle(),
        }
    }
}
