//! olink-combine CLI
//!
//! Combines the per-lane Olink counts and meta files of one pool folder
//! into a single counts table and a single meta document.

use clap::Parser;
use olink_core::{
    combine_counts, combine_meta, discover_inputs, parse_counts, Error, MetaDocument,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "olink-combine")]
#[command(about = "Combine Olink counts files", long_about = None)]
#[command(version)]
struct Cli {
    /// The folder where the Olink counts files are located
    #[arg(short, long, default_value = ".")]
    folder: PathBuf,

    /// The combined counts file name
    #[arg(short, long, default_value = "olink_counts_total.csv")]
    counts: String,

    /// The combined meta file name
    #[arg(short, long, default_value = "olink_counts_total.json")]
    meta: String,

    /// Force overwriting of the output files if they exist
    #[arg(long)]
    force: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> olink_core::Result<()> {
    let cli = Cli::parse();

    let (counts_path, meta_path) = combine(&cli.folder, &cli.counts, &cli.meta, cli.force)?;

    println!(
        "Combined Olink counts file has been saved to {}",
        counts_path.display()
    );
    println!(
        "The updated meta file has been saved to {}",
        meta_path.display()
    );

    Ok(())
}

/// Run the whole combine operation for one folder
///
/// Returns the two written output paths. On failure nothing is left on
/// disk: the outputs are only written after both combiners have succeeded,
/// and a failed meta write removes the already-written counts file.
fn combine(
    folder: &Path,
    counts_name: &str,
    meta_name: &str,
    force: bool,
) -> olink_core::Result<(PathBuf, PathBuf)> {
    let counts_path = folder.join(counts_name);
    if counts_path.exists() && !force {
        return Err(Error::OutputExists(counts_path));
    }

    let meta_path = folder.join(meta_name);
    if meta_path.exists() && !force {
        return Err(Error::OutputExists(meta_path));
    }

    let inputs = discover_inputs(folder)?;

    let tables = inputs
        .counts_files
        .iter()
        .map(parse_counts)
        .collect::<olink_core::Result<Vec<_>>>()?;
    let docs = inputs
        .meta_files
        .iter()
        .map(MetaDocument::load)
        .collect::<olink_core::Result<Vec<_>>>()?;

    let combined_counts = combine_counts(tables)?;
    let combined_meta = combine_meta(docs, counts_name)?;

    combined_counts.save(&counts_path)?;
    if let Err(e) = combined_meta.save(&meta_path) {
        let _ = fs::remove_file(&counts_path);
        return Err(e);
    }

    Ok((counts_path, meta_path))
}
