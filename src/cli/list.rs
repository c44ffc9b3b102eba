//! List command implementation.
//!
//! Prints the known sets per kind, marking the ones absent from the source
//! tree.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::catalog::{Catalog, SetKind};
use crate::error::Result;
use crate::output::Printer;

/// List known theme and icon sets
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Root of the source tree
    #[arg(long, short, default_value = ".")]
    pub source: PathBuf,

    /// Also list the wallpapers
    #[arg(long)]
    pub wallpapers: bool,
}

pub fn run(args: ListArgs, printer: &Printer) -> Result<()> {
    let (catalog, _) = Catalog::load(&args.source)?;

    for (label, kind) in [("Themes", SetKind::Theme), ("Icons", SetKind::Icons)] {
        let names: Vec<String> = inventory(&catalog, kind, &args.source)
            .into_iter()
            .map(|(name, present)| {
                if present {
                    name
                } else {
                    format!("{} {}", name, printer.dim("(missing)"))
                }
            })
            .collect();
        if !names.is_empty() {
            printer.info(label, &names.join(", "));
        }
    }

    if args.wallpapers {
        let files: Vec<String> = catalog
            .wallpapers()
            .iter()
            .map(|w| w.file.display().to_string())
            .collect();
        printer.info("Wallpapers", &files.join(", "));
    }

    Ok(())
}

/// Set names of `kind` and whether each exists under `source`.
fn inventory(catalog: &Catalog, kind: SetKind, source: &Path) -> Vec<(String, bool)> {
    let mut sets: Vec<(String, bool)> = catalog
        .sets_of(kind)
        .map(|s| (s.name(), s.source_dir(source).is_dir()))
        .collect();
    sets.sort();
    sets
}
