//! Colour command implementation.
//!
//! Shows what a target colour turns into, either at the given lightness
//! offsets or across a set's whole substitution table.

use std::path::PathBuf;

use clap::Args;

use crate::catalog::{Catalog, SetKind};
use crate::error::Result;
use crate::types::ColourSpec;

/// Print colour variants or a set's substitution table
#[derive(Args, Debug)]
pub struct ColourArgs {
    /// Target colour (#RRGGBB)
    #[arg(value_name = "HEX")]
    pub colour: String,

    /// Lightness offset to apply (repeatable)
    #[arg(long, short, allow_negative_numbers = true)]
    pub offset: Vec<i32>,

    /// Print the substitution table of this set instead
    #[arg(long, conflicts_with = "offset")]
    pub set: Option<String>,

    /// Kind of set named by --set
    #[arg(long, short, value_enum, default_value_t = SetKind::Theme)]
    pub kind: SetKind,

    /// Root of the source tree (for retint.yaml)
    #[arg(long, short, default_value = ".")]
    pub source: PathBuf,
}

pub fn run(args: ColourArgs) -> Result<()> {
    for line in lines(&args)? {
        println!("{}", line);
    }
    Ok(())
}

fn lines(args: &ColourArgs) -> Result<Vec<String>> {
    let target = ColourSpec::from_hex(&args.colour)?;

    if let Some(name) = &args.set {
        let (catalog, _) = Catalog::load(&args.source)?;
        let set = catalog.get(args.kind, name)?;
        return Ok(set
            .colour_table(&target)?
            .into_iter()
            .zip(&set.colours)
            .map(|((from, to), entry)| {
                format!("{} -> {}  {:>4}", from, to, format!("{:+}", entry.offset))
            })
            .collect());
    }

    let offsets = if args.offset.is_empty() {
        vec![0]
    } else {
        args.offset.clone()
    };

    Ok(offsets
        .into_iter()
        .map(|offset| {
            let shifted = target.with_lightness_offset(offset);
            format!(
                "{:>4}  {}  {}",
                format!("{:+}", offset),
                shifted,
                shifted.colour().to_rgb_triple()
            )
        })
        .collect())
}
