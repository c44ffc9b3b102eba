//! retint - Recoloured theme and icon set generator
//!
//! A library for deriving accent-coloured copies of GTK themes and icon
//! sets: colours are shifted in HLS space, substituted through the theme
//! files, and the rasterized assets, wallpapers and dock theme that depend
//! on them are regenerated.

pub mod catalog;
pub mod cli;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod substitute;
pub mod types;

pub use catalog::{Catalog, ColourEntry, Manifest, SetKind, ThemeSet, WallpaperSpec};
pub use error::{Result, RetintError};
pub use pipeline::{run, InstallDirs, OverwritePolicy, RecolorConfig, RunSummary, Tweak};
pub use render::{ExternalRasterizer, RasterTool, Rasterizer};
pub use substitute::{
    substitute_tree, CompiledRules, FileFilter, SubstitutionReport, SubstitutionRule,
};
pub use types::{Colour, ColourSpec, Hls};
