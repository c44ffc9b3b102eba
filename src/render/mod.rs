//! Rendering module for retint.
//!
//! Everything that produces image or theme artifacts beyond text
//! substitution: rasterized assets, tinted wallpapers and the dock theme.

mod assets;
mod dock;
mod raster;
mod wallpaper;

pub use assets::{regenerate_assets, AssetReport, DENSITY_SUFFIX};
pub use dock::{write_dock_theme, DockColour, DockTheme, DOCK_THEME_FILENAME};
pub use raster::{run_tool, ExternalRasterizer, RasterTool, Rasterizer};
pub use wallpaper::{generate_wallpapers, Tint};

#[cfg(test)]
pub(crate) use assets::tests::{seed_asset, FakeRasterizer};
