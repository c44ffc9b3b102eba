//! Regeneration of rasterized theme assets.
//!
//! Each asset keeps its existing PNG as a size reference. The recoloured
//! SVG is exported at that size and again at twice the size as the `@2`
//! density variant.

use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::AssetGroup;
use crate::error::{Result, RetintError};
use crate::output::{display_path, Printer};

use super::Rasterizer;

/// Suffix of the high-DPI density variant.
pub const DENSITY_SUFFIX: &str = "@2";

/// Counts from one regeneration pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AssetReport {
    /// PNG files written by the rasterizer.
    pub rendered: usize,
    /// 1x outputs copied into the legacy directory.
    pub legacy_copies: usize,
}

/// Regenerate `group`'s assets inside the target tree `root`.
pub fn regenerate_assets(
    root: &Path,
    group: &AssetGroup,
    rasterizer: &dyn Rasterizer,
    printer: &Printer,
) -> Result<AssetReport> {
    let dir = root.join(&group.dir);
    let legacy_dir = match &group.legacy_dir {
        Some(d) if root.join(d).is_dir() => Some(root.join(d)),
        Some(d) => {
            printer.warning("Skipping", &format!("legacy copies, {} not found", d.display()));
            None
        }
        None => None,
    };

    let mut report = AssetReport::default();

    for asset in &group.assets {
        let svg = dir.join(format!("{}.svg", asset.name));
        let png = dir.join(format!("{}.png", asset.name));
        let png_hidpi = dir.join(format!("{}{}.png", asset.name, DENSITY_SUFFIX));

        if !svg.is_file() {
            return Err(RetintError::Build {
                message: format!("Missing vector source {}", display_path(&svg)),
                help: None,
            });
        }

        let (width, height) = reference_size(&png)?;

        rasterizer.rasterize(&svg, &png, width, height)?;
        rasterizer.rasterize(&svg, &png_hidpi, width * 2, height * 2)?;
        report.rendered += 2;
        printer.detail(
            "Rendered",
            &format!("{} ({}x{}, {}x{})", asset.name, width, height, width * 2, height * 2),
        );

        if let (true, Some(legacy_dir)) = (asset.legacy, &legacy_dir) {
            let copy: PathBuf = legacy_dir.join(format!("{}.png", asset.name));
            fs::copy(&png, &copy).map_err(|e| RetintError::Io {
                path: copy.clone(),
                message: format!("Failed to copy legacy asset: {}", e),
            })?;
            report.legacy_copies += 1;
        }
    }

    Ok(report)
}

/// Pixel size of an existing raster.
fn reference_size(path: &Path) -> Result<(u32, u32)> {
    image::image_dimensions(path).map_err(|e| RetintError::Build {
        message: format!("Cannot read reference raster {}: {}", display_path(path), e),
        help: Some(
            "Each regenerated asset needs an existing PNG to take its size from".to_string(),
        ),
    })
}
