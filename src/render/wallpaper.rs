//! Wallpaper tinting.
//!
//! Grayscale wallpapers are recoloured by mapping each pixel's luminance
//! onto the target colour's hue and saturation. Mid-gray lands on the
//! target's own lightness; black and white stay put.

use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgba, RgbaImage};
use palette::{Hsl, IntoColor, Srgb};

use crate::catalog::WallpaperSpec;
use crate::error::{Result, RetintError};
use crate::output::{display_path, Printer};
use crate::types::Colour;

/// Luminance-to-colour lookup table for one target colour.
#[derive(Debug, Clone)]
pub struct Tint {
    table: [[u8; 3]; 256],
}

impl Tint {
    pub fn new(target: Colour) -> Self {
        let rgb: Srgb<f32> = Srgb::new(
            target.r as f32 / 255.0,
            target.g as f32 / 255.0,
            target.b as f32 / 255.0,
        );
        let hsl: Hsl = rgb.into_color();

        let mut table = [[0u8; 3]; 256];
        for (luma, entry) in table.iter_mut().enumerate() {
            let level = luma as f32 / 255.0;
            let mut shade = hsl;
            shade.lightness = if level <= 0.5 {
                hsl.lightness * (level / 0.5)
            } else {
                hsl.lightness + (1.0 - hsl.lightness) * ((level - 0.5) / 0.5)
            };

            let out: Srgb<f32> = shade.into_color();
            *entry = [to_byte(out.red), to_byte(out.green), to_byte(out.blue)];
        }

        Self { table }
    }

    /// Colour for a luminance value.
    pub fn shade(&self, luma: u8) -> [u8; 3] {
        self.table[luma as usize]
    }

    /// Tint an image, keeping its alpha channel.
    pub fn apply(&self, image: &image::DynamicImage) -> RgbaImage {
        let gray = image.to_luma_alpha8();
        RgbaImage::from_fn(gray.width(), gray.height(), |x, y| {
            let [luma, alpha] = gray.get_pixel(x, y).0;
            let [r, g, b] = self.shade(luma);
            Rgba([r, g, b, alpha])
        })
    }
}

fn to_byte(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Tint every wallpaper in `specs` from `source_dir` into `output_dir`.
///
/// Outputs are named `<stem>-<colour name>.png`.
pub fn generate_wallpapers(
    source_dir: &Path,
    output_dir: &Path,
    specs: &[WallpaperSpec],
    target: Colour,
    colour_name: &str,
    printer: &Printer,
) -> Result<Vec<PathBuf>> {
    // Fail before writing anything if an expected source is missing.
    for spec in specs {
        let source = source_dir.join(&spec.file);
        if !source.is_file() {
            return Err(RetintError::Build {
                message: format!("Missing wallpaper {}", display_path(&source)),
                help: Some("Wallpapers are read from <source>/wallpapers".to_string()),
            });
        }
    }

    fs::create_dir_all(output_dir).map_err(|e| RetintError::Io {
        path: output_dir.to_path_buf(),
        message: format!("Failed to create wallpaper directory: {}", e),
    })?;

    let tint = Tint::new(target);
    let mut written = Vec::new();

    for spec in specs {
        let source = source_dir.join(&spec.file);
        let output = output_dir.join(format!("{}-{}.png", spec.stem, colour_name));

        let image = image::open(&source).map_err(|e| RetintError::io(&source, e))?;
        tint.apply(&image)
            .save(&output)
            .map_err(|e| RetintError::io(&output, format!("Failed to write wallpaper: {}", e)))?;

        printer.detail("Tinted", &display_path(&output));
        written.push(output);
    }

    Ok(written)
}
