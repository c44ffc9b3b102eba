//! Source manifest (retint.yaml) parsing.
//!
//! An optional manifest in the source root can describe extra sets,
//! override builtin ones, replace the wallpaper list and pick a default
//! rasterizer.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, RetintError};
use crate::render::RasterTool;

use super::{ThemeSet, WallpaperSpec};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "retint.yaml";

/// Manifest loaded from retint.yaml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Sets to add, or to replace builtin sets with the same name and kind.
    pub sets: Vec<ThemeSet>,

    /// Replaces the builtin wallpaper list when non-empty.
    pub wallpapers: Vec<WallpaperSpec>,

    /// Default rasterizer when none is given on the command line.
    pub rasterizer: Option<RasterTool>,
}

impl Manifest {
    /// Load manifest from a retint.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| RetintError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str::<Option<Manifest>>(content)
            .map(Option::unwrap_or_default)
            .map_err(|e| RetintError::Parse {
                message: format!("Invalid manifest: {}", e),
                help: Some(format!("Check {} syntax", MANIFEST_FILENAME)),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SetKind;
    use std::path::PathBuf;
    use tempfile::tempdir;

    #[test]
    fn test_parse_empty_manifest() {
        let manifest = Manifest::parse("").unwrap();
        assert!(manifest.sets.is_empty());
        assert!(manifest.wallpapers.is_empty());
        assert!(manifest.rasterizer.is_none());
    }

    #[test]
    fn test_parse_full_manifest() {
        let yaml = r##"
rasterizer: rsvg-convert
wallpapers:
  - file: warty.png
    stem: Warty
sets:
  - family: Pop
    variant: dark
    kind: theme
    path: themes/Pop-dark
    files: ["*.css", "gtkrc"]
    colours:
      - from: "#FAA41A"
      - from: "#FFD18A"
        offset: 40
    assets:
      dir: gtk-3.0/assets
      assets:
        - name: checkbox-checked
          legacy: true
    rename_keys: [Name, GtkTheme]
"##;
        let manifest = Manifest::parse(yaml).unwrap();

        assert_eq!(manifest.rasterizer, Some(RasterTool::RsvgConvert));
        assert_eq!(manifest.wallpapers[0].file, PathBuf::from("warty.png"));

        let set = &manifest.sets[0];
        assert_eq!(set.name(), "Pop-dark");
        assert_eq!(set.kind, SetKind::Theme);
        assert_eq!(set.colours[0].offset, 0);
        assert_eq!(set.colours[1].offset, 40);
        let assets = set.assets.as_ref().unwrap();
        assert!(assets.legacy_dir.is_none());
        assert!(assets.assets[0].legacy);
        assert_eq!(set.rename_keys, vec!["Name", "GtkTheme"]);
    }

    #[test]
    fn test_parse_invalid_manifest() {
        assert!(Manifest::parse("sets: 12").is_err());
        assert!(Manifest::parse("rasterizer: gimp").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        assert!(Manifest::load(&dir.path().join(MANIFEST_FILENAME)).is_err());
    }
}
