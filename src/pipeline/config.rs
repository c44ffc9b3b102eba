//! Run configuration.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::catalog::{is_valid_name, SetKind, ThemeSet, WallpaperSpec};
use crate::error::{Result, RetintError};
use crate::types::ColourSpec;

/// Optional extra outputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, ValueEnum)]
pub enum Tweak {
    /// Tint the grayscale wallpapers
    Wallpapers,
    /// Write a Plank dock theme
    Dock,
}

/// What to do when an output directory already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwritePolicy {
    Ask,
    Always,
}

/// Where generated artifacts are installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallDirs {
    pub themes: PathBuf,
    pub icons: PathBuf,
    pub wallpapers: PathBuf,
    pub dock: PathBuf,
}

impl InstallDirs {
    /// The standard layout below a data directory.
    pub fn under(data_dir: &Path) -> Self {
        Self {
            themes: data_dir.join("themes"),
            icons: data_dir.join("icons"),
            wallpapers: data_dir.join("backgrounds"),
            dock: data_dir.join("plank").join("themes"),
        }
    }

    /// The user's data directory layout, with explicit overrides applied.
    ///
    /// The data directory is only consulted when some directory is not
    /// overridden.
    pub fn resolve(
        themes: Option<PathBuf>,
        icons: Option<PathBuf>,
        wallpapers: Option<PathBuf>,
        dock: Option<PathBuf>,
    ) -> Result<Self> {
        match (themes, icons, wallpapers, dock) {
            (Some(themes), Some(icons), Some(wallpapers), Some(dock)) => Ok(Self {
                themes,
                icons,
                wallpapers,
                dock,
            }),
            (themes, icons, wallpapers, dock) => {
                let data_dir = dirs_next::data_dir().ok_or_else(|| RetintError::Config {
                    message: "Cannot determine the user data directory".to_string(),
                    help: Some(
                        "Pass --themes-dir, --icons-dir, --wallpapers-dir and --dock-dir"
                            .to_string(),
                    ),
                })?;
                let defaults = Self::under(&data_dir);

                Ok(Self {
                    themes: themes.unwrap_or(defaults.themes),
                    icons: icons.unwrap_or(defaults.icons),
                    wallpapers: wallpapers.unwrap_or(defaults.wallpapers),
                    dock: dock.unwrap_or(defaults.dock),
                })
            }
        }
    }

    pub fn for_kind(&self, kind: SetKind) -> &Path {
        match kind {
            SetKind::Theme => &self.themes,
            SetKind::Icons => &self.icons,
        }
    }
}

/// Everything one run needs, fixed before any stage starts.
#[derive(Debug, Clone)]
pub struct RecolorConfig {
    pub target: ColourSpec,
    /// Human-readable colour name used in output names, e.g. `Blue`.
    pub name: String,
    /// Root containing `themes/`, `icons/` and `wallpapers/`.
    pub source: PathBuf,
    pub sets: Vec<ThemeSet>,
    pub wallpapers: Vec<WallpaperSpec>,
    pub install: InstallDirs,
    pub tweaks: BTreeSet<Tweak>,
    pub overwrite: OverwritePolicy,
}

impl RecolorConfig {
    pub fn has_tweak(&self, tweak: Tweak) -> bool {
        self.tweaks.contains(&tweak)
    }

    /// Whether any selected set has rasterized assets to regenerate.
    pub fn needs_rasterizer(&self) -> bool {
        self.sets
            .iter()
            .any(|s| s.assets.as_ref().is_some_and(|a| !a.assets.is_empty()))
    }

    /// Output directory of a set.
    pub fn output_dir(&self, set: &ThemeSet) -> PathBuf {
        self.install.for_kind(set.kind).join(set.output_name(&self.name))
    }

    pub fn wallpaper_source_dir(&self) -> PathBuf {
        self.source.join("wallpapers")
    }
}

/// Default colour name: the hex digits without `#`.
pub fn default_name(target: &ColourSpec) -> String {
    target.to_hex().trim_start_matches('#').to_string()
}

/// Colour names end up in directory names and `index.theme` values.
pub fn validate_name(name: &str) -> Result<()> {
    if is_valid_name(name) {
        Ok(())
    } else {
        Err(RetintError::Config {
            message: format!("Invalid name: '{}'", name),
            help: Some("Use letters, digits, '-' or '_', e.g. --name Blue".to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_install_dirs_under() {
        let dirs = InstallDirs::under(Path::new("/data"));
        assert_eq!(dirs.themes, PathBuf::from("/data/themes"));
        assert_eq!(dirs.icons, PathBuf::from("/data/icons"));
        assert_eq!(dirs.wallpapers, PathBuf::from("/data/backgrounds"));
        assert_eq!(dirs.dock, PathBuf::from("/data/plank/themes"));
        assert_eq!(dirs.for_kind(SetKind::Icons), Path::new("/data/icons"));
    }

    #[test]
    fn test_install_dirs_explicit() {
        let dirs = InstallDirs::resolve(
            Some(PathBuf::from("t")),
            Some(PathBuf::from("i")),
            Some(PathBuf::from("w")),
            Some(PathBuf::from("d")),
        )
        .unwrap();
        assert_eq!(dirs.themes, PathBuf::from("t"));
        assert_eq!(dirs.dock, PathBuf::from("d"));
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Blue").is_ok());
        assert!(validate_name("Deep_Blue-2").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("../evil").is_err());
        assert!(validate_name("two words").is_err());
    }

    #[test]
    fn test_default_name() {
        let target = ColourSpec::from_hex("#3584e4").unwrap();
        assert_eq!(default_name(&target), "3584E4");
    }

    #[test]
    fn test_output_dir_and_rasterizer_need() {
        let catalog = Catalog::builtin();
        let mut config = RecolorConfig {
            target: ColourSpec::from_hex("#3584E4").unwrap(),
            name: "Blue".to_string(),
            source: PathBuf::from("src"),
            sets: vec![catalog.get(SetKind::Icons, "Yaru").unwrap().clone()],
            wallpapers: vec![],
            install: InstallDirs::under(Path::new("/data")),
            tweaks: BTreeSet::new(),
            overwrite: OverwritePolicy::Always,
        };

        assert!(!config.needs_rasterizer());
        assert_eq!(config.output_dir(&config.sets[0]), PathBuf::from("/data/icons/Yaru-Blue"));

        config.sets.push(catalog.get(SetKind::Theme, "Yaru-dark").unwrap().clone());
        assert!(config.needs_rasterizer());
        assert_eq!(
            config.output_dir(&config.sets[1]),
            PathBuf::from("/data/themes/Yaru-Blue-dark")
        );
        assert_eq!(config.wallpaper_source_dir(), PathBuf::from("src/wallpapers"));
    }
}
