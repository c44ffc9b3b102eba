//! Theme and icon sets retint knows how to recolour.
//!
//! A set names a directory in the source tree, the files to rewrite, and
//! the table of source colours to replace. Each table entry carries a
//! lightness offset, so the target colour is shifted the same way the
//! source palette shifts its accent.

mod builtin;
mod manifest;

use std::collections::HashSet;
use std::fmt;
use std::path::{Component, Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RetintError};
use crate::substitute::{FileFilter, SubstitutionRule};
use crate::types::{Colour, ColourSpec};

pub use manifest::{Manifest, MANIFEST_FILENAME};

/// Whether a set is a GTK/shell theme or an icon theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SetKind {
    Theme,
    Icons,
}

impl SetKind {
    pub fn name(self) -> &'static str {
        match self {
            SetKind::Theme => "theme",
            SetKind::Icons => "icons",
        }
    }
}

impl fmt::Display for SetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A source colour and the lightness offset applied to the target colour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColourEntry {
    pub from: String,
    #[serde(default)]
    pub offset: i32,
}

impl ColourEntry {
    pub fn new(from: &str, offset: i32) -> Self {
        Self {
            from: from.to_string(),
            offset,
        }
    }
}

/// A rasterized asset regenerated from its SVG source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetEntry {
    pub name: String,
    /// Also copy the 1x output into the legacy directory.
    #[serde(default)]
    pub legacy: bool,
}

/// The asset directory of a set and what to regenerate in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetGroup {
    pub dir: PathBuf,
    #[serde(default)]
    pub legacy_dir: Option<PathBuf>,
    pub assets: Vec<AssetEntry>,
}

/// A grayscale wallpaper to tint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallpaperSpec {
    /// Path relative to `<source>/wallpapers`.
    pub file: PathBuf,
    /// Output file stem; the colour name is appended.
    pub stem: String,
}

/// Names end up as path components and `index.theme` values, so only
/// ASCII alphanumerics, `-` and `_` are allowed.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// A relative path that cannot climb out of the directory it is joined to.
fn is_contained(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        && path.components().any(|c| matches!(c, Component::Normal(_)))
}

fn default_rename_keys() -> Vec<String> {
    vec!["Name".to_string()]
}

/// A named theme or icon set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeSet {
    pub family: String,
    #[serde(default)]
    pub variant: Option<String>,
    pub kind: SetKind,
    /// Directory relative to the source root.
    pub path: PathBuf,
    /// File-name globs that receive colour substitutions.
    pub files: Vec<String>,
    pub colours: Vec<ColourEntry>,
    #[serde(default)]
    pub assets: Option<AssetGroup>,
    /// `index.theme` keys whose value is rewritten to the output name.
    #[serde(default = "default_rename_keys")]
    pub rename_keys: Vec<String>,
}

impl ThemeSet {
    /// `Yaru`, `Yaru-dark`, ...
    pub fn name(&self) -> String {
        match &self.variant {
            Some(variant) => format!("{}-{}", self.family, variant),
            None => self.family.clone(),
        }
    }

    /// Directory name of the recoloured set: `Yaru-Blue`, `Yaru-Blue-dark`.
    pub fn output_name(&self, colour_name: &str) -> String {
        match &self.variant {
            Some(variant) => format!("{}-{}-{}", self.family, colour_name, variant),
            None => format!("{}-{}", self.family, colour_name),
        }
    }

    pub fn source_dir(&self, source_root: &Path) -> PathBuf {
        source_root.join(&self.path)
    }

    /// Check the set is internally consistent.
    pub fn validate(&self) -> Result<()> {
        let name = self.name();
        if self.family.is_empty() || self.files.is_empty() {
            return Err(RetintError::Config {
                message: format!("Set '{}' needs a family and at least one file glob", name),
                help: None,
            });
        }

        let variant_ok = self.variant.as_deref().map_or(true, is_valid_name);
        if !is_valid_name(&self.family) || !variant_ok {
            return Err(RetintError::Config {
                message: format!("Invalid set name '{}'", name),
                help: Some(
                    "Family and variant may only use letters, digits, '-' or '_'".to_string(),
                ),
            });
        }

        if !is_contained(&self.path) {
            return Err(RetintError::Config {
                message: format!(
                    "Set '{}' has path {} outside the source root",
                    name,
                    self.path.display()
                ),
                help: Some("Use a relative path such as themes/Yaru".to_string()),
            });
        }

        if let Some(group) = &self.assets {
            let mut dirs = std::iter::once(&group.dir).chain(group.legacy_dir.as_ref());
            let names_ok = group.assets.iter().all(|a| is_valid_name(&a.name));
            if !dirs.all(|d| is_contained(d)) || !names_ok {
                return Err(RetintError::Config {
                    message: format!("Set '{}' has an asset entry outside its own tree", name),
                    help: None,
                });
            }
        }

        let mut seen = HashSet::new();
        for entry in &self.colours {
            let colour = Colour::from_hex(&entry.from)?;
            if !seen.insert(colour) {
                return Err(RetintError::Config {
                    message: format!("Set '{}' lists {} more than once", name, colour),
                    help: None,
                });
            }
        }

        FileFilter::new(&self.files)?;
        Ok(())
    }

    /// Pairs of (source colour, replacement) for a target colour.
    pub fn colour_table(&self, target: &ColourSpec) -> Result<Vec<(Colour, Colour)>> {
        self.colours
            .iter()
            .map(|entry| {
                let from = Colour::from_hex(&entry.from)?;
                Ok((from, target.with_lightness_offset(entry.offset).colour()))
            })
            .collect()
    }

    /// Substitution rules recolouring this set to `target` and renaming it
    /// after `colour_name`.
    ///
    /// Each colour yields a hex rule and a decimal `r, g, b` rule.
    pub fn rules(&self, target: &ColourSpec, colour_name: &str) -> Result<Vec<SubstitutionRule>> {
        let files = FileFilter::new(&self.files)?;
        let mut rules = Vec::new();

        for (from, to) in self.colour_table(target)? {
            rules.push(SubstitutionRule::literal(files.clone(), from.to_hex(), to.to_hex()));
            rules.push(SubstitutionRule::regex(
                files.clone(),
                format!(r"\b{}\b", from.to_rgb_triple().replace(", ", r",\s*")),
                to.to_rgb_triple(),
            ));
        }

        if !self.rename_keys.is_empty() {
            let index = FileFilter::new(["index.theme"])?;
            let name = self.name();
            let output = self.output_name(colour_name);
            for key in &self.rename_keys {
                rules.push(SubstitutionRule::regex(
                    index.clone(),
                    format!("^{}={}$", regex::escape(key), regex::escape(&name)),
                    format!("{}={}", key, output),
                ));
            }
        }

        Ok(rules)
    }
}

/// The sets and wallpapers available for a run.
#[derive(Debug, Clone)]
pub struct Catalog {
    sets: Vec<ThemeSet>,
    wallpapers: Vec<WallpaperSpec>,
}

impl Catalog {
    /// The builtin sets.
    pub fn builtin() -> Self {
        Self {
            sets: builtin::sets(),
            wallpapers: builtin::wallpapers(),
        }
    }

    /// Builtin sets merged with `retint.yaml` from `source_root`, if any.
    pub fn load(source_root: &Path) -> Result<(Self, Option<Manifest>)> {
        let manifest_path = source_root.join(MANIFEST_FILENAME);
        let mut catalog = Self::builtin();

        if !manifest_path.exists() {
            return Ok((catalog, None));
        }

        let manifest = Manifest::load(&manifest_path)?;
        catalog.merge(&manifest)?;
        Ok((catalog, Some(manifest)))
    }

    /// Add the manifest's sets, replacing builtin sets of the same name and kind.
    pub fn merge(&mut self, manifest: &Manifest) -> Result<()> {
        for set in &manifest.sets {
            set.validate()?;
            let name = set.name();
            match self
                .sets
                .iter_mut()
                .find(|s| s.kind == set.kind && s.name() == name)
            {
                Some(existing) => *existing = set.clone(),
                None => self.sets.push(set.clone()),
            }
        }

        for wallpaper in &manifest.wallpapers {
            if !is_contained(&wallpaper.file) || !is_valid_name(&wallpaper.stem) {
                return Err(RetintError::Config {
                    message: format!(
                        "Invalid wallpaper entry {} ({})",
                        wallpaper.file.display(),
                        wallpaper.stem
                    ),
                    help: Some("Wallpaper files are relative to <source>/wallpapers".to_string()),
                });
            }
        }

        if !manifest.wallpapers.is_empty() {
            self.wallpapers = manifest.wallpapers.clone();
        }

        Ok(())
    }

    pub fn sets(&self) -> &[ThemeSet] {
        &self.sets
    }

    pub fn sets_of(&self, kind: SetKind) -> impl Iterator<Item = &ThemeSet> {
        self.sets.iter().filter(move |s| s.kind == kind)
    }

    pub fn wallpapers(&self) -> &[WallpaperSpec] {
        &self.wallpapers
    }

    /// Look up a set by kind and name (case-insensitive).
    pub fn get(&self, kind: SetKind, name: &str) -> Result<&ThemeSet> {
        self.sets_of(kind)
            .find(|s| s.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                let available: Vec<String> = self.sets_of(kind).map(|s| s.name()).collect();
                RetintError::Config {
                    message: format!("Unknown {} set: {}", kind, name),
                    help: Some(format!("Available: {}", available.join(", "))),
                }
            })
    }
}
