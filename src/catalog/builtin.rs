//! Builtin Yaru sets.

use std::path::PathBuf;

use super::{AssetEntry, AssetGroup, ColourEntry, SetKind, ThemeSet, WallpaperSpec};

/// Accent palette shared by the Yaru theme variants, as offsets from `#E95420`.
fn theme_colours() -> Vec<ColourEntry> {
    vec![
        ColourEntry::new("#E95420", 0),
        ColourEntry::new("#F08763", 37),
        ColourEntry::new("#F6B39C", 69),
        ColourEntry::new("#FBE3DA", 102),
        ColourEntry::new("#D14617", -16),
        ColourEntry::new("#C7431A", -20),
        ColourEntry::new("#A93A14", -38),
    ]
}

fn icon_colours() -> Vec<ColourEntry> {
    vec![
        ColourEntry::new("#E95420", 0),
        ColourEntry::new("#FF8D66", 46),
        ColourEntry::new("#F4AA90", 62),
        ColourEntry::new("#FCE9E2", 107),
        ColourEntry::new("#B9421A", -27),
    ]
}

fn theme_files() -> Vec<String> {
    ["*.css", "*.scss", "*.svg", "*.xml", "*.rc", "gtkrc", "index.theme"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn theme_assets() -> AssetGroup {
    let asset = |name: &str, legacy: bool| AssetEntry {
        name: name.to_string(),
        legacy,
    };

    AssetGroup {
        dir: PathBuf::from("gtk-3.0/assets"),
        legacy_dir: Some(PathBuf::from("gtk-2.0/assets")),
        assets: vec![
            asset("checkbox-checked", true),
            asset("checkbox-checked-insensitive", true),
            asset("checkbox-mixed", true),
            asset("radio-checked", true),
            asset("radio-mixed", true),
            asset("switch-on", false),
            asset("switch-on-insensitive", false),
        ],
    }
}

fn theme(variant: Option<&str>) -> ThemeSet {
    let name = match variant {
        Some(v) => format!("Yaru-{}", v),
        None => "Yaru".to_string(),
    };

    ThemeSet {
        family: "Yaru".to_string(),
        variant: variant.map(str::to_string),
        kind: SetKind::Theme,
        path: PathBuf::from("themes").join(&name),
        files: theme_files(),
        colours: theme_colours(),
        assets: Some(theme_assets()),
        rename_keys: vec![
            "Name".to_string(),
            "GtkTheme".to_string(),
            "MetacityTheme".to_string(),
            "IconTheme".to_string(),
        ],
    }
}

pub(super) fn sets() -> Vec<ThemeSet> {
    vec![
        theme(None),
        theme(Some("dark")),
        theme(Some("light")),
        ThemeSet {
            family: "Yaru".to_string(),
            variant: None,
            kind: SetKind::Icons,
            path: PathBuf::from("icons/Yaru"),
            files: vec!["*.svg".to_string(), "index.theme".to_string()],
            colours: icon_colours(),
            assets: None,
            rename_keys: vec!["Name".to_string()],
        },
    ]
}

pub(super) fn wallpapers() -> Vec<WallpaperSpec> {
    vec![
        WallpaperSpec {
            file: PathBuf::from("Yaru-grayscale.png"),
            stem: "Yaru".to_string(),
        },
        WallpaperSpec {
            file: PathBuf::from("Yaru-grayscale-dark.png"),
            stem: "Yaru-dark".to_string(),
        },
    ]
}
