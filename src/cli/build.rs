//! Build command implementation.
//!
//! Resolves the selected sets and install directories into a
//! `RecolorConfig`, locates the rasterizer when needed, and runs the
//! pipeline.

use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Args;

use crate::catalog::{Catalog, SetKind, ThemeSet};
use crate::error::{Result, RetintError};
use crate::output::{display_path, plural, Printer};
use crate::pipeline::{
    self, default_name, validate_name, InstallDirs, OverwritePolicy, Prompt, RecolorConfig,
    TerminalPrompt, Tweak,
};
use crate::render::{ExternalRasterizer, RasterTool, Rasterizer};
use crate::types::ColourSpec;

/// Generate recoloured themes and icon sets
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Theme sets to recolour (e.g. Yaru, Yaru-dark)
    #[arg(long = "theme", value_name = "SET")]
    pub themes: Vec<String>,

    /// Icon sets to recolour
    #[arg(long = "icons", value_name = "SET")]
    pub icons: Vec<String>,

    /// Recolour every known set
    #[arg(long)]
    pub all: bool,

    /// Target colour (#RRGGBB)
    #[arg(long, short, value_name = "HEX")]
    pub colour: String,

    /// Name used in output directories (default: the hex digits)
    #[arg(long, short)]
    pub name: Option<String>,

    /// Root of the source tree (contains themes/, icons/, wallpapers/)
    #[arg(long, short, default_value = ".")]
    pub source: PathBuf,

    /// Install directory for themes
    #[arg(long)]
    pub themes_dir: Option<PathBuf>,

    /// Install directory for icon sets
    #[arg(long)]
    pub icons_dir: Option<PathBuf>,

    /// Install directory for wallpapers
    #[arg(long)]
    pub wallpapers_dir: Option<PathBuf>,

    /// Install directory for dock themes
    #[arg(long)]
    pub dock_dir: Option<PathBuf>,

    /// SVG rasterizer for theme assets
    #[arg(long, value_enum)]
    pub rasterizer: Option<RasterTool>,

    /// Extra outputs to generate
    #[arg(long = "tweak", value_enum)]
    pub tweaks: Vec<Tweak>,

    /// Overwrite existing output without asking
    #[arg(long, short)]
    pub yes: bool,
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    run_with_prompt(args, printer, &TerminalPrompt)
}

fn run_with_prompt(args: BuildArgs, printer: &Printer, prompt: &dyn Prompt) -> Result<()> {
    let target = ColourSpec::from_hex(&args.colour)?;
    let name = args.name.clone().unwrap_or_else(|| default_name(&target));
    validate_name(&name)?;

    let (catalog, manifest) = Catalog::load(&args.source)?;
    let sets = select_sets(&catalog, &args, printer)?;

    let install = InstallDirs::resolve(
        args.themes_dir.clone(),
        args.icons_dir.clone(),
        args.wallpapers_dir.clone(),
        args.dock_dir.clone(),
    )?;

    let config = RecolorConfig {
        target,
        name,
        source: args.source.clone(),
        sets,
        wallpapers: catalog.wallpapers().to_vec(),
        install,
        tweaks: args.tweaks.iter().copied().collect::<BTreeSet<_>>(),
        overwrite: if args.yes {
            OverwritePolicy::Always
        } else {
            OverwritePolicy::Ask
        },
    };

    let rasterizer = if config.needs_rasterizer() {
        let tool = args
            .rasterizer
            .or(manifest.and_then(|m| m.rasterizer))
            .unwrap_or_default();
        Some(ExternalRasterizer::locate(tool)?)
    } else {
        None
    };

    printer.info(
        "Target",
        &format!(
            "{} as {}",
            printer.swatch(config.target.colour()),
            printer.bold(&config.name)
        ),
    );

    let summary = pipeline::run(
        &config,
        rasterizer.as_ref().map(|r| r as &dyn Rasterizer),
        prompt,
        printer,
    )?;

    for output in &summary.outputs {
        printer.detail("Installed", &display_path(output));
    }
    printer.success(
        "Finished",
        &format!(
            "{} ({}, {})",
            plural(summary.outputs.len(), "set", "sets"),
            plural(summary.substitution.files_changed, "file recoloured", "files recoloured"),
            plural(summary.assets.rendered, "asset rendered", "assets rendered")
        ),
    );

    Ok(())
}

/// Resolve `--theme`, `--icons` and `--all` against the catalog.
///
/// `--all` only picks sets present in the source tree.
fn select_sets(catalog: &Catalog, args: &BuildArgs, printer: &Printer) -> Result<Vec<ThemeSet>> {
    if args.all {
        let (present, missing): (Vec<&ThemeSet>, Vec<&ThemeSet>) = catalog
            .sets()
            .iter()
            .partition(|s| s.source_dir(&args.source).is_dir());

        for set in missing {
            printer.warning(
                "Skipping",
                &format!("{} set {} (not in source)", set.kind, set.name()),
            );
        }
        if present.is_empty() {
            return Err(RetintError::Config {
                message: format!("No known set found under {}", display_path(&args.source)),
                help: Some("Point --source at the root containing themes/ and icons/".to_string()),
            });
        }
        return Ok(present.into_iter().cloned().collect());
    }

    if args.themes.is_empty() && args.icons.is_empty() {
        return Err(RetintError::Config {
            message: "No theme or icon set selected".to_string(),
            help: Some(
                "Use --theme <SET>, --icons <SET> or --all; see `retint list`".to_string(),
            ),
        });
    }

    let mut sets: Vec<ThemeSet> = Vec::new();
    let requested = args
        .themes
        .iter()
        .map(|n| (SetKind::Theme, n))
        .chain(args.icons.iter().map(|n| (SetKind::Icons, n)));

    for (kind, name) in requested {
        let set = catalog.get(kind, name)?;
        if !sets.iter().any(|s| s.kind == set.kind && s.name() == set.name()) {
            sets.push(set.clone());
        }
    }

    Ok(sets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::FixedPrompt;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn args(source: &Path, install: &Path) -> BuildArgs {
        BuildArgs {
            themes: vec![],
            icons: vec!["Yaru".to_string()],
            all: false,
            colour: "#3584e4".to_string(),
            name: Some("Blue".to_string()),
            source: source.to_path_buf(),
            themes_dir: Some(install.join("themes")),
            icons_dir: Some(install.join("icons")),
            wallpapers_dir: Some(install.join("backgrounds")),
            dock_dir: Some(install.join("plank")),
            rasterizer: None,
            tweaks: vec![Tweak::Dock],
            yes: true,
        }
    }

    fn seed_icons(root: &Path) {
        let dir = root.join("icons/Yaru/scalable/places");
        fs::create_dir_all(&dir).unwrap();
        fs::write(root.join("icons/Yaru/index.theme"), "[Icon Theme]\nName=Yaru\n").unwrap();
        fs::write(dir.join("folder.svg"), "<rect fill=\"#E95420\"/>").unwrap();
    }

    #[test]
    fn test_build_icons_only() {
        let source = tempdir().unwrap();
        let install = tempdir().unwrap();
        seed_icons(source.path());

        let args = args(source.path(), install.path());
        run_with_prompt(args, &Printer::new(), &FixedPrompt(false)).unwrap();

        let folder = install.path().join("icons/Yaru-Blue/scalable/places/folder.svg");
        assert_eq!(fs::read_to_string(folder).unwrap(), "<rect fill=\"#3584E4\"/>");
        assert!(install.path().join("plank/Yaru-Blue/dock.theme").exists());
    }

    #[test]
    fn test_build_uses_manifest_sets() {
        let source = tempdir().unwrap();
        let install = tempdir().unwrap();
        fs::create_dir_all(source.path().join("icons/Papirus")).unwrap();
        fs::write(source.path().join("icons/Papirus/folder.svg"), "#5294E2").unwrap();
        fs::write(
            source.path().join("retint.yaml"),
            "sets:\n  - family: Papirus\n    kind: icons\n    path: icons/Papirus\n    files: [\"*.svg\"]\n    colours:\n      - from: \"#5294E2\"\n",
        )
        .unwrap();

        let mut args = args(source.path(), install.path());
        args.icons = vec!["papirus".to_string()];
        args.tweaks.clear();
        args.name = None;
        run_with_prompt(args, &Printer::new(), &FixedPrompt(false)).unwrap();

        let folder = install.path().join("icons/Papirus-3584E4/folder.svg");
        assert_eq!(fs::read_to_string(folder).unwrap(), "#3584E4");
    }

    #[test]
    fn test_nothing_selected() {
        let source = tempdir().unwrap();
        let install = tempdir().unwrap();
        let mut args = args(source.path(), install.path());
        args.icons.clear();

        let err = run_with_prompt(args, &Printer::new(), &FixedPrompt(true)).unwrap_err();
        assert!(matches!(err, RetintError::Config { .. }));
    }

    #[test]
    fn test_invalid_colour_and_name() {
        let source = tempdir().unwrap();
        let install = tempdir().unwrap();

        let mut bad_colour = args(source.path(), install.path());
        bad_colour.colour = "blue".to_string();
        assert!(matches!(
            run_with_prompt(bad_colour, &Printer::new(), &FixedPrompt(true)).unwrap_err(),
            RetintError::Parse { .. }
        ));

        let mut bad_name = args(source.path(), install.path());
        bad_name.name = Some("a/b".to_string());
        assert!(matches!(
            run_with_prompt(bad_name, &Printer::new(), &FixedPrompt(true)).unwrap_err(),
            RetintError::Config { .. }
        ));
    }

    #[test]
    fn test_unknown_set() {
        let source = tempdir().unwrap();
        let install = tempdir().unwrap();
        let mut args = args(source.path(), install.path());
        args.themes = vec!["Adwaita".to_string()];

        let err = run_with_prompt(args, &Printer::new(), &FixedPrompt(true)).unwrap_err();
        assert!(matches!(err, RetintError::Config { .. }));
    }

    #[test]
    fn test_select_all_skips_sets_missing_from_source() {
        let catalog = Catalog::builtin();
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("themes/Yaru-dark")).unwrap();
        fs::create_dir_all(dir.path().join("icons/Yaru")).unwrap();

        let mut all = args(dir.path(), dir.path());
        all.all = true;
        let sets = select_sets(&catalog, &all, &Printer::new()).unwrap();
        let names: Vec<(SetKind, String)> = sets.iter().map(|s| (s.kind, s.name())).collect();
        assert_eq!(
            names,
            vec![
                (SetKind::Theme, "Yaru-dark".to_string()),
                (SetKind::Icons, "Yaru".to_string()),
            ]
        );
    }

    #[test]
    fn test_select_all_with_empty_source() {
        let dir = tempdir().unwrap();
        let mut all = args(dir.path(), dir.path());
        all.all = true;

        let err = select_sets(&Catalog::builtin(), &all, &Printer::new()).unwrap_err();
        assert!(matches!(err, RetintError::Config { .. }));
    }

    #[test]
    fn test_select_dedups_names() {
        let catalog = Catalog::builtin();
        let dir = tempdir().unwrap();

        let mut twice = args(dir.path(), dir.path());
        twice.themes = vec!["Yaru".to_string(), "yaru".to_string()];
        let sets = select_sets(&catalog, &twice, &Printer::new()).unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(sets[0].kind, SetKind::Theme);
        assert_eq!(sets[1].kind, SetKind::Icons);
    }
}
