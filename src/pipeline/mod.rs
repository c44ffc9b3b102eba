//! The recolouring pipeline.
//!
//! Stages run strictly in order, each reading the same immutable
//! [`RecolorConfig`]:
//!
//! 1. check that every source exists
//! 2. confirm overwrites, then rebuild each target tree from its source
//! 3. substitute colours and names
//! 4. regenerate rasterized assets
//! 5. tint wallpapers and write the dock theme, when enabled

mod config;
mod prompt;
mod tree;

use std::path::PathBuf;

use crate::error::{Result, RetintError};
use crate::output::{display_path, plural, Printer};
use crate::render::{
    generate_wallpapers, regenerate_assets, write_dock_theme, AssetReport, Rasterizer,
};
use crate::substitute::{substitute_tree, SubstitutionReport};

pub use config::{default_name, validate_name, InstallDirs, OverwritePolicy, RecolorConfig, Tweak};
pub use prompt::{FixedPrompt, Prompt, TerminalPrompt};
pub use tree::recreate_tree;

/// What a run produced.
#[derive(Debug, Default)]
pub struct RunSummary {
    /// Recoloured set directories.
    pub outputs: Vec<PathBuf>,
    pub substitution: SubstitutionReport,
    pub assets: AssetReport,
    pub wallpapers: Vec<PathBuf>,
    pub dock_theme: Option<PathBuf>,
}

/// Run every stage for `config`.
///
/// `rasterizer` is required when a selected set has assets to regenerate.
pub fn run(
    config: &RecolorConfig,
    rasterizer: Option<&dyn Rasterizer>,
    prompt: &dyn Prompt,
    printer: &Printer,
) -> Result<RunSummary> {
    check_sources(config)?;
    if config.needs_rasterizer() && rasterizer.is_none() {
        return Err(RetintError::MissingTool {
            tool: "rasterizer".to_string(),
            help: Some("Install inkscape or rsvg-convert".to_string()),
        });
    }

    confirm_overwrites(config, prompt)?;

    let mut summary = RunSummary::default();

    for set in &config.sets {
        let source = set.source_dir(&config.source);
        let output = config.output_dir(set);

        printer.status(
            "Copying",
            &format!("{} -> {}", set.name(), display_path(&output)),
        );
        let copied = recreate_tree(&source, &output)?;
        printer.detail("Copied", &plural(copied, "file", "files"));

        let rules = set.rules(&config.target, &config.name)?;
        let report = substitute_tree(&output, &rules)?;
        printer.status(
            "Recoloured",
            &format!(
                "{} ({} in {})",
                set.output_name(&config.name),
                plural(report.replacements, "replacement", "replacements"),
                plural(report.files_changed, "file", "files")
            ),
        );
        for skipped in &report.skipped {
            printer.detail("Skipped", &format!("{} (not text)", display_path(skipped)));
        }
        summary.substitution.merge(report);

        if let (Some(group), Some(rasterizer)) = (&set.assets, rasterizer) {
            if !group.assets.is_empty() {
                printer.status(
                    "Rendering",
                    &format!(
                        "{} with {}",
                        plural(group.assets.len(), "asset", "assets"),
                        rasterizer.name()
                    ),
                );
                let assets = regenerate_assets(&output, group, rasterizer, printer)?;
                summary.assets.rendered += assets.rendered;
                summary.assets.legacy_copies += assets.legacy_copies;
            }
        }

        summary.outputs.push(output);
    }

    if config.has_tweak(Tweak::Wallpapers) {
        printer.status("Tinting", &plural(config.wallpapers.len(), "wallpaper", "wallpapers"));
        summary.wallpapers = generate_wallpapers(
            &config.wallpaper_source_dir(),
            &config.install.wallpapers,
            &config.wallpapers,
            config.target.colour(),
            &config.name,
            printer,
        )?;
    }

    if config.has_tweak(Tweak::Dock) {
        let path = write_dock_theme(
            &config.install.dock,
            &dock_theme_name(config),
            &config.target,
        )?;
        printer.status("Writing", &display_path(&path));
        summary.dock_theme = Some(path);
    }

    Ok(summary)
}

/// Dock theme directory name: `<family>-<name>` of the first set.
fn dock_theme_name(config: &RecolorConfig) -> String {
    match config.sets.first() {
        Some(set) => format!("{}-{}", set.family, config.name),
        None => config.name.clone(),
    }
}

fn check_sources(config: &RecolorConfig) -> Result<()> {
    if !config.source.is_dir() {
        return Err(RetintError::Config {
            message: format!("Source directory not found: {}", display_path(&config.source)),
            help: Some("Point --source at the root containing themes/ and icons/".to_string()),
        });
    }

    for set in &config.sets {
        let dir = set.source_dir(&config.source);
        if !dir.is_dir() {
            return Err(RetintError::Config {
                message: format!(
                    "{} set {} not found at {}",
                    set.kind,
                    set.name(),
                    display_path(&dir)
                ),
                help: None,
            });
        }
    }

    if config.has_tweak(Tweak::Wallpapers) {
        let dir = config.wallpaper_source_dir();
        for wallpaper in &config.wallpapers {
            let path = dir.join(&wallpaper.file);
            if !path.is_file() {
                return Err(RetintError::Build {
                    message: format!("Missing wallpaper {}", display_path(&path)),
                    help: None,
                });
            }
        }
    }

    Ok(())
}

fn confirm_overwrites(config: &RecolorConfig, prompt: &dyn Prompt) -> Result<()> {
    if config.overwrite == OverwritePolicy::Always {
        return Ok(());
    }

    for set in &config.sets {
        let output = config.output_dir(set);
        if std::fs::symlink_metadata(&output).is_err() {
            continue;
        }

        let question = format!("{} already exists. Overwrite?", display_path(&output));
        if !prompt.confirm(&question)? {
            return Err(RetintError::Aborted {
                message: format!("{} was left untouched", display_path(&output)),
            });
        }
    }

    Ok(())
}
