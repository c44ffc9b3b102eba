//! Plank dock theme generation.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, RetintError};
use crate::substitute::write_atomic;
use crate::types::{Colour, ColourSpec};

/// File name Plank looks for inside a theme directory.
pub const DOCK_THEME_FILENAME: &str = "dock.theme";

/// A colour with alpha in Plank's `R;;G;;B;;A` notation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DockColour {
    pub colour: Colour,
    pub alpha: u8,
}

impl DockColour {
    fn new(colour: Colour, alpha: u8) -> Self {
        Self { colour, alpha }
    }

    pub fn to_plank(self) -> String {
        format!(
            "{};;{};;{};;{}",
            self.colour.r, self.colour.g, self.colour.b, self.alpha
        )
    }
}

/// Colours of a dock theme derived from a target colour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockTheme {
    pub fill_start: DockColour,
    pub fill_end: DockColour,
    pub outer_stroke: DockColour,
    pub inner_stroke: DockColour,
}

impl DockTheme {
    /// Dark translucent body tinted toward the target, with accent strokes.
    pub fn from_target(target: &ColourSpec) -> Self {
        Self {
            fill_start: DockColour::new(target.with_lightness_offset(-100).colour(), 230),
            fill_end: DockColour::new(target.with_lightness_offset(-110).colour(), 230),
            outer_stroke: DockColour::new(target.with_lightness_offset(-40).colour(), 255),
            inner_stroke: DockColour::new(target.with_lightness_offset(30).colour(), 40),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "[PlankTheme]");
        let _ = writeln!(out, "TopRoundness=4");
        let _ = writeln!(out, "BottomRoundness=0");
        let _ = writeln!(out, "LineWidth=1");
        let _ = writeln!(out, "OuterStrokeColor={}", self.outer_stroke.to_plank());
        let _ = writeln!(out, "FillStartColor={}", self.fill_start.to_plank());
        let _ = writeln!(out, "FillEndColor={}", self.fill_end.to_plank());
        let _ = writeln!(out, "InnerStrokeColor={}", self.inner_stroke.to_plank());
        out.push('\n');
        out.push_str(DOCK_SETTINGS);
        out
    }
}

const DOCK_SETTINGS: &str = "\
[PlankDockTheme]
HorizPadding=4
TopPadding=0
BottomPadding=0
ItemPadding=4
IndicatorSize=2
IconShadowSize=1
UrgentBounceHeight=1.6666666666666667
LaunchBounceHeight=0.625
FadeOpacity=1
ClickTime=300
UrgentBounceTime=600
LaunchBounceTime=600
ActiveTime=300
SlideTime=300
FadeTime=250
HideTime=150
GlowSize=30
GlowTime=10000
GlowPulseTime=2000
UrgentHueShift=150
ItemMoveTime=450
CascadeHide=true
";

/// Write `<dock_dir>/<theme_name>/dock.theme`.
pub fn write_dock_theme(dock_dir: &Path, theme_name: &str, target: &ColourSpec) -> Result<PathBuf> {
    let dir = dock_dir.join(theme_name);
    fs::create_dir_all(&dir).map_err(|e| RetintError::Io {
        path: dir.clone(),
        message: format!("Failed to create dock theme directory: {}", e),
    })?;

    let path = dir.join(DOCK_THEME_FILENAME);
    write_atomic(&path, DockTheme::from_target(target).render().as_bytes())?;
    Ok(path)
}
