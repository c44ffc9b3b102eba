//! SVG rasterization through an external tool.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RetintError};

/// Supported external rasterizers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RasterTool {
    #[default]
    Inkscape,
    RsvgConvert,
}

impl RasterTool {
    /// Executable name looked up on `PATH`.
    pub fn program(self) -> &'static str {
        match self {
            RasterTool::Inkscape => "inkscape",
            RasterTool::RsvgConvert => "rsvg-convert",
        }
    }

    /// Command-line arguments to export `svg` as a `width`x`height` PNG.
    pub fn args(self, svg: &Path, png: &Path, width: u32, height: u32) -> Vec<OsString> {
        match self {
            RasterTool::Inkscape => vec![
                "--export-type=png".into(),
                prefixed("--export-filename=", png),
                format!("--export-width={}", width).into(),
                format!("--export-height={}", height).into(),
                svg.into(),
            ],
            RasterTool::RsvgConvert => vec![
                "--width".into(),
                width.to_string().into(),
                "--height".into(),
                height.to_string().into(),
                "--format".into(),
                "png".into(),
                "--output".into(),
                png.into(),
                svg.into(),
            ],
        }
    }
}

fn prefixed(prefix: &str, path: &Path) -> OsString {
    let mut arg = OsString::from(prefix);
    arg.push(path);
    arg
}

/// Something that can turn an SVG file into a PNG of a given size.
pub trait Rasterizer {
    fn name(&self) -> &str;

    fn rasterize(&self, svg: &Path, png: &Path, width: u32, height: u32) -> Result<()>;
}

/// Rasterizer backed by an executable on the system.
#[derive(Debug, Clone)]
pub struct ExternalRasterizer {
    tool: RasterTool,
    program: PathBuf,
}

impl ExternalRasterizer {
    /// Find the tool on `PATH`.
    pub fn locate(tool: RasterTool) -> Result<Self> {
        Self::locate_program(tool, tool.program())
    }

    fn locate_program(tool: RasterTool, program: &str) -> Result<Self> {
        let program = which::which(program).map_err(|_| RetintError::MissingTool {
            tool: program.to_string(),
            help: Some(format!(
                "Install {} or choose another tool with --rasterizer",
                program
            )),
        })?;
        Ok(Self { tool, program })
    }

    #[cfg(test)]
    fn with_program(tool: RasterTool, program: impl Into<PathBuf>) -> Self {
        Self {
            tool,
            program: program.into(),
        }
    }
}

impl Rasterizer for ExternalRasterizer {
    fn name(&self) -> &str {
        self.tool.program()
    }

    fn rasterize(&self, svg: &Path, png: &Path, width: u32, height: u32) -> Result<()> {
        let mut command = Command::new(&self.program);
        command.args(self.tool.args(svg, png, width, height));
        run_tool(self.name(), &mut command)
    }
}

/// Run a command to completion with captured output.
///
/// A non-zero exit becomes an error carrying the tool's stderr.
pub fn run_tool(tool: &str, command: &mut Command) -> Result<()> {
    let output = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| RetintError::Tool {
            tool: tool.to_string(),
            message: format!("could not start: {}", e),
        })?;

    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    let message = if stderr.is_empty() {
        format!("exited with {}", output.status)
    } else {
        format!("exited with {}: {}", output.status, stderr)
    };

    Err(RetintError::Tool {
        tool: tool.to_string(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_inkscape_args() {
        let args = RasterTool::Inkscape.args(Path::new("in.svg"), Path::new("out.png"), 16, 24);
        assert_eq!(
            args,
            vec![
                OsString::from("--export-type=png"),
                OsString::from("--export-filename=out.png"),
                OsString::from("--export-width=16"),
                OsString::from("--export-height=24"),
                OsString::from("in.svg"),
            ]
        );
    }

    #[test]
    fn test_rsvg_convert_args() {
        let args = RasterTool::RsvgConvert.args(Path::new("in.svg"), Path::new("out.png"), 32, 32);
        let args: Vec<String> = args.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            args,
            vec![
                "--width", "32", "--height", "32", "--format", "png", "--output", "out.png",
                "in.svg"
            ]
        );
    }

    #[test]
    fn test_missing_tool() {
        let err =
            ExternalRasterizer::locate_program(RasterTool::Inkscape, "retint-no-such-rasterizer")
                .unwrap_err();
        assert!(matches!(err, RetintError::MissingTool { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_run_tool_success_and_failure() {
        assert!(run_tool("true", &mut Command::new("true")).is_ok());

        let mut failing = Command::new("sh");
        failing.args(["-c", "echo broken >&2; exit 3"]);
        let err = run_tool("sh", &mut failing).unwrap_err();
        match err {
            RetintError::Tool { tool, message } => {
                assert_eq!(tool, "sh");
                assert!(message.contains("broken"), "{}", message);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unstartable_program() {
        let rasterizer =
            ExternalRasterizer::with_program(RasterTool::RsvgConvert, "/nonexistent/rsvg-convert");
        let err = rasterizer
            .rasterize(Path::new("a.svg"), Path::new("a.png"), 1, 1)
            .unwrap_err();
        assert!(matches!(err, RetintError::Tool { .. }));
    }

    #[test]
    fn test_serde_names() {
        let tool: RasterTool = serde_yaml::from_str("rsvg-convert").unwrap();
        assert_eq!(tool, RasterTool::RsvgConvert);
    }
}
