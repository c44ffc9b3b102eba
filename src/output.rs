//! Terminal output formatting for the retint CLI.
//!
//! Status lines go to stderr with the verb right-aligned, the way Cargo
//! prints them. Stdout is left to commands whose output is meant to be
//! piped, such as `retint colour`.

use std::io::{self, IsTerminal, Write};
use std::path::Path;

use crate::types::Colour;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

const VERB_WIDTH: usize = 12;

/// Status printer for the pipeline stages.
///
/// ANSI styling is used when stderr is a terminal and `NO_COLOR` is unset.
/// Detail lines (one per file or asset) only appear with `--verbose`.
pub struct Printer {
    color: bool,
    verbose: bool,
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
            verbose: false,
        }
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// A stage starting or finishing, e.g.
    /// `     Copying Yaru -> ~/.local/share/themes/Yaru-Blue`.
    pub fn status(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    pub fn success(&self, verb: &str, message: &str) {
        self.print_line(GREEN, verb, message);
    }

    pub fn info(&self, verb: &str, message: &str) {
        self.print_line(CYAN, verb, message);
    }

    /// Per-file line, printed only in verbose mode.
    pub fn detail(&self, verb: &str, message: &str) {
        if self.verbose {
            self.print_line(DIM, verb, message);
        }
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.print_line(YELLOW, verb, message);
    }

    pub fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    pub fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    /// The colour's hex code, preceded by a true-colour block when styling
    /// is on.
    pub fn swatch(&self, colour: Colour) -> String {
        if self.color {
            let [r, g, b] = colour.to_rgb();
            format!("\x1b[48;2;{r};{g};{b}m  {RESET} {colour}")
        } else {
            colour.to_string()
        }
    }

    fn paint(&self, style: &str, text: &str) -> String {
        if self.color {
            format!("{style}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn print_line(&self, color: &str, verb: &str, message: &str) {
        let verb = format!("{verb:>VERB_WIDTH$}");
        let verb = if self.color {
            format!("{BOLD}{color}{verb}{RESET}")
        } else {
            verb
        };
        let _ = writeln!(io::stderr().lock(), "{verb} {message}");
    }
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

/// `plural(1, "file", "files")` → "1 file".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    format!("{} {}", n, if n == 1 { singular } else { pluralized })
}

/// Shorten a path for display: relative to the working directory when
/// inside it, `~/...` when inside the home directory.
pub fn display_path(path: &Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            return match relative.display().to_string() {
                s if s.is_empty() => ".".to_string(),
                s => s,
            };
        }
    }

    if let Some(home) = dirs_next::home_dir() {
        if let Ok(relative) = path.strip_prefix(&home) {
            return Path::new("~").join(relative).display().to_string();
        }
    }

    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "file", "files"), "1 file");
        assert_eq!(plural(0, "file", "files"), "0 files");
        assert_eq!(plural(14, "asset rendered", "assets rendered"), "14 assets rendered");
    }

    #[test]
    fn test_display_path_outside_cwd_and_home() {
        let p = Path::new("/nonexistent/path/to/theme");
        assert_eq!(display_path(p), "/nonexistent/path/to/theme");
    }

    #[test]
    fn test_display_path_cwd() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(display_path(&cwd), ".");
        assert_eq!(display_path(&cwd.join("themes")), "themes");
    }

    #[test]
    fn test_plain_styling() {
        let printer = Printer {
            color: false,
            verbose: true,
        };
        assert_eq!(printer.bold("Blue"), "Blue");
        assert_eq!(printer.swatch(Colour::rgb(0x35, 0x84, 0xE4)), "#3584E4");
    }

    #[test]
    fn test_swatch_uses_true_colour() {
        let printer = Printer {
            color: true,
            verbose: false,
        };
        let swatch = printer.swatch(Colour::rgb(53, 132, 228));
        assert!(swatch.starts_with("\x1b[48;2;53;132;228m"));
        assert!(swatch.ends_with("#3584E4"));
    }
}
