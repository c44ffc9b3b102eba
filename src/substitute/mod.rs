//! Text substitution over theme trees.
//!
//! Rules pair a file-name glob with a case-insensitive pattern and a
//! literal replacement. All rules that apply to a file are folded into a
//! single pass so one rule never rewrites another rule's output.

mod engine;
mod glob;
mod rule;

pub use engine::{
    replace_in_tree, substitute_file, substitute_tree, write_atomic, FileOutcome,
    SubstitutionReport,
};
pub use glob::{FileFilter, Glob};
pub use rule::{Applied, CompiledRules, Pattern, SubstitutionRule};
