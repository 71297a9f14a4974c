use crate::rename::RenameTable;
use serde::{Deserialize, Serialize};

/// Counters the passes bump while rewriting a unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitStats {
    pub literals_encrypted: usize,
    pub types_renamed: usize,
    pub reflection_calls: usize,
    /// Distinct renameable identifiers seen in this run.
    pub identifiers_renamed: usize,
    pub branches_flattened: usize,
    pub dead_code_insertions: usize,
    /// Whether the self-defense call reached an entry point.
    pub entry_point_hooked: bool,
}

/// The text every pass reads and rewrites, together with the obfuscator's
/// persistent rename table.
#[derive(Debug)]
pub struct SourceUnit<'r> {
    /// Whole program text as produced by the previous pass.
    pub code: String,
    pub renames: &'r mut RenameTable,
    pub stats: UnitStats,
}

impl<'r> SourceUnit<'r> {
    pub fn new(code: impl Into<String>, renames: &'r mut RenameTable) -> Self {
        Self {
            code: code.into(),
            renames,
            stats: UnitStats::default(),
        }
    }

    /// Replaces the text, returning whether it actually changed.
    pub fn replace_code(&mut self, code: String) -> bool {
        if code == self.code {
            return false;
        }
        self.code = code;
        true
    }

    pub fn into_code(self) -> String {
        self.code
    }
}
