use crate::Transform;
use indexmap::IndexSet;
use rand::rngs::StdRng;
use shroud_core::symbols;
use shroud_core::words::WordScanner;
use shroud_core::SourceUnit;
use shroud_utils::errors::TransformError;
use tracing::debug;

/// Renames every identifier that is not protected, through the persistent rename table.
///
/// Runs over the whole text, so names introduced by earlier passes (the decryptor
/// stub, `_str_<n>` constants, renamed types) are renamed as well.
pub struct IdentifierRename {
    words: WordScanner,
}

impl IdentifierRename {
    pub fn new() -> Result<Self, TransformError> {
        Ok(Self {
            words: WordScanner::new()?,
        })
    }
}

impl Transform for IdentifierRename {
    fn name(&self) -> &'static str {
        "IdentifierRename"
    }

    fn apply(&self, unit: &mut SourceUnit<'_>, rng: &mut StdRng) -> Result<bool, TransformError> {
        let candidates: IndexSet<&str> = self
            .words
            .words(&unit.code)
            .into_iter()
            .filter(|word| !symbols::is_protected(word))
            .collect();

        let known = unit.renames.len();
        for word in &candidates {
            unit.renames.assign(word, rng);
        }
        debug!(
            "Renaming {} identifiers ({} new table entries)",
            candidates.len(),
            unit.renames.len() - known
        );
        unit.stats.identifiers_renamed += candidates.len();

        if unit.renames.is_empty() {
            return Ok(false);
        }
        let renames = &*unit.renames;
        let code = self
            .words
            .replace(&unit.code, |word| renames.get(word))
            .into_owned();
        Ok(unit.replace_code(code))
    }
}
