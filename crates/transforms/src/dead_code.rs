use crate::templates::DEAD_CODE_SNIPPETS;
use crate::{PassConfig, Transform};
use rand::{rngs::StdRng, Rng};
use regex::Regex;
use shroud_core::SourceUnit;
use shroud_utils::errors::TransformError;
use tracing::debug;

/// An opening brace that ends its line.
pub const BLOCK_OPEN_PATTERN: &str = r"\{\n";

/// Inserts inert statements right after the first few block openings.
pub struct DeadCodeInjection {
    pattern: Regex,
    max_insertions: usize,
}

impl DeadCodeInjection {
    pub fn new(config: &PassConfig) -> Result<Self, TransformError> {
        Ok(Self {
            pattern: Regex::new(BLOCK_OPEN_PATTERN)?,
            max_insertions: config.max_dead_code_insertions,
        })
    }
}

impl Transform for DeadCodeInjection {
    fn name(&self) -> &'static str {
        "DeadCodeInjection"
    }

    fn apply(&self, unit: &mut SourceUnit<'_>, rng: &mut StdRng) -> Result<bool, TransformError> {
        let code = &unit.code;
        let mut out = String::with_capacity(code.len() + 80 * self.max_insertions);
        let mut last = 0;
        let mut inserted = 0;

        // offsets come from the original text; slices before each opening carry
        // every earlier insertion along with them
        for m in self.pattern.find_iter(code).take(self.max_insertions) {
            out.push_str(&code[last..m.end()]);
            out.push_str(DEAD_CODE_SNIPPETS[rng.random_range(0..DEAD_CODE_SNIPPETS.len())]);
            last = m.end();
            inserted += 1;
        }

        if inserted == 0 {
            debug!("No block openings for dead code");
            return Ok(false);
        }
        out.push_str(&code[last..]);

        debug!("Inserted {} dead code snippets", inserted);
        unit.stats.dead_code_insertions += inserted;
        Ok(unit.replace_code(out))
    }
}
