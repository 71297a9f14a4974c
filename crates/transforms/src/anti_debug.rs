use crate::templates::{ANTI_DEBUG_CALL, ANTI_DEBUG_STUB};
use crate::Transform;
use rand::rngs::StdRng;
use regex::{Captures, Regex};
use shroud_core::SourceUnit;
use shroud_utils::errors::TransformError;
use tracing::{debug, warn};

/// Signature and opening brace of `public static void main(...)`.
pub const ENTRY_POINT_PATTERN: &str = r"(public\s+static\s+void\s+main\s*\([^)]*\)\s*\{)";

/// Prepends the `AntiDebug` routine and calls it first thing in `main`.
pub struct AntiDebug {
    pattern: Regex,
}

impl AntiDebug {
    pub fn new() -> Result<Self, TransformError> {
        Ok(Self {
            pattern: Regex::new(ENTRY_POINT_PATTERN)?,
        })
    }
}

impl Transform for AntiDebug {
    fn name(&self) -> &'static str {
        "AntiDebug"
    }

    fn apply(&self, unit: &mut SourceUnit<'_>, _rng: &mut StdRng) -> Result<bool, TransformError> {
        let wrapped = format!("{ANTI_DEBUG_STUB}{}", unit.code);

        let hooked = self.pattern.is_match(&wrapped);
        let code = self
            .pattern
            .replacen(&wrapped, 1, |caps: &Captures<'_>| {
                format!("{}\n        {ANTI_DEBUG_CALL}", &caps[1])
            })
            .into_owned();

        if hooked {
            debug!("Hooked self-defense call into main");
        } else {
            warn!("No `public static void main` found; self-defense routine is never called");
        }
        unit.stats.entry_point_hooked = hooked;
        Ok(unit.replace_code(code))
    }
}
