use crate::Transform;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use shroud_core::SourceUnit;
use shroud_utils::errors::TransformError;
use tracing::info;

/// What a single pass did to the unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassRecord {
    pub name: String,
    pub changed: bool,
    pub size_before: usize,
    pub size_after: usize,
}

impl PassRecord {
    pub fn delta(&self) -> i64 {
        self.size_after as i64 - self.size_before as i64
    }
}

/// Trait for running a sequence of obfuscation transforms on a source unit.
pub trait Pass {
    fn run(
        &self,
        unit: &mut SourceUnit<'_>,
        passes: &[Box<dyn Transform>],
        rng: &mut StdRng,
    ) -> Result<Vec<PassRecord>, TransformError>;
}

/// Default implementation of the Pass trait.
///
/// Every pass is applied in order and its result is always kept; the first
/// failing pass aborts the run.
pub struct DefaultPass;

impl Pass for DefaultPass {
    fn run(
        &self,
        unit: &mut SourceUnit<'_>,
        passes: &[Box<dyn Transform>],
        rng: &mut StdRng,
    ) -> Result<Vec<PassRecord>, TransformError> {
        let mut records = Vec::with_capacity(passes.len());

        for pass in passes {
            let size_before = unit.code.len();
            let changed = pass.apply(unit, rng)?;
            let record = PassRecord {
                name: pass.name().to_string(),
                changed,
                size_before,
                size_after: unit.code.len(),
            };

            info!(
                "{:>22} {:+} bytes {}",
                record.name,
                record.delta(),
                if changed { "✓" } else { "·" }
            );
            records.push(record);
        }
        Ok(records)
    }
}

/// Convenience function to run the default pass.
pub fn run(
    unit: &mut SourceUnit<'_>,
    passes: &[Box<dyn Transform>],
    rng: &mut StdRng,
) -> Result<Vec<PassRecord>, TransformError> {
    DefaultPass.run(unit, passes, rng)
}
