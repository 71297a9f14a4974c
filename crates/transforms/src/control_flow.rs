use crate::Transform;
use rand::{rngs::StdRng, Rng};
use regex::{Captures, Regex};
use shroud_core::SourceUnit;
use shroud_utils::errors::TransformError;
use tracing::debug;

/// `if (<cond>) { <block> }` with an optional `else { <block> }`.
///
/// Blocks stop at the first `}`, so nested braces are not understood: an inner
/// conditional either stays as is or gets cut at its own closing brace.
pub const BRANCH_PATTERN: &str = r"if\s*\(([^)]+)\)\s*\{([^}]+)\}(?:\s*else\s*\{([^}]+)\})?";

/// Upper bound (exclusive) for dispatch variable suffixes.
const DISPATCH_SUFFIX_RANGE: u32 = 10_000;

/// Flattens single-level conditionals into a switch over a dispatch variable.
pub struct ControlFlowFlattening {
    pattern: Regex,
}

impl ControlFlowFlattening {
    pub fn new() -> Result<Self, TransformError> {
        Ok(Self {
            pattern: Regex::new(BRANCH_PATTERN)?,
        })
    }

    fn dispatch(var: &str, condition: &str, if_block: &str, else_block: Option<&str>) -> String {
        let mut out = format!(
            "int {var} = ({condition}) ? 1 : 0;\nswitch ({var}) {{\n    case 1:\n        {if_block}\n        break;\n"
        );
        if let Some(else_block) = else_block.filter(|b| !b.trim().is_empty()) {
            out.push_str(&format!("    default:\n        {else_block}\n        break;\n"));
        }
        out.push('}');
        out
    }
}

impl Transform for ControlFlowFlattening {
    fn name(&self) -> &'static str {
        "ControlFlowFlattening"
    }

    fn apply(&self, unit: &mut SourceUnit<'_>, rng: &mut StdRng) -> Result<bool, TransformError> {
        let mut flattened = 0;
        let code = self
            .pattern
            .replace_all(&unit.code, |caps: &Captures<'_>| {
                flattened += 1;
                let var = format!("_sw{}", rng.random_range(0..DISPATCH_SUFFIX_RANGE));
                Self::dispatch(&var, &caps[1], &caps[2], caps.get(3).map(|m| m.as_str()))
            })
            .into_owned();

        if flattened == 0 {
            return Ok(false);
        }
        debug!("Flattened {} conditionals", flattened);
        unit.stats.branches_flattened += flattened;
        Ok(unit.replace_code(code))
    }
}
