use crate::templates;
use crate::Transform;
use rand::rngs::StdRng;
use regex::{Captures, Regex};
use shroud_core::{cipher, SourceUnit};
use shroud_utils::errors::TransformError;
use tracing::debug;

/// `Class.forName("<literal>")`; group 1 is the class name.
pub const FOR_NAME_PATTERN: &str = r#"Class\.forName\("([^"]+)"\)"#;

/// Hides class names handed to `Class.forName` behind a decrypt call.
///
/// Uses the obfuscator's configured key, which may differ from the per-call key
/// the string encryption pass used in the same run.
pub struct ReflectionObfuscation {
    key: String,
    pattern: Regex,
}

impl ReflectionObfuscation {
    pub fn new(key: impl Into<String>) -> Result<Self, TransformError> {
        Ok(Self {
            key: key.into(),
            pattern: Regex::new(FOR_NAME_PATTERN)?,
        })
    }
}

impl Transform for ReflectionObfuscation {
    fn name(&self) -> &'static str {
        "ReflectionObfuscation"
    }

    fn apply(&self, unit: &mut SourceUnit<'_>, _rng: &mut StdRng) -> Result<bool, TransformError> {
        let mut rewritten = 0;
        let code = self
            .pattern
            .replace_all(&unit.code, |caps: &Captures<'_>| {
                match cipher::encrypt(&caps[1], &self.key) {
                    Some(envelope) => {
                        rewritten += 1;
                        format!(
                            "Class.forName({})",
                            templates::decrypt_call(&envelope, &self.key)
                        )
                    }
                    None => caps[0].to_string(),
                }
            })
            .into_owned();

        if rewritten > 0 {
            debug!("Obfuscated {} reflective class lookups", rewritten);
        }
        unit.stats.reflection_calls += rewritten;
        Ok(unit.replace_code(code))
    }
}
