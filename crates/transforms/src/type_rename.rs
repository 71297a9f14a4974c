use crate::Transform;
use indexmap::IndexMap;
use rand::rngs::StdRng;
use regex::Regex;
use shroud_core::names::generate_name;
use shroud_core::symbols;
use shroud_core::words::WordScanner;
use shroud_core::SourceUnit;
use shroud_utils::errors::TransformError;
use tracing::debug;

/// `class Foo` / `interface Foo` declarations; group 2 is the declared name.
pub const TYPE_DECL_PATTERN: &str = r"(class|interface)\s+([a-zA-Z_][a-zA-Z0-9_]*)";

/// Renames declared classes and interfaces to `_C` plus eight random characters.
///
/// Only standard library names are exempt. The mapping is local to one run; it does
/// not go into the persistent rename table.
pub struct TypeRename {
    pattern: Regex,
    words: WordScanner,
}

impl TypeRename {
    pub fn new() -> Result<Self, TransformError> {
        Ok(Self {
            pattern: Regex::new(TYPE_DECL_PATTERN)?,
            words: WordScanner::new()?,
        })
    }
}

impl Transform for TypeRename {
    fn name(&self) -> &'static str {
        "TypeRename"
    }

    fn apply(&self, unit: &mut SourceUnit<'_>, rng: &mut StdRng) -> Result<bool, TransformError> {
        let mut types: IndexMap<String, String> = IndexMap::new();
        for caps in self.pattern.captures_iter(&unit.code) {
            let name = &caps[2];
            if symbols::is_std_class(name) || types.contains_key(name) {
                continue;
            }
            let fragment: String = generate_name(rng).chars().take(8).collect();
            types.insert(name.to_string(), format!("_C{fragment}"));
        }

        if types.is_empty() {
            return Ok(false);
        }
        debug!("Renaming {} declared types", types.len());
        unit.stats.types_renamed += types.len();

        let code = self
            .words
            .replace(&unit.code, |word| types.get(word).map(String::as_str))
            .into_owned();
        Ok(unit.replace_code(code))
    }
}
