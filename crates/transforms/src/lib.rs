pub mod anti_debug;
pub mod control_flow;
pub mod dead_code;
pub mod identifier_rename;
pub mod obfuscator;
pub mod pass;
pub mod reflection;
pub mod string_encryption;
pub mod templates;
pub mod type_rename;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use shroud_core::SourceUnit;
use shroud_utils::errors::TransformError;

/// Trait for source text obfuscation transforms.
pub trait Transform: Send + Sync {
    /// Returns the transform's name for logging and identification.
    fn name(&self) -> &'static str;
    /// Applies the transform to the source unit, returning whether changes were made.
    fn apply(&self, unit: &mut SourceUnit<'_>, rng: &mut StdRng) -> Result<bool, TransformError>;
}

/// Selects which passes run. The order they run in is fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PassConfig {
    /// Replace string literals with decrypt-bound constants
    pub encrypt_strings: bool,
    /// Rename declared classes and interfaces
    pub rename_types: bool,
    /// Encrypt class names passed to `Class.forName`
    pub obfuscate_reflection: bool,
    /// Rename every non-protected identifier
    pub rename_identifiers: bool,
    /// Turn simple if/else statements into switch dispatch
    pub flatten_control_flow: bool,
    /// Insert inert statements after block openings
    pub inject_dead_code: bool,
    /// Prepend the debugger checks and hook them into `main`
    pub anti_debug: bool,
    /// Maximum number of dead-code snippets inserted per run
    pub max_dead_code_insertions: usize,
}

impl Default for PassConfig {
    fn default() -> Self {
        Self {
            encrypt_strings: true,
            rename_types: true,
            obfuscate_reflection: true,
            rename_identifiers: true,
            flatten_control_flow: true,
            inject_dead_code: true,
            anti_debug: true,
            max_dead_code_insertions: 3,
        }
    }
}
