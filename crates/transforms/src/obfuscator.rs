use crate::anti_debug::AntiDebug;
use crate::control_flow::ControlFlowFlattening;
use crate::dead_code::DeadCodeInjection;
use crate::identifier_rename::IdentifierRename;
use crate::pass::{self, PassRecord};
use crate::reflection::ReflectionObfuscation;
use crate::string_encryption::StringEncryption;
use crate::type_rename::TypeRename;
use crate::{PassConfig, Transform};
use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Sha3_256};
use shroud_core::{OptionSet, RenameTable, SourceUnit, UnitStats};
use shroud_utils::errors::TransformError;

/// Serialisable pipeline configuration, as read from a `--config` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObfuscationConfig {
    /// Instance options (`encryptionKey`, `key`)
    pub options: OptionSet,
    /// Which passes run
    pub passes: PassConfig,
}

impl ObfuscationConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Where the key used for literal encryption came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeySource {
    /// The per-call `key` option
    Call,
    /// The instance's `encryptionKey`, possibly the built-in default
    Configured,
}

/// Result of the obfuscation pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObfuscationResult {
    /// The rewritten source text
    pub obfuscated_code: String,
    /// Original source size in bytes
    pub original_size: usize,
    /// Obfuscated source size in bytes
    pub obfuscated_size: usize,
    /// Size increase as percentage
    pub size_increase_percentage: f64,
    /// Per-pass counters
    pub stats: UnitStats,
    /// Metadata about the obfuscation process
    pub metadata: ObfuscationMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObfuscationMetadata {
    /// Names of transforms that changed the text
    pub transforms_applied: Vec<String>,
    /// Every pass that ran, in order
    pub passes: Vec<PassRecord>,
    pub key_source: KeySource,
    /// Hex SHA3-256 of the obfuscated text
    pub integrity_hash: String,
    pub generated_at: DateTime<Utc>,
}

/// Runs the fixed pass sequence over source text.
///
/// The rename table and the random generator live as long as the instance, so an
/// identifier keeps its generated name across calls to [`Obfuscator::process`].
/// Calls need `&mut self`; share an instance between threads behind a lock.
pub struct Obfuscator {
    options: OptionSet,
    pass_config: PassConfig,
    renames: RenameTable,
    rng: StdRng,
}

impl std::fmt::Debug for Obfuscator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Obfuscator")
            .field("options", &self.options)
            .field("pass_config", &self.pass_config)
            .field("renames", &format!("{} entries", self.renames.len()))
            .finish()
    }
}

impl Default for Obfuscator {
    fn default() -> Self {
        Self::new(OptionSet::new())
    }
}

impl Obfuscator {
    /// Creates an obfuscator with every pass enabled.
    pub fn new(mut options: OptionSet) -> Self {
        options.ensure_encryption_key();
        Self {
            options,
            pass_config: PassConfig::default(),
            renames: RenameTable::new(),
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn from_config(config: ObfuscationConfig) -> Self {
        Self::new(config.options).with_pass_config(config.passes)
    }

    pub fn with_pass_config(mut self, pass_config: PassConfig) -> Self {
        self.pass_config = pass_config;
        self
    }

    /// The configured key; falls back to the built-in default.
    pub fn encryption_key(&self) -> &str {
        self.options
            .encryption_key()
            .unwrap_or(shroud_core::options::DEFAULT_ENCRYPTION_KEY)
    }

    pub fn options(&self) -> &OptionSet {
        &self.options
    }

    pub fn pass_config(&self) -> &PassConfig {
        &self.pass_config
    }

    pub fn rename_table(&self) -> &RenameTable {
        &self.renames
    }

    /// Obfuscates `code`. A `key` in `options` overrides the configured key for
    /// literal encryption only.
    pub fn process(&mut self, code: &str, options: &OptionSet) -> Result<String, TransformError> {
        self.process_with_report(code, options).map(|result| result.obfuscated_code)
    }

    /// Same as [`Obfuscator::process`] with no per-call options.
    pub fn process_default(&mut self, code: &str) -> Result<String, TransformError> {
        self.process(code, &OptionSet::new())
    }

    pub fn process_with_report(
        &mut self,
        code: &str,
        options: &OptionSet,
    ) -> Result<ObfuscationResult, TransformError> {
        let (key, key_source) = match options.key() {
            Some(key) => (key.to_string(), KeySource::Call),
            None => (self.encryption_key().to_string(), KeySource::Configured),
        };

        tracing::debug!("Starting obfuscation pipeline:");
        tracing::debug!("  Input size: {} bytes", code.len());
        tracing::debug!("  Key source: {:?}", key_source);
        tracing::debug!("  Known renames: {}", self.renames.len());

        let passes = self.build_passes(&key)?;
        let mut unit = SourceUnit::new(code, &mut self.renames);
        let records = pass::run(&mut unit, &passes, &mut self.rng)?;

        let stats = unit.stats.clone();
        let obfuscated_code = unit.into_code();
        let original_size = code.len();
        let obfuscated_size = obfuscated_code.len();
        let size_increase_percentage = if original_size == 0 {
            0.0
        } else {
            (obfuscated_size as f64 - original_size as f64) / original_size as f64 * 100.0
        };

        tracing::debug!(
            "  Output size: {} bytes ({:+.1}%)",
            obfuscated_size,
            size_increase_percentage
        );

        let metadata = ObfuscationMetadata {
            transforms_applied: records
                .iter()
                .filter(|r| r.changed)
                .map(|r| r.name.clone())
                .collect(),
            integrity_hash: hex::encode(Sha3_256::digest(obfuscated_code.as_bytes())),
            passes: records,
            key_source,
            generated_at: Utc::now(),
        };

        Ok(ObfuscationResult {
            obfuscated_code,
            original_size,
            obfuscated_size,
            size_increase_percentage,
            stats,
            metadata,
        })
    }

    /// Enabled passes in their fixed order.
    fn build_passes(&self, key: &str) -> Result<Vec<Box<dyn Transform>>, TransformError> {
        let cfg = &self.pass_config;
        let mut passes: Vec<Box<dyn Transform>> = Vec::new();

        if cfg.encrypt_strings {
            passes.push(Box::new(StringEncryption::new(key)?));
        }
        if cfg.rename_types {
            passes.push(Box::new(TypeRename::new()?));
        }
        if cfg.obfuscate_reflection {
            passes.push(Box::new(ReflectionObfuscation::new(self.encryption_key())?));
        }
        if cfg.rename_identifiers {
            passes.push(Box::new(IdentifierRename::new()?));
        }
        if cfg.flatten_control_flow {
            passes.push(Box::new(ControlFlowFlattening::new()?));
        }
        if cfg.inject_dead_code {
            passes.push(Box::new(DeadCodeInjection::new(cfg)?));
        }
        if cfg.anti_debug {
            passes.push(Box::new(AntiDebug::new()?));
        }
        Ok(passes)
    }
}
