/// Module for the `obfuscate` subcommand, which runs the obfuscation pipeline over a
/// Java source file or a whole source tree.
///
/// This module reads the input, builds the pipeline from an optional JSON config plus
/// command-line overrides, and writes the obfuscated source to stdout, a file, or a
/// mirrored output directory. It can also emit a JSON report and the identifier
/// rename table.
use async_trait::async_trait;
use clap::Args;
use shroud_core::options::{ENCRYPTION_KEY, KEY};
use shroud_core::OptionSet;
use shroud_transform::obfuscator::{ObfuscationConfig, ObfuscationResult, Obfuscator};
use shroud_utils::errors::ObfuscateError;
use std::collections::BTreeMap;
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Arguments for the `obfuscate` subcommand.
#[derive(Args, Debug, Default, Clone)]
pub struct ObfuscateArgs {
    /// Java source file to obfuscate.
    pub input: Option<PathBuf>,
    /// Obfuscate every `.java` file under this directory with one shared rename table.
    #[arg(long, value_name = "DIR", conflicts_with = "input")]
    pub batch: Option<PathBuf>,
    /// Write the obfuscated source here instead of stdout. With `--batch`, the output
    /// directory (default `<DIR>_obfuscated`).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    /// Key for this run's string literals (overrides the configured key).
    #[arg(short, long)]
    pub key: Option<String>,
    /// Configured key, also used for `Class.forName` arguments.
    #[arg(long)]
    pub encryption_key: Option<String>,
    /// JSON file with `options` and `passes` sections.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Skip string literal encryption.
    #[arg(long)]
    pub no_strings: bool,
    /// Skip class and interface renaming.
    #[arg(long)]
    pub no_types: bool,
    /// Skip `Class.forName` obfuscation.
    #[arg(long)]
    pub no_reflection: bool,
    /// Skip identifier renaming.
    #[arg(long)]
    pub no_identifiers: bool,
    /// Skip control-flow flattening.
    #[arg(long)]
    pub no_control_flow: bool,
    /// Skip dead code injection.
    #[arg(long)]
    pub no_dead_code: bool,
    /// Skip the anti-debugging routine.
    #[arg(long)]
    pub no_anti_debug: bool,
    /// Path to emit the obfuscation report as JSON (optional).
    #[arg(long)]
    pub emit: Option<PathBuf>,
    /// Path to write the identifier rename table as JSON (optional).
    #[arg(long)]
    pub mapping: Option<PathBuf>,
}

impl ObfuscateArgs {
    /// Layers command-line flags over `config`. Flags only ever turn passes off.
    fn apply_overrides(&self, config: &mut ObfuscationConfig) {
        if let Some(key) = &self.encryption_key {
            config.options.set(ENCRYPTION_KEY, key.as_str());
        }

        let passes = &mut config.passes;
        passes.encrypt_strings &= !self.no_strings;
        passes.rename_types &= !self.no_types;
        passes.obfuscate_reflection &= !self.no_reflection;
        passes.rename_identifiers &= !self.no_identifiers;
        passes.flatten_control_flow &= !self.no_control_flow;
        passes.inject_dead_code &= !self.no_dead_code;
        passes.anti_debug &= !self.no_anti_debug;
    }

    /// Options handed to each `process` call.
    fn call_options(&self, config: &ObfuscationConfig) -> OptionSet {
        let mut options = OptionSet::new();
        if let Some(key) = self.key.as_deref().or(config.options.key()) {
            options.set(KEY, key);
        }
        options
    }

    async fn obfuscate_file(
        &self,
        input: &Path,
        obfuscator: &mut Obfuscator,
        options: &OptionSet,
    ) -> Result<(), Box<dyn Error>> {
        let code = read_file(input).await?;
        let result = obfuscator.process_with_report(&code, options)?;
        log_summary(&result);

        match &self.output {
            Some(path) => write_file(path, &result.obfuscated_code).await?,
            None => print!("{}", result.obfuscated_code),
        }

        if let Some(path) = &self.emit {
            write_file(path, &serde_json::to_string_pretty(&result)?).await?;
            info!("Wrote obfuscation report to {}", path.display());
        }
        Ok(())
    }

    /// Mirrors every `.java` file under `dir` into the output directory. A file that
    /// cannot be read or written is logged and skipped.
    async fn obfuscate_batch(
        &self,
        dir: &Path,
        obfuscator: &mut Obfuscator,
        options: &OptionSet,
    ) -> Result<(), Box<dyn Error>> {
        let output_dir = self
            .output
            .clone()
            .unwrap_or_else(|| default_batch_output(dir));
        let files = java_files(dir).await?;
        info!("Processing {} files in batch mode", files.len());

        let mut reports = BTreeMap::new();
        let mut failed = 0;
        for (n, file) in files.iter().enumerate() {
            let relative = file.strip_prefix(dir).unwrap_or(file);
            let target = output_dir.join(relative);
            match obfuscate_into(file, &target, obfuscator, options).await {
                Ok(result) => {
                    info!("[{}/{}] {}", n + 1, files.len(), relative.display());
                    reports.insert(relative.display().to_string(), result);
                }
                Err(e) => {
                    failed += 1;
                    error!("Failed to process {}: {}", file.display(), e);
                }
            }
        }
        info!(
            "Batch complete: {} successful, {} failed, output in {}",
            reports.len(),
            failed,
            output_dir.display()
        );

        if let Some(path) = &self.emit {
            write_file(path, &serde_json::to_string_pretty(&reports)?).await?;
            info!("Wrote {} reports to {}", reports.len(), path.display());
        }
        Ok(())
    }
}

/// Executes the `obfuscate` subcommand and writes the obfuscated source.
#[async_trait]
impl super::Command for ObfuscateArgs {
    async fn execute(self) -> Result<(), Box<dyn Error>> {
        if self.input.is_none() && self.batch.is_none() {
            return Err(ObfuscateError::MissingInput.into());
        }

        let mut config = match &self.config {
            Some(path) => load_config(path).await?,
            None => ObfuscationConfig::default(),
        };
        self.apply_overrides(&mut config);
        let options = self.call_options(&config);
        let mut obfuscator = Obfuscator::from_config(config);

        match (&self.batch, &self.input) {
            (Some(dir), _) => self.obfuscate_batch(dir, &mut obfuscator, &options).await?,
            (None, Some(input)) => self.obfuscate_file(input, &mut obfuscator, &options).await?,
            (None, None) => return Err(ObfuscateError::MissingInput.into()),
        }

        if let Some(path) = &self.mapping {
            let mapping = serde_json::to_string_pretty(obfuscator.rename_table())?;
            write_file(path, &mapping).await?;
            info!(
                "Wrote {} renames to {}",
                obfuscator.rename_table().len(),
                path.display()
            );
        }
        Ok(())
    }
}

/// `src/` becomes `src_obfuscated/`.
fn default_batch_output(dir: &Path) -> PathBuf {
    match dir.file_name() {
        Some(name) => {
            let mut name = name.to_os_string();
            name.push("_obfuscated");
            dir.with_file_name(name)
        }
        None => PathBuf::from("obfuscated"),
    }
}

/// All `.java` files under `root`, sorted so the rename table fills in a stable order.
async fn java_files(root: &Path) -> Result<Vec<PathBuf>, ObfuscateError> {
    let mut pending = vec![root.to_path_buf()];
    let mut files = Vec::new();

    while let Some(dir) = pending.pop() {
        let mut entries = tokio::fs::read_dir(&dir)
            .await
            .map_err(|source| file_error(&dir, source))?;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|source| file_error(&dir, source))?
        {
            let path = entry.path();
            let file_type = entry
                .file_type()
                .await
                .map_err(|source| file_error(&path, source))?;
            if file_type.is_dir() {
                pending.push(path);
            } else if path.extension().is_some_and(|ext| ext == "java") {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

async fn obfuscate_into(
    input: &Path,
    target: &Path,
    obfuscator: &mut Obfuscator,
    options: &OptionSet,
) -> Result<ObfuscationResult, ObfuscateError> {
    let code = read_file(input).await?;
    let result = obfuscator.process_with_report(&code, options)?;
    if let Some(parent) = target.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| file_error(parent, source))?;
    }
    write_file(target, &result.obfuscated_code).await?;
    Ok(result)
}

fn file_error(path: &Path, source: std::io::Error) -> ObfuscateError {
    ObfuscateError::File {
        path: path.display().to_string(),
        source,
    }
}

async fn read_file(path: &Path) -> Result<String, ObfuscateError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| file_error(path, source))
}

async fn write_file(path: &Path, contents: &str) -> Result<(), ObfuscateError> {
    tokio::fs::write(path, contents)
        .await
        .map_err(|source| file_error(path, source))
}

async fn load_config(path: &Path) -> Result<ObfuscationConfig, ObfuscateError> {
    let json = read_file(path).await?;
    ObfuscationConfig::from_json(&json).map_err(|source| ObfuscateError::Config {
        path: path.display().to_string(),
        source,
    })
}

fn log_summary(result: &ObfuscationResult) {
    info!(
        "Applied {} transforms: {:?}",
        result.metadata.transforms_applied.len(),
        result.metadata.transforms_applied
    );
    info!(
        "Encrypted {} literals, renamed {} identifiers",
        result.stats.literals_encrypted, result.stats.identifiers_renamed
    );
    info!(
        "Size change: {} → {} bytes ({:+.1}%)",
        result.original_size, result.obfuscated_size, result.size_increase_percentage
    );
}
