/// Module for the `decrypt` subcommand, which opens a single literal envelope.
///
/// Useful for checking what a `StringDecryptor.decrypt(...)` call in obfuscated output
/// evaluates to without running the program.
use async_trait::async_trait;
use clap::Args;
use shroud_core::cipher;
use shroud_core::options::DEFAULT_ENCRYPTION_KEY;
use shroud_utils::errors::ObfuscateError;
use std::error::Error;

/// Arguments for the `decrypt` subcommand.
#[derive(Args)]
pub struct DecryptArgs {
    /// Base64 envelope as found in the obfuscated source.
    pub envelope: String,
    /// Key the envelope was sealed with.
    #[arg(short, long, default_value = DEFAULT_ENCRYPTION_KEY)]
    pub key: String,
}

#[async_trait]
impl super::Command for DecryptArgs {
    async fn execute(self) -> Result<(), Box<dyn Error>> {
        let plaintext = cipher::decrypt(self.envelope.trim(), &self.key)
            .ok_or(ObfuscateError::DecryptionFailed)?;
        println!("{plaintext}");
        Ok(())
    }
}
