use async_trait::async_trait;
use clap::Subcommand;
use std::error::Error;

pub mod decrypt;
pub mod obfuscate;

#[derive(Subcommand)]
pub enum Cmd {
    /// Obfuscate a Java source file (the default when no subcommand is given)
    Obfuscate(obfuscate::ObfuscateArgs),

    /// Print the plaintext of an encrypted literal envelope
    Decrypt(decrypt::DecryptArgs),
}

#[async_trait]
pub trait Command {
    async fn execute(self) -> Result<(), Box<dyn Error>>;
}

#[async_trait]
impl Command for Cmd {
    async fn execute(self) -> Result<(), Box<dyn Error>> {
        match self {
            Cmd::Obfuscate(args) => args.execute().await,
            Cmd::Decrypt(args) => args.execute().await,
        }
    }
}
