use thiserror::Error;

/// Error type for the literal cipher.
///
/// These never cross the cipher boundary: `cipher::encrypt` and
/// `cipher::decrypt` log them and hand back `None` instead.
#[derive(Debug, Error)]
pub enum CipherError {
    /// Key or IV had the wrong length for AES-256-CBC.
    #[error("invalid key or iv length")]
    InvalidLength,
    /// The envelope was not valid Base64.
    #[error("base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The decoded envelope cannot hold an IV plus whole cipher blocks.
    #[error("envelope too short or misaligned: {0} bytes")]
    MalformedEnvelope(usize),
    /// PKCS#7 padding check failed, usually a wrong key.
    #[error("padding check failed")]
    Padding,
    #[error("plaintext is not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Error type for transform operations.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A pass pattern failed to compile.
    #[error("pattern compilation failed: {0}")]
    Pattern(#[from] regex::Error),
}

/// Errors that can occur while driving obfuscation from the command line.
#[derive(Debug, Error)]
pub enum ObfuscateError {
    /// No input file was given.
    #[error("no input given (pass <INPUT> or --batch <DIR>)")]
    MissingInput,
    /// File read/write error.
    #[error("could not access '{path}': {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// Transform application failed.
    #[error("transform error: {0}")]
    Transform(#[from] TransformError),
    /// Configuration file could not be parsed.
    #[error("invalid config '{path}': {source}")]
    Config {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    /// JSON serialization error.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
    /// The envelope could not be opened with the given key.
    #[error("could not decrypt envelope with the given key")]
    DecryptionFailed,
}
