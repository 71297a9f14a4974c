use crate::templates;
use crate::Transform;
use rand::rngs::StdRng;
use regex::Regex;
use shroud_core::{cipher, SourceUnit};
use shroud_utils::errors::TransformError;
use tracing::debug;

/// Double-quoted literal with backslash escapes, confined to a single line.
pub const LITERAL_PATTERN: &str = r#""(?:[^"\\\n]|\\.)*""#;

/// One encrypted literal and the constant that replaces it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    /// Generated variable name, `_str_<n>`.
    pub var: String,
    /// The original token including its quotes.
    pub literal: String,
    pub envelope: String,
}

/// Output of a single literal encryption run.
#[derive(Debug, Clone)]
pub struct EncryptedSource {
    pub code: String,
    /// Declarations in discovery order.
    pub declarations: Vec<Declaration>,
}

/// Replaces string literals with constants decrypted at class load time.
///
/// Every run prepends the `StringDecryptor` stub followed by one declaration per
/// literal that encrypted successfully. Literals the cipher rejects stay as they are.
pub struct StringEncryption {
    key: String,
    pattern: Regex,
    encrypt: fn(&str, &str) -> Option<String>,
}

impl StringEncryption {
    pub fn new(key: impl Into<String>) -> Result<Self, TransformError> {
        Self::with_cipher(key, cipher::encrypt)
    }

    /// Uses `encrypt` in place of [`cipher::encrypt`]; a `None` leaves the literal as is.
    pub fn with_cipher(
        key: impl Into<String>,
        encrypt: fn(&str, &str) -> Option<String>,
    ) -> Result<Self, TransformError> {
        Ok(Self {
            key: key.into(),
            pattern: Regex::new(LITERAL_PATTERN)?,
            encrypt,
        })
    }

    pub fn encrypt_literals(&self, code: &str) -> EncryptedSource {
        let mut declarations: Vec<Declaration> = Vec::new();
        let mut rewritten = String::with_capacity(code.len());
        let mut last = 0;

        for m in self.pattern.find_iter(code) {
            let literal = m.as_str();
            let content = &literal[1..literal.len() - 1];
            let Some(envelope) = (self.encrypt)(content, &self.key) else {
                continue;
            };

            let var = format!("_str_{}", declarations.len());
            rewritten.push_str(&code[last..m.start()]);
            rewritten.push_str(&var);
            last = m.end();

            declarations.push(Declaration {
                var,
                literal: literal.to_string(),
                envelope,
            });
        }
        rewritten.push_str(&code[last..]);

        let mut out = String::from(templates::DECRYPTOR_STUB);
        for decl in &declarations {
            out.push_str(&templates::declaration(&decl.var, &decl.envelope, &self.key));
            out.push('\n');
        }
        out.push_str(&rewritten);

        EncryptedSource {
            code: out,
            declarations,
        }
    }
}

impl Transform for StringEncryption {
    fn name(&self) -> &'static str {
        "StringEncryption"
    }

    fn apply(&self, unit: &mut SourceUnit<'_>, _rng: &mut StdRng) -> Result<bool, TransformError> {
        let encrypted = self.encrypt_literals(&unit.code);
        debug!("Encrypted {} string literals", encrypted.declarations.len());
        unit.stats.literals_encrypted += encrypted.declarations.len();
        Ok(unit.replace_code(encrypted.code))
    }
}
