//! Cross-crate tests for the Shroud obfuscation pipeline.

#[cfg(test)]
mod core;
#[cfg(test)]
mod transforms;

/// Installs a debug-level subscriber once per test binary.
#[cfg(test)]
pub(crate) fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}
