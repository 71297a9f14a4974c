//! Command-line front end for the Shroud source obfuscator.

pub mod commands;
