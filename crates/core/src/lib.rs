pub mod cipher;
pub mod names;
pub mod options;
pub mod rename;
pub mod symbols;
pub mod unit;
pub mod words;

pub use options::OptionSet;
pub use rename::RenameTable;
pub use unit::{SourceUnit, UnitStats};
