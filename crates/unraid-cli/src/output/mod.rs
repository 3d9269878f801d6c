//! Terminal output: colors, tables, structured formats, and watch mode.

pub mod color;
pub mod format;
pub mod table;
pub mod watch;
