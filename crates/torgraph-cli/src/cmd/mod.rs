//! Command handlers, one module per subcommand.

pub mod analyze;
pub mod build;
pub mod completions;
pub mod export;
pub mod merge;
