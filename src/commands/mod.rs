//! Command implementations for chroder-core.

pub mod scaffold;

pub use scaffold::ScaffoldCommand;
