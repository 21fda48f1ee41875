//! CLI support for the `docrecall` binary.

pub mod args;
pub mod output;
