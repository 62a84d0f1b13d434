//! Library components of the `sheet-import` command-line shell.

pub mod ingest;
pub mod logging;
