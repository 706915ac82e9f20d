//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Group | Purpose | Examples |
//! |-------|---------|----------|
//! | Site | Setup | `init` |
//! | Content | Authoring and validation | `new blog "Title"`, `check`, `list blog --tag rust` |
//! | Publish | Generated documents | `feed`, `sitemap`, `build` |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! The default can be changed with `default_format` in the global config.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output on stderr:
//! ```bash
//! folio --verbose build
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod content_cmd;
mod publish;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
