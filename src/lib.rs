//! # jsonsh
//!
//! An interactive, terminal-style shell for exploring a JSON document as
//! if it were a filesystem.
//!
//! ## Features
//!
//! - `ls`/`cd`/`cat` navigation over objects, arrays of strings, and
//!   arrays of objects
//! - Heuristic display names for array elements (identity-like keys,
//!   string filenames, positional `N.txt` fallbacks)
//! - Fuzzy name matching that never silently picks an ambiguous target
//! - Tab completion with cycling, common-prefix extension, and Shift+Tab
//! - Command history, vi mode support, syntax highlighting
//!
//! ## Usage
//!
//! ```bash
//! # Explore a local file
//! jsonsh --data resume.json
//!
//! # Inside the shell:
//! $ ls
//! $ cd projects
//! $ cat atl        # fuzzy-matches "Atlas"
//! $ cd ..
//! ```
//!
//! The shell core is host-agnostic: it talks to the outside world only
//! through the [`io::IoHost`] trait, so the same engine drives the
//! terminal binary and in-memory test hosts.

pub mod candidates;
pub mod commands;
pub mod complete;
pub mod completer;
pub mod config;
pub mod context;
pub mod document;
pub mod fuzzy;
pub mod highlighter;
pub mod host;
pub mod io;
pub mod names;
pub mod shell;
pub mod tree;

pub use config::ShellConfig;
pub use context::ShellContext;
pub use shell::{run, ShellCore};
