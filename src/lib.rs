//! Credential manager CLI over a hosted credentials table.
//!
//! Lists, searches, adds, edits, and copies platform credentials stored in a
//! PostgREST table (e.g. a Supabase project). All persistence is remote; the
//! local process only holds the last fetched list.
//!
//! ## Modules
//! - `cli` — Command-line handlers and the interactive shell
//! - `core` — Store backends, filter, generator, form, and shell state
//! - `models` — Data structures
//! - `util` — Clipboard, filesystem, and logging helpers

pub mod cli;
pub mod constants;
pub mod core;
pub mod models;
pub mod util;
