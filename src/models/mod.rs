//! Data structures shared by the store, shell, and CLI.

pub mod config;
pub mod credential;
