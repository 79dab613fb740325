//! Core logic: store backends, search, generation, form, and shell state.

pub mod cards;
pub mod config;
pub mod filter;
pub mod form;
pub mod icons;
pub mod password;
pub mod shell;
pub mod store;
