//! Utility modules for clipboard, filesystem, and logging.

pub mod clipboard;
pub mod fs;
pub mod logging;
