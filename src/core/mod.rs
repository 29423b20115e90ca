//! Core functionality: naming rules, mod folder operations, configuration and folder watching

pub mod config;
pub mod error;
pub mod mod_files;
pub mod naming;
pub mod watcher;
