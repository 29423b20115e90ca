//! UI components for the mod manager

pub mod mod_list;
pub mod toolbar;
