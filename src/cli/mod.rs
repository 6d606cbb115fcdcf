//! CLI subcommand implementations for the browsershelf binary.

pub mod cache_cmd;
pub mod doctor;
pub mod render_cmd;
