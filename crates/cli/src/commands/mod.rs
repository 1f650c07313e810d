//! CLI subcommands

pub mod config;
pub mod doctor;
pub mod label;
