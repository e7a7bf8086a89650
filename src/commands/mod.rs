//! CLI subcommands

pub mod config;
pub mod page;
pub mod post;
pub mod posts;
