//! CLI subcommand handlers

pub mod account;
pub mod suggest;
