//! CLI subcommands.

pub mod agent;
pub mod doctor;
pub mod onboard;
pub mod retrieve;
pub mod route;
