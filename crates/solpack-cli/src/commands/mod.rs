//! Subcommand implementations

pub mod checksum;
pub mod convert;
pub mod encode;
