//! CLI subcommand handlers.

pub mod convert;
pub mod cues;
pub mod record;
