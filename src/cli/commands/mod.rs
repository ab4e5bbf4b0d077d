//! Command implementations for the Cohort CLI.

pub mod calculate;
pub mod init;
pub mod populations;
pub mod validate;
