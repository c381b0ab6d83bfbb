//! Routewise CLI library.
//!
//! Output formatting and user-facing error messages shared by the `routewise`
//! binary's subcommands.

pub mod messages;
pub mod output;
