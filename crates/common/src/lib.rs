//! Shared runtime helpers for the bank client workspace.

pub mod utils;
