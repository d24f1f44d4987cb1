//! Helpers shared by the command handlers

pub(crate) mod display;
pub(crate) mod reader;
