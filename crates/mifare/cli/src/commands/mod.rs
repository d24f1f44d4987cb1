//! Command handlers

mod card_operations;

pub(crate) use card_operations::*;
