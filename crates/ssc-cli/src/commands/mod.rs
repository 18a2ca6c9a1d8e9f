//! CLI command implementations.

pub mod edit;
pub mod edit_name;
pub mod inspect;
pub mod write;
