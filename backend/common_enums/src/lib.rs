//! Enums shared by every crate of the gateway adapter workspace.

pub mod enums;

pub use enums::*;
