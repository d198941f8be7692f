//! Adapters - Implementations of port interfaces.
//!
//! Each submodule implements one or more ports from `crate::ports`.

pub mod ai;
pub mod document;
pub mod notification;
pub mod submission;
