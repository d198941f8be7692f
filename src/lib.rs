//! Briefing Engine - Business intake wizard and report synthesis
//!
//! This crate drives multi-step business questionnaires (marketing briefing
//! and SWOT audit), persists and announces each submission, and turns the
//! answers into a structured report through a generative-text provider.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
