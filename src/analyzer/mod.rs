//! # Analyzer Module
//!
//! - `smells`: rule-based code smell detection for Helm charts
//! - `history`: the same analysis across the revisions of a git repository

pub mod history;
pub mod smells;
