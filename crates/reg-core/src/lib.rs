//! # reg-core
//!
//! Data model and pure transforms for regsync.
//!
//! This crate provides the types shared across all regsync crates:
//! - Records produced by the registration scraper (courses, sections,
//!   professors, subjects, terms) and the term dump that carries them
//! - Identity keys derived from entity coordinates
//! - Requisite trees with normalization and missing-reference marking
//! - Fixed tunables for reconciliation and caching
//! - Error types for loading scraper output

pub mod entities;
pub mod errors;
pub mod keys;
pub mod requisite;
pub mod tunables;
