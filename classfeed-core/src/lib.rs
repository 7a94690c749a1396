//! Classfeed Core
//!
//! Core types and abstractions for the Classfeed lesson-analysis client.
//!
//! This crate contains:
//! - Domain types: jobs, status snapshots, feedback results, submissions
//! - DTOs: wire shapes exchanged with the analysis service
//! - The language code mapper shared by every component

pub mod domain;
pub mod dto;

pub use domain::language::{DEFAULT_LANGUAGE_CODE, Language, to_backend_code};
