//! Microsoft Translator - async Rust client for the Translator Text API v2
//!
//! This library exchanges a subscription key for a bearer token and issues
//! single-text and batch translation requests against the XML endpoints.

#![forbid(unsafe_code)]

pub mod cli;
pub mod core;

// Re-export key types for convenience
pub use core::{
    client::TranslationClient,
    config::TranslatorConfig,
    errors::{Result, TranslationError},
    models::TranslationResult,
    token_provider::TokenProvider,
    translator::Translator,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
