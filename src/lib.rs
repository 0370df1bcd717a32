//! htlm - Scrambled-tag markup to HTML converter
//!
//! Decodes documents whose tag names are letter-scrambled anagrams of HTML
//! tags and links `<import>` elements to `<export>` elements across files.

pub mod application;
pub mod cli;
pub mod domain;
pub mod error;
pub mod infrastructure;

pub use error::HtlmError;
