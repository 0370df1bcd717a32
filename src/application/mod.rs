//! Application layer - Use cases and orchestration

pub mod build;

pub use build::{BuildReport, BuildService, Converted};
