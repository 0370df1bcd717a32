//! Infrastructure layer - Markup I/O, files and configuration

pub mod config;
pub mod markup;
pub mod repository;

pub use config::Config;
pub use markup::{convert_markup, parse_markup, render_html, Conversion};
pub use repository::SourceTree;
