//! ABO Study content kernel
//!
//! Rich-text rendering, document schema validation and typed documents for
//! the ABO Study site. The `abo-study` binary wraps these for use on
//! content studio exports.

pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod models;
pub mod services;

pub use config::Config;
pub use content::{ContentBlock, SchemaRegistry, render_blocks, render_json};
pub use error::{AppError, AppResult};
pub use models::Document;
