//! Content module.
//!
//! This module provides:
//! - ContentBlock: the rich-text block model and lenient Portable Text parsing
//! - BlockRenderer: per-kind block rendering and the dispatch table
//! - Inline mark rendering (decorators, links)
//! - SchemaRegistry: document type definitions and validation

pub mod block;
pub mod block_render;
pub mod html;
mod marks;
pub mod schema_registry;

pub use block::{BlockKind, ContentBlock, ListKind, MarkDef, Span, parse_blocks};
pub use block_render::{BlockRenderer, RendererTable, anchor_id, render_blocks, render_json};
pub use schema_registry::SchemaRegistry;
