//! Document models.

pub mod document;

pub use document::{Anchor, Document, Lesson, Page, Slug};
