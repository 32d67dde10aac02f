//! Content services shared by the schema registry and the CLI.

pub mod slug;

pub use slug::{is_valid_slug, slugify};
