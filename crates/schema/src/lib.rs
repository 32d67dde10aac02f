//! ABO Study content schema
//!
//! Declarative document shapes for the content studio: field types, field
//! definitions, curriculum domains, and the `page` and `lesson` document
//! types. The kernel consumes these as the source of truth for what
//! incoming documents look like.

pub mod documents;
pub mod domain;
pub mod types;

pub mod prelude {
    pub use crate::documents::{LESSON_SLUG_MAX_LENGTH, lesson, page, standard_types};
    pub use crate::domain::{Domain, UnknownDomain};
    pub use crate::types::*;
}
