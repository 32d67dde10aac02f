//! The document types editors author in the studio.

use crate::domain::Domain;
use crate::types::{
    DocumentTypeDefinition, FieldDefinition, FieldType, ListOption, SlugOptions,
};

/// Maximum slug length for lessons.
pub const LESSON_SLUG_MAX_LENGTH: usize = 96;

/// Generic site page: title, slug and rich-text content.
pub fn page() -> DocumentTypeDefinition {
    DocumentTypeDefinition::new("page", "Page")
        .field(FieldDefinition::new("title", FieldType::string()).required())
        .field(
            FieldDefinition::new(
                "slug",
                FieldType::Slug(SlugOptions {
                    source: "title".into(),
                    max_length: None,
                }),
            )
            .required(),
        )
        .field(FieldDefinition::new(
            "content",
            FieldType::Blocks {
                styles: vec![
                    ListOption::new("Normal", "normal"),
                    ListOption::new("H2", "h2"),
                    ListOption::new("H3", "h3"),
                ],
            },
        ))
}

/// Study lesson filed under one curriculum domain.
pub fn lesson() -> DocumentTypeDefinition {
    DocumentTypeDefinition::new("lesson", "Lesson")
        .field(FieldDefinition::new("title", FieldType::string()).required())
        .field(
            FieldDefinition::new(
                "slug",
                FieldType::Slug(SlugOptions {
                    source: "title".into(),
                    max_length: Some(LESSON_SLUG_MAX_LENGTH),
                }),
            )
            .required(),
        )
        .field(
            FieldDefinition::new(
                "domain",
                FieldType::String {
                    list: Domain::list_options(),
                },
            )
            .required(),
        )
        .field(FieldDefinition::new("summary", FieldType::Text { rows: 3 }))
        .field(
            FieldDefinition::new("body", FieldType::Blocks { styles: vec![] }).label("Content"),
        )
}

/// Every document type the studio registers.
pub fn standard_types() -> Vec<DocumentTypeDefinition> {
    vec![page(), lesson()]
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn page_fields() {
        let page = page();
        let names: Vec<&str> = page.fields.iter().map(|f| f.field_name.as_str()).collect();
        assert_eq!(names, vec!["title", "slug", "content"]);
        assert_eq!(page.required_fields(), vec!["title", "slug"]);

        let styles = page.get_field("content").unwrap().field_type.allowed_styles();
        let values: Vec<&str> = styles.iter().map(|s| s.value.as_str()).collect();
        assert_eq!(values, vec!["normal", "h2", "h3"]);
    }

    #[test]
    fn lesson_fields() {
        let lesson = lesson();
        assert_eq!(lesson.required_fields(), vec!["title", "slug", "domain"]);
        assert_eq!(lesson.get_field("body").unwrap().label, "Content");

        match &lesson.get_field("slug").unwrap().field_type {
            FieldType::Slug(options) => {
                assert_eq!(options.source, "title");
                assert_eq!(options.max_length, Some(96));
            }
            other => panic!("expected slug field, got {other:?}"),
        }

        match &lesson.get_field("domain").unwrap().field_type {
            FieldType::String { list } => assert_eq!(list.len(), 6),
            other => panic!("expected string field, got {other:?}"),
        }
    }

    #[test]
    fn standard_types_are_page_and_lesson() {
        let names: Vec<String> = standard_types()
            .into_iter()
            .map(|t| t.machine_name)
            .collect();
        assert_eq!(names, vec!["page", "lesson"]);
    }
}
