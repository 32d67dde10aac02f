//! Page and Lesson documents as exported by the content studio.
//!
//! Documents are read-only input: the kernel deserializes them, renders
//! their body and lists their deep-link anchors, but never mutates them.

use abo_study_schema::prelude::Domain;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::content::block::{BlockKind, ContentBlock, parse_blocks};
use crate::content::block_render::{ANCHOR_PREFIX, render_blocks};
use crate::error::{AppError, AppResult};

/// A document slug. Accepts the studio's `{ "current": "…" }` object or a
/// bare string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SlugRepr")]
pub struct Slug {
    pub current: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SlugRepr {
    Bare(String),
    Object { current: String },
}

impl From<SlugRepr> for Slug {
    fn from(repr: SlugRepr) -> Self {
        match repr {
            SlugRepr::Bare(current) | SlugRepr::Object { current } => Self { current },
        }
    }
}

impl Slug {
    pub fn as_str(&self) -> &str {
        &self.current
    }
}

/// Generic site page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub slug: Slug,
    #[serde(default, deserialize_with = "lenient_blocks")]
    pub content: Vec<ContentBlock>,
}

/// Study lesson filed under a curriculum domain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    pub slug: Slug,
    pub domain: Domain,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient_blocks")]
    pub body: Vec<ContentBlock>,
}

/// Any document the site renders, tagged by `_type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "_type", rename_all = "lowercase")]
pub enum Document {
    Page(Page),
    Lesson(Lesson),
}

/// A deep-link target: a level-3 heading in a document body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Anchor {
    pub key: String,
    pub text: String,
}

impl Anchor {
    /// URL fragment (`h-<key>`, key percent-encoded) without the leading `#`.
    pub fn fragment(&self) -> String {
        format!("{ANCHOR_PREFIX}{}", urlencoding::encode(&self.key))
    }
}

/// Block arrays are parsed leniently so one malformed block never makes the
/// whole document unreadable.
fn lenient_blocks<'de, D>(deserializer: D) -> Result<Vec<ContentBlock>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(parse_blocks(value.as_ref()))
}

impl Document {
    /// Name of the rich-text body field for a document type.
    pub fn body_field(type_name: &str) -> Option<&'static str> {
        match type_name {
            "page" => Some("content"),
            "lesson" => Some("body"),
            _ => None,
        }
    }

    /// Parse a document from studio JSON, reporting unknown `_type`s distinctly.
    pub fn from_value(value: Value) -> AppResult<Self> {
        let type_name = value
            .get("_type")
            .and_then(|t| t.as_str())
            .unwrap_or_default();
        if Self::body_field(type_name).is_none() {
            return Err(AppError::UnknownDocumentType(type_name.to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Document::Page(_) => "page",
            Document::Lesson(_) => "lesson",
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Document::Page(p) => &p.title,
            Document::Lesson(l) => &l.title,
        }
    }

    pub fn slug(&self) -> &Slug {
        match self {
            Document::Page(p) => &p.slug,
            Document::Lesson(l) => &l.slug,
        }
    }

    /// The document's rich-text body (`content` for pages, `body` for lessons).
    pub fn blocks(&self) -> &[ContentBlock] {
        match self {
            Document::Page(p) => &p.content,
            Document::Lesson(l) => &l.body,
        }
    }

    /// Render the body to HTML.
    pub fn render_body(&self) -> String {
        render_blocks(self.blocks())
    }

    /// Level-3 headings that can be deep-linked, in document order.
    pub fn anchors(&self) -> Vec<Anchor> {
        self.blocks()
            .iter()
            .filter(|b| b.kind() == BlockKind::Heading3 && b.list_kind().is_none())
            .map(|b| Anchor {
                key: b.key.clone(),
                text: b.plain_text(),
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    fn lesson_json() -> Value {
        json!({
            "_id": "lesson-1",
            "_type": "lesson",
            "title": "Prentice's Rule",
            "slug": { "_type": "slug", "current": "prentices-rule" },
            "domain": "optics",
            "body": [
                { "_type": "block", "_key": "p1", "style": "normal", "children": [{ "text": "Intro" }] },
                { "_type": "block", "_key": "h1", "style": "h3", "children": [{ "text": "Worked " }, { "text": "example", "marks": ["em"] }] },
                { "_type": "block", "_key": "h2", "style": "h3", "children": [{ "text": "Practice" }] }
            ]
        })
    }

    #[test]
    fn parse_lesson() {
        let doc = Document::from_value(lesson_json()).unwrap();
        assert_eq!(doc.type_name(), "lesson");
        assert_eq!(doc.title(), "Prentice's Rule");
        assert_eq!(doc.slug().as_str(), "prentices-rule");
        assert_eq!(doc.blocks().len(), 3);
        match doc {
            Document::Lesson(lesson) => {
                assert_eq!(lesson.domain, Domain::Optics);
                assert_eq!(lesson.id.as_deref(), Some("lesson-1"));
                assert!(lesson.summary.is_none());
            }
            Document::Page(_) => panic!("expected a lesson"),
        }
    }

    #[test]
    fn parse_page_with_bare_slug_and_no_content() {
        let doc = Document::from_value(json!({
            "_type": "page",
            "title": "About",
            "slug": "about"
        }))
        .unwrap();
        assert_eq!(doc.slug().as_str(), "about");
        assert!(doc.blocks().is_empty());
        assert_eq!(doc.render_body(), "");
    }

    #[test]
    fn null_content_is_empty() {
        let doc = Document::from_value(json!({
            "_type": "page",
            "title": "About",
            "slug": "about",
            "content": null
        }))
        .unwrap();
        assert!(doc.blocks().is_empty());
    }

    #[test]
    fn unknown_type_is_reported() {
        let err = Document::from_value(json!({ "_type": "quiz" })).unwrap_err();
        assert!(matches!(err, AppError::UnknownDocumentType(t) if t == "quiz"));
    }

    #[test]
    fn invalid_domain_is_a_json_error() {
        let mut value = lesson_json();
        value["domain"] = json!("geometry");
        let err = Document::from_value(value).unwrap_err();
        assert!(matches!(err, AppError::Json(_)));
    }

    #[test]
    fn render_body_uses_block_renderer() {
        let doc = Document::from_value(lesson_json()).unwrap();
        let html = doc.render_body();
        assert!(html.starts_with("<p>Intro</p>"));
        assert!(html.contains(
            "<h3 id=\"h-h1\" class=\"scroll-mt-24 text-xl font-semibold\">Worked <em>example</em></h3>"
        ));
    }

    #[test]
    fn anchors_list_h3_headings_in_order() {
        let doc = Document::from_value(lesson_json()).unwrap();
        let anchors = doc.anchors();
        assert_eq!(
            anchors,
            vec![
                Anchor {
                    key: "h1".into(),
                    text: "Worked example".into()
                },
                Anchor {
                    key: "h2".into(),
                    text: "Practice".into()
                },
            ]
        );
        assert_eq!(anchors[0].fragment(), "h-h1");
    }

    #[test]
    fn body_field_per_type() {
        assert_eq!(Document::body_field("page"), Some("content"));
        assert_eq!(Document::body_field("lesson"), Some("body"));
        assert_eq!(Document::body_field("quiz"), None);
    }

    #[test]
    fn fragment_percent_encodes_key() {
        let anchor = Anchor {
            key: "a b#c".into(),
            text: "T".into(),
        };
        assert_eq!(anchor.fragment(), "h-a%20b%23c");

        let anchor = Anchor {
            key: "abc123".into(),
            text: "T".into(),
        };
        assert_eq!(anchor.fragment(), "h-abc123");
    }

    #[test]
    fn slug_serializes_as_object() {
        let slug = Slug {
            current: "optics".into(),
        };
        assert_eq!(serde_json::to_value(&slug).unwrap(), json!({ "current": "optics" }));
    }
}
