//! Inline span rendering.
//!
//! Spans are rendered into a mark tree: a mark shared by consecutive spans
//! opens once and wraps all of them, so `strong` over "a" and "a b" yields
//! a single `<strong>` element. Marks spanning more following spans nest
//! outside marks that end sooner; ties keep the order given on the span.

use tracing::warn;

use super::block::{MarkDef, Span};
use super::html::{html_escape, is_safe_url, render_text};

/// A mark element that is open while spans are being appended to it.
struct OpenMark<'a> {
    mark: &'a str,
    html: String,
}

/// Render a block's spans, applying decorators and annotations.
pub fn render_children(children: &[Span], mark_defs: &[MarkDef]) -> String {
    let mut root = String::new();
    let mut open: Vec<OpenMark<'_>> = Vec::new();

    for (index, span) in children.iter().enumerate() {
        let marks = sorted_marks(children, index);

        // Close every open mark from the first one this span does not carry.
        let keep = open
            .iter()
            .take_while(|m| marks.contains(&m.mark))
            .count();
        while open.len() > keep {
            close_top(&mut open, &mut root, mark_defs);
        }

        for mark in marks {
            if !open.iter().any(|m| m.mark == mark) {
                open.push(OpenMark {
                    mark,
                    html: String::new(),
                });
            }
        }

        let text = render_text(&span.text);
        match open.last_mut() {
            Some(top) => top.html.push_str(&text),
            None => root.push_str(&text),
        }
    }

    while !open.is_empty() {
        close_top(&mut open, &mut root, mark_defs);
    }
    root
}

/// Marks of `children[index]`, longest-running first.
fn sorted_marks(children: &[Span], index: usize) -> Vec<&str> {
    let Some(span) = children.get(index) else {
        return Vec::new();
    };

    let mut marks: Vec<(&str, usize)> = Vec::with_capacity(span.marks.len());
    for mark in &span.marks {
        if marks.iter().any(|(m, _)| *m == mark.as_str()) {
            continue;
        }
        let run = children[index..]
            .iter()
            .take_while(|s| s.marks.iter().any(|m| m == mark))
            .count();
        marks.push((mark.as_str(), run));
    }

    // Stable: equal runs keep span order.
    marks.sort_by(|a, b| b.1.cmp(&a.1));
    marks.into_iter().map(|(m, _)| m).collect()
}

fn close_top(open: &mut Vec<OpenMark<'_>>, root: &mut String, mark_defs: &[MarkDef]) {
    let Some(closed) = open.pop() else {
        return;
    };
    let wrapped = wrap_mark(closed.mark, mark_defs, &closed.html);
    match open.last_mut() {
        Some(parent) => parent.html.push_str(&wrapped),
        None => root.push_str(&wrapped),
    }
}

/// Wrap already-rendered inner HTML in the element for one mark.
fn wrap_mark(mark: &str, mark_defs: &[MarkDef], inner: &str) -> String {
    match mark {
        "strong" => format!("<strong>{inner}</strong>"),
        "em" => format!("<em>{inner}</em>"),
        "code" => format!("<code>{inner}</code>"),
        "underline" => format!("<span style=\"text-decoration:underline\">{inner}</span>"),
        "strike-through" => format!("<del>{inner}</del>"),
        key => match mark_defs.iter().find(|d| d.key == key) {
            Some(def) if def.def_type == "link" => render_link(def, inner),
            Some(def) => {
                warn!(annotation = %def.def_type, key = %key, "no renderer for annotation");
                inner.to_string()
            }
            None => {
                warn!(mark = %key, "unknown mark");
                inner.to_string()
            }
        },
    }
}

fn render_link(def: &MarkDef, inner: &str) -> String {
    match def.href.as_deref() {
        Some(href) if is_safe_url(href) => {
            format!("<a href=\"{}\">{inner}</a>", html_escape(href.trim()))
        }
        Some(href) => {
            warn!(href = %href, "dropping link with unsafe scheme");
            inner.to_string()
        }
        None => inner.to_string(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn link(key: &str, href: &str) -> MarkDef {
        MarkDef {
            key: key.into(),
            def_type: "link".into(),
            href: Some(href.into()),
        }
    }

    #[test]
    fn plain_spans_concatenate_in_order() {
        let spans = vec![Span::new("Hello, "), Span::new("world")];
        assert_eq!(render_children(&spans, &[]), "Hello, world");
    }

    #[test]
    fn span_text_is_escaped() {
        let spans = vec![Span::new("<script>alert('x')</script>")];
        let html = render_children(&spans, &[]);
        assert!(!html.contains("<script>"));
        assert_eq!(html, "&lt;script&gt;alert(&#x27;x&#x27;)&lt;/script&gt;");
    }

    #[test]
    fn decorators() {
        let cases = [
            ("strong", "<strong>x</strong>"),
            ("em", "<em>x</em>"),
            ("code", "<code>x</code>"),
            ("underline", "<span style=\"text-decoration:underline\">x</span>"),
            ("strike-through", "<del>x</del>"),
        ];
        for (mark, expected) in cases {
            let spans = vec![Span::new("x").with_marks(&[mark])];
            assert_eq!(render_children(&spans, &[]), expected, "mark {mark}");
        }
    }

    #[test]
    fn shared_mark_wraps_consecutive_spans_once() {
        let spans = vec![
            Span::new("a").with_marks(&["strong"]),
            Span::new("b").with_marks(&["strong", "em"]),
            Span::new("c"),
        ];
        assert_eq!(
            render_children(&spans, &[]),
            "<strong>a<em>b</em></strong>c"
        );
    }

    #[test]
    fn longer_running_mark_is_outermost() {
        let spans = vec![
            Span::new("a").with_marks(&["em", "strong"]),
            Span::new("b").with_marks(&["strong"]),
        ];
        assert_eq!(
            render_children(&spans, &[]),
            "<strong><em>a</em>b</strong>"
        );
    }

    #[test]
    fn equal_runs_keep_span_order() {
        let spans = vec![Span::new("a").with_marks(&["em", "strong"])];
        assert_eq!(render_children(&spans, &[]), "<em><strong>a</strong></em>");
    }

    #[test]
    fn link_annotation() {
        let spans = vec![
            Span::new("see "),
            Span::new("the chart").with_marks(&["l1"]),
        ];
        let defs = vec![link("l1", "https://example.com/?a=1&b=2")];
        assert_eq!(
            render_children(&spans, &defs),
            "see <a href=\"https://example.com/?a=1&amp;b=2\">the chart</a>"
        );
    }

    #[test]
    fn unsafe_link_renders_text_only() {
        let spans = vec![Span::new("click").with_marks(&["l1"])];
        let defs = vec![link("l1", "javascript:alert(1)")];
        assert_eq!(render_children(&spans, &defs), "click");
    }

    #[test]
    fn unknown_mark_keeps_text() {
        let spans = vec![Span::new("note").with_marks(&["highlight"])];
        assert_eq!(render_children(&spans, &[]), "note");
    }

    #[test]
    fn unknown_annotation_keeps_text() {
        let spans = vec![Span::new("ref").with_marks(&["c1"])];
        let defs = vec![MarkDef {
            key: "c1".into(),
            def_type: "citation".into(),
            href: None,
        }];
        assert_eq!(render_children(&spans, &defs), "ref");
    }

    #[test]
    fn duplicate_marks_apply_once() {
        let spans = vec![Span::new("x").with_marks(&["em", "em"])];
        assert_eq!(render_children(&spans, &[]), "<em>x</em>");
    }

    #[test]
    fn empty_children() {
        assert_eq!(render_children(&[], &[]), "");
    }
}
