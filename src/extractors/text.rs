// src/extractors/text.rs
use crate::edgar::models::DocumentKind;
use scraper::{node::Node, ElementRef, Html};

// Elements whose boundaries separate words when rendered.
const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "br", "caption", "dd", "div", "dl", "dt",
    "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol",
    "p", "pre", "section", "table", "tbody", "td", "tfoot", "th", "thead", "title", "tr", "ul",
];

/// Normalizes a fetched body according to how it is encoded.
pub fn normalize_document_text(raw: &str, kind: DocumentKind) -> String {
    match kind {
        DocumentKind::PlainText => normalize_plain_text(raw),
        DocumentKind::Html => normalize_html_text(raw),
    }
}

/// Lowercases `raw` and collapses whitespace runs to a single space.
/// Angle brackets are ordinary characters here.
pub fn normalize_plain_text(raw: &str) -> String {
    collapse_whitespace(&raw.to_lowercase())
}

/// Strips markup from `raw`, then lowercases and collapses whitespace.
///
/// Script and style bodies are dropped. Inline elements (`span`, `b`, ...)
/// join their text directly, so a token split across spans stays whole;
/// block elements are separated by a space.
pub fn normalize_html_text(raw: &str) -> String {
    let fragment = Html::parse_fragment(raw);
    let mut text = String::with_capacity(raw.len());
    collect_text(fragment.root_element(), &mut text);
    collapse_whitespace(&text.to_lowercase())
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text_node) => out.push_str(&text_node.text),
            Node::Element(_) => {
                let Some(child_element) = ElementRef::wrap(child) else {
                    continue;
                };
                let name = child_element.value().name();
                if matches!(name, "script" | "style") {
                    continue;
                }
                let block = BLOCK_ELEMENTS.contains(&name);
                if block {
                    out.push(' ');
                }
                collect_text(child_element, out);
                if block {
                    out.push(' ');
                }
            }
            _ => {}
        }
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
