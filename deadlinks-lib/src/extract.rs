//! Extract checkable references and fragment anchors from HTML documents.
//!
//! A single tokenizer pass collects both the raw `href`/`src`/`action`
//! values of the elements we verify and every `id` attribute in the
//! document, so same-page fragment references can be answered without
//! parsing the document a second time.

use std::collections::{HashMap, HashSet};

use html5gum::{
    Span, Tokenizer,
    emitters::callback::{Callback, CallbackEmitter, CallbackEvent},
};

/// The references and fragment anchors found in one HTML document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    /// Raw reference strings in document order. Empty values and the
    /// in-page no-op `#` are already filtered out.
    pub references: Vec<String>,
    /// Every `id` attribute value in the document.
    pub fragments: HashSet<String>,
}

/// Tokenizer callback that accumulates the attributes of the current
/// element and flushes them once the start tag closes.
#[derive(Debug, Default)]
struct LinkExtractor {
    references: Vec<String>,
    fragments: HashSet<String>,
    current_element: String,
    current_attribute_name: String,
    current_attributes: HashMap<String, String>,
}

impl LinkExtractor {
    /// The first non-empty attribute among `href`, `src`, `action`.
    ///
    /// The priority is a contract with the orchestrator: getting it wrong
    /// means the wrong attribute is tested.
    fn checked_attribute(&self) -> Option<String> {
        let value = ["href", "src", "action"].iter().find_map(|name| {
            self.current_attributes
                .get(*name)
                .filter(|value| !value.is_empty())
        })?;
        // A lone `#` points at the top of the current page. Nothing to check.
        if value == "#" {
            return None;
        }
        Some(value.clone())
    }

    fn flush_element(&mut self) {
        if let Some(id) = self.current_attributes.get("id") {
            if !id.is_empty() {
                self.fragments.insert(id.clone());
            }
        }

        let checked = match self.current_element.as_str() {
            "a" | "form" | "img" | "script" | "style" => true,
            "link" => {
                self.current_attributes.get("rel").map(String::as_str) == Some("stylesheet")
            }
            _ => false,
        };
        if checked {
            if let Some(reference) = self.checked_attribute() {
                self.references.push(reference);
            }
        }

        self.current_attributes.clear();
    }
}

impl Callback<(), usize> for &mut LinkExtractor {
    fn handle_event(&mut self, event: CallbackEvent<'_>, _span: Span<usize>) -> Option<()> {
        match event {
            CallbackEvent::OpenStartTag { name } => {
                self.current_element = String::from_utf8_lossy(name).into_owned();
                self.current_attributes.clear();
            }
            CallbackEvent::AttributeName { name } => {
                self.current_attribute_name = String::from_utf8_lossy(name).into_owned();
            }
            // Values arrive in chunks around character references, so append.
            CallbackEvent::AttributeValue { value } => {
                let value = String::from_utf8_lossy(value);
                self.current_attributes
                    .entry(self.current_attribute_name.clone())
                    .and_modify(|v| v.push_str(&value))
                    .or_insert_with(|| value.into_owned());
            }
            CallbackEvent::CloseStartTag { .. } => self.flush_element(),
            _ => {}
        }
        None
    }
}

/// Tokenize an HTML document, collecting the references of all checked
/// elements (`a`, `form`, `img`, `link rel="stylesheet"`, `script`,
/// `style`) and the document's `id` anchors.
#[must_use]
pub fn extract(html: &str) -> Extraction {
    let mut extractor = LinkExtractor::default();
    let mut tokenizer = Tokenizer::new_with_emitter(html, CallbackEmitter::new(&mut extractor));
    while tokenizer.next().is_some() {}
    Extraction {
        references: extractor.references,
        fragments: extractor.fragments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn collects_references_in_document_order() {
        let html = r#"
            <link rel="stylesheet" href="/style.css">
            <script src="/app.js"></script>
            <a href="/about.html">About</a>
            <img src="logo.png">
            <form action="/subscribe"><input type="submit"></form>
        "#;
        let extraction = extract(html);
        assert_eq!(
            extraction.references,
            vec!["/style.css", "/app.js", "/about.html", "logo.png", "/subscribe"]
        );
    }

    #[test]
    fn href_wins_over_src_and_action() {
        let html = r#"<a href="first.html" src="second.png" action="/third">x</a>"#;
        assert_eq!(extract(html).references, vec!["first.html"]);
    }

    #[test]
    fn empty_href_falls_back_to_src() {
        let html = r#"<img href="" src="logo.png">"#;
        assert_eq!(extract(html).references, vec!["logo.png"]);
    }

    #[test]
    fn skips_empty_values_and_bare_hash() {
        let html = r##"<a href="#">top</a><a href="">nothing</a><a>no attribute</a>"##;
        assert_eq!(extract(html).references, Vec::<String>::new());
    }

    #[test]
    fn character_references_do_not_split_the_value() {
        let html = r#"<a href="/search?a=1&amp;b=2">x</a>"#;
        assert_eq!(extract(html).references, vec!["/search?a=1&b=2"]);
    }

    #[test]
    fn only_stylesheet_links_are_checked() {
        let html = r#"
            <link rel="icon" href="/favicon.ico">
            <link rel="stylesheet" href="/style.css">
        "#;
        assert_eq!(extract(html).references, vec!["/style.css"]);
    }

    #[test]
    fn unmatched_elements_are_not_extracted() {
        let html = r#"<iframe src="/embed.html"></iframe><video src="clip.mp4"></video>"#;
        assert_eq!(extract(html).references, Vec::<String>::new());
    }

    #[test]
    fn collects_id_anchors_from_any_element() {
        let html = r#"<h2 id="section-1">One</h2><div id="two"></div><span id="">x</span>"#;
        let extraction = extract(html);
        assert!(extraction.fragments.contains("section-1"));
        assert!(extraction.fragments.contains("two"));
        assert_eq!(extraction.fragments.len(), 2);
    }
}
