//! The in-memory working document mutated by transform passes.

use scraper::{Html, Selector};

use blockport_blocks::MetadataRecord;

/// One legacy page being transformed.
///
/// `scraper` trees are immutable, so passes rewrite the document by
/// computing an element's serialized outer HTML and splicing a replacement
/// into the working string. The string is normalized through the html5ever
/// serializer on construction, so every later parse→serialize round trip is
/// stable and outer-HTML lookups match exactly.
///
/// Each invocation of the pipeline owns its document exclusively; nothing is
/// retained between documents.
pub struct PageDocument {
    html: String,
    /// Metadata record accumulated by the metadata pass, rendered as the
    /// trailing block before the pipeline returns.
    pub metadata: MetadataRecord,
}

impl PageDocument {
    /// Parse and normalize a raw HTML page.
    pub fn new(raw: &str) -> Self {
        let doc = Html::parse_document(raw);
        Self {
            html: doc.root_element().html(),
            metadata: MetadataRecord::new(),
        }
    }

    /// The current working markup.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Re-parse the current working markup.
    pub fn parse(&self) -> Html {
        Html::parse_document(&self.html)
    }

    /// Replace the working markup wholesale (whole-string rewrites).
    pub(crate) fn set_html(&mut self, html: String) {
        self.html = html;
    }

    /// Replace the first occurrence of `needle` (an element's outer HTML).
    /// Returns `false` when the needle is no longer present.
    pub fn replace_once(&mut self, needle: &str, replacement: &str) -> bool {
        if self.html.contains(needle) {
            self.html = self.html.replacen(needle, replacement, 1);
            true
        } else {
            false
        }
    }

    /// Remove the first occurrence of `needle` from the document.
    pub fn remove(&mut self, needle: &str) -> bool {
        self.replace_once(needle, "")
    }

    /// Insert markup immediately after the first occurrence of `needle`.
    pub fn insert_after(&mut self, needle: &str, addition: &str) -> bool {
        if self.html.contains(needle) {
            let replacement = format!("{needle}{addition}");
            self.html = self.html.replacen(needle, &replacement, 1);
            true
        } else {
            false
        }
    }

    /// Append markup as the last content of `<body>`.
    pub fn append_to_body(&mut self, addition: &str) {
        match self.html.rfind("</body>") {
            Some(idx) => self.html.insert_str(idx, addition),
            None => self.html.push_str(addition),
        }
    }

    /// The transformed root: the `<body>` element's inner markup.
    pub fn body_html(&self) -> String {
        let parsed = self.parse();
        let body_sel = Selector::parse("body").expect("valid selector");
        parsed
            .select(&body_sel)
            .next()
            .map(|el| el.inner_html())
            .unwrap_or_else(|| self.html.clone())
    }
}
