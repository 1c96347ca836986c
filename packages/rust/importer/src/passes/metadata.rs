//! Metadata extraction and the trailing metadata block.

use chrono::NaiveDate;
use scraper::Html;

use blockport_blocks::{MetadataRecord, metadata_block};

use crate::document::PageDocument;
use crate::dom::{closest_with_class, element_text, select_first};
use crate::passes::PassContext;

/// Build the per-document metadata record from document-level meta tags and
/// the known date element. The date element is consumed.
pub(crate) fn extract_metadata(doc: &mut PageDocument, ctx: &PassContext) {
    let parsed = doc.parse();
    let mut record = MetadataRecord::new();
    let mut removals: Vec<String> = Vec::new();

    if let Some(title) = page_title(&parsed) {
        record.set("Title", title);
    }

    if let Some(desc) = meta_content(&parsed, r#"meta[name="description"]"#) {
        record.set("Description", desc);
    }

    if let Some(image) = meta_content(&parsed, r#"meta[property="og:image"]"#) {
        if let Ok(base) = ctx.profile.media_origin_url() {
            if let Ok(src) = base.join(&image) {
                record.set("Image", format!(r#"<img src="{src}">"#));
            }
        }
    }

    if let Some(author) = meta_content(&parsed, r#"meta[name="author"]"#) {
        record.set("Author", author);
    }

    if let Some(selector) = &ctx.profile.date_selector {
        if let Some(date_el) = select_first(&parsed, selector) {
            if let Some(iso) = parse_publish_date(&element_text(&date_el)) {
                record.set("article:published_time", iso);
            }
            // consume the date's container even when the text didn't parse
            let container = ctx
                .profile
                .date_container_class
                .as_deref()
                .and_then(|class| closest_with_class(&date_el, class))
                .unwrap_or(date_el);
            removals.push(container.html());
        }
    }

    if let Some(selector) = &ctx.profile.tags_selector {
        let tags = crate::dom::select_all_in(&parsed.root_element(), selector)
            .iter()
            .map(element_text)
            .collect::<Vec<_>>()
            .join(", ");
        if !tags.is_empty() {
            record.set("Tags", tags);
        }
    }

    doc.metadata = record;
    for needle in removals {
        doc.remove(&needle);
    }
}

/// Append the metadata record as the trailing block. Runs last.
pub(crate) fn append_metadata(doc: &mut PageDocument, _ctx: &PassContext) {
    let block = metadata_block(&doc.metadata);
    if !block.is_empty() {
        doc.append_to_body(&block);
    }
}

/// og:title, falling back to the `<title>` element with newlines and tabs
/// stripped.
fn page_title(parsed: &Html) -> Option<String> {
    if let Some(title) = meta_content(parsed, r#"meta[property="og:title"]"#) {
        return Some(title);
    }
    select_first(parsed, "title").map(|el| element_text(&el).replace(['\n', '\t'], ""))
}

fn meta_content(parsed: &Html, selector: &str) -> Option<String> {
    select_first(parsed, selector)
        .and_then(|el| el.value().attr("content"))
        .map(str::to_string)
        .filter(|s| !s.is_empty())
}

/// Parse a human-readable publish date into RFC 3339. Unparseable dates are
/// skipped; the error policy is never-fatal.
fn parse_publish_date(text: &str) -> Option<String> {
    const FORMATS: &[&str] = &["%B %d, %Y", "%d %B %Y", "%Y-%m-%d", "%m/%d/%Y"];

    let trimmed = text.trim();
    FORMATS.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(trimmed, fmt).ok().map(|date| {
            date.and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc().to_rfc3339())
                .unwrap_or_default()
        })
    })
}
