//! Block-config reader.
//!
//! Authoring blocks carry configuration as key/value rows: each direct child
//! of the block element is a row whose first cell names the key and whose
//! second cell holds the value. Keys are normalized to class-name form so
//! lookups are insensitive to case and spacing.

use std::collections::HashMap;

use scraper::{ElementRef, Html};

/// Normalize a key the way block class names are derived:
/// lowercased, non-alphanumeric runs collapsed to a single `-`.
pub fn to_class_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !out.is_empty() {
                out.push('-');
            }
            pending_dash = false;
            out.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    out
}

/// Parse a config block's key/value rows into a plain mapping.
///
/// The fragment's first element is taken as the block; each of its child
/// elements with at least two cells contributes one entry. A value cell
/// holding a link contributes the link target, otherwise its trimmed text.
pub fn read_block_config(block_html: &str) -> HashMap<String, String> {
    let doc = Html::parse_fragment(block_html);
    let mut config = HashMap::new();

    let Some(block) = doc.root_element().child_elements().next() else {
        return config;
    };

    for row in block.child_elements() {
        let cells: Vec<ElementRef> = row.child_elements().collect();
        if cells.len() < 2 {
            continue;
        }

        let key = to_class_name(&element_text(&cells[0]));
        if key.is_empty() {
            continue;
        }

        config.insert(key, cell_value(&cells[1]));
    }

    config
}

/// A value cell's content: a contained link's href, or its trimmed text.
fn cell_value(cell: &ElementRef) -> String {
    let link_sel = scraper::Selector::parse("a[href]").expect("valid selector");
    if let Some(a) = cell.select(&link_sel).next() {
        if let Some(href) = a.value().attr("href") {
            return href.to_string();
        }
    }
    element_text(cell)
}

fn element_text(el: &ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_name_normalization() {
        assert_eq!(to_class_name("Nav"), "nav");
        assert_eq!(to_class_name("  Sign Up Banner "), "sign-up-banner");
        assert_eq!(to_class_name("foo--bar"), "foo-bar");
        assert_eq!(to_class_name("***"), "");
    }

    #[test]
    fn reads_text_values() {
        let html = r#"<div class="header">
            <div><div>Nav</div><div>/custom-nav</div></div>
            <div><div>Columns</div><div>3</div></div>
        </div>"#;
        let config = read_block_config(html);
        assert_eq!(config.get("nav").map(String::as_str), Some("/custom-nav"));
        assert_eq!(config.get("columns").map(String::as_str), Some("3"));
    }

    #[test]
    fn link_cells_yield_href() {
        let html = r#"<div class="header">
            <div><div>Nav</div><div><a href="/global/nav">nav doc</a></div></div>
        </div>"#;
        let config = read_block_config(html);
        assert_eq!(config.get("nav").map(String::as_str), Some("/global/nav"));
    }

    #[test]
    fn rows_without_two_cells_skipped() {
        let html = r#"<div class="header"><div><div>only-key</div></div></div>"#;
        assert!(read_block_config(html).is_empty());
    }

    #[test]
    fn empty_block_yields_empty_config() {
        assert!(read_block_config("").is_empty());
        assert!(read_block_config("<div></div>").is_empty());
    }
}
