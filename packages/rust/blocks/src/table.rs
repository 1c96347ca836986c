//! Block table generation.
//!
//! The downstream conversion stage recognizes blocks as `<table>` markup:
//! the first row names the block in a header cell spanning the full width,
//! and every following row holds the block's content cells. Cells carry raw
//! HTML — text, a serialized element, or several elements joined together.

/// Build block `<table>` markup from row-oriented data.
///
/// The first row is rendered as the header. Column count is taken from the
/// widest row; a short row's last cell is widened with `colspan` so every
/// row spans the full block width.
pub fn create_table(rows: &[Vec<String>]) -> String {
    let Some((header, data)) = rows.split_first() else {
        return String::new();
    };

    let col_count = rows[1..].iter().map(|r| r.len()).max().unwrap_or(1).max(1);

    let mut html = String::from("<table>");

    html.push_str("<tr>");
    let title = header.first().map(String::as_str).unwrap_or_default();
    if col_count > 1 {
        html.push_str(&format!(r#"<th colspan="{col_count}">{title}</th>"#));
    } else {
        html.push_str(&format!("<th>{title}</th>"));
    }
    html.push_str("</tr>");

    for row in data {
        html.push_str("<tr>");
        for (i, cell) in row.iter().enumerate() {
            let span = if i == row.len() - 1 && row.len() < col_count {
                col_count - row.len() + 1
            } else {
                1
            };
            if span > 1 {
                html.push_str(&format!(r#"<td colspan="{span}">{cell}</td>"#));
            } else {
                html.push_str(&format!("<td>{cell}</td>"));
            }
        }
        html.push_str("</tr>");
    }

    html.push_str("</table>");
    html
}

/// Section break separating document sections in block markup.
pub fn section_break() -> &'static str {
    "<hr>"
}

/// Build a `<ul>`/`<ol>` from item HTML. Empty input yields an empty string.
pub fn list(items: &[String], ordered: bool) -> String {
    if items.is_empty() {
        return String::new();
    }

    let tag = if ordered { "ol" } else { "ul" };
    let mut html = format!("<{tag}>");
    for item in items {
        html.push_str(&format!("<li>{item}</li>"));
    }
    html.push_str(&format!("</{tag}>"));
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_column_table() {
        let rows = vec![
            vec!["Related Stories".to_string()],
            vec!["<ul><li>a</li></ul>".to_string()],
        ];
        let html = create_table(&rows);
        assert_eq!(
            html,
            "<table><tr><th>Related Stories</th></tr><tr><td><ul><li>a</li></ul></td></tr></table>"
        );
    }

    #[test]
    fn header_spans_widest_row() {
        let rows = vec![
            vec!["Sign Up Banner".to_string()],
            vec!["<div>left</div>".to_string(), "<div>right</div>".to_string()],
        ];
        let html = create_table(&rows);
        assert!(html.contains(r#"<th colspan="2">Sign Up Banner</th>"#));
        assert!(html.contains("<td><div>left</div></td><td><div>right</div></td>"));
    }

    #[test]
    fn short_row_last_cell_widened() {
        let rows = vec![
            vec!["Stories".to_string()],
            vec!["Limit".to_string(), "6".to_string()],
            vec!["full-width".to_string()],
        ];
        let html = create_table(&rows);
        assert!(html.contains(r#"<td colspan="2">full-width</td>"#));
    }

    #[test]
    fn empty_rows_yield_empty_string() {
        assert_eq!(create_table(&[]), "");
    }

    #[test]
    fn list_builds_items_in_order() {
        let items = vec!["<a href=\"/a\">A</a>".to_string(), "B".to_string()];
        assert_eq!(
            list(&items, false),
            "<ul><li><a href=\"/a\">A</a></li><li>B</li></ul>"
        );
        assert!(list(&items, true).starts_with("<ol>"));
    }

    #[test]
    fn empty_list_is_empty_string() {
        assert_eq!(list(&[], false), "");
    }
}
