//! Fragment decoration: positional classification, dropdown marking, and
//! state re-serialization.

use scraper::{ElementRef, Html, Selector};
use tracing::warn;

use crate::state::NavState;

/// Classes applied to the fragment's top-level children, by position. The
/// classification is positional by contract, not tag- or attribute-based.
const NAV_CLASSES: [&str; 3] = ["brand", "sections", "tools"];

/// Markup for the prepended mobile toggle control.
const HAMBURGER: &str = r#"<div class="nav-hamburger"><div class="nav-hamburger-icon"></div></div>"#;

/// A decorated navigation tree plus the section entries needed to
/// re-serialize interaction state.
#[derive(Debug, Clone)]
pub struct DecoratedNav {
    /// The decorated `<nav>` markup, fully collapsed.
    pub html: String,
    /// Outer HTML of each top-level section entry, in order, as spliced
    /// into `html`.
    entries: Vec<String>,
}

impl DecoratedNav {
    /// Number of top-level section entries.
    pub fn section_count(&self) -> usize {
        self.entries.len()
    }

    /// An all-collapsed interaction state sized for this nav.
    pub fn initial_state(&self) -> NavState {
        NavState::new(self.entries.len())
    }

    /// Re-serialize an interaction state into the decorated markup.
    pub fn render(&self, state: &NavState) -> String {
        let mut out = self.html.clone();

        if state.is_menu_expanded() {
            out = out.replacen(
                r#"<nav aria-expanded="false">"#,
                r#"<nav aria-expanded="true">"#,
                1,
            );
        }

        if let Some(index) = state.expanded() {
            if let Some(entry) = self.entries.get(index) {
                let expanded = entry.replacen(r#"aria-expanded="false""#, r#"aria-expanded="true""#, 1);
                out = out.replacen(entry, &expanded, 1);
            }
        }

        out
    }
}

/// Decorate a fetched navigation fragment.
///
/// The fragment's first three top-level children are classified positionally
/// as brand/sections/tools; a fragment with fewer children is decorated as
/// far as it goes (degraded, not an error). Section entries containing a
/// nested list are marked as dropdowns, every entry starts collapsed, and
/// the mobile toggle is prepended.
pub fn build_nav(fragment_html: &str) -> DecoratedNav {
    let doc = Html::parse_fragment(fragment_html);
    let children: Vec<ElementRef> = doc.root_element().child_elements().collect();

    if children.len() < NAV_CLASSES.len() {
        warn!(
            children = children.len(),
            "nav fragment has fewer than three top-level children; classification degraded"
        );
    }

    let mut html = String::from(r#"<nav aria-expanded="false">"#);
    html.push_str(HAMBURGER);
    let mut entries = Vec::new();

    for (i, child) in children.iter().enumerate() {
        match NAV_CLASSES.get(i) {
            Some(&"sections") => {
                let (sections_html, section_entries) = decorate_sections(child);
                html.push_str(&sections_html);
                entries = section_entries;
            }
            Some(class) => html.push_str(&with_class(child, &format!("nav-{class}"))),
            // children beyond the classified three pass through unchanged
            None => html.push_str(&child.html()),
        }
    }

    html.push_str("</nav>");
    DecoratedNav { html, entries }
}

/// Decorate the sections subtree: add the positional class and rewrite each
/// top-level list entry with expansion attributes.
fn decorate_sections(el: &ElementRef) -> (String, Vec<String>) {
    let mut out = with_class(el, "nav-sections");
    let mut entries = Vec::new();

    let nested_list_sel = Selector::parse("ul").expect("valid selector");

    for ul in el.child_elements().filter(|c| c.value().name() == "ul") {
        for li in ul.child_elements().filter(|c| c.value().name() == "li") {
            let is_drop = li.select(&nested_list_sel).next().is_some();
            let decorated = decorate_entry(&li, is_drop);
            out = out.replacen(&li.html(), &decorated, 1);
            entries.push(decorated);
        }
    }

    (out, entries)
}

/// Rebuild a section entry with its expansion attribute (and dropdown class
/// when it holds a nested list).
fn decorate_entry(li: &ElementRef, is_drop: bool) -> String {
    let mut tag = String::from("<li");

    let mut classes: Vec<&str> = li.value().classes().collect();
    if is_drop && !classes.contains(&"nav-drop") {
        classes.push("nav-drop");
    }
    if !classes.is_empty() {
        tag.push_str(&format!(r#" class="{}""#, classes.join(" ")));
    }

    for (name, value) in li.value().attrs() {
        if name != "class" && name != "aria-expanded" {
            tag.push_str(&format!(r#" {name}="{}""#, escape_attr(value)));
        }
    }

    tag.push_str(r#" aria-expanded="false">"#);
    format!("{tag}{}</li>", li.inner_html())
}

/// Rebuild an element with an extra class merged into its class list.
fn with_class(el: &ElementRef, class: &str) -> String {
    let mut tag = format!("<{}", el.value().name());

    let mut classes: Vec<&str> = el.value().classes().collect();
    if !classes.contains(&class) {
        classes.push(class);
    }
    tag.push_str(&format!(r#" class="{}""#, classes.join(" ")));

    for (name, value) in el.value().attrs() {
        if name != "class" {
            tag.push_str(&format!(r#" {name}="{}""#, escape_attr(value)));
        }
    }

    tag.push('>');
    format!("{tag}{}</{}>", el.inner_html(), el.value().name())
}

fn escape_attr(value: &str) -> String {
    value.replace('&', "&amp;").replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAGMENT: &str = r#"<div><p><a href="/">Brand</a></p></div>
<div>
  <ul>
    <li><a href="/what-we-do">What we do</a><ul><li><a href="/pipeline">Pipeline</a></li></ul></li>
    <li><a href="/stories">Stories</a><ul><li><a href="/topics">Topics</a></li></ul></li>
    <li><a href="/about">About</a></li>
  </ul>
</div>
<div><p><a href="/search">Search</a></p></div>"#;

    #[test]
    fn children_classified_by_position() {
        let nav = build_nav(FRAGMENT);
        assert!(nav.html.contains(r#"class="nav-brand""#));
        assert!(nav.html.contains(r#"class="nav-sections""#));
        assert!(nav.html.contains(r#"class="nav-tools""#));
    }

    #[test]
    fn entries_with_nested_lists_marked_as_dropdowns() {
        let nav = build_nav(FRAGMENT);
        assert_eq!(nav.section_count(), 3);
        assert_eq!(nav.html.matches("nav-drop").count(), 2);
        // the entry without a nested list is not a dropdown
        assert!(nav.html.contains(r#"<li aria-expanded="false"><a href="/about">About</a></li>"#));
    }

    #[test]
    fn hamburger_prepended_and_root_collapsed() {
        let nav = build_nav(FRAGMENT);
        assert!(nav.html.starts_with(r#"<nav aria-expanded="false"><div class="nav-hamburger">"#));
    }

    #[test]
    fn short_fragment_degrades_without_error() {
        let nav = build_nav("<div><p>Brand only</p></div>");
        assert!(nav.html.contains(r#"class="nav-brand""#));
        assert!(!nav.html.contains("nav-sections"));
        assert_eq!(nav.section_count(), 0);
    }

    #[test]
    fn render_reflects_expanded_entry() {
        let nav = build_nav(FRAGMENT);
        let mut state = nav.initial_state();
        state.click_section(1);

        let html = nav.render(&state);
        assert_eq!(html.matches(r#"aria-expanded="true""#).count(), 1);

        state.click_section(1);
        assert_eq!(nav.render(&state), nav.html);
    }

    #[test]
    fn render_reflects_menu_toggle() {
        let nav = build_nav(FRAGMENT);
        let mut state = nav.initial_state();
        state.toggle_menu();

        let html = nav.render(&state);
        assert!(html.starts_with(r#"<nav aria-expanded="true">"#));

        state.toggle_menu();
        assert_eq!(nav.render(&state), nav.html);
    }
}
