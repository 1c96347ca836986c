//! Heading-driven section rewrites: related stories, recommended stories,
//! and topic removal.
//!
//! Heading matching is a case-insensitive exact comparison against a small
//! fixed vocabulary; the first matching heading in document order wins.

use blockport_blocks::{create_table, list};

use crate::document::PageDocument;
use crate::dom::{
    closest_with_class, collect_following, element_text, escape_text, find_heading,
    next_sibling_element, select_all_in, with_inner,
};
use crate::passes::PassContext;

/// Collect the anchor links in the paragraphs following a "related stories"
/// heading, rebuild them as a Related Stories table, and drop the section
/// that follows.
pub(crate) fn related_stories(doc: &mut PageDocument, ctx: &PassContext) {
    let profile = ctx.profile;

    let mut heading_edit: Option<(String, String)> = None;
    let mut removals: Vec<String> = Vec::new();
    {
        let parsed = doc.parse();
        let Some(heading) = find_heading(&parsed, "h2", &profile.related_labels) else {
            return;
        };

        let (anchors, visited) = collect_following(&heading, "p", "a");
        let table = create_table(&[
            vec!["Related Stories".to_string()],
            vec![list(&anchors, false)],
        ]);

        if let Some(section) = closest_with_class(&heading, &profile.section_class) {
            if let Some(next) = next_sibling_element(&section) {
                removals.push(next.html());
            }
        }

        heading_edit = Some((heading.html(), table));
        removals.extend(visited);
    }

    if let Some((needle, replacement)) = heading_edit {
        doc.replace_once(&needle, &replacement);
    }
    for needle in removals {
        doc.remove(&needle);
    }
}

/// Rebuild the "you may also like" tile section as a single Recommended
/// Stories table: each content-tile link's content becomes the link's own
/// trimmed text.
pub(crate) fn recommended_stories(doc: &mut PageDocument, ctx: &PassContext) {
    let profile = ctx.profile;

    let (start_needle, tile_needle, table) = {
        let parsed = doc.parse();
        let Some(heading) =
            find_heading(&parsed, "h2", std::slice::from_ref(&profile.recommended_label))
        else {
            return;
        };
        let start = closest_with_class(&heading, &profile.section_class).unwrap_or(heading);
        let Some(tiles) = next_sibling_element(&start) else {
            return;
        };

        let links: Vec<String> = select_all_in(&tiles, &profile.content_tile_selector)
            .iter()
            .map(|a| with_inner(a, &escape_text(&element_text(a))))
            .collect();

        let table = create_table(&[
            vec!["Recommended Stories".to_string()],
            vec![list(&links, false)],
        ]);

        (start.html(), tiles.html(), table)
    };

    doc.replace_once(&start_needle, &table);
    doc.remove(&tile_needle);
}

/// Remove a "topic:" heading's section and, when present, the section
/// following it.
pub(crate) fn remove_topics(doc: &mut PageDocument, ctx: &PassContext) {
    let profile = ctx.profile;

    let removals: Vec<String> = {
        let parsed = doc.parse();
        let Some(heading) =
            find_heading(&parsed, "h2", std::slice::from_ref(&profile.topic_label))
        else {
            return;
        };
        let start = closest_with_class(&heading, &profile.section_class).unwrap_or(heading);

        let mut removals = Vec::new();
        if let Some(next) = next_sibling_element(&start) {
            removals.push(next.html());
        }
        removals.push(start.html());
        removals
    };

    for needle in removals {
        doc.remove(&needle);
    }
}
