//! Link-list accordion and signup banner rewrites.

use blockport_blocks::{create_table, section_break};

use crate::document::PageDocument;
use crate::dom::{closest_with_class, select_all_in, select_first_in, theme_token};
use crate::passes::PassContext;

/// Collapse each accordion block's headings and buttons into one
/// HTML-joined cell, paired with a theme Section Metadata table.
pub(crate) fn link_list(doc: &mut PageDocument, ctx: &PassContext) {
    let profile = ctx.profile;

    let edits: Vec<(String, String)> = {
        let parsed = doc.parse();
        select_all_in(&parsed.root_element(), &profile.accordion_selector)
            .iter()
            .map(|accordion| {
                let items: Vec<String> = select_all_in(accordion, &profile.accordion_item_selector)
                    .iter()
                    .map(|el| el.html())
                    .collect();

                let theme = profile
                    .curator_wrapper_class
                    .as_deref()
                    .and_then(|class| closest_with_class(accordion, class))
                    .map(|wrapper| theme_token(&wrapper))
                    .unwrap_or_default();

                let table = create_table(&[
                    vec!["Link List".to_string()],
                    vec![items.join("<br>")],
                ]);
                let section_meta = create_table(&[
                    vec!["Section Metadata".to_string()],
                    vec!["theme".to_string(), theme],
                ]);

                (
                    accordion.html(),
                    format!("{table}{section_meta}{}", section_break()),
                )
            })
            .collect()
    };

    for (needle, replacement) in edits {
        doc.replace_once(&needle, &replacement);
    }
}

/// Rewrite each newsletter banner into a two-column table bracketed by
/// section breaks.
pub(crate) fn signup_banner(doc: &mut PageDocument, ctx: &PassContext) {
    let profile = ctx.profile;

    let edits: Vec<(String, String)> = {
        let parsed = doc.parse();
        select_all_in(&parsed.root_element(), &profile.newsletter_selector)
            .iter()
            .map(|banner| {
                let left = select_first_in(banner, &profile.newsletter_left_selector)
                    .map(|el| el.html())
                    .unwrap_or_default();
                let right = select_first_in(banner, &profile.newsletter_right_selector)
                    .map(|el| el.html())
                    .unwrap_or_default();

                let table = create_table(&[vec!["Sign Up Banner".to_string()], vec![left, right]]);

                (
                    banner.html(),
                    format!("{hr}{table}{hr}", hr = section_break()),
                )
            })
            .collect()
    };

    for (needle, replacement) in edits {
        doc.replace_once(&needle, &replacement);
    }
}
