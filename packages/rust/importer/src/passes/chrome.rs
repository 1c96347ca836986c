//! Chrome removal and link absolutizing.

use blockport_shared::links::absolutize_hrefs;

use crate::document::PageDocument;
use crate::dom::select_first;
use crate::passes::PassContext;

/// Remove navigation, footer, modal and shortcut chrome wholesale.
pub(crate) fn strip_chrome(doc: &mut PageDocument, ctx: &PassContext) {
    for selector in &ctx.profile.chrome_selectors {
        // one element per selector per iteration; re-parse after each removal
        loop {
            let needle = {
                let parsed = doc.parse();
                match select_first(&parsed, selector) {
                    Some(el) => el.html(),
                    None => break,
                }
            };
            if !doc.remove(&needle) {
                break;
            }
        }
    }
}

/// Rewrite every root-relative anchor against the profile's content origin.
pub(crate) fn absolutize_links(doc: &mut PageDocument, ctx: &PassContext) {
    let Ok(origin) = ctx.profile.content_origin_url() else {
        return;
    };
    let rewritten = absolutize_hrefs(doc.html(), &origin, ctx.profile.strip_link_extension);
    doc.set_html(rewritten);
}
