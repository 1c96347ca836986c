//! Hero section extraction.

use blockport_blocks::{create_table, section_break};

use crate::document::PageDocument;
use crate::dom::{
    background_image_url, closest_with_class, select_first, select_first_in, theme_token,
    with_appended_child,
};
use crate::passes::PassContext;

/// Rewrite the hero header into its heading plus a Section Metadata table,
/// materialize the hero cover's background image, and close the rich header
/// section if one exists.
pub(crate) fn hero(doc: &mut PageDocument, ctx: &PassContext) {
    hero_header(doc, ctx);
    hero_cover(doc, ctx);
    rich_header(doc, ctx);
}

fn hero_header(doc: &mut PageDocument, ctx: &PassContext) {
    let (needle, replacement) = {
        let parsed = doc.parse();
        let Some(header) = select_first(&parsed, &ctx.profile.hero_header_selector) else {
            return;
        };

        let heading = select_first_in(&header, "h1")
            .map(|h| h.html())
            .unwrap_or_default();
        let section_meta = create_table(&[
            vec!["Section Metadata".to_string()],
            vec!["theme".to_string(), theme_token(&header)],
        ]);

        (
            header.html(),
            format!("{heading}{section_meta}{}", section_break()),
        )
    };

    doc.replace_once(&needle, &replacement);
}

fn hero_cover(doc: &mut PageDocument, ctx: &PassContext) {
    let Ok(media_origin) = ctx.profile.media_origin_url() else {
        return;
    };

    let mut cover_edit: Option<(String, String)> = None;
    let mut wrapper_break: Option<String> = None;
    {
        let parsed = doc.parse();
        let Some(cover) = select_first(&parsed, &ctx.profile.hero_cover_selector) else {
            return;
        };

        if let Some(src) = background_image_url(&cover, &media_origin) {
            let img = format!(r#"<img src="{src}">"#);
            cover_edit = Some((cover.html(), with_appended_child(&cover, &img)));
        }

        if let Some(wrapper_class) = &ctx.profile.hero_wrapper_class {
            if let Some(wrapper) = closest_with_class(&cover, wrapper_class) {
                wrapper_break = Some(wrapper.html());
            }
        }
    }

    // the wrapper needle contains the unedited cover, so add its break first
    if let Some(wrapper) = wrapper_break {
        doc.insert_after(&wrapper, section_break());
    }
    if let Some((needle, replacement)) = cover_edit {
        doc.replace_once(&needle, &replacement);
    }
}

fn rich_header(doc: &mut PageDocument, ctx: &PassContext) {
    let Some(selector) = &ctx.profile.rich_header_selector else {
        return;
    };
    let needle = {
        let parsed = doc.parse();
        match select_first(&parsed, selector) {
            Some(el) => el.html(),
            None => return,
        }
    };
    doc.insert_after(&needle, section_break());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::SiteProfile;
    use url::Url;

    fn run(html: &str) -> PageDocument {
        let mut doc = PageDocument::new(html);
        let profile = SiteProfile::science();
        let url = Url::parse("https://www.example.com/our-science.html").unwrap();
        hero(&mut doc, &PassContext { url: &url, profile: &profile });
        doc
    }

    #[test]
    fn hero_header_becomes_heading_and_theme_table() {
        let html = r#"<html><body>
            <div class="hero-header hero--dark"><div><h1>Our science</h1><p>chrome</p></div></div>
        </body></html>"#;
        let doc = run(html);

        assert!(doc.html().contains("<h1>Our science</h1>"));
        assert!(doc.html().contains("<td>theme</td><td>dark</td>"));
        assert!(doc.html().contains("<hr>"));
        assert!(!doc.html().contains("hero-header"));
    }

    #[test]
    fn hero_without_theme_class_yields_empty_theme_row() {
        let html = r#"<html><body>
            <div class="hero-header"><h1>T</h1></div>
        </body></html>"#;
        let doc = run(html);
        assert!(doc.html().contains("<td>theme</td><td></td>"));
    }

    #[test]
    fn cover_background_image_materialized() {
        let html = r#"<html><body><div class="heroFeature">
            <div class="hero-feature__cover" style="background-image: url(/media/cover.jpg)"></div>
        </div></body></html>"#;
        let doc = run(html);

        assert!(doc.html().contains(r#"<img src="http://localhost:3000/media/cover.jpg">"#));
        // break lands after the wrapper
        assert!(doc.html().contains("</div><hr>"));
    }

    #[test]
    fn cover_without_background_image_left_alone() {
        let html = r#"<html><body><div class="heroFeature">
            <div class="hero-feature__cover"></div>
        </div></body></html>"#;
        let doc = run(html);
        assert!(!doc.html().contains("<img"));
    }

    #[test]
    fn no_hero_is_a_noop() {
        let html = "<html><body><p>nothing heroic</p></body></html>";
        let doc = run(html);
        assert!(doc.html().contains("<p>nothing heroic</p>"));
        assert!(!doc.html().contains("Section Metadata"));
    }
}
