//! Featured/trending story extraction and the stories-listing directive.

use blockport_blocks::{create_table, list, section_break};

use crate::document::PageDocument;
use crate::dom::{select_all_in, select_first_in};
use crate::passes::PassContext;

/// Rewrite each hero story wrapper into a Featured Stories table: the
/// primary story, a titled list of trending-story links (each story reduced
/// to its anchor), and an optional signup link.
pub(crate) fn featured_stories(doc: &mut PageDocument, ctx: &PassContext) {
    let profile = ctx.profile;

    let edits: Vec<(String, String)> = {
        let parsed = doc.parse();
        let wrappers = select_all_in(&parsed.root_element(), &profile.story_wrapper_selector);

        wrappers
            .iter()
            .map(|wrapper| {
                let mut rows = vec![vec!["Featured Stories".to_string()]];

                if let Some(feature) = select_first_in(wrapper, &profile.feature_story_selector) {
                    let mut cell = feature.html();
                    if let Some(header) =
                        select_first_in(&feature, &profile.feature_story_header_selector)
                    {
                        cell = cell.replacen(&header.html(), "", 1);
                    }
                    rows.push(vec![cell]);
                }

                let trending: Vec<String> =
                    select_all_in(wrapper, &profile.trending_story_selector)
                        .iter()
                        .filter_map(|story| {
                            select_first_in(story, &profile.trending_link_selector)
                                .map(|a| a.html())
                        })
                        .collect();
                if !trending.is_empty() {
                    let title = select_first_in(wrapper, &profile.trending_title_selector)
                        .map(|t| t.html())
                        .unwrap_or_default();
                    rows.push(vec![format!("{title}{}", list(&trending, false))]);
                }

                if let Some(signup) = select_first_in(wrapper, &profile.signup_link_selector) {
                    rows.push(vec![signup.html()]);
                }

                (
                    wrapper.html(),
                    format!("{}{}", create_table(&rows), section_break()),
                )
            })
            .collect()
    };

    for (needle, replacement) in edits {
        doc.replace_once(&needle, &replacement);
    }
}

/// Replace stories app mounts and "show more" wrappers with a directive
/// table encoding the row limit and an optional topic filter. Topic-ness
/// comes from the source URL path, passed explicitly.
pub(crate) fn stories_listing(doc: &mut PageDocument, ctx: &PassContext) {
    let profile = ctx.profile;
    let is_topic = ctx.url.path().contains(&profile.topic_path_segment);

    let limit = if is_topic {
        profile.topic_row_limit
    } else {
        profile.default_row_limit
    };
    let filter = if is_topic {
        doc.metadata.get("Title").unwrap_or_default().to_string()
    } else {
        String::new()
    };

    let table = create_table(&[
        vec!["Stories".to_string()],
        vec!["Limit".to_string(), limit.to_string()],
        vec!["Filters".to_string(), filter],
    ]);

    for selector in &profile.stories_mount_selectors {
        loop {
            let needle = {
                let parsed = doc.parse();
                match crate::dom::select_first(&parsed, selector) {
                    Some(el) => el.html(),
                    None => break,
                }
            };
            if !doc.replace_once(&needle, &table) {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::SiteProfile;
    use url::Url;

    fn run_with_url(
        html: &str,
        url: &str,
        pass: fn(&mut PageDocument, &PassContext),
    ) -> PageDocument {
        let mut doc = PageDocument::new(html);
        doc.metadata.set("Title", "Oncology");
        let profile = SiteProfile::corporate();
        let url = Url::parse(url).unwrap();
        pass(&mut doc, &PassContext { url: &url, profile: &profile });
        doc
    }

    const WRAPPER: &str = r#"<html><body>
        <div class="homepage-hero-story-wrapper">
            <div class="homepage-hero__feature-story">
                <p class="media-text-link__header">kicker</p>
                <h3>Big story</h3>
            </div>
            <div class="homepage-hero__trending-stories">
                <p class="homepage-hero__story-title">Trending</p>
                <div class="homepage-hero__trending-story">
                    <div class="trending-story-content"><p class="media-text-link__header">
                        <a href="/stories/one">One</a>
                    </p></div>
                </div>
                <div class="homepage-hero__trending-story">
                    <div class="trending-story-content"><p class="media-text-link__header">
                        <a href="/stories/two">Two</a>
                    </p></div>
                </div>
            </div>
            <a class="homepage-hero__latest-stories-cta" href="/signup">Sign up</a>
        </div>
    </body></html>"#;

    #[test]
    fn wrapper_becomes_featured_stories_table() {
        let doc = run_with_url(WRAPPER, "https://www.example.com/", featured_stories);

        assert!(doc.html().contains("<th>Featured Stories</th>"));
        assert!(doc.html().contains("Big story"));
        // kicker paragraph removed from the feature cell
        assert!(!doc.html().contains("kicker"));
        // each trending story reduced to its anchor, in a list
        assert!(doc.html().contains(r#"<li><a href="/stories/one">One</a></li>"#));
        assert!(doc.html().contains(r#"<li><a href="/stories/two">Two</a></li>"#));
        assert!(doc.html().contains("Trending"));
        assert!(doc.html().contains(r#"href="/signup""#));
        assert!(!doc.html().contains("homepage-hero-story-wrapper"));
    }

    #[test]
    fn no_wrapper_is_a_noop() {
        let html = "<html><body><p>plain</p></body></html>";
        let doc = run_with_url(html, "https://www.example.com/", featured_stories);
        assert!(!doc.html().contains("Featured Stories"));
    }

    #[test]
    fn listing_on_regular_page_uses_default_limit() {
        let html = r#"<html><body><div id="ng-app">app</div></body></html>"#;
        let doc = run_with_url(html, "https://www.example.com/stories/", stories_listing);

        assert!(doc.html().contains("<th colspan=\"2\">Stories</th>"));
        assert!(doc.html().contains("<td>Limit</td><td>6</td>"));
        assert!(doc.html().contains("<td>Filters</td><td></td>"));
    }

    #[test]
    fn listing_on_topic_page_uses_topic_limit_and_title_filter() {
        let html = r#"<html><body><div class="showMoreWrapper">more</div></body></html>"#;
        let doc = run_with_url(
            html,
            "https://www.example.com/stories/topics/oncology/",
            stories_listing,
        );

        assert!(doc.html().contains("<td>Limit</td><td>3</td>"));
        assert!(doc.html().contains("<td>Filters</td><td>Oncology</td>"));
    }
}
