//! Site profiles: the per-site selector/label tables driving the passes.
//!
//! The legacy migration carried one importer script per site section, each a
//! near-verbatim copy of the others with different selectors. Here a single
//! pipeline is parameterized by a [`SiteProfile`]; the built-in `corporate`
//! and `science` profiles cover the two legacy variants, and custom profiles
//! load from a TOML file.

use std::path::Path;

use scraper::Selector;
use serde::{Deserialize, Serialize};
use url::Url;

use blockport_shared::{BlockportError, Result};

/// Selector/label table for one legacy site variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteProfile {
    /// Profile name, recorded in the import manifest.
    pub name: String,

    // --- Origins ---
    /// Origin root-relative page links are absolutized against.
    pub content_origin: String,
    /// Origin images and background URLs are resolved against.
    pub media_origin: String,
    /// Strip a trailing `.html` from links before absolutizing.
    pub strip_link_extension: bool,

    // --- Chrome removal ---
    /// Elements removed wholesale before any block extraction.
    pub chrome_selectors: Vec<String>,

    // --- Metadata ---
    /// The known publish-date element.
    pub date_selector: Option<String>,
    /// Class of the container removed once the date is consumed.
    pub date_container_class: Option<String>,
    /// Tag links joined into the `Tags` metadata row.
    pub tags_selector: Option<String>,

    // --- Hero ---
    pub hero_header_selector: String,
    pub hero_cover_selector: String,
    /// Wrapper that receives a section break after the cover.
    pub hero_wrapper_class: Option<String>,
    /// Rich-header section that receives a trailing section break.
    pub rich_header_selector: Option<String>,

    // --- Featured/trending stories ---
    pub story_wrapper_selector: String,
    pub feature_story_selector: String,
    /// Header paragraph removed from the feature story cell.
    pub feature_story_header_selector: String,
    pub trending_story_selector: String,
    pub trending_title_selector: String,
    /// The anchor a trending story is reduced to.
    pub trending_link_selector: String,
    pub signup_link_selector: String,

    // --- Link list / accordion ---
    pub accordion_selector: String,
    pub accordion_item_selector: String,
    /// Wrapper whose theme class feeds the Section Metadata table.
    pub curator_wrapper_class: Option<String>,

    // --- Stories listing ---
    /// App mounts and "show more" wrappers replaced by the directive table.
    pub stories_mount_selectors: Vec<String>,
    /// URL path segment marking a topic page.
    pub topic_path_segment: String,
    pub topic_row_limit: u32,
    pub default_row_limit: u32,

    // --- Signup banner ---
    pub newsletter_selector: String,
    pub newsletter_left_selector: String,
    pub newsletter_right_selector: String,

    // --- Heading-driven sections ---
    /// Case-insensitive heading vocabulary for related stories.
    pub related_labels: Vec<String>,
    pub recommended_label: String,
    pub topic_label: String,
    pub content_tile_selector: String,
    /// Class of the section wrappers the heading passes operate on.
    pub section_class: String,

    // --- Quote / embed ---
    pub quote_selector: String,
    pub video_link_selector: String,
    /// Fragment parameter carrying the embed identifier.
    pub embed_fragment_param: String,
    /// Template for the embed URL; `{id}` is substituted.
    pub embed_url_template: String,
}

impl SiteProfile {
    /// The corporate site variant.
    pub fn corporate() -> Self {
        Self {
            name: "corporate".into(),
            content_origin: "https://www.example.com/".into(),
            media_origin: "http://localhost:3000/".into(),
            strip_link_extension: true,
            chrome_selectors: vec![
                ".modal-window".into(),
                ".mainnav".into(),
                ".shortcuts".into(),
                "footer".into(),
            ],
            date_selector: None,
            date_container_class: None,
            tags_selector: None,
            hero_header_selector: ".hero-header".into(),
            hero_cover_selector: ".hero-feature__cover".into(),
            hero_wrapper_class: Some("heroFeature".into()),
            rich_header_selector: None,
            story_wrapper_selector: ".homepage-hero-story-wrapper".into(),
            feature_story_selector: ".homepage-hero__feature-story".into(),
            feature_story_header_selector: "p.media-text-link__header".into(),
            trending_story_selector: ".homepage-hero__trending-story".into(),
            trending_title_selector: ".homepage-hero__trending-stories .homepage-hero__story-title"
                .into(),
            trending_link_selector: ".trending-story-content .media-text-link__header > a".into(),
            signup_link_selector: "a.homepage-hero__latest-stories-cta".into(),
            accordion_selector: ".curator__accordion-block".into(),
            accordion_item_selector: "h3, .button".into(),
            curator_wrapper_class: Some("content-set-curator".into()),
            stories_mount_selectors: vec!["#ng-app".into(), "div.showMoreWrapper".into()],
            topic_path_segment: "/topics/".into(),
            topic_row_limit: 3,
            default_row_limit: 6,
            newsletter_selector: ".newsletterSignUpBanner".into(),
            newsletter_left_selector: ".col-left".into(),
            newsletter_right_selector: ".col-right".into(),
            related_labels: vec!["related story".into(), "related stories".into()],
            recommended_label: "you may also like".into(),
            topic_label: "topic:".into(),
            content_tile_selector: "a.content-tile".into(),
            section_class: "section".into(),
            quote_selector: "blockquote".into(),
            video_link_selector: "a.video-link".into(),
            embed_fragment_param: "videoId".into(),
            embed_url_template: "https://players.example.com/embed/{id}".into(),
        }
    }

    /// The science-stories site variant.
    pub fn science() -> Self {
        Self {
            name: "science".into(),
            content_origin: "https://pages.example.com/".into(),
            strip_link_extension: false,
            chrome_selectors: vec![
                "ul.shortcuts".into(),
                "div.mainnav".into(),
                ".modal-window".into(),
                ".leftPar.parsys".into(),
                "div.footer-component".into(),
            ],
            date_selector: Some(".publishedDate .date__date".into()),
            date_container_class: Some("publishedDate".into()),
            tags_selector: Some(".leftPar.parsys .text.section a".into()),
            rich_header_selector: Some(".section.richHeader".into()),
            ..Self::corporate()
        }
    }

    /// Look up a built-in profile by name.
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "corporate" => Some(Self::corporate()),
            "science" => Some(Self::science()),
            _ => None,
        }
    }

    /// Load a custom profile from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BlockportError::io(path, e))?;
        let profile: Self = toml::from_str(&content).map_err(|e| {
            BlockportError::config(format!("failed to parse {}: {e}", path.display()))
        })?;
        profile.validate()?;
        Ok(profile)
    }

    /// Resolve a built-in name, falling back to a TOML file path.
    pub fn resolve(name_or_path: &str) -> Result<Self> {
        if let Some(profile) = Self::builtin(name_or_path) {
            return Ok(profile);
        }
        let path = Path::new(name_or_path);
        if path.exists() {
            return Self::load(path);
        }
        Err(BlockportError::config(format!(
            "unknown profile '{name_or_path}' (built-ins: corporate, science)"
        )))
    }

    /// Check that every selector and origin in the profile parses.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in self.selectors() {
            Selector::parse(value)
                .map_err(|e| BlockportError::config(format!("invalid {field} selector: {e}")))?;
        }

        self.content_origin_url()?;
        self.media_origin_url()?;
        Ok(())
    }

    /// All selector fields with their names, for validation.
    fn selectors(&self) -> Vec<(&'static str, &str)> {
        let mut all: Vec<(&'static str, &str)> = vec![
            ("hero_header", &self.hero_header_selector),
            ("hero_cover", &self.hero_cover_selector),
            ("story_wrapper", &self.story_wrapper_selector),
            ("feature_story", &self.feature_story_selector),
            ("feature_story_header", &self.feature_story_header_selector),
            ("trending_story", &self.trending_story_selector),
            ("trending_title", &self.trending_title_selector),
            ("trending_link", &self.trending_link_selector),
            ("signup_link", &self.signup_link_selector),
            ("accordion", &self.accordion_selector),
            ("accordion_item", &self.accordion_item_selector),
            ("newsletter", &self.newsletter_selector),
            ("newsletter_left", &self.newsletter_left_selector),
            ("newsletter_right", &self.newsletter_right_selector),
            ("content_tile", &self.content_tile_selector),
            ("quote", &self.quote_selector),
            ("video_link", &self.video_link_selector),
        ];
        all.extend(self.chrome_selectors.iter().map(|s| ("chrome", s.as_str())));
        all.extend(
            self.stories_mount_selectors
                .iter()
                .map(|s| ("stories_mount", s.as_str())),
        );
        if let Some(s) = &self.date_selector {
            all.push(("date", s));
        }
        if let Some(s) = &self.tags_selector {
            all.push(("tags", s));
        }
        if let Some(s) = &self.rich_header_selector {
            all.push(("rich_header", s));
        }
        all
    }

    /// Parsed content origin.
    pub fn content_origin_url(&self) -> Result<Url> {
        Url::parse(&self.content_origin)
            .map_err(|e| BlockportError::config(format!("invalid content_origin: {e}")))
    }

    /// Parsed media origin.
    pub fn media_origin_url(&self) -> Result<Url> {
        Url::parse(&self.media_origin)
            .map_err(|e| BlockportError::config(format!("invalid media_origin: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_profiles_validate() {
        SiteProfile::corporate().validate().expect("corporate");
        SiteProfile::science().validate().expect("science");
    }

    #[test]
    fn science_overrides_chrome_and_metadata() {
        let science = SiteProfile::science();
        assert_eq!(science.name, "science");
        assert!(science.date_selector.is_some());
        assert!(science.chrome_selectors.iter().any(|s| s.contains("leftPar")));
        // shared defaults still present
        assert_eq!(science.related_labels.len(), 2);
    }

    #[test]
    fn resolve_unknown_name_errors() {
        let err = SiteProfile::resolve("no-such-profile").unwrap_err();
        assert!(err.to_string().contains("unknown profile"));
    }

    #[test]
    fn profile_toml_roundtrip() {
        let profile = SiteProfile::science();
        let toml_str = toml::to_string_pretty(&profile).expect("serialize");
        let parsed: SiteProfile = toml::from_str(&toml_str).expect("deserialize");
        assert_eq!(parsed.name, "science");
        assert_eq!(parsed.topic_row_limit, 3);
    }

    #[test]
    fn invalid_selector_rejected() {
        let mut profile = SiteProfile::corporate();
        profile.hero_header_selector = ":::nope".into();
        assert!(profile.validate().is_err());
    }
}
