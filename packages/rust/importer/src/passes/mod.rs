//! The ordered transform-pass table.
//!
//! Each pass matches a fixed selector (or heading label) and rewrites the
//! matched elements into block markup, in place. A pass with zero matches is
//! a silent no-op. Passes run front-to-back in a single sweep — no re-entry,
//! no rollback — and no pass may assume an element a later pass would remove
//! still exists.
//!
//! Ordering constraints:
//! - `metadata` runs first: it consumes the publish-date element and reads
//!   tag links that `strip_chrome` removes.
//! - `topics` runs after `related_stories` and `recommended_stories` so the
//!   section boundaries it deletes do not collide with theirs.
//! - `append_metadata` runs last, emitting the trailing metadata block.

mod banners;
mod chrome;
mod hero;
mod media;
mod metadata;
mod sections;
mod stories;

use url::Url;

use crate::document::PageDocument;
use crate::profile::SiteProfile;

/// Explicit per-document context handed to every pass. Passes never consult
/// ambient state; the source URL and profile arrive as parameters.
pub struct PassContext<'a> {
    pub url: &'a Url,
    pub profile: &'a SiteProfile,
}

/// One entry in the pass table.
pub struct Pass {
    pub name: &'static str,
    pub run: fn(&mut PageDocument, &PassContext),
}

/// The pipeline, in execution order.
pub const PASSES: &[Pass] = &[
    Pass {
        name: "metadata",
        run: metadata::extract_metadata,
    },
    Pass {
        name: "strip_chrome",
        run: chrome::strip_chrome,
    },
    Pass {
        name: "absolutize_links",
        run: chrome::absolutize_links,
    },
    Pass {
        name: "hero",
        run: hero::hero,
    },
    Pass {
        name: "featured_stories",
        run: stories::featured_stories,
    },
    Pass {
        name: "link_list",
        run: banners::link_list,
    },
    Pass {
        name: "stories",
        run: stories::stories_listing,
    },
    Pass {
        name: "signup_banner",
        run: banners::signup_banner,
    },
    Pass {
        name: "related_stories",
        run: sections::related_stories,
    },
    Pass {
        name: "recommended_stories",
        run: sections::recommended_stories,
    },
    Pass {
        name: "topics",
        run: sections::remove_topics,
    },
    Pass {
        name: "quote",
        run: media::quote,
    },
    Pass {
        name: "embed",
        run: media::embed,
    },
    Pass {
        name: "append_metadata",
        run: metadata::append_metadata,
    },
];
