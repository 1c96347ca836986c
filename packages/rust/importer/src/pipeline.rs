//! The transform pipeline: ordered passes over one legacy document.

use tracing::{debug, instrument};
use url::Url;

use blockport_blocks::MetadataRecord;
use blockport_shared::Result;

use crate::document::PageDocument;
use crate::passes::{PASSES, PassContext};
use crate::path::generate_document_path;
use crate::profile::SiteProfile;

/// Outcome of transforming one document.
#[derive(Debug, Clone)]
pub struct TransformResult {
    /// The transformed root: block markup ready for downstream conversion.
    pub body_html: String,
    /// The metadata record extracted from the document.
    pub metadata: MetadataRecord,
    /// Derived output document path.
    pub path: String,
}

/// Applies the pass table to legacy documents under one site profile.
pub struct Importer {
    profile: SiteProfile,
}

impl Importer {
    /// Create an importer after validating the profile's selectors.
    pub fn new(profile: SiteProfile) -> Result<Self> {
        profile.validate()?;
        Ok(Self { profile })
    }

    pub fn profile(&self) -> &SiteProfile {
        &self.profile
    }

    /// Run the full pass table over one document.
    ///
    /// Synchronous and deterministic: no I/O, no suspension, and each call
    /// owns its document exclusively, so identical inputs yield identical
    /// outputs.
    #[instrument(skip(self, html), fields(url = %url, profile = %self.profile.name))]
    pub fn transform(&self, html: &str, url: &Url) -> TransformResult {
        let mut doc = PageDocument::new(html);
        let ctx = PassContext {
            url,
            profile: &self.profile,
        };

        for pass in PASSES {
            debug!(pass = pass.name, "running transform pass");
            (pass.run)(&mut doc, &ctx);
        }

        TransformResult {
            body_html: doc.body_html(),
            metadata: doc.metadata,
            path: generate_document_path(url),
        }
    }
}
