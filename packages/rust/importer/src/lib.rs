//! The DOM rewrite pipeline for legacy page migration.
//!
//! Given a loaded HTML document and its source URL, applies an ordered list
//! of independent transform passes and returns the transformed root plus a
//! derived output path. Passes match fixed selectors from a [`SiteProfile`]
//! and rewrite matches into block markup; a zero-match pass is a silent
//! no-op.

mod document;
mod dom;
mod passes;
mod path;
mod pipeline;
mod profile;

pub use document::PageDocument;
pub use passes::{PASSES, Pass, PassContext};
pub use path::generate_document_path;
pub use pipeline::{Importer, TransformResult};
pub use profile::SiteProfile;
