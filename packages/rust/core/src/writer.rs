//! Output-tree writer.
//!
//! Takes transformed pages and their records, then writes the final import
//! directory structure to disk:
//!
//! ```text
//! <output_root>/<job_id>/
//! ├── manifest.json
//! ├── pages.json
//! └── docs/
//!     ├── index.html
//!     ├── stories/
//!     │   └── a-new-pathway.html
//!     └── ...
//! ```

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{debug, info, instrument};

use blockport_shared::{
    BlockportError, CURRENT_SCHEMA_VERSION, ImportManifest, JobId, PageRecord, Result,
};

/// Output from a successful write.
#[derive(Debug, Clone)]
pub struct WriteResult {
    /// Absolute path to the job's output directory.
    pub output_path: PathBuf,
    /// Number of pages written.
    pub page_count: usize,
    /// The manifest that was written.
    pub manifest: ImportManifest,
}

/// A transformed page ready for writing.
#[derive(Debug, Clone)]
pub struct OutputPage {
    /// Derived document path (e.g. `/stories/a-new-pathway`).
    pub path: String,
    /// Transformed block markup.
    pub html: String,
}

/// Configuration for the output writer.
#[derive(Debug, Clone)]
pub struct WriteConfig {
    pub job_id: JobId,
    pub profile: String,
    pub source_origin: String,
    pub output_root: PathBuf,
    pub tool_version: String,
}

/// Write the complete output tree for one import job.
#[instrument(skip_all, fields(job_id = %config.job_id, pages = pages.len()))]
pub fn write_output(
    config: &WriteConfig,
    pages: &[OutputPage],
    records: &[PageRecord],
) -> Result<WriteResult> {
    let job_dir = config.output_root.join(config.job_id.to_string());
    let docs_dir = job_dir.join("docs");

    info!(path = %job_dir.display(), "writing import output");

    std::fs::create_dir_all(&docs_dir).map_err(|e| BlockportError::io(&docs_dir, e))?;

    let manifest = ImportManifest {
        schema_version: CURRENT_SCHEMA_VERSION,
        id: config.job_id.clone(),
        profile: config.profile.clone(),
        source_origin: config.source_origin.clone(),
        tool_version: config.tool_version.clone(),
        created_at: Utc::now(),
        page_count: pages.len(),
    };
    write_json(&job_dir.join("manifest.json"), &manifest)?;
    write_json(&job_dir.join("pages.json"), &records)?;

    for page in pages {
        write_page(&docs_dir, page)?;
    }

    info!(
        page_count = pages.len(),
        path = %job_dir.display(),
        "output write complete"
    );

    Ok(WriteResult {
        output_path: job_dir,
        page_count: pages.len(),
        manifest,
    })
}

/// Verify that an output directory is well-formed.
pub fn validate_output(output_path: &Path) -> Result<()> {
    let manifest_path = output_path.join("manifest.json");
    let docs_dir = output_path.join("docs");

    if !manifest_path.exists() {
        return Err(BlockportError::validation("missing manifest.json"));
    }
    if !docs_dir.exists() {
        return Err(BlockportError::validation("missing docs/ directory"));
    }

    let content = std::fs::read_to_string(&manifest_path)
        .map_err(|e| BlockportError::io(&manifest_path, e))?;
    let manifest: ImportManifest = serde_json::from_str(&content)
        .map_err(|e| BlockportError::validation(format!("invalid manifest.json: {e}")))?;

    if manifest.schema_version != CURRENT_SCHEMA_VERSION {
        return Err(BlockportError::validation(format!(
            "unsupported schema_version: {} (expected {})",
            manifest.schema_version, CURRENT_SCHEMA_VERSION
        )));
    }

    Ok(())
}

/// Serialize a value as pretty JSON to `path`.
fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| BlockportError::validation(format!("serialize {}: {e}", path.display())))?;
    std::fs::write(path, json).map_err(|e| BlockportError::io(path, e))
}

/// Write one page under `docs/`, creating parent directories.
fn write_page(docs_dir: &Path, page: &OutputPage) -> Result<()> {
    let relative = sanitize_path(&page.path);
    let file_path = docs_dir.join(format!("{relative}.html"));

    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| BlockportError::io(parent, e))?;
    }

    debug!(path = %file_path.display(), "writing page");
    std::fs::write(&file_path, &page.html).map_err(|e| BlockportError::io(&file_path, e))
}

/// Make a derived document path safe to join under `docs/`.
///
/// Strips the leading slash, drops `..` and empty components, and maps the
/// site root to `index`.
fn sanitize_path(path: &str) -> String {
    let cleaned: Vec<&str> = path
        .split('/')
        .filter(|part| !part.is_empty() && *part != "." && *part != "..")
        .collect();

    if cleaned.is_empty() {
        "index".to_string()
    } else {
        cleaned.join("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_root(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("blockport-writer-{tag}-{}", Uuid::now_v7()))
    }

    fn config(root: &Path) -> WriteConfig {
        WriteConfig {
            job_id: JobId::new(),
            profile: "science".into(),
            source_origin: "https://www.example.com".into(),
            output_root: root.to_path_buf(),
            tool_version: "0.1.0".into(),
        }
    }

    #[test]
    fn writes_manifest_pages_and_docs() {
        let root = temp_root("full");
        let pages = vec![
            OutputPage {
                path: "/stories/a-new-pathway".into(),
                html: "<h1>A new pathway</h1>".into(),
            },
            OutputPage {
                path: "".into(),
                html: "<p>home</p>".into(),
            },
        ];

        let result = write_output(&config(&root), &pages, &[]).expect("write");

        assert!(result.output_path.join("manifest.json").exists());
        assert!(result.output_path.join("pages.json").exists());
        assert!(
            result
                .output_path
                .join("docs/stories/a-new-pathway.html")
                .exists()
        );
        assert!(result.output_path.join("docs/index.html").exists());

        validate_output(&result.output_path).expect("valid output");

        let _ = std::fs::remove_dir_all(&root);
    }

    #[test]
    fn sanitize_path_blocks_traversal() {
        assert_eq!(sanitize_path("/stories/a"), "stories/a");
        assert_eq!(sanitize_path("/../../etc/passwd"), "etc/passwd");
        assert_eq!(sanitize_path(""), "index");
        assert_eq!(sanitize_path("/"), "index");
    }

    #[test]
    fn validate_output_rejects_missing_manifest() {
        let root = temp_root("invalid");
        std::fs::create_dir_all(root.join("docs")).unwrap();

        let err = validate_output(&root).unwrap_err();
        assert!(err.to_string().contains("manifest.json"));

        let _ = std::fs::remove_dir_all(&root);
    }
}
