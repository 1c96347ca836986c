//! End-to-end `import` pipeline: fetch → transform → write output tree.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use reqwest::Client;
use sha2::{Digest, Sha256};
use tokio::sync::Semaphore;
use tracing::{debug, info, instrument, warn};
use url::Url;
use uuid::Uuid;

use blockport_importer::Importer;
use blockport_shared::{BlockportError, ImportOptions, JobId, PageRecord, Result};

use crate::writer::{OutputPage, WriteConfig, write_output};

/// User-Agent string for import requests.
const USER_AGENT: &str = concat!("blockport/", env!("CARGO_PKG_VERSION"));

/// Configuration for one import run.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Legacy page URLs to import.
    pub urls: Vec<Url>,
    /// Output root directory; the job writes under `<root>/<job-id>/`.
    pub output_root: PathBuf,
    /// Runtime options merged from config + CLI flags.
    pub options: ImportOptions,
    /// Tool version string recorded in the manifest.
    pub tool_version: String,
}

/// Result of one import run.
#[derive(Debug)]
pub struct ImportReport {
    /// Job identifier.
    pub job_id: JobId,
    /// Path to the job's output directory.
    pub output_path: PathBuf,
    /// Pages fetched, transformed, and written.
    pub pages_imported: usize,
    /// Per-page failures (URL, error message); the run continues past them.
    pub errors: Vec<(String, String)>,
    /// Total elapsed time.
    pub elapsed: Duration,
}

/// Progress callback for reporting pipeline status.
pub trait ProgressReporter: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called when a page is fetched.
    fn page_fetched(&self, url: &str, current: usize, total: usize);
    /// Called when a page is transformed.
    fn page_transformed(&self, path: &str, current: usize, total: usize);
    /// Called when the pipeline completes.
    fn done(&self, report: &ImportReport);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn page_fetched(&self, _url: &str, _current: usize, _total: usize) {}
    fn page_transformed(&self, _path: &str, _current: usize, _total: usize) {}
    fn done(&self, _report: &ImportReport) {}
}

/// One fetched legacy page.
struct FetchedPage {
    url: Url,
    body: String,
    status_code: u16,
}

/// Run the full import pipeline.
///
/// 1. Fetch each legacy page (concurrent, rate-limited)
/// 2. Transform each document through the pass pipeline
/// 3. Write the output tree + manifest
///
/// Per-page failures are recorded and skipped; the run fails only when no
/// page could be imported at all.
#[instrument(skip_all, fields(pages = config.urls.len(), profile = %config.options.profile))]
pub async fn run_import(
    config: &ImportConfig,
    importer: &Importer,
    progress: &dyn ProgressReporter,
) -> Result<ImportReport> {
    let start = Instant::now();
    let job_id = JobId::new();

    info!(%job_id, urls = config.urls.len(), "starting import");

    if config.urls.is_empty() {
        return Err(BlockportError::validation("no URLs to import"));
    }

    // --- Phase 1: Fetch ---
    progress.phase("Fetching legacy pages");
    let client = build_client(config.options.timeout_secs)?;
    let (fetched, errors) = fetch_pages(&client, config, progress).await;

    // --- Phase 2: Transform ---
    progress.phase("Transforming documents");
    let mut pages: Vec<OutputPage> = Vec::new();
    let mut records: Vec<PageRecord> = Vec::new();
    let total = fetched.len();

    for (i, page) in fetched.iter().enumerate() {
        let result = importer.transform(&page.body, &page.url);
        progress.page_transformed(&result.path, i + 1, total);

        records.push(PageRecord {
            id: Uuid::now_v7().to_string(),
            job_id: job_id.to_string(),
            url: page.url.to_string(),
            path: result.path.clone(),
            title: result.metadata.get("Title").map(str::to_string),
            content_hash: compute_hash(&result.body_html),
            fetched_at: Utc::now(),
            status_code: Some(page.status_code),
            content_len: Some(page.body.len()),
        });
        pages.push(OutputPage {
            path: result.path,
            html: result.body_html,
        });
    }

    if pages.is_empty() {
        return Err(BlockportError::validation(
            "no pages could be imported from the legacy source",
        ));
    }

    // --- Phase 3: Write output ---
    progress.phase("Writing output tree");
    let source_origin = config.urls[0].origin().ascii_serialization();
    let write_config = WriteConfig {
        job_id: job_id.clone(),
        profile: importer.profile().name.clone(),
        source_origin,
        output_root: config.output_root.clone(),
        tool_version: config.tool_version.clone(),
    };
    let write_result = write_output(&write_config, &pages, &records)?;

    let report = ImportReport {
        job_id,
        output_path: write_result.output_path,
        pages_imported: pages.len(),
        errors,
        elapsed: start.elapsed(),
    };

    progress.done(&report);

    info!(
        job_id = %report.job_id,
        pages_imported = report.pages_imported,
        errors = report.errors.len(),
        elapsed_ms = report.elapsed.as_millis(),
        "import complete"
    );

    Ok(report)
}

/// Fetch all configured URLs concurrently, bounded by the concurrency
/// option and rate-limited per request.
async fn fetch_pages(
    client: &Client,
    config: &ImportConfig,
    progress: &dyn ProgressReporter,
) -> (Vec<FetchedPage>, Vec<(String, String)>) {
    let semaphore = Arc::new(Semaphore::new(config.options.concurrency.max(1) as usize));
    let rate_limit = config.options.rate_limit_ms;
    let total = config.urls.len();

    let mut handles = Vec::new();
    for url in config.urls.clone() {
        let client = client.clone();
        let sem = semaphore.clone();

        handles.push(tokio::spawn(async move {
            let _permit = sem.acquire().await.expect("semaphore closed");

            if rate_limit > 0 {
                tokio::time::sleep(Duration::from_millis(rate_limit)).await;
            }

            let result = fetch_page(&client, &url).await;
            (url, result)
        }));
    }

    let mut fetched = Vec::new();
    let mut errors = Vec::new();

    for (i, handle) in handles.into_iter().enumerate() {
        match handle.await {
            Ok((url, Ok(page))) => {
                progress.page_fetched(url.as_str(), i + 1, total);
                fetched.push(page);
            }
            Ok((url, Err(e))) => {
                warn!(%url, error = %e, "fetch failed, skipping page");
                errors.push((url.to_string(), e.to_string()));
            }
            Err(e) => {
                errors.push(("task".into(), e.to_string()));
            }
        }
    }

    (fetched, errors)
}

/// Fetch a single legacy page.
async fn fetch_page(client: &Client, url: &Url) -> Result<FetchedPage> {
    debug!(%url, "fetching page");

    let response = client
        .get(url.as_str())
        .send()
        .await
        .map_err(|e| BlockportError::Network(format!("{url}: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(BlockportError::Network(format!("{url}: HTTP {status}")));
    }

    let body = response
        .text()
        .await
        .map_err(|e| BlockportError::Network(format!("{url}: body read failed: {e}")))?;

    Ok(FetchedPage {
        url: url.clone(),
        body,
        status_code: status.as_u16(),
    })
}

/// Build the HTTP client used for page fetches.
fn build_client(timeout_secs: u64) -> Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(5))
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| BlockportError::Network(format!("failed to build HTTP client: {e}")))
}

/// Compute SHA-256 hash of content.
fn compute_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
