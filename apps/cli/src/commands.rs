//! CLI command definitions, routing, and tracing setup.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use url::Url;

use blockport_core::pipeline::{ImportConfig, ImportReport, ProgressReporter, run_import};
use blockport_importer::{Importer, SiteProfile, generate_document_path};
use blockport_shared::{ImportOptions, config_file_path, init_config, load_config};

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// blockport — migrate legacy pages into block markup.
#[derive(Parser)]
#[command(
    name = "blockport",
    version,
    about = "Migrate legacy site pages into block markup and render the decorated navigation.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

/// Top-level CLI subcommands.
#[derive(Subcommand)]
pub(crate) enum Command {
    /// Import legacy pages and write their block-markup documents.
    Import {
        /// Legacy page URLs to import.
        #[arg(required = true)]
        urls: Vec<String>,

        /// Site profile: a built-in name (corporate, science) or a TOML file.
        #[arg(short, long)]
        profile: Option<String>,

        /// Output directory (defaults to var/import).
        #[arg(short, long)]
        out: Option<String>,
    },

    /// Render the decorated navigation header.
    Nav {
        /// Origin to fetch the fragment from (defaults to [nav] config).
        #[arg(long)]
        origin: Option<String>,

        /// Header block HTML file carrying a `nav` path override.
        #[arg(long)]
        block: Option<PathBuf>,
    },

    /// Print the derived document path for each URL.
    Path {
        /// URLs to derive paths for.
        #[arg(required = true)]
        urls: Vec<String>,
    },

    /// Configuration management.
    Config {
        /// Config subcommand.
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands.
#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Initialize config file with defaults.
    Init,
    /// Show resolved configuration.
    Show,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "blockport=info",
        1 => "blockport=debug",
        _ => "blockport=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt()
                .with_env_filter(env_filter)
                .with_target(false)
                .init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Command dispatch
// ---------------------------------------------------------------------------

/// Run the CLI command.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Import { urls, profile, out } => {
            cmd_import(&urls, profile.as_deref(), out.as_deref()).await
        }
        Command::Nav { origin, block } => cmd_nav(origin.as_deref(), block.as_deref()).await,
        Command::Path { urls } => cmd_path(&urls),
        Command::Config { action } => match action {
            ConfigAction::Init => cmd_config_init(),
            ConfigAction::Show => cmd_config_show(),
        },
    }
}

// ---------------------------------------------------------------------------
// Command handlers
// ---------------------------------------------------------------------------

async fn cmd_import(urls: &[String], profile: Option<&str>, out: Option<&str>) -> Result<()> {
    let config = load_config()?;

    let parsed_urls: Vec<Url> = urls
        .iter()
        .map(|u| Url::parse(u).map_err(|e| eyre!("invalid URL '{u}': {e}")))
        .collect::<Result<_>>()?;

    let mut options = ImportOptions::from(&config);
    if let Some(name) = profile {
        options.profile = name.to_string();
    }

    let output_root = match out {
        Some(p) => PathBuf::from(p),
        None => PathBuf::from(&config.defaults.output_dir),
    };

    let site_profile = SiteProfile::resolve(&options.profile)?;
    let importer = Importer::new(site_profile)?;

    let import_config = ImportConfig {
        urls: parsed_urls,
        output_root,
        options,
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
    };

    info!(
        urls = urls.len(),
        profile = %importer.profile().name,
        "importing legacy pages"
    );

    let reporter = CliProgress::new();
    let report = run_import(&import_config, &importer, &reporter).await?;

    println!();
    println!("  Import complete!");
    println!("  Job:      {}", report.job_id);
    println!("  Pages:    {}", report.pages_imported);
    println!("  Errors:   {}", report.errors.len());
    println!("  Path:     {}", report.output_path.display());
    println!("  Time:     {:.1}s", report.elapsed.as_secs_f64());
    for (url, error) in &report.errors {
        println!("    failed: {url}: {error}");
    }
    println!();

    Ok(())
}

async fn cmd_nav(origin: Option<&str>, block: Option<&std::path::Path>) -> Result<()> {
    let mut config = load_config()?;
    if let Some(origin) = origin {
        config.nav.origin = origin.to_string();
    }

    let block_html = match block {
        Some(path) => Some(
            std::fs::read_to_string(path)
                .map_err(|e| eyre!("cannot read block file {}: {e}", path.display()))?,
        ),
        None => None,
    };

    let html = blockport_core::render_nav(&config, block_html.as_deref()).await?;
    println!("{html}");

    Ok(())
}

fn cmd_path(urls: &[String]) -> Result<()> {
    for raw in urls {
        let url = Url::parse(raw).map_err(|e| eyre!("invalid URL '{raw}': {e}"))?;
        println!("{}", generate_document_path(&url));
    }
    Ok(())
}

fn cmd_config_init() -> Result<()> {
    let path = init_config()?;
    println!("created {}", path.display());
    Ok(())
}

fn cmd_config_show() -> Result<()> {
    let config = load_config()?;
    let path = config_file_path()?;
    println!("# {}", path.display());
    println!("{}", toml::to_string_pretty(&config)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// CLI progress reporter
// ---------------------------------------------------------------------------

/// CLI progress reporter using an indicatif spinner.
struct CliProgress {
    spinner: ProgressBar,
}

impl CliProgress {
    fn new() -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .expect("valid template")
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        Self { spinner }
    }
}

impl ProgressReporter for CliProgress {
    fn phase(&self, name: &str) {
        self.spinner.set_message(name.to_string());
    }

    fn page_fetched(&self, url: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Fetching [{current}/{total}] {url}"));
    }

    fn page_transformed(&self, path: &str, current: usize, total: usize) {
        self.spinner
            .set_message(format!("Transforming [{current}/{total}] {path}"));
    }

    fn done(&self, _report: &ImportReport) {
        self.spinner.finish_and_clear();
    }
}
