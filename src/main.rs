//! uicov: UI interaction coverage for HTML pages.
mod script;

use clap::{Parser, Subcommand};
use coverage::{
    CoverageConfig, CoverageError, CoverageStore, CoverageSummary, FileStorage, Instrumenter, Page,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser)]
#[command(name = "uicov")]
#[command(version, about = "Track which interactive elements of a page were exercised", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the per-origin storage files
    #[arg(long, global = true, default_value = ".uicov")]
    storage: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a page, instrument it and replay an interaction script
    Run {
        /// HTML file to load
        html: PathBuf,

        /// Location the page is served from
        #[arg(long)]
        url: String,

        /// Interaction script, one step per line
        #[arg(long)]
        script: Option<PathBuf>,

        /// Extra stylesheet applied to the page
        #[arg(long)]
        css: Option<PathBuf>,
    },

    /// Write the coverage store of an origin as JSON
    Export {
        /// Origin whose storage to read, e.g. https://shop.test
        origin: String,

        /// Output file
        #[arg(long, short, default_value = "ui-coverage.json")]
        output: PathBuf,
    },

    /// Print triggered/total counts per page
    Report {
        origin: String,

        /// Also list untriggered elements
        #[arg(long)]
        missing: bool,
    },

    /// Flip the persisted colorization flag of an origin
    ToggleColors { origin: String },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("uicov: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CoverageError> {
    let config = match &cli.config {
        Some(path) => CoverageConfig::load(path)?,
        None => CoverageConfig::default(),
    };

    match cli.command {
        Commands::Run {
            html,
            url,
            script,
            css,
        } => cmd_run(&cli.storage, config, &html, &url, script.as_deref(), css.as_deref()),
        Commands::Export { origin, output } => cmd_export(&cli.storage, &config, &origin, &output),
        Commands::Report { origin, missing } => cmd_report(&cli.storage, &config, &origin, missing),
        Commands::ToggleColors { origin } => cmd_toggle_colors(&cli.storage, &config, &origin),
    }
}

fn read(path: &Path) -> Result<String, CoverageError> {
    std::fs::read_to_string(path).map_err(|source| CoverageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// `scheme://host[:port]` of a location; storage is scoped by it.
fn origin_of(location: &str) -> Result<String, CoverageError> {
    let url = Url::parse(location).map_err(|source| CoverageError::InvalidUrl {
        url: location.to_string(),
        source,
    })?;
    Ok(url.origin().ascii_serialization())
}

fn open_store(
    dir: &Path,
    config: &CoverageConfig,
    origin: &str,
) -> Result<CoverageStore<FileStorage>, CoverageError> {
    let storage = FileStorage::open(dir, &origin_of(origin)?)?;
    Ok(CoverageStore::new(storage, config))
}

fn cmd_run(
    dir: &Path,
    config: CoverageConfig,
    html: &Path,
    url: &str,
    script: Option<&Path>,
    css: Option<&Path>,
) -> Result<(), CoverageError> {
    let mut page = Page::load(url, &read(html)?)?;
    if let Some(css) = css {
        page = page.with_stylesheet(&read(css)?);
    }
    let steps = match script {
        Some(path) => script::parse_script(&read(path)?)?,
        None => Vec::new(),
    };

    let storage = FileStorage::open(dir, &origin_of(url)?)?;
    log::info!(target: "uicov", "storage: {}", storage.path().display());
    let mut instrumenter = Instrumenter::new(storage, config);
    let report = instrumenter.attach(&mut page)?;
    println!(
        "{}: {} tracked elements, {} new entries",
        report.page_key, report.tracked_elements, report.entries_created
    );

    let summary = script::run_steps(&mut instrumenter, &mut page, &steps)?;
    println!(
        "{} steps, {} scans, {} events recorded",
        summary.steps, summary.scans, summary.recorded
    );
    Ok(())
}

fn cmd_export(
    dir: &Path,
    config: &CoverageConfig,
    origin: &str,
    output: &Path,
) -> Result<(), CoverageError> {
    let store = open_store(dir, config, origin)?;
    let json = store.export()?;
    std::fs::write(output, json).map_err(|source| CoverageError::Io {
        path: output.to_path_buf(),
        source,
    })?;
    println!("exported {}", output.display());
    Ok(())
}

fn cmd_report(
    dir: &Path,
    config: &CoverageConfig,
    origin: &str,
    missing: bool,
) -> Result<(), CoverageError> {
    let store = open_store(dir, config, origin)?;
    let summary = CoverageSummary::from_coverage(&store.snapshot());
    println!("{summary}");
    if missing {
        for page in &summary.pages {
            for (identity, event_type) in &page.missing {
                println!("{} ({event_type}): {identity}", page.page_key);
            }
        }
    }
    Ok(())
}

fn cmd_toggle_colors(dir: &Path, config: &CoverageConfig, origin: &str) -> Result<(), CoverageError> {
    let mut store = open_store(dir, config, origin)?;
    let enabled = !store.colors_enabled(config.colorize_default);
    store.set_colors_enabled(enabled)?;
    println!("colorization {}", if enabled { "on" } else { "off" });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from([
            "uicov",
            "--storage",
            "/tmp/s",
            "run",
            "page.html",
            "--url",
            "https://shop.test/",
        ])
        .expect("valid args");
        assert_eq!(cli.storage, PathBuf::from("/tmp/s"));
        assert!(matches!(cli.command, Commands::Run { .. }));

        let cli = Cli::try_parse_from(["uicov", "report", "https://shop.test", "--missing"])
            .expect("valid args");
        assert!(matches!(cli.command, Commands::Report { missing: true, .. }));
        assert!(Cli::try_parse_from(["uicov", "frobnicate"]).is_err());
    }

    #[test]
    fn origins_drop_paths_and_default_ports() {
        assert_eq!(
            origin_of("https://shop.test:443/items/1?x").expect("valid"),
            "https://shop.test"
        );
        assert_eq!(
            origin_of("http://localhost:8080/").expect("valid"),
            "http://localhost:8080"
        );
        assert!(origin_of("not a url").is_err());
    }
}
