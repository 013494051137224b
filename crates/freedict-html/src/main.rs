use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use freedict_tei::LoadMode;
use freedict_types::LanguagePair;
use reqwest::blocking::Client;
use tracing::{Level, debug, error, info};
use tracing_subscriber::EnvFilter;

use freedict_html::{Catalog, DEFAULT_CATALOG_URL, Fetcher, Generator, Settings};

const HTTP_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Parser, Debug)]
#[command(name = "freedict-html")]
#[command(about = "Generate static per-headword HTML pages from FreeDict dictionaries")]
struct Cli {
    /// Read the catalog from a local freedict-database.json instead of fetching it.
    #[arg(short = 'f', long = "catalog", env = "FREEDICT_CATALOG")]
    catalog: Option<PathBuf>,
    #[arg(long, env = "FREEDICT_CATALOG_URL", default_value = DEFAULT_CATALOG_URL)]
    catalog_url: String,
    /// Where downloaded archives are cached.
    #[arg(long, env = "FREEDICT_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,
    /// Where archives are unpacked.
    #[arg(long, env = "FREEDICT_TEMP_DIR", default_value = "temp")]
    temp_dir: PathBuf,
    #[arg(long, env = "FREEDICT_OUTPUT_DIR", default_value = "html")]
    output_dir: PathBuf,
    #[arg(long, env = "FREEDICT_STYLESHEET", default_value = "dict.css")]
    stylesheet: PathBuf,
    /// `mmap` or `owned`.
    #[arg(long, env = "FREEDICT_LOAD_MODE", default_value = "mmap", value_parser = parse_load_mode)]
    load_mode: LoadMode,
    /// Only generate the named dictionaries (e.g. `deu-eng`); repeatable.
    #[arg(long = "only")]
    only: Vec<String>,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    run(Cli::parse())
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let client = Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .context("build HTTP client")?;

    let catalog = match &cli.catalog {
        Some(path) => Catalog::from_file(path)?,
        None => {
            info!("fetching catalog from {}", cli.catalog_url);
            Catalog::fetch(&client, &cli.catalog_url)?
        }
    };
    info!("catalog lists {} records", catalog.len());

    let fetcher = Fetcher::new(client, &cli.data_dir, &cli.temp_dir);
    let generator = Generator::new(
        fetcher,
        Settings {
            output_dir: cli.output_dir.clone(),
            stylesheet: cli.stylesheet.clone(),
            load_mode: cli.load_mode,
        },
    );

    let mut failed = 0usize;
    for record in catalog.entries() {
        if let Some(reason) = record.skip_reason() {
            debug!("skipping {:?}: {}", record.name, reason);
            continue;
        }
        let Some(name) = record.name.as_deref() else {
            continue;
        };
        if !cli.only.is_empty() && !cli.only.iter().any(|n| n == name) {
            continue;
        }

        // An unmapped language is a catalog/table mismatch; abort the run.
        let pair = LanguagePair::from_name(name).with_context(|| format!("dictionary {name}"))?;

        for release in record.source_releases() {
            if let Err(err) = generator.generate(name, pair, release) {
                error!("{}: {:#}", name, err);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        info!("{} dictionaries failed", failed);
    }
    Ok(())
}

fn parse_load_mode(raw: &str) -> Result<LoadMode, String> {
    match raw.to_ascii_lowercase().as_str() {
        "mmap" => Ok(LoadMode::Mmap),
        "owned" => Ok(LoadMode::Owned),
        other => Err(format!("unknown load mode {other:?} (expected mmap or owned)")),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let max_level = env_filter
        .max_level_hint()
        .and_then(|hint| hint.into_level())
        .unwrap_or(Level::INFO);
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_max_level(max_level)
        .init();
}
