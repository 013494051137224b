//! Per-dictionary generation: fetch, load, render, report.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use freedict_tei::{Dictionary, HeadwordIndex, LoadMode};
use freedict_types::LanguagePair;
use tracing::{info, warn};

use crate::catalog::Release;
use crate::fetch::Fetcher;
use crate::render::write_headword;

/// Stylesheet written when no `dict.css` is available.
pub const DEFAULT_STYLESHEET: &str = include_str!("../assets/dict.css");

/// How many headwords of one dictionary made it to disk.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct GenerationStats {
    pub total: usize,
    pub succeeded: usize,
}

impl GenerationStats {
    /// Share of headwords written, in percent; 100 for an empty dictionary.
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        self.succeeded as f64 * 100.0 / self.total as f64
    }
}

/// Write one page set per headword, in headword order.
pub fn generate_pages(index: &HeadwordIndex, out_dir: &Path) -> Result<GenerationStats> {
    fs::create_dir_all(out_dir).with_context(|| format!("create {}", out_dir.display()))?;

    let mut stats = GenerationStats {
        total: index.len(),
        succeeded: 0,
    };
    for (headword, entries) in index.iter() {
        if write_headword(out_dir, headword, entries) {
            stats.succeeded += 1;
        }
    }
    Ok(stats)
}

/// Copy `stylesheet` into `out_dir`, or the built-in one when it is missing.
pub fn install_stylesheet(stylesheet: &Path, out_dir: &Path) -> Result<()> {
    let dest = out_dir.join("dict.css");
    if stylesheet.is_file() {
        fs::copy(stylesheet, &dest)
            .with_context(|| format!("copy {} to {}", stylesheet.display(), dest.display()))?;
    } else {
        warn!(
            "stylesheet {} not found, writing built-in dict.css",
            stylesheet.display()
        );
        fs::write(&dest, DEFAULT_STYLESHEET)
            .with_context(|| format!("write {}", dest.display()))?;
    }
    Ok(())
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub output_dir: PathBuf,
    pub stylesheet: PathBuf,
    pub load_mode: LoadMode,
}

pub struct Generator {
    fetcher: Fetcher,
    settings: Settings,
}

impl Generator {
    pub fn new(fetcher: Fetcher, settings: Settings) -> Self {
        Self { fetcher, settings }
    }

    /// Output directory for a pair, e.g. `html/de-en`.
    pub fn output_dir(&self, pair: LanguagePair) -> PathBuf {
        self.settings.output_dir.join(pair.to_string())
    }

    /// Fetch one source release of `name` and generate its pages.
    pub fn generate(
        &self,
        name: &str,
        pair: LanguagePair,
        release: &Release,
    ) -> Result<GenerationStats> {
        let url = release
            .url
            .as_deref()
            .with_context(|| format!("{name}: source release without URL"))?;
        let version = release
            .version
            .as_deref()
            .with_context(|| format!("{name}: source release without version"))?;

        let unpacked = self.fetcher.fetch(name, pair, url, version)?;
        let out_dir = self.output_dir(pair);

        let start = Instant::now();
        let dict = Dictionary::load_with_mode(&unpacked.tei_path, self.settings.load_mode)
            .with_context(|| format!("loading {}", unpacked.tei_path.display()))?;
        info!(
            "{}: {} entries, {} headwords loaded in {} ms",
            pair,
            dict.headwords().entry_count(),
            dict.headwords().len(),
            start.elapsed().as_millis()
        );

        info!("generate {}", out_dir.display());
        let stats = generate_pages(dict.headwords(), &out_dir)?;
        info!(
            " - {}: {:.2}% entries generated",
            pair,
            stats.percentage()
        );

        install_stylesheet(&self.settings.stylesheet, &out_dir)?;
        Ok(stats)
    }
}
