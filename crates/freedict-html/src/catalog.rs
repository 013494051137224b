//! The FreeDict database: which dictionaries exist and where their sources are.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_CATALOG_URL: &str = "https://freedict.org/freedict-database.json";

/// Dictionaries that are never generated.
const EXCLUDED_PAIRS: &[&str] = &[
    // Central Kurdish to Northern Kurdish: both map to `ku`.
    "ckb-kmr",
];

/// Languages without an ISO 639-1 code.
const UNMAPPED_SOURCES: &[&str] = &["kha"];
const UNMAPPED_TARGETS: &[&str] = &["ast"];

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to fetch catalog: {0}")]
    Fetch(#[from] reqwest::Error),
}

/// One release of a dictionary.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Release {
    pub platform: String,
    #[serde(rename = "URL", default)]
    pub url: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl Release {
    /// Whether this is the TEI source release.
    pub fn is_source(&self) -> bool {
        self.platform == "src"
    }
}

/// One record of the catalog; FreeDict tools carry a `software` field.
#[derive(Clone, Debug, Deserialize)]
pub struct CatalogEntry {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub software: Option<serde_json::Value>,
    #[serde(default)]
    pub releases: Vec<Release>,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SkipReason {
    Software,
    Unnamed,
    Excluded,
    UnmappedSource,
    UnmappedTarget,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SkipReason::Software => "FreeDict tool, not a dictionary",
            SkipReason::Unnamed => "record has no name",
            SkipReason::Excluded => "excluded pair",
            SkipReason::UnmappedSource => "source language has no two-letter code",
            SkipReason::UnmappedTarget => "target language has no two-letter code",
        })
    }
}

impl CatalogEntry {
    /// Why this record is not generated, if it is not.
    pub fn skip_reason(&self) -> Option<SkipReason> {
        if self.software.is_some() {
            return Some(SkipReason::Software);
        }
        let Some(name) = self.name.as_deref() else {
            return Some(SkipReason::Unnamed);
        };
        if EXCLUDED_PAIRS.contains(&name) {
            return Some(SkipReason::Excluded);
        }
        if UNMAPPED_SOURCES.iter().any(|code| name.starts_with(code)) {
            return Some(SkipReason::UnmappedSource);
        }
        if UNMAPPED_TARGETS.iter().any(|code| name.ends_with(code)) {
            return Some(SkipReason::UnmappedTarget);
        }
        None
    }

    pub fn source_releases(&self) -> impl Iterator<Item = &Release> {
        self.releases.iter().filter(|r| r.is_source())
    }
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Ok(Self {
            entries: serde_json::from_str(json)?,
        })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    pub fn fetch(client: &Client, url: &str) -> Result<Self, CatalogError> {
        let entries = client.get(url).send()?.error_for_status()?.json()?;
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"[
        {"name": "deu-eng", "edition": "1.9", "releases": [
            {"platform": "dictd", "URL": "https://example.org/deu-eng.dictd.tar.xz", "version": "1.9"},
            {"platform": "src", "URL": "https://example.org/deu-eng.src.tar.xz", "version": "1.9", "size": "1"}
        ]},
        {"name": "ckb-kmr", "releases": []},
        {"name": "kha-deu", "releases": []},
        {"name": "eng-ast", "releases": []},
        {"software": "freedict-tools", "releases": []},
        {"releases": []}
    ]"#;

    #[test]
    fn parses_catalog_and_ignores_unknown_fields() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 6);
        let deu_eng = &catalog.entries()[0];
        let sources: Vec<_> = deu_eng.source_releases().collect();
        assert_eq!(sources.len(), 1);
        assert_eq!(sources[0].version.as_deref(), Some("1.9"));
        assert_eq!(
            sources[0].url.as_deref(),
            Some("https://example.org/deu-eng.src.tar.xz")
        );
    }

    #[test]
    fn applies_skip_policy() {
        let catalog = Catalog::from_json(SAMPLE).unwrap();
        let reasons: Vec<_> = catalog.entries().iter().map(|e| e.skip_reason()).collect();
        assert_eq!(
            reasons,
            vec![
                None,
                Some(SkipReason::Excluded),
                Some(SkipReason::UnmappedSource),
                Some(SkipReason::UnmappedTarget),
                Some(SkipReason::Software),
                Some(SkipReason::Unnamed),
            ]
        );
    }

    #[test]
    fn missing_file_is_reported() {
        let err = Catalog::from_file("/nonexistent/freedict-database.json").unwrap_err();
        assert!(matches!(err, CatalogError::Read { .. }));
    }
}
