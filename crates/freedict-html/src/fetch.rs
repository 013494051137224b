//! Download and unpack FreeDict source archives.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use freedict_types::LanguagePair;
use reqwest::blocking::Client;
use tar::Archive;
use tracing::{debug, info};
use xz2::read::XzDecoder;

/// Where archives are cached and unpacked.
#[derive(Clone, Debug)]
pub struct Fetcher {
    client: Client,
    data_dir: PathBuf,
    temp_dir: PathBuf,
}

/// Location of an unpacked dictionary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Unpacked {
    pub tei_path: PathBuf,
    pub base_dir: PathBuf,
}

impl Fetcher {
    pub fn new(client: Client, data_dir: impl Into<PathBuf>, temp_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            data_dir: data_dir.into(),
            temp_dir: temp_dir.into(),
        }
    }

    /// Cached archive path, e.g. `data/freedict-de-en-1.9.tar.xz`.
    pub fn archive_path(&self, pair: LanguagePair, version: &str) -> PathBuf {
        self.data_dir
            .join(format!("freedict-{}-{}.tar.xz", pair, version))
    }

    /// Where the TEI file of dictionary `name` lands after unpacking.
    pub fn unpacked(&self, name: &str) -> Unpacked {
        let base_dir = self.temp_dir.join(name);
        Unpacked {
            tei_path: base_dir.join(format!("{name}.tei")),
            base_dir,
        }
    }

    /// Download (unless cached) and unpack the source archive of `name`.
    pub fn fetch(
        &self,
        name: &str,
        pair: LanguagePair,
        url: &str,
        version: &str,
    ) -> Result<Unpacked> {
        let archive = self.archive_path(pair, version);
        if archive.is_file() {
            debug!("using cached {}", archive.display());
        } else {
            fs::create_dir_all(&self.data_dir)
                .with_context(|| format!("create {}", self.data_dir.display()))?;
            download(&self.client, url, &archive)?;
            info!("downloaded {}", archive.display());
        }

        extract(&archive, &self.temp_dir)?;
        Ok(self.unpacked(name))
    }
}

pub fn download(client: &Client, url: &str, path: &Path) -> Result<()> {
    let mut response = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .with_context(|| format!("GET {url}"))?;

    // Written under a temporary name so an interrupted download is not cached.
    let partial = path.with_extension("part");
    let mut file =
        File::create(&partial).with_context(|| format!("create {}", partial.display()))?;
    response
        .copy_to(&mut file)
        .with_context(|| format!("download {url}"))?;
    fs::rename(&partial, path).with_context(|| format!("rename to {}", path.display()))?;
    Ok(())
}

/// Unpack a `.tar.xz` archive into `dest`.
pub fn extract(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive).with_context(|| format!("open {}", archive.display()))?;
    fs::create_dir_all(dest).with_context(|| format!("create {}", dest.display()))?;
    Archive::new(XzDecoder::new(BufReader::new(file)))
        .unpack(dest)
        .with_context(|| format!("extract {} into {}", archive.display(), dest.display()))
}
