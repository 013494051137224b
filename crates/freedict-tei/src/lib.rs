//! Turn FreeDict TEI dictionaries into headword-indexed entries.
//!
//! Loading runs in three steps:
//! 1. Parse the `.tei` file into an owned [`Element`] tree (memory-mapped or
//!    read into a buffer, see [`LoadMode`]).
//! 2. [`normalize`] the `<body>`: strip the TEI namespace, splice in
//!    `xi:include` fragments, and flatten `<superEntry>` groups.
//! 3. Extract one [`Entry`] per `<entry>` and group them by orthography in a
//!    [`HeadwordIndex`].
//!
//! # Example
//! ```no_run
//! use freedict_tei::{Dictionary, LoadMode};
//!
//! # fn main() -> Result<(), freedict_tei::TeiError> {
//! let dict = Dictionary::load_with_mode("temp/deu-eng/deu-eng.tei", LoadMode::Mmap)?;
//! for (headword, entries) in dict.headwords().iter() {
//!     println!("{headword}: {} entries", entries.len());
//! }
//! # Ok(()) }
//! ```
//!
//! For a runnable demo, see `cargo run -p freedict-tei --example stats -- <file.tei>`.

pub mod error;
pub mod extract;
pub mod headwords;
pub mod normalize;
pub mod tree;

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use tracing::debug;

pub use error::TeiError;
pub use extract::{extract_entries, extract_entry, extract_sense};
pub use freedict_types::{Entry, Sense};
pub use headwords::HeadwordIndex;
pub use normalize::{NormalizeReport, TEI_NS, XINCLUDE_NS, normalize};
pub use tree::{Element, QName, parse_document};

/// Strategy for reading TEI files.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum LoadMode {
    /// Memory-map the file (fast, zero-copy).
    #[default]
    Mmap,
    /// Read the file into an owned buffer (portable fallback).
    Owned,
}

enum Buffer {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Buffer {
    fn as_slice(&self) -> &[u8] {
        match self {
            Buffer::Mmap(m) => m.as_ref(),
            Buffer::Owned(v) => v.as_slice(),
        }
    }
}

fn load_file(path: &Path, mode: LoadMode) -> Result<Buffer, TeiError> {
    let io_err = |source| TeiError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut file = File::open(path).map_err(io_err)?;
    match mode {
        LoadMode::Mmap => unsafe { Mmap::map(&file) }
            .map(Buffer::Mmap)
            .map_err(io_err),
        LoadMode::Owned => {
            let mut buf = Vec::new();
            file.read_to_end(&mut buf).map_err(io_err)?;
            Ok(Buffer::Owned(buf))
        }
    }
}

/// Parse an XML file and return its root element.
pub fn parse_file(path: impl AsRef<Path>, mode: LoadMode) -> Result<Element, TeiError> {
    let path = path.as_ref();
    let buffer = load_file(path, mode)?;
    parse_document(buffer.as_slice()).map_err(|e| e.in_file(path))
}

/// A parsed TEI document together with the directory its includes live in.
pub struct TeiDocument {
    root: Element,
    base_dir: PathBuf,
}

impl TeiDocument {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TeiError> {
        Self::load_with_mode(path, LoadMode::Mmap)
    }

    pub fn load_with_mode(path: impl AsRef<Path>, mode: LoadMode) -> Result<Self, TeiError> {
        let path = path.as_ref();
        let root = parse_file(path, mode)?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self { root, base_dir })
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// The `TEI/text/body` element, located by TEI-namespaced names.
    pub fn body_mut(&mut self) -> Result<&mut Element, TeiError> {
        self.root
            .child_mut(TEI_NS, "text")
            .ok_or(TeiError::MissingElement("text"))?
            .child_mut(TEI_NS, "body")
            .ok_or(TeiError::MissingElement("body"))
    }
}

/// Entries of one dictionary, grouped by headword.
pub struct Dictionary {
    headwords: HeadwordIndex,
    report: NormalizeReport,
}

impl Dictionary {
    /// Load, normalize, and index a TEI file. Defaults to memory-mapping.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TeiError> {
        Self::load_with_mode(path, LoadMode::Mmap)
    }

    pub fn load_with_mode(path: impl AsRef<Path>, mode: LoadMode) -> Result<Self, TeiError> {
        let path = path.as_ref();
        let mut doc = TeiDocument::load_with_mode(path, mode)?;
        let base_dir = doc.base_dir.clone();
        let body = doc.body_mut().map_err(|e| e.in_file(path))?;

        let report = normalize(body, &base_dir)?;
        debug!(
            "normalized {}: {} includes, {} superEntries, {} unknown namespaces",
            path.display(),
            report.includes,
            report.super_entries,
            report.unknown_namespaces
        );

        let entries = extract_entries(body);
        Ok(Self {
            headwords: HeadwordIndex::build(entries),
            report,
        })
    }

    pub fn headwords(&self) -> &HeadwordIndex {
        &self.headwords
    }

    pub fn into_headwords(self) -> HeadwordIndex {
        self.headwords
    }

    pub fn report(&self) -> &NormalizeReport {
        &self.report
    }
}
