use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TeiError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("document has no root element")]
    EmptyDocument,
    #[error("{}: {source}", path.display())]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<TeiError>,
    },
    #[error("missing <{0}> element")]
    MissingElement(&'static str),
    #[error("xi:include without href attribute")]
    MissingHref,
}

impl TeiError {
    pub(crate) fn in_file(self, path: impl Into<PathBuf>) -> Self {
        TeiError::InFile {
            path: path.into(),
            source: Box::new(self),
        }
    }
}
