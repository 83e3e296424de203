use std::path::PathBuf;

use thiserror::Error;

use crate::block::SpanKind;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors raised while converting markdown or building a site.
#[derive(Debug, Error)]
pub enum Error {
    #[error("{kind:?} span requires a url")]
    MissingUrl { kind: SpanKind },

    #[error("{kind:?} span cannot carry a url")]
    UnexpectedUrl { kind: SpanKind },

    #[error("closing delimiter not found for `{delimiter}` in {text:?}")]
    UnclosedDelimiter {
        delimiter: &'static str,
        text: String,
    },

    #[error("all parent nodes need to be tagged")]
    UntaggedParent,

    #[error("no title found")]
    NoTitle,

    #[error("multiple titles found ({count} level-one headings)")]
    MultipleTitles { count: usize },

    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{what} directory not found: {path}")]
    MissingDirectory { what: &'static str, path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{path}: {source}")]
    Page {
        path: PathBuf,
        source: Box<Error>,
    },
}

impl Error {
    /// Attach the markdown file that produced a conversion error.
    pub(crate) fn in_page(self, path: impl Into<PathBuf>) -> Self {
        Error::Page {
            path: path.into(),
            source: Box::new(self),
        }
    }
}
