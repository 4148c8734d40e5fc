//! Per-file content errors

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::frontmatter::FrontMatterError;

/// Why a source file was rejected; every variant names the file
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", .path.display())]
    FrontMatter {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },

    #[error("{}: missing required `{field}` header", .path.display())]
    MissingField { path: PathBuf, field: &'static str },

    #[error("{}: cannot parse `{field}` value {value:?} as a date", .path.display())]
    InvalidDate {
        path: PathBuf,
        field: &'static str,
        value: String,
    },

    #[error("{}: unknown status {value:?}", .path.display())]
    InvalidStatus { path: PathBuf, value: String },

    #[error("{}: slug {slug:?} is already used by {}", .path.display(), .other.display())]
    DuplicateSlug {
        path: PathBuf,
        slug: String,
        other: PathBuf,
    },

    #[error("{}: title {title:?} gives an empty slug; set a `Slug` header", .path.display())]
    EmptySlug { path: PathBuf, title: String },

    #[error("{}: output file {save_as:?} is already written by {other}", .path.display())]
    OutputCollision {
        path: PathBuf,
        save_as: String,
        other: String,
    },
}

impl ContentError {
    /// The file that was rejected
    pub fn path(&self) -> &Path {
        match self {
            ContentError::Io { path, .. }
            | ContentError::FrontMatter { path, .. }
            | ContentError::MissingField { path, .. }
            | ContentError::InvalidDate { path, .. }
            | ContentError::InvalidStatus { path, .. }
            | ContentError::DuplicateSlug { path, .. }
            | ContentError::EmptySlug { path, .. }
            | ContentError::OutputCollision { path, .. } => path,
        }
    }
}
