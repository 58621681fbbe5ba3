use std::path::PathBuf;

/// Everything that can go wrong while cleaning one image or walking a directory.
///
/// Per-file variants (`Io`, `Decode`, `Encode`, `UnsupportedFormat`) are
/// recoverable: the batch walker counts them as failures and moves on.
/// `InputNotFound` is the only variant the CLI treats as fatal.
#[derive(Debug, thiserror::Error)]
pub enum StripError {
    #[error("input directory doesn't exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to encode {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("no supported output format for {}", .0.display())]
    UnsupportedFormat(PathBuf),

    /// The file carries an EXIF block that could not be parsed.
    #[error("unreadable metadata in {}: {reason}", .path.display())]
    Metadata { path: PathBuf, reason: String },
}

/// Coarse classification of a [`StripError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InputNotFound,
    Io,
    Decode,
    Encode,
}

impl StripError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InputNotFound(_) => ErrorKind::InputNotFound,
            Self::Io { .. } => ErrorKind::Io,
            Self::Decode { .. } | Self::Metadata { .. } => ErrorKind::Decode,
            Self::Encode { .. } | Self::UnsupportedFormat(_) => ErrorKind::Encode,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Classify an `image` decode-side error. `image` wraps plain I/O failures
    /// in `ImageError::IoError`; those are reported as I/O rather than decode errors.
    pub(crate) fn decode(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        match source {
            image::ImageError::IoError(e) => Self::io(path, e),
            other => Self::Decode {
                path: path.into(),
                source: other,
            },
        }
    }

    pub(crate) fn metadata(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::Metadata {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn encode(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        match source {
            image::ImageError::IoError(e) => Self::io(path, e),
            other => Self::Encode {
                path: path.into(),
                source: other,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, StripError>;
