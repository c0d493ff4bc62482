use std::path::PathBuf;

pub type Result<T, E = SuggestError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum SuggestError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A label file line that could not be parsed, with its 1-based number.
    #[error("line {line}: {reason}")]
    InvalidLabel { line: usize, reason: String },

    #[error("in {path}: {source}")]
    InLabelFile {
        path: PathBuf,
        #[source]
        source: Box<SuggestError>,
    },

    #[error(transparent)]
    Config(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Watch(#[from] notify::Error),
}

impl SuggestError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
