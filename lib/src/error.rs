use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid portfolio content: {0}")]
    Content(#[from] serde_json::Error),

    #[error("failed to decode image: {0}")]
    Decode(#[from] png::DecodingError),

    #[error("unsupported image layout {0:?}/{1:?}")]
    Layout(png::ColorType, png::BitDepth),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
