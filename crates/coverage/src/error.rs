use html::Id;
use std::path::PathBuf;

#[derive(Debug)]
pub enum CoverageError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Json(serde_json::Error),
    Config(String),
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },
    UnknownSelector(String),
    UnknownNode(Id),
    Script {
        line: usize,
        message: String,
    },
}

impl CoverageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CoverageError::Io {
            path: path.into(),
            source,
        }
    }
}

impl std::fmt::Display for CoverageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoverageError::Io { path, source } => write!(f, "{}: {source}", path.display()),
            CoverageError::Json(e) => write!(f, "json: {e}"),
            CoverageError::Config(msg) => write!(f, "invalid config: {msg}"),
            CoverageError::InvalidUrl { url, source } => write!(f, "invalid url {url:?}: {source}"),
            CoverageError::UnknownSelector(sel) => write!(f, "no element matches {sel:?}"),
            CoverageError::UnknownNode(id) => write!(f, "node {} is not in the document", id.0),
            CoverageError::Script { line, message } => write!(f, "script line {line}: {message}"),
        }
    }
}

impl std::error::Error for CoverageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CoverageError::Io { source, .. } => Some(source),
            CoverageError::Json(e) => Some(e),
            CoverageError::InvalidUrl { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CoverageError {
    fn from(e: serde_json::Error) -> Self {
        CoverageError::Json(e)
    }
}

impl From<toml::de::Error> for CoverageError {
    fn from(e: toml::de::Error) -> Self {
        CoverageError::Config(e.to_string())
    }
}
