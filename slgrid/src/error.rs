use std::fmt;

#[derive(Debug)]
pub enum GridError {
    /// Malformed location URL or a record file that does not split into triples.
    Format(String),
    /// Remote lookup failed, timed out, or answered with an unusable body.
    Resolution { area: String, reason: String },
    Config(String),
    Io(std::io::Error),
    Json(serde_json::Error),
}

impl GridError {
    pub fn resolution(area: &str, reason: impl Into<String>) -> Self {
        Self::Resolution {
            area: area.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(msg) => write!(f, "Format error: {msg}"),
            Self::Resolution { area, reason } => {
                write!(f, "Resolution error for region '{area}': {reason}")
            }
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for GridError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GridError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for GridError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}

pub type Result<T> = std::result::Result<T, GridError>;
