//! LSN-prefixed error types with structured error codes.

#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Shared `Result` alias for the project.
pub type Result<T> = std::result::Result<T, LsnError>;

/// Top-level error type for the liveness sentinel.
#[derive(Debug, Error)]
pub enum LsnError {
    #[error("[LSN-1001] invalid configuration: {details}")]
    InvalidConfig { details: String },

    #[error("[LSN-1002] missing configuration file: {path}")]
    MissingConfig { path: PathBuf },

    #[error("[LSN-1003] configuration parse failure in {context}: {details}")]
    ConfigParse {
        context: &'static str,
        details: String,
    },

    #[error("[LSN-2001] serialization failure in {context}: {details}")]
    Serialization {
        context: &'static str,
        details: String,
    },

    #[error("[LSN-3001] thread spawn failure for {component}: {source}")]
    Spawn {
        component: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("[LSN-3002] IO failure at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("[LSN-3003] channel closed in component {component}")]
    ChannelClosed { component: &'static str },

    #[error("[LSN-3900] runtime failure: {details}")]
    Runtime { details: String },
}

impl LsnError {
    /// Stable machine-parseable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidConfig { .. } => "LSN-1001",
            Self::MissingConfig { .. } => "LSN-1002",
            Self::ConfigParse { .. } => "LSN-1003",
            Self::Serialization { .. } => "LSN-2001",
            Self::Spawn { .. } => "LSN-3001",
            Self::Io { .. } => "LSN-3002",
            Self::ChannelClosed { .. } => "LSN-3003",
            Self::Runtime { .. } => "LSN-3900",
        }
    }

    /// Whether retrying might resolve the failure.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Io { .. } | Self::ChannelClosed { .. } | Self::Runtime { .. }
        )
    }

    /// Convenience constructor for IO errors with a known path.
    #[must_use]
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

impl From<serde_json::Error> for LsnError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization {
            context: "serde_json",
            details: value.to_string(),
        }
    }
}

impl From<toml::de::Error> for LsnError {
    fn from(value: toml::de::Error) -> Self {
        Self::ConfigParse {
            context: "toml",
            details: value.to_string(),
        }
    }
}
