//! Application error types using thiserror
//!
//! Error hierarchy:
//! - BuildInfoError: Issues reading embedded build info from a binary
//! - RegistryError: Issues with module proxy communication
//! - ConfigError: Issues with CLI configuration
//! - ScanError: Run-level failures while walking input paths

use std::path::PathBuf;
use thiserror::Error;

/// Errors related to reading build info from a binary
#[derive(Error, Debug)]
pub enum BuildInfoError {
    /// The file could not be read
    #[error("{source}")]
    Io {
        #[source]
        source: std::io::Error,
    },

    /// The file is not an executable format we know
    #[error("unrecognized file format")]
    UnrecognizedFormat,

    /// The executable carries no Go build info
    #[error("not a Go executable")]
    NotGoExecutable,

    /// Build info written before Go 1.18
    #[error("unsupported build info format (built with Go older than 1.18)")]
    UnsupportedFormat,

    /// The build info header was found but could not be decoded
    #[error("malformed build info: {message}")]
    Malformed { message: String },

    /// The binary was not built in module mode
    #[error("no module information embedded in binary")]
    NoModuleInfo,
}

/// Errors related to module proxy communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Network request failed
    #[error("failed to fetch '{module}' from {registry}: {message}")]
    NetworkError {
        module: String,
        registry: String,
        message: String,
    },

    /// Rate limit exceeded
    #[error("rate limit exceeded for {registry}")]
    RateLimitExceeded { registry: String },

    /// Invalid response from the proxy
    #[error("invalid response from {registry} for '{module}': {message}")]
    InvalidResponse {
        module: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{module}' from {registry}")]
    Timeout { module: String, registry: String },

    /// The run was cancelled while waiting
    #[error("operation cancelled")]
    Cancelled,
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Conflicting options
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },

    /// An option value outside its accepted range
    #[error("invalid value '{value}' for --{option}: {message}")]
    InvalidValue {
        option: String,
        value: String,
        message: String,
    },
}

/// Run-level errors that abort the whole scan
#[derive(Error, Debug)]
pub enum ScanError {
    /// A top-level path could not be stat'ed
    #[error("statting {path}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A top-level directory could not be listed
    #[error("reading directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The run was interrupted
    #[error("interrupted")]
    Cancelled,
}

impl BuildInfoError {
    /// Creates a new Io error
    pub fn io(source: std::io::Error) -> Self {
        BuildInfoError::Io { source }
    }

    /// Creates a new Malformed error
    pub fn malformed(message: impl Into<String>) -> Self {
        BuildInfoError::Malformed {
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new NetworkError
    pub fn network_error(
        module: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            module: module.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        module: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            module: module.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new RateLimitExceeded error
    pub fn rate_limit_exceeded(registry: impl Into<String>) -> Self {
        RegistryError::RateLimitExceeded {
            registry: registry.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(module: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            module: module.into(),
            registry: registry.into(),
        }
    }
}

impl ConfigError {
    /// Creates a new ConflictingOptions error
    pub fn conflicting(message: impl Into<String>) -> Self {
        ConfigError::ConflictingOptions {
            message: message.into(),
        }
    }

    /// Creates a new InvalidValue error
    pub fn invalid_value(
        option: impl Into<String>,
        value: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        ConfigError::InvalidValue {
            option: option.into(),
            value: value.into(),
            message: message.into(),
        }
    }
}

impl ScanError {
    /// Creates a new Stat error
    pub fn stat(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScanError::Stat {
            path: path.into(),
            source,
        }
    }

    /// Creates a new ReadDir error
    pub fn read_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ScanError::ReadDir {
            path: path.into(),
            source,
        }
    }
}
