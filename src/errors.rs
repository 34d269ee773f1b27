// SPDX-License-Identifier: GPL-3.0-only

//! Error types for shader construction, linking and configuration

use std::fmt;

/// Result type alias using ShaderError
pub type ShaderResult<T> = Result<T, ShaderError>;

/// Fatal shader errors, propagated to the owning renderer
#[derive(Debug, Clone, PartialEq)]
pub enum ShaderError {
    /// Shader source with the given name does not exist
    SourceNotFound(String),
    /// Reading a shader source failed
    Io(String),
    /// The platform rejected a shader stage
    Compile(String),
    /// The platform failed to link the program
    Link(String),
    /// A GPU texture object could not be created
    TextureAllocation(String),
    /// Scaling method outside the filter whitelist with the reject policy
    UnsupportedScaling(String),
}

/// Configuration loading errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Config file could not be read
    Io(String),
    /// Config file is not valid JSON for [`crate::Config`]
    Parse(String),
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderError::SourceNotFound(name) => write!(f, "Shader source not found: {}", name),
            ShaderError::Io(msg) => write!(f, "Shader source read failed: {}", msg),
            ShaderError::Compile(msg) => write!(f, "Shader compile failed: {}", msg),
            ShaderError::Link(msg) => write!(f, "Shader link failed: {}", msg),
            ShaderError::TextureAllocation(msg) => write!(f, "Texture allocation failed: {}", msg),
            ShaderError::UnsupportedScaling(method) => {
                write!(f, "Unsupported scaling method for filter shader: {}", method)
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(msg) => write!(f, "Configuration read failed: {}", msg),
            ConfigError::Parse(msg) => write!(f, "Configuration parse failed: {}", msg),
        }
    }
}

impl std::error::Error for ShaderError {}
impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ShaderError {
    fn from(err: std::io::Error) -> Self {
        ShaderError::Io(err.to_string())
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
