//! Error types for resource lookup and configuration loading.
//!
//! Only load-time failures are errors. Gameplay never fails; broken
//! scene-graph contracts panic instead.

use std::fmt;

use crate::enums::{FontId, TextureId};

/// A named asset the host could not supply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceError {
    MissingTexture(TextureId),
    MissingFont(FontId),
}

impl fmt::Display for ResourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceError::MissingTexture(id) => write!(f, "texture {id:?} is not loaded"),
            ResourceError::MissingFont(id) => write!(f, "font {id:?} is not loaded"),
        }
    }
}

impl std::error::Error for ResourceError {}

/// A configuration that failed to parse or validate.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Parse(err) => write!(f, "malformed configuration: {err}"),
            ConfigError::Invalid(msg) => write!(f, "invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Parse(err) => Some(err),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

/// Failure to build a world.
#[derive(Debug)]
pub enum SimError {
    Resource(ResourceError),
    Config(ConfigError),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::Resource(err) => write!(f, "resource error: {err}"),
            SimError::Config(err) => write!(f, "config error: {err}"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Resource(err) => Some(err),
            SimError::Config(err) => Some(err),
        }
    }
}

impl From<ResourceError> for SimError {
    fn from(err: ResourceError) -> Self {
        SimError::Resource(err)
    }
}

impl From<ConfigError> for SimError {
    fn from(err: ConfigError) -> Self {
        SimError::Config(err)
    }
}
