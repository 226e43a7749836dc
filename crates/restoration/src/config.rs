//! # Restoration settings

use std::{fmt, str::FromStr};

use serde::Deserialize;
use thiserror::Error;

use crate::lines::DEFAULT_MAX_LINE_LEN;

/// How the width of the raster is determined
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
pub enum WidthPolicy {
    /// The length of the last decoded row, whatever the other rows are
    #[default]
    LastRow,
    /// All rows must have the length of the first one
    Uniform,
}

#[derive(Debug, Error)]
#[error("Use one of `last-row` or `uniform`")]
/// Failed to parse a width policy
pub struct WidthPolicyError {}

impl FromStr for WidthPolicy {
    type Err = WidthPolicyError;

    fn from_str(val: &str) -> Result<Self, Self::Err> {
        match val {
            "last-row" | "last" => Ok(Self::LastRow),
            "uniform" | "strict" => Ok(Self::Uniform),
            _ => Err(WidthPolicyError {}),
        }
    }
}

impl fmt::Display for WidthPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LastRow => f.write_str("last-row"),
            Self::Uniform => f.write_str("uniform"),
        }
    }
}

fn default_max_line_len() -> Option<usize> {
    Some(DEFAULT_MAX_LINE_LEN)
}

/// Settings for [`crate::restore`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RestoreConfig {
    /// Maximum length of an input line, terminator included
    #[serde(default = "default_max_line_len")]
    pub max_line_len: Option<usize>,
    /// How the raster width is chosen
    #[serde(default)]
    pub width_policy: WidthPolicy,
}

impl Default for RestoreConfig {
    fn default() -> Self {
        Self {
            max_line_len: default_max_line_len(),
            width_policy: WidthPolicy::default(),
        }
    }
}
