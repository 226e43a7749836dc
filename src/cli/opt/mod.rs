//! Command line options and the settings file
use std::{borrow::Cow, fmt, io, path::PathBuf, str::FromStr};

use clap::Parser;
use restoration::{RestoreConfig, WidthPolicy};
use serde::Deserialize;
use thiserror::*;

mod de;
use de::{deserialize_opt_usize, deserialize_some};

/// The format to write the restored raster in
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Deserialize)]
pub enum Format {
    /// Binary Portable Graymap (P5)
    #[default]
    Pgm,
    /// Portable Network Graphic
    Png,
}

#[derive(Debug)]
/// Failed to parse a format name
pub struct FormatError {}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Use one of `pgm` or `png`")?;
        Ok(())
    }
}

impl std::error::Error for FormatError {}

impl FromStr for Format {
    type Err = FormatError;
    fn from_str(val: &str) -> Result<Self, Self::Err> {
        match val {
            "pgm" | "p5" => Ok(Self::Pgm),
            "png" => Ok(Self::Png),
            _ => Err(FormatError {}),
        }
    }
}

impl Format {
    /// The usual file extension
    pub fn extension(self) -> &'static str {
        match self {
            Self::Pgm => "pgm",
            Self::Png => "png",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Parser)]
/// Restore a raster whose rows were hidden among noise lines
pub struct Options {
    /// The corrupted file (reads STDIN if omitted)
    pub file: Option<PathBuf>,
    /// Where to store the output (- is STDOUT)
    #[clap(long, short = 'o')]
    pub out: Option<PathBuf>,
    /// Settings file (RON), overridden by the flags below
    #[clap(long)]
    pub config: Option<PathBuf>,

    /// Settings passed as command line args
    #[clap(flatten)]
    pub cl_settings: Settings,
}

#[derive(Debug, Error)]
/// Error when loading the settings file
pub enum SettingsError {
    /// The file could not be read
    #[error("IO Error")]
    Io(#[from] io::Error),
    /// The file is not valid RON
    #[error("Deserialize Error")]
    Ron(#[from] ron::error::Error),
}

impl Options {
    /// The settings after merging the settings file with the flags
    pub fn settings(&self) -> Result<Cow<Settings>, SettingsError> {
        if let Some(config_path) = &self.config {
            let text = std::fs::read_to_string(config_path)?;
            let mut settings: Settings = ron::from_str(&text)?;
            if let Some(format) = self.cl_settings.format {
                settings.format = Some(format);
            }
            if let Some(max_line_len) = self.cl_settings.max_line_len {
                settings.max_line_len = Some(max_line_len);
            }
            if self.cl_settings.unlimited_lines {
                settings.unlimited_lines = true;
            }
            if self.cl_settings.strict_width {
                settings.width_policy = Some(WidthPolicy::Uniform);
            }
            Ok(Cow::Owned(settings))
        } else {
            Ok(Cow::Borrowed(&self.cl_settings))
        }
    }
}

/// Settings that may come from the command line or from a file
#[derive(Debug, Default, Clone, Parser, Deserialize)]
pub struct Settings {
    /// Format of the output. Valid choices are "pgm" and "png"
    #[clap(long, short = 'F')]
    #[serde(default, deserialize_with = "deserialize_some")]
    pub format: Option<Format>,
    /// Maximum length of an input line, newline included [default: 1000]
    #[clap(long)]
    #[serde(default, deserialize_with = "deserialize_opt_usize")]
    pub max_line_len: Option<usize>,
    /// Accept input lines of any length
    #[clap(long)]
    #[serde(default)]
    pub unlimited_lines: bool,
    /// Fail if the decoded rows differ in length
    #[clap(long)]
    #[serde(skip)]
    pub strict_width: bool,
    /// How the raster width is chosen
    #[clap(skip)]
    #[serde(default, deserialize_with = "deserialize_some")]
    pub width_policy: Option<WidthPolicy>,
}

impl Settings {
    /// The configuration for the restoration itself
    pub fn restore_config(&self) -> RestoreConfig {
        let mut config = RestoreConfig::default();
        if self.unlimited_lines {
            config.max_line_len = None;
        } else if let Some(max_line_len) = self.max_line_len {
            config.max_line_len = Some(max_line_len);
        }
        if self.strict_width {
            config.width_policy = WidthPolicy::Uniform;
        } else if let Some(policy) = self.width_policy {
            config.width_policy = policy;
        }
        config
    }

    /// The output format
    pub fn format(&self) -> Format {
        self.format.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use restoration::WidthPolicy;

    use super::{Format, Options, Settings};

    #[test]
    fn test_defaults() {
        let opt = Options::try_parse_from(["pix-restore"]).unwrap();
        assert!(opt.file.is_none());
        let settings = opt.settings().unwrap();
        assert_eq!(settings.format(), Format::Pgm);
        let config = settings.restore_config();
        assert_eq!(config.max_line_len, Some(1000));
        assert_eq!(config.width_policy, WidthPolicy::LastRow);
    }

    #[test]
    fn test_flags() {
        let opt = Options::try_parse_from([
            "pix-restore",
            "in.txt",
            "-F",
            "png",
            "--unlimited-lines",
            "--strict-width",
        ])
        .unwrap();
        let settings = opt.settings().unwrap();
        assert_eq!(settings.format(), Format::Png);
        let config = settings.restore_config();
        assert_eq!(config.max_line_len, None);
        assert_eq!(config.width_policy, WidthPolicy::Uniform);
    }

    #[test]
    fn test_too_many_files() {
        assert!(Options::try_parse_from(["pix-restore", "a", "b"]).is_err());
    }

    #[test]
    fn test_unknown_format() {
        assert!(Options::try_parse_from(["pix-restore", "-F", "gif"]).is_err());
    }

    #[test]
    fn test_settings_file() {
        let text = "(format: Png, max_line_len: 64, width_policy: Uniform)";
        let settings: Settings = ron::from_str(text).unwrap();
        assert_eq!(settings.format(), Format::Png);
        let config = settings.restore_config();
        assert_eq!(config.max_line_len, Some(64));
        assert_eq!(config.width_policy, WidthPolicy::Uniform);
    }

    #[test]
    fn test_empty_settings_file() {
        let settings: Settings = ron::from_str("()").unwrap();
        assert_eq!(settings.format(), Format::Pgm);
        assert_eq!(settings.restore_config().max_line_len, Some(1000));
    }
}
