use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::LaunchError;

/// Where a coordinate is shown.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum OpenIn {
    #[default]
    Browser,
    Inline,
}

impl OpenIn {
    pub const ALLOWED: &'static [&'static str] = &["browser", "inline"];
}

impl FromStr for OpenIn {
    type Err = LaunchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "browser" => Ok(OpenIn::Browser),
            "inline" => Ok(OpenIn::Inline),
            _ => Err(LaunchError::InvalidOption {
                option: "open_in",
                value: s.to_owned(),
                allowed: Self::ALLOWED,
            }),
        }
    }
}

impl TryFrom<String> for OpenIn {
    type Error = LaunchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for OpenIn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpenIn::Browser => write!(f, "browser"),
            OpenIn::Inline => write!(f, "inline"),
        }
    }
}

/// How inline maps are embedded. Only iframes are supported.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum InlineMode {
    #[default]
    Iframe,
}

impl InlineMode {
    pub const ALLOWED: &'static [&'static str] = &["iframe"];
}

impl FromStr for InlineMode {
    type Err = LaunchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "iframe" => Ok(InlineMode::Iframe),
            _ => Err(LaunchError::InvalidOption {
                option: "inline_mode",
                value: s.to_owned(),
                allowed: Self::ALLOWED,
            }),
        }
    }
}

impl TryFrom<String> for InlineMode {
    type Error = LaunchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

fn default_geometry_column() -> String {
    String::from("geometry")
}

/// Launcher configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LaunchOptions {
    pub open_in: OpenIn,
    pub inline_mode: InlineMode,
    /// Maps Embed API key, only used inline.
    pub api_key: Option<String>,
    pub geometry_column: String,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            open_in: OpenIn::default(),
            inline_mode: InlineMode::default(),
            api_key: None,
            geometry_column: default_geometry_column(),
        }
    }
}

impl LaunchOptions {
    pub fn from_json(config: &str) -> Result<Self, LaunchError> {
        Ok(serde_json::from_str(config)?)
    }

    pub fn inline(api_key: Option<&str>) -> Self {
        Self {
            open_in: OpenIn::Inline,
            api_key: api_key.map(str::to_owned),
            ..Self::default()
        }
    }
}
