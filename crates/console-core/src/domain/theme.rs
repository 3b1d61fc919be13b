//! Theme preference and palettes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    #[default]
    Light,
    Dark,
}

const LIGHT_PALETTE: &[(&str, &str)] = &[
    ("--bg-primary", "#ffffff"),
    ("--bg-secondary", "#f5f5f5"),
    ("--bg-tertiary", "#fafafa"),
    ("--text-primary", "#262626"),
    ("--text-secondary", "#595959"),
    ("--text-tertiary", "#8c8c8c"),
    ("--border-primary", "#d9d9d9"),
    ("--border-secondary", "#e8e8e8"),
    ("--primary-color", "#1890ff"),
    ("--primary-hover", "#40a9ff"),
    ("--success-color", "#52c41a"),
    ("--warning-color", "#faad14"),
    ("--error-color", "#ff4d4f"),
    ("--sidebar-bg", "#001529"),
    ("--sidebar-text", "#ffffff"),
    ("--header-bg", "#ffffff"),
    ("--header-text", "#262626"),
    ("--card-bg", "#ffffff"),
    ("--shadow", "0 2px 8px rgba(0, 0, 0, 0.15)"),
];

const DARK_PALETTE: &[(&str, &str)] = &[
    ("--bg-primary", "#141414"),
    ("--bg-secondary", "#1f1f1f"),
    ("--bg-tertiary", "#262626"),
    ("--text-primary", "#ffffff"),
    ("--text-secondary", "#d9d9d9"),
    ("--text-tertiary", "#bfbfbf"),
    ("--border-primary", "#434343"),
    ("--border-secondary", "#303030"),
    ("--primary-color", "#177ddc"),
    ("--primary-hover", "#3c9ae8"),
    ("--success-color", "#49aa19"),
    ("--warning-color", "#d89614"),
    ("--error-color", "#dc4446"),
    ("--sidebar-bg", "#0c0c0c"),
    ("--sidebar-text", "#ffffff"),
    ("--header-bg", "#1f1f1f"),
    ("--header-text", "#ffffff"),
    ("--card-bg", "#1f1f1f"),
    ("--shadow", "0 2px 8px rgba(0, 0, 0, 0.45)"),
];

impl ThemeName {
    pub const ALL: [ThemeName; 2] = [ThemeName::Light, ThemeName::Dark];

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Light => "light",
            ThemeName::Dark => "dark",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ThemeName::Light => ThemeName::Dark,
            ThemeName::Dark => ThemeName::Light,
        }
    }

    /// CSS custom properties applied to the document root.
    pub fn palette(&self) -> &'static [(&'static str, &'static str)] {
        match self {
            ThemeName::Light => LIGHT_PALETTE,
            ThemeName::Dark => DARK_PALETTE,
        }
    }

    pub fn from_system(prefers_dark: bool) -> Self {
        if prefers_dark {
            ThemeName::Dark
        } else {
            ThemeName::Light
        }
    }
}

impl FromStr for ThemeName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(ThemeName::Light),
            "dark" => Ok(ThemeName::Dark),
            other => Err(DomainError::UnknownTheme(other.to_string())),
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
