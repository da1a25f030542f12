//! Which search backend a session talks to.

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Selects between the live results page and the offline demo catalogue.
///
/// Both backends sit behind the same provider trait, so nothing past
/// construction depends on the mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    /// Scrape the live site
    #[default]
    #[value(alias = "prod")]
    Production,
    /// Serve canned results without network access
    #[value(alias = "dev")]
    Development,
}

impl RuntimeMode {
    pub fn is_development(self) -> bool {
        self == Self::Development
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }

    /// Name of the provider backing this mode, for logs.
    pub fn provider_name(self) -> &'static str {
        match self {
            Self::Production => "youtube",
            Self::Development => "demo",
        }
    }
}

impl fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Production => "production",
            Self::Development => "development",
        })
    }
}

/// Accepts the same spellings as the `--mode` flag, ignoring case.
impl FromStr for RuntimeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s.trim(), true)
            .map_err(|_| format!("unknown runtime mode '{s}', expected production or development"))
    }
}
