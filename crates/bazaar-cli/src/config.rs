//! Configuration loaded from file + environment.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use bazaar_facets::KeywordMode;
use serde::Deserialize;

use crate::params::{parse_sort, SearchDefaults};

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "BAZAAR_CONFIG";
/// File picked up from the working directory when nothing else is named.
pub const DEFAULT_CONFIG_FILE: &str = "bazaar.toml";

const DEFAULT_DISPLAY_LIMIT: usize = 20;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct BazaarConfig {
    pub logging: LoggingSection,
    pub search: SearchSection,
    pub facets: FacetsSection,
}

impl BazaarConfig {
    /// Loads configuration from disk and `BAZAAR_`-prefixed environment
    /// variables, e.g. `BAZAAR_SEARCH__DEFAULT_LIMIT=50`.
    ///
    /// The file is `explicit` if given, else `$BAZAAR_CONFIG`, else
    /// `bazaar.toml` when present. A named file that does not exist is an
    /// error; a missing default file is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let named = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));

        let mut builder = config::Config::builder();

        match named {
            Some(path) => {
                if !path.exists() {
                    bail!("config file {} does not exist", path.display());
                }
                builder = builder.add_source(config::File::from(path));
            }
            None => {
                if Path::new(DEFAULT_CONFIG_FILE).exists() {
                    builder =
                        builder.add_source(config::File::from(PathBuf::from(DEFAULT_CONFIG_FILE)));
                }
            }
        }

        builder = builder.add_source(
            config::Environment::with_prefix("BAZAAR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder.build().context("failed to read configuration")?;
        let mut config: Self = settings
            .try_deserialize()
            .context("invalid configuration")?;

        if config.logging.level.trim().is_empty() {
            config.logging.level = "info".to_string();
        }

        Ok(config)
    }

    /// Resolves the search section into parser defaults.
    pub fn search_defaults(&self) -> Result<SearchDefaults> {
        let sort = match self.search.default_sort.as_deref() {
            Some(sort) => parse_sort(sort).context("invalid search.default_sort")?,
            None => Vec::new(),
        };
        Ok(SearchDefaults {
            keyword_mode: self.search.default_keyword_mode,
            sort,
            limit: self.search.default_limit,
        })
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingSection {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SearchSection {
    pub default_keyword_mode: KeywordMode,
    pub default_limit: Option<usize>,
    pub default_sort: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FacetsSection {
    /// Values shown per facet in text output.
    pub display_limit: usize,
}

impl Default for FacetsSection {
    fn default() -> Self {
        Self {
            display_limit: DEFAULT_DISPLAY_LIMIT,
        }
    }
}
