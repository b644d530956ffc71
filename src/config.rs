use std::{fs, io::ErrorKind, path::Path};

use anyhow::{Result, anyhow};
use log::warn;
use toml::{Table, Value};
use url::Url;

/// Connection settings of the remote Pokemon source, `[pokeapi]` section
#[derive(Clone, Debug, PartialEq)]
pub struct PokeApiConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: Url,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Language code of the characteristic text to pick
    pub language: String,
}

/// Application configuration, read from `config.toml`
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub pokeapi: PokeApiConfig,

    /// Page size used until the host reports its viewport width
    pub page_size: u32,

    /// Visible ratio of the sentinel above which more Pokemon are loaded
    pub loader_threshold: f64,

    /// Whether the home view observes the sentinel at all
    pub auto_load: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            pokeapi: PokeApiConfig {
                base_url: Url::parse("https://pokeapi.co/api/v2").expect("static url is valid"),
                timeout_secs: 30,
                language: "en".to_string(),
            },
            page_size: 20,
            loader_threshold: 0.0,
            auto_load: true,
        }
    }
}

fn section<'a>(cfg: &'a Table, name: &str) -> Result<Option<&'a Table>> {
    match cfg.get(name) {
        None => Ok(None),
        Some(Value::Table(table)) => Ok(Some(table)),
        Some(_) => Err(anyhow!("[{}] must be a table", name)),
    }
}

impl AppConfig {
    /// Loads the configuration from the TOML file at `path`.
    /// A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("{} not found, using default configuration", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Parses a configuration document, absent keys keep their defaults
    pub fn parse(contents: &str) -> Result<Self> {
        let cfg = contents.parse::<Table>()?;
        let mut config = Self::default();

        if let Some(pokeapi) = section(&cfg, "pokeapi")? {
            if let Some(base_url) = pokeapi.get("base_url") {
                let base_url = base_url
                    .as_str()
                    .ok_or(anyhow!("pokeapi.base_url must be a string"))?;
                config.pokeapi.base_url = Url::parse(base_url)?;
            }
            if let Some(timeout) = pokeapi.get("timeout_secs") {
                let timeout = timeout
                    .as_integer()
                    .filter(|t| *t > 0)
                    .ok_or(anyhow!("pokeapi.timeout_secs must be a positive integer"))?;
                config.pokeapi.timeout_secs = timeout as u64;
            }
            if let Some(language) = pokeapi.get("language") {
                config.pokeapi.language = language
                    .as_str()
                    .ok_or(anyhow!("pokeapi.language must be a string"))?
                    .to_string();
            }
        }

        if let Some(list) = section(&cfg, "list")? {
            if let Some(page_size) = list.get("page_size") {
                let page_size = page_size
                    .as_integer()
                    .filter(|p| *p > 0 && *p <= u32::MAX as i64)
                    .ok_or(anyhow!("list.page_size must be a positive integer"))?;
                config.page_size = page_size as u32;
            }
        }

        if let Some(loader) = section(&cfg, "loader")? {
            if let Some(threshold) = loader.get("threshold") {
                // integers are accepted so `threshold = 0` reads naturally
                let threshold = threshold
                    .as_float()
                    .or_else(|| threshold.as_integer().map(|t| t as f64))
                    .filter(|t| (0.0..=1.0).contains(t))
                    .ok_or(anyhow!("loader.threshold must be a number between 0 and 1"))?;
                config.loader_threshold = threshold;
            }
            if let Some(auto_load) = loader.get("auto_load") {
                config.auto_load = auto_load
                    .as_bool()
                    .ok_or(anyhow!("loader.auto_load must be a boolean"))?;
            }
        }

        Ok(config)
    }
}

/// How many Pokemon a page holds for a viewport of the given width
pub fn page_size_for_width(width: u32) -> u32 {
    match width {
        w if w > 3000 => 44,
        w if w > 2200 => 28,
        w if w > 1420 && w <= 1700 => 16,
        w if w < 1420 => 8,
        _ => 20,
    }
}
