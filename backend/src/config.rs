use std::path::PathBuf;
use shared::{IdentitySource, DEFAULT_LATEST_COMIC, STRIPS_PER_PAGE};
use shared::models::ComicId;
use shared::requester::UnknownIdentitySource;
use crate::store::DEFAULT_DATABASE_FILE;

pub const DEFAULT_STATIC_DIR: &str = "static";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be a positive integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
    #[error(transparent)]
    IdentitySource(#[from] UnknownIdentitySource),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_path: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub latest_comic: ComicId,
    pub static_dir: PathBuf,
    pub identity_source: IdentitySource,
    pub strips_per_page: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_FILE),
            catalog_path: None,
            latest_comic: DEFAULT_LATEST_COMIC,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            identity_source: IdentitySource::default(),
            strips_per_page: STRIPS_PER_PAGE,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from `lookup`; unset or blank variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(path) = var("DATABASE_PATH") {
            config.database_path = PathBuf::from(path);
        }
        config.catalog_path = var("CATALOG_PATH").map(PathBuf::from);
        if let Some(dir) = var("STATIC_DIR") {
            config.static_dir = PathBuf::from(dir);
        }
        if let Some(value) = var("LATEST_COMIC") {
            config.latest_comic = parse_positive("LATEST_COMIC", value)?;
        }
        if let Some(value) = var("STRIPS_PER_PAGE") {
            config.strips_per_page = parse_positive("STRIPS_PER_PAGE", value)?;
        }
        if let Some(value) = var("IDENTITY_SOURCE") {
            config.identity_source = value.parse()?;
        }

        Ok(config)
    }
}

fn parse_positive<T>(name: &'static str, value: String) -> Result<T, ConfigError>
where
    T: std::str::FromStr + PartialOrd + From<u8>,
{
    match value.trim().parse::<T>() {
        Ok(n) if n >= T::from(1) => Ok(n),
        _ => Err(ConfigError::InvalidNumber { name, value }),
    }
}
