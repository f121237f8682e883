use std::env;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use url::Url;

use crate::db::{self, PgPool, DEFAULT_MAX_POOL_SIZE};

pub const DEFAULT_STAGE: &str = "dev1";

#[derive(Clone, Debug)]
pub struct StoreConfig {
    pub database_url: String,
    pub database_max_pool_size: u32,
    pub stage: String,
    pub migrations_dir: Option<PathBuf>,
}

impl StoreConfig {
    pub fn from_env() -> Result<Self> {
        let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let database_max_pool_size = match env::var("DATABASE_MAX_POOL_SIZE") {
            Ok(value) => value
                .parse()
                .context("DATABASE_MAX_POOL_SIZE must be a positive integer")?,
            Err(_) => DEFAULT_MAX_POOL_SIZE,
        };
        let stage = env::var("STAGE").unwrap_or_else(|_| DEFAULT_STAGE.to_string());
        let migrations_dir = env::var("MIGRATIONS_DIR").ok().map(PathBuf::from);

        Ok(Self {
            database_url,
            database_max_pool_size,
            stage,
            migrations_dir,
        })
    }

    /// Loads `.env.<stage>` and then `.env` from the working directory before
    /// reading the environment. Nothing overrides a variable that is already
    /// set, so process env beats the stage file and the stage file beats `.env`.
    pub fn for_stage(stage: &str) -> Result<Self> {
        let dir = env::current_dir().context("failed to resolve working directory")?;
        let found = load_stage_env(&dir, stage)?;
        tracing::debug!(stage, found, "loaded stage settings");
        dotenv::dotenv().ok();

        let mut config = Self::from_env()?;
        config.stage = stage.to_string();
        Ok(config)
    }

    pub fn init_pool(&self) -> Result<PgPool> {
        db::init_pool_with_size(&self.database_url, self.database_max_pool_size)
    }

    pub fn redacted_database_url(&self) -> String {
        redact_database_url(&self.database_url)
    }
}

/// `-s/--stage` first, then `STAGE`, then [`DEFAULT_STAGE`].
pub fn resolve_stage(requested: Option<&str>) -> String {
    requested
        .map(str::to_owned)
        .or_else(|| env::var("STAGE").ok())
        .unwrap_or_else(|| DEFAULT_STAGE.to_string())
}

pub fn stage_env_file(stage: &str) -> String {
    format!(".env.{stage}")
}

/// Returns whether `dir/.env.<stage>` existed.
pub fn load_stage_env(dir: &Path, stage: &str) -> Result<bool> {
    let path = dir.join(stage_env_file(stage));
    match dotenv::from_path(&path) {
        Ok(()) => Ok(true),
        Err(dotenv::Error::Io(err)) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err).with_context(|| format!("failed to load {}", path.display())),
    }
}

fn redact_database_url(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(mut parsed) => {
            if parsed.password().is_some() {
                let _ = parsed.set_password(Some("*****"));
            }
            parsed.to_string()
        }
        Err(_) => "***".to_string(),
    }
}
