use std::path::{Path, PathBuf};

use diesel::migration::{Migration, MigrationSource, Result as DieselMigrationResult};
use diesel::pg::{Pg, PgConnection};
use diesel_migrations::{
    embed_migrations, EmbeddedMigrations, FileBasedMigrations, MigrationHarness,
};
use thiserror::Error;
use tracing::info;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

#[derive(Debug, Error)]
pub enum MigrationError {
    #[error("failed to load migrations from {path}: {message}")]
    Load { path: PathBuf, message: String },
    #[error("migration failed: {0}")]
    Run(String),
}

pub type MigrationResult<T> = Result<T, MigrationError>;

fn run_error(err: Box<dyn std::error::Error + Send + Sync>) -> MigrationError {
    MigrationError::Run(err.to_string())
}

/// Where migrations are read from: compiled into the binary, or a directory
/// picked at runtime.
#[derive(Debug, Clone)]
pub enum Migrations {
    Embedded,
    Directory(PathBuf),
}

impl Migrations {
    pub fn from_dir(path: impl AsRef<Path>) -> MigrationResult<Self> {
        let path = path.as_ref();
        FileBasedMigrations::from_path(path).map_err(|err| MigrationError::Load {
            path: path.to_path_buf(),
            message: err.to_string(),
        })?;
        Ok(Migrations::Directory(path.to_path_buf()))
    }

    pub fn describe(&self) -> String {
        match self {
            Migrations::Embedded => "embedded".to_string(),
            Migrations::Directory(path) => path.display().to_string(),
        }
    }
}

impl MigrationSource<Pg> for Migrations {
    fn migrations(&self) -> DieselMigrationResult<Vec<Box<dyn Migration<Pg>>>> {
        match self {
            Migrations::Embedded => MigrationSource::<Pg>::migrations(&MIGRATIONS),
            Migrations::Directory(path) => {
                let dir = FileBasedMigrations::from_path(path)?;
                MigrationSource::<Pg>::migrations(&dir)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    pub applied: Vec<String>,
    pub pending: Vec<String>,
}

/// Applies every pending migration and returns the versions that ran.
pub fn run_pending(conn: &mut PgConnection, source: &Migrations) -> MigrationResult<Vec<String>> {
    let versions = conn
        .run_pending_migrations(source.clone())
        .map_err(run_error)?
        .into_iter()
        .map(|version| version.to_string())
        .collect::<Vec<_>>();

    if versions.is_empty() {
        info!(component = "migrate", "schema is up to date");
    }
    for version in &versions {
        info!(component = "migrate", %version, "applied migration");
    }
    Ok(versions)
}

/// Names of the migrations a run would apply, without applying them.
pub fn pending(conn: &mut PgConnection, source: &Migrations) -> MigrationResult<Vec<String>> {
    let names = conn
        .pending_migrations(source.clone())
        .map_err(run_error)?
        .iter()
        .map(|migration| migration.name().to_string())
        .collect();
    Ok(names)
}

pub fn applied(conn: &mut PgConnection) -> MigrationResult<Vec<String>> {
    let versions = MigrationHarness::<Pg>::applied_migrations(conn)
        .map_err(run_error)?
        .into_iter()
        .map(|version| version.to_string())
        .collect();
    Ok(versions)
}

pub fn status(conn: &mut PgConnection, source: &Migrations) -> MigrationResult<MigrationStatus> {
    Ok(MigrationStatus {
        applied: applied(conn)?,
        pending: pending(conn, source)?,
    })
}

pub fn revert_last(conn: &mut PgConnection, source: &Migrations) -> MigrationResult<String> {
    let version = conn
        .revert_last_migration(source.clone())
        .map_err(run_error)?
        .to_string();
    info!(component = "migrate", %version, "reverted migration");
    Ok(version)
}
